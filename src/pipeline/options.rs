use crate::assets::CompressionMode;
use crate::foundation::error::{VttError, VttResult};
use crate::normalize::NormalizeOpts;
use crate::store::DEFAULT_BATCH_SIZE;

/// Caller-selected settings for one import run.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    pub compression: CompressionMode,
    pub batch_size: usize,
    /// Closed state for legacy doors, which carry none of their own.
    pub legacy_doors_closed: bool,
    /// Place added items at the selected item's position and scale.
    pub anchor_from_selection: bool,
    /// Prefix for generated item ids. `None` picks a fresh random prefix per run,
    /// so repeated imports into one scene never reuse an id.
    pub id_prefix: Option<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMode::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            legacy_doors_closed: true,
            anchor_from_selection: false,
            id_prefix: None,
        }
    }
}

impl ImportOptions {
    pub fn validate(&self) -> VttResult<()> {
        if self.batch_size == 0 {
            return Err(VttError::validation("batch_size must be > 0"));
        }
        if self
            .id_prefix
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            return Err(VttError::validation("id_prefix must be non-empty"));
        }
        Ok(())
    }

    /// Id prefix for one run: the configured one, else a new random one.
    pub fn run_id_prefix(&self) -> String {
        match &self.id_prefix {
            Some(prefix) => prefix.clone(),
            None => uuid::Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn normalize_opts(&self) -> NormalizeOpts {
        NormalizeOpts {
            legacy_doors_closed: self.legacy_doors_closed,
        }
    }
}
