use crate::foundation::core::Anchor;
use crate::foundation::error::{VttError, VttResult};
use crate::items::StoreItem;
use crate::store::SceneStore;
use crate::store::bundle::SceneBundle;

/// Store that keeps every submission in memory, for tests and dry runs.
#[derive(Debug)]
pub struct InMemoryStore {
    ready: bool,
    density: f64,
    anchor: Option<Anchor>,
    fail_on_batch: Option<usize>,
    batches: Vec<Vec<StoreItem>>,
    scenes: Vec<SceneBundle>,
    fog_filled: Option<bool>,
    submissions: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(150.0)
    }
}

impl InMemoryStore {
    /// Create a ready store reporting `density` pixels per grid cell.
    pub fn new(density: f64) -> Self {
        Self {
            ready: true,
            density,
            anchor: None,
            fail_on_batch: None,
            batches: Vec::new(),
            scenes: Vec::new(),
            fog_filled: None,
            submissions: 0,
        }
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    /// Reject the batch with 0-based index `idx` (and nothing else).
    pub fn failing_on_batch(mut self, idx: usize) -> Self {
        self.fail_on_batch = Some(idx);
        self
    }

    /// Accepted batches in submission order.
    pub fn batches(&self) -> &[Vec<StoreItem>] {
        &self.batches
    }

    /// Accepted items across all batches, in submission order.
    pub fn items(&self) -> Vec<&StoreItem> {
        self.batches.iter().flatten().collect()
    }

    pub fn scenes(&self) -> &[SceneBundle] {
        &self.scenes
    }

    pub fn fog_filled(&self) -> Option<bool> {
        self.fog_filled
    }

    /// Number of batch and scene submissions attempted, accepted or not.
    pub fn submissions(&self) -> usize {
        self.submissions
    }
}

impl SceneStore for InMemoryStore {
    fn is_ready(&self) -> VttResult<bool> {
        Ok(self.ready)
    }

    fn pixel_density(&self) -> VttResult<f64> {
        Ok(self.density)
    }

    fn selection_anchor(&self) -> VttResult<Option<Anchor>> {
        Ok(self.anchor)
    }

    fn submit_batch(&mut self, items: &[StoreItem]) -> VttResult<()> {
        let idx = self.batches.len();
        self.submissions += 1;
        if self.fail_on_batch == Some(idx) {
            return Err(VttError::transport(format!("batch {idx} rejected")));
        }
        self.batches.push(items.to_vec());
        Ok(())
    }

    fn submit_scene(&mut self, bundle: SceneBundle) -> VttResult<()> {
        self.submissions += 1;
        self.scenes.push(bundle);
        Ok(())
    }

    fn set_fog_filled(&mut self, filled: bool) -> VttResult<()> {
        self.fog_filled = Some(filled);
        Ok(())
    }
}
