pub mod batch;
pub mod bundle;
pub mod directory;
pub mod memory;

use crate::foundation::core::Anchor;
use crate::foundation::error::VttResult;
use crate::items::StoreItem;

pub use batch::{DEFAULT_BATCH_SIZE, emit_in_batches};
pub use bundle::{GridType, ImageUpload, SceneBundle};
pub use directory::DirectoryStore;
pub use memory::InMemoryStore;

/// Remote scene the importer writes into.
///
/// Calls are issued one at a time; the importer never has two submissions
/// outstanding.
pub trait SceneStore {
    /// Whether the scene can accept items right now.
    fn is_ready(&self) -> VttResult<bool>;
    /// Grid-to-pixel multiplier of the target scene.
    fn pixel_density(&self) -> VttResult<f64>;
    /// Position and scale of the currently selected item, if any.
    fn selection_anchor(&self) -> VttResult<Option<Anchor>>;
    /// Append items to the current scene.
    fn submit_batch(&mut self, items: &[StoreItem]) -> VttResult<()>;
    /// Create a new scene from a bundle.
    fn submit_scene(&mut self, bundle: SceneBundle) -> VttResult<()>;
    fn set_fog_filled(&mut self, filled: bool) -> VttResult<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// User-facing feedback channel. Failures are reported but never change an
/// import's outcome.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity) -> VttResult<()>;
}

/// Notifier that forwards messages to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) -> VttResult<()> {
        match severity {
            Severity::Info | Severity::Success => tracing::info!(?severity, "{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Error => tracing::error!("{message}"),
        }
        Ok(())
    }
}
