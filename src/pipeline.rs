pub mod importer;
pub mod inspect;
pub mod options;

pub use importer::{ImageReport, ImportReport, Importer, KNOWN_EXTENSIONS, scene_name};
pub use inspect::{DocumentSummary, inspect};
pub use options::ImportOptions;
