pub mod geometry;
pub mod pass;

pub use geometry::{CanonicalGeometry, DoorSegment, Resolution, WallSegment};
pub use pass::{NormalizeOpts, NormalizedImport, normalize};
