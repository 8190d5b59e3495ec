//! vttimport turns virtual-tabletop map exports into scene items.
//!
//! Two export schemas are understood: Universal VTT (`.uvtt` / `.dd2vtt`) and
//! Foundry-style wall lists. Both normalize into one grid-space geometry model,
//! which is scaled into wall and door path items and handed to a [`SceneStore`].
//!
//! - [`Importer::add_to_scene`] appends walls and doors to the current scene in batches
//! - [`Importer::create_scene`] builds a new scene from a UVTT map image plus its geometry
#![forbid(unsafe_code)]

pub mod assets;
mod foundation;
pub mod items;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod store;

pub use crate::foundation::core::{Anchor, BezPath, Point, Vec2};
pub use crate::foundation::error::{VttError, VttResult};

pub use crate::assets::{CompressionMode, ImageKind, OptimizedImage, optimize_image};
pub use crate::items::{Primitive, PrimitiveKind, StoreItem};
pub use crate::normalize::{CanonicalGeometry, DoorSegment, Resolution, WallSegment};
pub use crate::pipeline::{DocumentSummary, ImportOptions, ImportReport, Importer, inspect};
pub use crate::schema::{SchemaKind, SourceDocument};
pub use crate::store::{
    DirectoryStore, InMemoryStore, Notifier, SceneBundle, SceneStore, Severity, TracingNotifier,
};
