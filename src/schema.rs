pub mod canonical;
pub mod detect;
pub mod legacy;

pub use canonical::{CanonicalDocument, Portal, RawResolution};
pub use detect::{SchemaKind, SourceDocument, detect, has_map_image, parse_document, strip_image};
pub use legacy::{LegacyDocument, LegacyWall, LegacyWallKind};
