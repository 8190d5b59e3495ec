pub mod build;
pub mod primitive;
pub mod style;

pub use build::{build_doors, build_walls, door_primitive, wall_primitive};
pub use primitive::{
    COMMAND_LINE, COMMAND_MOVE, DOOR_METADATA_KEY, DoorMeta, PathCommand, Primitive,
    PrimitiveKind, StoreItem,
};
pub use style::{Layer, Style};
