pub mod encode;
pub mod optimize;
pub mod payload;

pub use encode::{DEFAULT_JPEG_QUALITY, ImageCrateEncoder, RasterEncoder};
pub use optimize::{
    CompressionMode, Limits, MAX_QUALITY_ATTEMPTS, OptimizedImage, QUALITY_FLOOR, QUALITY_START,
    QUALITY_STEP, QualitySearch, fit_dimensions, optimize_image, optimize_image_with,
    search_quality,
};
pub use payload::{ImageKind, decode_payload, sniff};
