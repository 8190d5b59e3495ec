use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView as _};

use crate::assets::encode::{ImageCrateEncoder, RasterEncoder};
use crate::assets::payload::{ImageKind, sniff};
use crate::foundation::core::{BYTES_PER_MB, PIXELS_PER_MP};
use crate::foundation::error::{VttError, VttResult};

/// How hard the map image is squeezed before upload.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    /// Keep the original container; re-encode only when over the size ceiling.
    None,
    #[default]
    Standard,
    High,
}

/// Size and resolution ceilings for one compression mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_size_bytes: u64,
    pub max_megapixels: u64,
}

impl CompressionMode {
    pub fn limits(self) -> Limits {
        match self {
            Self::None => Limits {
                max_size_bytes: 24 * BYTES_PER_MB,
                max_megapixels: 144,
            },
            Self::Standard => Limits {
                max_size_bytes: 24 * BYTES_PER_MB,
                max_megapixels: 67,
            },
            Self::High => Limits {
                max_size_bytes: 49 * BYTES_PER_MB,
                max_megapixels: 144,
            },
        }
    }
}

pub const QUALITY_START: u8 = 100;
pub const QUALITY_STEP: u8 = 5;
/// The search stops once quality is at or below this value.
pub const QUALITY_FLOOR: u8 = 10;
pub const MAX_QUALITY_ATTEMPTS: u32 =
    (QUALITY_START - QUALITY_FLOOR).div_ceil(QUALITY_STEP) as u32 + 1;

/// Outcome of the quality search.
#[derive(Clone, Debug)]
pub struct QualitySearch {
    pub bytes: Vec<u8>,
    pub quality: u8,
    pub attempts: u32,
    pub within_budget: bool,
}

/// Encode at decreasing quality until the output fits `max_bytes` or the floor is hit.
///
/// Each attempt sees the size of the previous one, so this stays sequential.
pub fn search_quality(
    max_bytes: u64,
    mut encode: impl FnMut(u8) -> VttResult<Vec<u8>>,
) -> VttResult<QualitySearch> {
    let mut quality = QUALITY_START;
    let mut attempts = 0u32;
    loop {
        let bytes = encode(quality)?;
        attempts += 1;
        let size = bytes.len() as u64;
        tracing::debug!(quality, size, attempts, "encoded candidate");

        let within_budget = size <= max_bytes;
        if within_budget || quality <= QUALITY_FLOOR {
            return Ok(QualitySearch {
                bytes,
                quality,
                attempts,
                within_budget,
            });
        }
        quality = quality.saturating_sub(QUALITY_STEP).max(QUALITY_FLOOR);
    }
}

/// Dimensions after fitting `width x height` under `max_megapixels`, aspect preserved.
pub fn fit_dimensions(width: u32, height: u32, max_megapixels: u64) -> (u32, u32) {
    let pixels = u64::from(width) * u64::from(height);
    let ceiling = max_megapixels * PIXELS_PER_MP;
    if pixels <= ceiling {
        return (width, height);
    }
    let scale = (ceiling as f64 / pixels as f64).sqrt();
    (
        (f64::from(width) * scale).floor() as u32,
        (f64::from(height) * scale).floor() as u32,
    )
}

/// Map image ready for upload, with what it took to get there.
#[derive(Clone, Debug)]
pub struct OptimizedImage {
    pub bytes: Vec<u8>,
    pub kind: ImageKind,
    pub width: u32,
    pub height: u32,
    /// Final encode quality; `None` when no quality was targeted.
    pub quality: Option<u8>,
    pub attempts: u32,
    pub resized: bool,
    pub within_budget: bool,
}

impl OptimizedImage {
    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / BYTES_PER_MB as f64
    }
}

pub fn optimize_image(bytes: &[u8], mode: CompressionMode) -> VttResult<OptimizedImage> {
    optimize_image_with(bytes, mode, &ImageCrateEncoder)
}

#[tracing::instrument(skip(bytes, encoder), fields(input_len = bytes.len()))]
pub fn optimize_image_with(
    bytes: &[u8],
    mode: CompressionMode,
    encoder: &dyn RasterEncoder,
) -> VttResult<OptimizedImage> {
    optimize_within(bytes, mode, mode.limits(), encoder)
}

fn optimize_within(
    bytes: &[u8],
    mode: CompressionMode,
    limits: Limits,
    encoder: &dyn RasterEncoder,
) -> VttResult<OptimizedImage> {
    let source_kind = sniff(bytes);

    if mode == CompressionMode::None && bytes.len() as u64 <= limits.max_size_bytes {
        let (width, height) = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| VttError::image_decode(format!("read map image header: {e}")))?
            .into_dimensions()
            .map_err(|e| VttError::image_decode(format!("read map image header: {e}")))?;
        return Ok(OptimizedImage {
            bytes: bytes.to_vec(),
            kind: source_kind,
            width,
            height,
            quality: None,
            attempts: 0,
            resized: false,
            within_budget: true,
        });
    }

    let decoded = image::load_from_memory(bytes)
        .map_err(|e| VttError::image_decode(format!("decode map image: {e}")))?;
    let (img, resized) = fit_megapixels(decoded, limits.max_megapixels)?;
    let (width, height) = img.dimensions();

    let out = match mode {
        CompressionMode::None => {
            let bytes = encoder.encode(&img, source_kind, None)?;
            let within_budget = bytes.len() as u64 <= limits.max_size_bytes;
            OptimizedImage {
                bytes,
                kind: source_kind,
                width,
                height,
                quality: None,
                attempts: 1,
                resized,
                within_budget,
            }
        }
        CompressionMode::Standard | CompressionMode::High if has_translucency(&img) => {
            // JPEG has no alpha channel; lossless WebP keeps it.
            tracing::debug!("map image has transparency; encoding lossless webp");
            let bytes = encoder.encode(&img, ImageKind::WebP, None)?;
            let within_budget = bytes.len() as u64 <= limits.max_size_bytes;
            OptimizedImage {
                bytes,
                kind: ImageKind::WebP,
                width,
                height,
                quality: None,
                attempts: 1,
                resized,
                within_budget,
            }
        }
        CompressionMode::Standard | CompressionMode::High => {
            let search = search_quality(limits.max_size_bytes, |q| {
                encoder.encode(&img, ImageKind::Jpeg, Some(q))
            })?;
            OptimizedImage {
                bytes: search.bytes,
                kind: ImageKind::Jpeg,
                width,
                height,
                quality: Some(search.quality),
                attempts: search.attempts,
                resized,
                within_budget: search.within_budget,
            }
        }
    };

    if !out.within_budget {
        tracing::warn!(
            size_mb = out.size_mb(),
            limit_mb = limits.max_size_bytes / BYTES_PER_MB,
            "map image still over size ceiling"
        );
    }
    tracing::info!(
        kind = out.kind.mime(),
        width,
        height,
        quality = out.quality,
        size_mb = out.size_mb(),
        "optimized map image"
    );
    Ok(out)
}

fn has_translucency(img: &DynamicImage) -> bool {
    img.color().has_alpha() && img.pixels().any(|(_, _, p)| p.0[3] < u8::MAX)
}

fn fit_megapixels(img: DynamicImage, max_megapixels: u64) -> VttResult<(DynamicImage, bool)> {
    let (width, height) = img.dimensions();
    let (w, h) = fit_dimensions(width, height, max_megapixels);
    if w == 0 || h == 0 {
        return Err(VttError::image_decode(format!(
            "no drawing surface for a {width}x{height} image"
        )));
    }
    if (w, h) == (width, height) {
        return Ok((img, false));
    }
    tracing::debug!(width, height, w, h, "downscaling map image");
    Ok((img.resize_exact(w, h, FilterType::Triangle), true))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/optimize.rs"]
mod tests;
