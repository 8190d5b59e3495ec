use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageResult};

use crate::assets::payload::ImageKind;
use crate::foundation::error::{VttError, VttResult};

/// JPEG quality used when an encode is requested without a target quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Encodes a decoded raster into a container.
///
/// `quality` is a percent in `1..=100` and only affects lossy containers.
pub trait RasterEncoder {
    fn encode(
        &self,
        image: &DynamicImage,
        kind: ImageKind,
        quality: Option<u8>,
    ) -> VttResult<Vec<u8>>;
}

/// Encoder backed by the `image` crate codecs. PNG and WebP are lossless.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateEncoder;

impl RasterEncoder for ImageCrateEncoder {
    fn encode(
        &self,
        image: &DynamicImage,
        kind: ImageKind,
        quality: Option<u8>,
    ) -> VttResult<Vec<u8>> {
        let mut buf = Vec::new();
        let res: ImageResult<()> = match kind {
            ImageKind::Jpeg => {
                let q = quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(1, 100);
                image
                    .to_rgb8()
                    .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, q))
            }
            ImageKind::Png => image.write_with_encoder(PngEncoder::new(&mut buf)),
            ImageKind::WebP => image
                .to_rgba8()
                .write_with_encoder(WebPEncoder::new_lossless(&mut buf)),
        };
        res.map_err(|e| VttError::image_decode(format!("encode {}: {e}", kind.mime())))?;
        Ok(buf)
    }
}
