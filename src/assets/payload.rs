use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::foundation::error::{VttError, VttResult};

/// Raster container of a map image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Png,
    WebP,
    Jpeg,
}

impl ImageKind {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Jpeg => "jpg",
        }
    }
}

const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

/// Guess the container from leading bytes. Unknown signatures read as PNG; the
/// result only picks the output type and file name.
pub fn sniff(bytes: &[u8]) -> ImageKind {
    if bytes.starts_with(&PNG_MAGIC) {
        return ImageKind::Png;
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return ImageKind::WebP;
    }
    ImageKind::Png
}

/// Standard alphabet; trailing `=` padding may be present or missing.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the base64 `image` field of a document. Embedded whitespace is ignored.
pub fn decode_payload(encoded: &str) -> VttResult<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    PAYLOAD_ENGINE
        .decode(compact.as_bytes())
        .map_err(|e| VttError::image_decode(format!("invalid base64 image payload: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/payload.rs"]
mod tests;
