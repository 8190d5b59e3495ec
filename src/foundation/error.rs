pub type VttResult<T> = Result<T, VttError>;

#[derive(thiserror::Error, Debug)]
pub enum VttError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported for scene creation: {0}")]
    UnsupportedForSceneCreation(String),

    #[error("no valid grid resolution data found in the file")]
    MissingResolution,

    #[error("image decode error: {0}")]
    ImageDecode(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("scene is not ready")]
    SceneNotReady,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("json error: {0}")]
    Json(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VttError {
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    pub fn unsupported_for_scene(msg: impl Into<String>) -> Self {
        Self::UnsupportedForSceneCreation(msg.into())
    }

    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }
}

impl From<serde_json::Error> for VttError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
