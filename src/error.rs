use pixel_stylize::StylizeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Stylize error: {0}")]
    Stylize(#[from] StylizeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::DecodingError> for RenderError {
    fn from(e: png::DecodingError) -> Self {
        RenderError::Decode(e.to_string())
    }
}

impl From<png::EncodingError> for RenderError {
    fn from(e: png::EncodingError) -> Self {
        RenderError::Encode(e.to_string())
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(e: serde_yaml::Error) -> Self {
        RenderError::Config(e.to_string())
    }
}
