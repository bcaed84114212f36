pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid shape: token {index} ({token:?}) is not a non-negative integer")]
    InvalidShape { token: String, index: usize },

    #[error("Degenerate shape: {reason}")]
    DegenerateShape { reason: String },

    #[error("Shape has {rank} dimensions; at most {max} are supported")]
    TooManyDimensions { rank: usize, max: usize },

    #[error("Shape has more than {max} elements")]
    TooManyElements { max: u128 },

    #[error("Canvas of {width}x{height}px is too large to draw")]
    CanvasTooLarge { width: f64, height: f64 },

    #[error("Invalid color: {value:?}")]
    InvalidColor { value: String },

    #[error("Invalid style: {message}")]
    InvalidStyle { message: String },

    #[error("Invalid style JSON: {0}")]
    StyleJson(#[from] serde_json::Error),
}
