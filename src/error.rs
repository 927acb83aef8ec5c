use thiserror::Error;

/// Failures from [`LogDir::save_data`](crate::LogDir::save_data) that are not
/// plain filesystem errors.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("unsupported file extension `{extension}` (expected one of: {supported})")]
    UnsupportedFormat {
        extension: String,
        supported: String,
    },
    #[error("serializing {format} data: {message}")]
    Serialize {
        format: &'static str,
        message: String,
    },
}
