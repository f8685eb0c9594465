use thiserror::Error;

/// Errors raised while configuring and running the downloader.
///
/// Everything here is fatal and propagates straight to the caller; the only
/// recoverable condition in the whole workflow (a search result with missing
/// metadata) is logged and skipped where it occurs instead of surfacing as an
/// error.
#[derive(Error, Debug)]
pub(crate) enum FlickrError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to fetch data from Flickr API (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected API response format: {0}")]
    MalformedResponse(String),

    #[error("Failed to fetch image from URL {url} (status {status})")]
    Download { url: String, status: u16 },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) type FlickrResult<T> = Result<T, FlickrError>;
