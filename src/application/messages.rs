//! User-facing chat texts.

/// Plugin has no usable endpoint.
pub const NOT_CONFIGURED: &str =
    "The API URL is not configured. Ask an administrator to set `api_url`.";

/// Invocation carried no images.
pub const NO_IMAGES: &str = "Send /onelast together with an image, or reply to an image.";

/// Option override was not a JSON object.
pub const INVALID_OPTIONS: &str = "Invalid options. Provide a valid JSON object, for example:\n/onelast {\"watermark\":true,\"hajimei\":true}";

/// Unexpected failure of the whole invocation.
pub const INTERNAL_ERROR: &str =
    "The plugin hit an unknown error. Ask an administrator to check the logs.";

/// Batch accepted as-is.
#[must_use]
pub fn started(count: usize) -> String {
    format!("Received {count} image(s), generating, please wait...")
}

/// Batch cut down to the limit.
#[must_use]
pub fn truncated(found: usize, max: usize) -> String {
    format!(
        "Detected {found} images, more than the maximum of {max}. Only the first {max} will be processed."
    )
}

/// Batch refused for exceeding the limit.
#[must_use]
pub fn rejected(found: usize, max: usize) -> String {
    format!("Detected {found} images, more than the maximum of {max}. Nothing was processed.")
}

/// Image bytes could not be obtained.
#[must_use]
pub fn download_failed(index: usize) -> String {
    format!("Image {index} download failed.")
}

/// Image did not fit the size limit.
#[must_use]
pub fn too_large(index: usize, max_mb: u64) -> String {
    format!("Image {index} failed: still larger than {max_mb}MB after compression.")
}

/// Service returned no image.
#[must_use]
pub fn api_failed(index: usize) -> String {
    format!("Image {index} API request failed, no image returned.")
}

/// Service did not answer in time.
#[must_use]
pub fn timed_out(index: usize) -> String {
    format!("Image {index} API request timed out.")
}

/// Any other per-image failure.
#[must_use]
pub fn unknown_error(index: usize, message: &str) -> String {
    format!("Image {index} hit an unknown error: {message}")
}
