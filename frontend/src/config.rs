//! Application configuration.
//!
//! Centralized configuration for the ImageClass frontend.
//! The page is served by the same origin as the prediction endpoint,
//! so the endpoint is a relative path.

/// Prediction endpoint.
///
/// Receives a multipart body with the image under [`IMAGE_FIELD`].
pub const PREDICT_ENDPOINT: &str = "/predict";

/// Multipart field name carrying the image bytes.
pub const IMAGE_FIELD: &str = "image";

/// Maximum file size for upload (in bytes).
///
/// 16 MiB limit, inclusive.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// MIME prefix a candidate file must carry to be accepted.
pub const ACCEPTED_MIME_PREFIX: &str = "image/";

/// Shown when the prediction request fails before a usable answer comes back.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Shown when the service reports a failure without an explanation.
pub const DEFAULT_PREDICTION_ERROR: &str = "Prediction failed";

/// Classes the bundled model recognises, for the hero subtitle.
pub const KNOWN_CLASSES: [&str; 10] = [
    "airplane",
    "automobile",
    "bird",
    "cat",
    "deer",
    "dog",
    "frog",
    "horse",
    "ship",
    "truck",
];
