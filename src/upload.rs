use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

use crate::error::CritiqueError;

/// MIME types the critique request will carry. The file input already
/// restricts the picker to jpg/jpeg/png; this is the server-side mirror of
/// that restriction.
const ALLOWED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// One uploaded photo, held in memory for the duration of the request. Never
/// persisted; a new upload simply replaces it.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: Option<String>,
    /// Decoded (width, height), used only for the preview caption.
    pub dimensions: Option<(u32, u32)>,
}

/// Browsers and older tooling report JPEGs under a few aliases; the Gemini
/// API only accepts the canonical form.
fn normalize_mime_type(mime_type: &str) -> String {
    let lowered = mime_type.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_string(),
        _ => lowered,
    }
}

fn detect_mime_type(data: &[u8]) -> Option<String> {
    infer::get(data).map(|kind| kind.mime_type().to_string())
}

fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let lowered = file_name.to_ascii_lowercase();
    if lowered.ends_with(".jpg") || lowered.ends_with(".jpeg") {
        Some("image/jpeg")
    } else if lowered.ends_with(".png") {
        Some("image/png")
    } else {
        None
    }
}

fn is_allowed(mime_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime_type)
}

impl UploadedImage {
    /// Builds the request-scoped image payload from one multipart field.
    ///
    /// MIME resolution order: the declared content type when it normalizes
    /// into the allowed set, then content sniffing, then the file extension.
    /// Empty payloads are treated the same as no upload at all.
    pub fn from_upload(
        file_name: Option<String>,
        declared_mime: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, CritiqueError> {
        if bytes.is_empty() {
            return Err(CritiqueError::MissingFile);
        }

        let declared = declared_mime
            .as_deref()
            .map(normalize_mime_type)
            .filter(|mime| is_allowed(mime));
        let sniffed = detect_mime_type(&bytes)
            .map(|mime| normalize_mime_type(&mime))
            .filter(|mime| is_allowed(mime));
        let from_name = file_name
            .as_deref()
            .and_then(mime_from_extension)
            .map(str::to_string);

        let mime_type = match declared.or(sniffed).or(from_name) {
            Some(mime) => mime,
            None => {
                let reported = declared_mime.unwrap_or_else(|| "unknown".to_string());
                return Err(CritiqueError::UnsupportedImageType(reported));
            }
        };

        let dimensions = match image::load_from_memory(&bytes) {
            Ok(decoded) => Some((decoded.width(), decoded.height())),
            Err(err) => {
                // Preview-only metadata; a photo the image crate cannot
                // decode still goes to the model as-is.
                debug!("Could not decode upload for preview dimensions: {err}");
                None
            }
        };

        Ok(UploadedImage {
            bytes,
            mime_type,
            file_name,
            dimensions,
        })
    }

    /// Inline preview source for the result page.
    pub fn as_data_uri(&self) -> String {
        let encoded = general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime_type, encoded)
    }
}
