use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Supported image formats
pub const SUPPORTED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// Maximum image size in bytes (10MB), also the request body limit
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Image received from the upload form. Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Build from a multipart part, inferring the type from the filename when
    /// the browser did not send one
    pub fn new(filename: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = match content_type {
            Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => ct.to_string(),
            _ => infer_content_type(&filename).to_string(),
        };
        Self {
            filename,
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_supported_type(&self) -> bool {
        SUPPORTED_IMAGE_TYPES.contains(&self.content_type.as_str())
    }

    /// `data:` URL accepted by OpenAI-compatible vision endpoints
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

/// Image analysis request (upload + prompt)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAnalysisRequest {
    pub image: UploadedImage,
    pub prompt: String,
}

/// Infer content type from the filename extension
pub fn infer_content_type(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
