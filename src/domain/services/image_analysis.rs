//! Image analysis: one upload, one prompt, one answer rendered inline

use crate::domain::models::{ImageAnalysisRequest, MAX_IMAGE_SIZE};
use crate::infrastructure::provider::{ProviderClient, ProviderError};
use crate::shared::logging::{log_image_analysis_error, log_image_analysis_start};

/// Prefix of the text shown instead of a result when analysis fails
pub const ANALYSIS_ERROR_PREFIX: &str = "Error analyzing image: ";

/// Analyze an uploaded image. Failures come back as a displayable
/// "Error analyzing image: ..." string, never as an error.
pub async fn analyze_image(provider: &dyn ProviderClient, request: &ImageAnalysisRequest) -> String {
    match try_analyze(provider, request).await {
        Ok(analysis) => analysis,
        Err(e) => {
            let message = e.to_string();
            log_image_analysis_error(&message);
            format!("{}{}", ANALYSIS_ERROR_PREFIX, message)
        }
    }
}

async fn try_analyze(
    provider: &dyn ProviderClient,
    request: &ImageAnalysisRequest,
) -> Result<String, ProviderError> {
    let image = &request.image;
    log_image_analysis_start(&image.filename, &image.content_type, image.size());

    if image.bytes.is_empty() {
        return Err(ProviderError::InvalidImage(format!(
            "{} is empty or could not be read",
            display_name(&image.filename)
        )));
    }
    if image.size() > MAX_IMAGE_SIZE {
        return Err(ProviderError::InvalidImage(format!(
            "file too large: {} bytes (maximum {} bytes)",
            image.size(),
            MAX_IMAGE_SIZE
        )));
    }
    if !image.is_supported_type() {
        return Err(ProviderError::InvalidImage(format!(
            "unsupported image type: {}",
            image.content_type
        )));
    }

    let completion = provider.analyze_image(image, &request.prompt).await?;
    completion
        .first_content()
        .map(str::to_string)
        .ok_or(ProviderError::EmptyResponse)
}

fn display_name(filename: &str) -> &str {
    if filename.is_empty() { "uploaded file" } else { filename }
}
