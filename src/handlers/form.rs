//! Decoding of the page's POST submissions
//!
//! The chat form arrives as multipart (the script posts `FormData`) or
//! urlencoded; the image form is always multipart. Which operation runs is
//! decided by the fields present, not by the encoding.

use axum::{
    extract::{Form, FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header},
};
use serde::Deserialize;

use crate::domain::models::{ImageAnalysisRequest, ModelSelection, UploadedImage};
use crate::shared::errors::{AppError, Result};

/// Fields accepted from an urlencoded body
#[derive(Debug, Default, Deserialize)]
pub struct UrlencodedForm {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub image_prompt: Option<String>,
}

/// A validated POST to `/`
#[derive(Debug)]
pub enum Submission {
    Chat {
        message: String,
        model: ModelSelection,
    },
    Image(ImageAnalysisRequest),
}

#[derive(Debug, Default)]
struct RawSubmission {
    message: Option<String>,
    model: Option<String>,
    image_prompt: Option<String>,
    image: Option<UploadedImage>,
}

impl RawSubmission {
    fn into_submission(self) -> Result<Submission> {
        if let Some(message) = self.message.filter(|m| !m.trim().is_empty()) {
            let model = self
                .model
                .and_then(ModelSelection::new)
                .ok_or_else(|| AppError::BadRequest("missing field: model".to_string()))?;
            return Ok(Submission::Chat { message, model });
        }

        if let Some(image) = self.image {
            let prompt = self
                .image_prompt
                .filter(|p| !p.trim().is_empty())
                .ok_or_else(|| AppError::BadRequest("missing field: image_prompt".to_string()))?;
            return Ok(Submission::Image(ImageAnalysisRequest { image, prompt }));
        }

        Err(AppError::BadRequest(
            "expected a `message` or an `image` field".to_string(),
        ))
    }
}

pub async fn read_submission(request: Request) -> Result<Submission> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = if content_type.starts_with("multipart/form-data") {
        read_multipart(request).await?
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(form) = Form::<UrlencodedForm>::from_request(request, &())
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        RawSubmission {
            message: form.message,
            model: form.model,
            image_prompt: form.image_prompt,
            image: None,
        }
    } else {
        return Err(AppError::UnsupportedMediaType(if content_type.is_empty() {
            "missing Content-Type".to_string()
        } else {
            content_type
        }));
    };

    raw.into_submission()
}

async fn read_multipart(request: Request) -> Result<RawSubmission> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?;
    let mut raw = RawSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "message" => raw.message = Some(field.text().await.map_err(multipart_error)?),
            "model" => raw.model = Some(field.text().await.map_err(multipart_error)?),
            "image_prompt" => raw.image_prompt = Some(field.text().await.map_err(multipart_error)?),
            "image" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;

                // No file chosen: browsers still send an empty, unnamed part
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                raw.image = Some(UploadedImage::new(
                    filename,
                    content_type.as_deref(),
                    bytes.to_vec(),
                ));
            }
            other => tracing::debug!("Ignoring unknown form field: {}", other),
        }
    }

    Ok(raw)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(format!("Invalid multipart request: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(message: Option<&str>, model: Option<&str>) -> RawSubmission {
        RawSubmission {
            message: message.map(str::to_string),
            model: model.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_chat_submission() {
        match raw(Some("Hello"), Some("m1")).into_submission().unwrap() {
            Submission::Chat { message, model } => {
                assert_eq!(message, "Hello");
                assert_eq!(model.as_str(), "m1");
            }
            other => panic!("expected chat submission, got {:?}", other),
        }
    }

    #[test]
    fn test_chat_requires_model() {
        let err = raw(Some("Hello"), None).into_submission().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("model")));

        let err = raw(Some("Hello"), Some("  ")).into_submission().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_blank_message_without_image_is_rejected() {
        let err = raw(Some("   "), Some("m1")).into_submission().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_image_submission_requires_prompt() {
        let image = UploadedImage::new("a.png", Some("image/png"), vec![1]);
        let err = RawSubmission {
            image: Some(image.clone()),
            ..Default::default()
        }
        .into_submission()
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("image_prompt")));

        let submission = RawSubmission {
            image: Some(image),
            image_prompt: Some("Describe".into()),
            ..Default::default()
        }
        .into_submission()
        .unwrap();
        assert!(matches!(submission, Submission::Image(ref r) if r.prompt == "Describe"));
    }
}
