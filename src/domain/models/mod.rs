// Domain models (chat turns, model picker, uploads, relay events)
// Pure Rust, no framework dependencies

pub mod message;
pub mod model;
pub mod image;
pub mod stream;

pub use message::{ChatTurn, Role, Transcript};
pub use model::{AVAILABLE_MODELS, ModelOption, ModelSelection, display_name_for};
pub use image::{
    ImageAnalysisRequest, MAX_IMAGE_SIZE, SUPPORTED_IMAGE_TYPES, UploadedImage, infer_content_type,
};
pub use stream::{DATA_PREFIX, DONE_SENTINEL, EventPayload, RelayEvent};
