use serde::{Deserialize, Serialize};

/// A model offered in the page's model picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub id: &'static str,
    pub display_name: &'static str,
}

/// Models listed in the chat form. The first entry is preselected.
pub const AVAILABLE_MODELS: &[ModelOption] = &[
    ModelOption {
        id: "llama3-8b-8192",
        display_name: "LLaMA 3 8B",
    },
    ModelOption {
        id: "mixtral-8x7b-32768",
        display_name: "Mixtral 8x7B",
    },
    ModelOption {
        id: "gemma-7b-it",
        display_name: "Gemma 7B-IT",
    },
];

/// Look up the display name of a known model
pub fn display_name_for(model_id: &str) -> Option<&'static str> {
    AVAILABLE_MODELS
        .iter()
        .find(|m| m.id == model_id)
        .map(|m| m.display_name)
}

/// Model identifier submitted by the client.
///
/// Only emptiness is rejected; ids outside `AVAILABLE_MODELS` are forwarded to
/// the provider as-is and the provider decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSelection(String);

impl ModelSelection {
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into().trim().to_string();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_listed(&self) -> bool {
        display_name_for(&self.0).is_some()
    }
}

impl std::fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
