use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Voice a brand writes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    #[default]
    Casual,
    Funny,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Funny => "funny",
        }
    }

    /// Short description of the voice, used in plan rationales.
    pub fn voice(&self) -> &'static str {
        match self {
            Tone::Formal => "a polished, professional voice",
            Tone::Casual => "a relaxed, conversational voice",
            Tone::Funny => "a playful, humorous voice",
        }
    }
}

/// The slice of a brand profile the planner needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandContext {
    pub brand_profile_id: Option<Uuid>,
    pub name: String,
    pub tone: Tone,
    /// Preferred platforms; empty means "use the configured default".
    #[serde(default)]
    pub platforms: Vec<String>,
}
