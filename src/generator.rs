use nanoid::nanoid;
use serde::Serialize;

use crate::gemini::{GeminiClient, GeminiError};

const SAFETY_BLOCKLIST: [&str; 15] = [
    "gun", "weapon", "knife", "sword", "blood", "gore", "violence", "kill", "death", "war",
    "bomb", "scary", "fight", "monster", "18+",
];

const RESTRICTED_REPLACEMENT: &str = "a cute fluffy golden retriever puppy";

const SYSTEM_INSTRUCTION: &str = "You are Mochi, a professional AI photography assistant for kids. \
Generate high-fidelity, photorealistic, and joyful images. \
SAFETY: STRICTLY PROHIBITED: Weapons, violence, blood, or gore. \
KIDS MODE: Always provide a sophisticated 3-word simple title.";

const FALLBACK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1583511655857-d19b40a7a54e?w=1024&q=80";

/// Wire shape the front-end renders for generated content.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedImage {
    pub id: String,
    pub title: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// AI image generation with a hardcoded blocklist in front of the model's
/// own safety filters. Every failure degrades to the static puppy payload;
/// the client never sees an upstream error.
pub struct ImageGenerator {
    gemini: Option<GeminiClient>,
}

impl ImageGenerator {
    pub fn new(gemini: Option<GeminiClient>) -> Self {
        Self { gemini }
    }

    pub async fn generate(&self, query: &str) -> GeneratedImage {
        let Some(gemini) = &self.gemini else {
            return puppy_fallback(false);
        };

        let restricted = is_restricted(query);
        let effective_query = if restricted { RESTRICTED_REPLACEMENT } else { query };
        let prompt =
            format!("A high-resolution, photorealistic HD cinematic photo of: {effective_query}.");

        match gemini.generate_image(&prompt, SYSTEM_INSTRUCTION).await {
            Ok(candidate) => {
                let Some(image) = candidate.image else {
                    return puppy_fallback(false);
                };
                let title = if restricted {
                    "A Friendly Friend!".to_string()
                } else {
                    candidate
                        .title
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| format!("Mochi's {query}"))
                };
                GeneratedImage {
                    id: nanoid!(),
                    title,
                    image_url: format!("data:{};base64,{}", image.mime_type, image.data),
                    kind: "image".to_string(),
                    description: "Mochi painted this for you!".to_string(),
                }
            }
            Err(GeminiError::SafetyBlocked) => {
                log::warn!("gemini safety block triggered");
                puppy_fallback(true)
            }
            Err(e) => {
                log::error!("gemini image generation error: {e}");
                puppy_fallback(false)
            }
        }
    }
}

fn is_restricted(query: &str) -> bool {
    let normalized = query.to_lowercase();
    SAFETY_BLOCKLIST.iter().any(|word| normalized.contains(word))
}

fn puppy_fallback(restricted: bool) -> GeneratedImage {
    let title = if restricted { "Friendly Puppy Friend!" } else { "Mochi's Happy Puppy" };
    GeneratedImage {
        id: format!("static-{}", nanoid!()),
        title: title.to_string(),
        image_url: FALLBACK_IMAGE_URL.to_string(),
        kind: "image".to_string(),
        description: "Mochi is taking a quick nap. Here is a puppy friend!".to_string(),
    }
}
