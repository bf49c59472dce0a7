use crate::gemini::{GeminiClient, GeminiError};

// Downstream photo search errors on empty terms, so empty input maps to a
// safe keyword instead of reaching the pipeline.
const DEFAULT_KEYWORD: &str = "happy";

// Low randomness biases the model toward terse, deterministic keywords.
const SUMMARIZE_TEMPERATURE: f32 = 0.3;

/// Distills a free-text query into 1-2 keywords suitable for an image
/// search. Summarization is advisory: every failure falls back to the
/// original query, never an error.
pub struct QuerySummarizer {
    gemini: Option<GeminiClient>,
}

impl QuerySummarizer {
    pub fn new(gemini: Option<GeminiClient>) -> Self {
        Self { gemini }
    }

    pub async fn summarize(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return DEFAULT_KEYWORD.to_string();
        }

        let Some(gemini) = &self.gemini else {
            return query.to_string();
        };

        match try_summarize(gemini, query).await {
            Ok(keywords) if !keywords.is_empty() => keywords,
            Ok(_) => query.to_string(),
            Err(e) => {
                log::error!("query summarization error: {e}");
                query.to_string()
            }
        }
    }
}

async fn try_summarize(gemini: &GeminiClient, query: &str) -> Result<String, GeminiError> {
    let prompt = format!("Summarize this into 1 or 2 simple nouns for an image search: '{query}'");
    let raw = gemini.generate_text(&prompt, SUMMARIZE_TEMPERATURE).await?;
    Ok(clean_keywords(&raw))
}

fn clean_keywords(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    lowered.trim_end_matches('.').trim_end().to_string()
}
