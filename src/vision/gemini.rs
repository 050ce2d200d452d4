use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::model::config::VisionConfig;
use crate::model::theme::ThemeIdea;
use crate::vision::{ThemeGenerator, VisionError};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Theme generation backed by the Gemini generative-language API.
pub struct GeminiGenerator {
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GeminiGenerator {
    /// Build a generator from config, reading the API key from the
    /// configured environment variable.
    pub fn from_env(config: &VisionConfig) -> Result<Self, VisionError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| VisionError::MissingKey(config.api_key_env.clone()))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| VisionError::Request(e.to_string()))?;
        Ok(GeminiGenerator {
            model: config.model.clone(),
            api_key,
            client,
        })
    }

    fn request_body(prompt: &str) -> serde_json::Value {
        let full_prompt = format!(
            "Generate 3 distinct wedding theme ideas based on the following user \
             description: \"{prompt}\". For each theme, provide a theme name, a short \
             compelling description, and a color palette of 4-5 colors with their \
             common names and hex codes."
        );
        json!({
            "contents": [{ "parts": [{ "text": full_prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "themes": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "themeName": { "type": "STRING" },
                                    "description": { "type": "STRING" },
                                    "colorPalette": {
                                        "type": "ARRAY",
                                        "items": {
                                            "type": "OBJECT",
                                            "properties": {
                                                "name": { "type": "STRING" },
                                                "hex": { "type": "STRING" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        })
    }
}

// Response envelope: candidates[0].content.parts[0].text holds the JSON the
// schema asked for.

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ThemesPayload {
    themes: Vec<ThemeIdea>,
}

impl ThemeGenerator for GeminiGenerator {
    fn generate(&self, prompt: &str) -> Result<Vec<ThemeIdea>, VisionError> {
        let url = format!(
            "{API_BASE}/{model}:generateContent?key={key}",
            model = self.model,
            key = self.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(&Self::request_body(prompt))
            .send()
            .map_err(|e| VisionError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VisionError::Request(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let envelope: GenerateResponse = response
            .json()
            .map_err(|e| VisionError::Request(e.to_string()))?;
        let text = envelope
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .ok_or(VisionError::BadResponse)?;

        let payload: ThemesPayload =
            serde_json::from_str(&text).map_err(|_| VisionError::BadResponse)?;
        if payload.themes.is_empty() {
            return Err(VisionError::BadResponse);
        }
        Ok(payload.themes)
    }
}
