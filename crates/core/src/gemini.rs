use crate::config::Config;
use crate::error::{AppError, Result};
use gemini_rust::{Blob, Content, Gemini, Message, Part, Role};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The song suggestion produced by the analysis service.
///
/// Immutable once received; the screen state machine only ever moves whole
/// values of this type around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// The mood the model read from the photo or label.
    pub mood: String,
    /// Suggested song title.
    pub song_title: String,
    /// Suggested song artist.
    pub artist: String,
    /// A few sentences explaining why the song fits.
    pub commentary: String,
}

const SYSTEM_PROMPT: &str = "You are Mood Melody, a warm music curator. \
Given a person's mood, you suggest one real, well-known song that fits it. \
Respond with a single JSON object and nothing else, using exactly these keys: \
\"mood\" (one or two words naming the mood), \"songTitle\", \"artist\", and \
\"commentary\" (two or three sentences on why the song fits). \
Do not wrap the JSON in markdown.";

const PHOTO_PROMPT: &str = "Look at the person in this photo and read their \
emotional state from their expression and posture. Then suggest one song that \
matches that mood.";

fn emotion_prompt(emotion: &str) -> String {
    format!(
        "The listener says they are feeling \"{}\". Suggest one song that \
matches that mood.",
        emotion
    )
}

pub struct GeminiClient {
    client: Gemini,
    style_hint: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        // Initialize the client with the API key and model, explicitly setting the base URL to avoid BadScheme error
        let base_url = url::Url::parse("https://generativelanguage.googleapis.com/v1beta/")
            .map_err(|e| AppError::Config(format!("Invalid base URL: {}", e)))?;

        let model_name = if config.model_name.starts_with("models/") {
            config.model_name.clone()
        } else {
            format!("models/{}", config.model_name)
        };
        let model_url = format!(
            "https://generativelanguage.googleapis.com/v1beta/{}",
            model_name
        );

        let client = Gemini::with_model_and_base_url(&config.gemini_api_key, model_url, base_url)
            .map_err(|e| AppError::Config(format!("Failed to create Gemini client: {}", e)))?;

        Ok(Self {
            client,
            style_hint: None,
        })
    }

    /// Adds a listener taste hint woven into the curator prompt.
    /// Blank hints are ignored.
    pub fn with_style_hint(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        if !hint.trim().is_empty() {
            self.style_hint = Some(hint);
        }
        self
    }

    /// Sends a captured photo to Gemini and returns the song suggestion.
    ///
    /// Single-shot: no retry, no caching. Fails with [`AppError::Service`]
    /// when the call errors, times out, or the response cannot be parsed.
    pub async fn analyze_photo(&self, base64_image: String) -> Result<AnalysisResult> {
        debug!("requesting song suggestion for photo");

        // Construct image data blob
        let blob = Blob {
            mime_type: "image/jpeg".to_string(),
            data: base64_image,
        };

        // Construct parts
        let image_part = Part::InlineData {
            inline_data: blob,
            media_resolution: None,
        };

        let text_part = Part::Text {
            text: PHOTO_PROMPT.to_string(),
            thought: None,
            thought_signature: None,
        };

        self.request(vec![text_part, image_part]).await
    }

    /// Sends an explicit emotion label to Gemini and returns the song
    /// suggestion. Same single-shot contract as [`Self::analyze_photo`].
    pub async fn analyze_emotion(&self, emotion: &str) -> Result<AnalysisResult> {
        debug!(emotion, "requesting song suggestion for emotion label");

        let text_part = Part::Text {
            text: emotion_prompt(emotion),
            thought: None,
            thought_signature: None,
        };

        self.request(vec![text_part]).await
    }

    async fn request(&self, parts: Vec<Part>) -> Result<AnalysisResult> {
        // Create the content payload
        let content = Content {
            role: Some(Role::User),
            parts: Some(parts),
        };

        // Create the message payload
        let message = Message {
            role: Role::User,
            content,
        };

        let system_prompt = match &self.style_hint {
            Some(hint) => format!("{}\nListener preference to weigh: {}", SYSTEM_PROMPT, hint),
            None => SYSTEM_PROMPT.to_string(),
        };

        // Send request
        let response = self
            .client
            .generate_content()
            .with_messages(vec![message])
            .with_system_prompt(&system_prompt)
            .execute()
            .await
            .map_err(|e| AppError::Service(format!("API request failed: {:?}", e)))?;

        // Parse Response
        if let Some(candidate) = response.candidates.first() {
            let content = &candidate.content;
            if let Some(parts) = &content.parts {
                // Match against the struct variant Part::Text { text, .. }
                if let Some(Part::Text { text, .. }) = parts.first() {
                    let result = parse_analysis(text)?;
                    debug!(song = %result.song_title, "received song suggestion");
                    return Ok(result);
                }
            }
        }

        Err(AppError::Service(
            "No text response received from Gemini".to_string(),
        ))
    }
}

/// Parses the model's reply into an [`AnalysisResult`].
///
/// The model is told to answer with bare JSON, but replies wrapped in a
/// markdown code fence or padded with prose still parse: the payload is the
/// outermost `{ ... }` span of the reply.
fn parse_analysis(raw: &str) -> Result<AnalysisResult> {
    let start = raw.find('{');
    let end = raw.rfind('}');

    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => {
            return Err(AppError::Service(format!(
                "Gemini returned no suggestion JSON: {}",
                raw.trim()
            )));
        }
    };

    serde_json::from_str(json)
        .map_err(|e| AppError::Service(format!("Unparseable suggestion from Gemini: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"{"mood":"joyful","songTitle":"Here Comes the Sun","artist":"The Beatles","commentary":"Bright and hopeful."}"#;

    #[test]
    fn parses_bare_json() {
        let result = parse_analysis(REPLY).unwrap();
        assert_eq!(result.song_title, "Here Comes the Sun");
        assert_eq!(result.artist, "The Beatles");
        assert_eq!(result.mood, "joyful");
    }

    #[test]
    fn parses_code_fenced_json() {
        let fenced = format!("```json\n{}\n```", REPLY);
        let result = parse_analysis(&fenced).unwrap();
        assert_eq!(result.song_title, "Here Comes the Sun");
    }

    #[test]
    fn parses_json_surrounded_by_prose() {
        let chatty = format!("Sure! Here is my pick:\n{}\nEnjoy!", REPLY);
        let result = parse_analysis(&chatty).unwrap();
        assert_eq!(result.artist, "The Beatles");
    }

    #[test]
    fn rejects_reply_without_json() {
        let err = parse_analysis("I cannot help with that.").unwrap_err();
        assert!(matches!(err, AppError::Service(_)));
    }

    #[test]
    fn rejects_json_with_missing_fields() {
        let err = parse_analysis(r#"{"mood":"calm"}"#).unwrap_err();
        assert!(matches!(err, AppError::Service(_)));
    }
}
