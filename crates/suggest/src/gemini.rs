use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{MAX_PLACES, SuggestError, Suggester};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TAG_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_PLACE_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub tag_model: String,
    pub place_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            tag_model: DEFAULT_TAG_MODEL.to_string(),
            place_model: DEFAULT_PLACE_MODEL.to_string(),
        }
    }
}

/// Suggester backed by the Gemini `generateContent` endpoint.
#[derive(Clone, Debug)]
pub struct GeminiSuggester {
    http: reqwest::Client,
    config: GeminiConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Schema,
}

#[derive(Serialize)]
struct Schema {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<Schema>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_maps: GoogleMaps,
}

#[derive(Serialize)]
struct GoogleMaps {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    retrieval_config: RetrievalConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    lat_lng: LatLng,
}

#[derive(Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateRequest {
    fn text(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: None,
            tools: Vec::new(),
            tool_config: None,
        }
    }
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        Some(text)
    }
}

fn tags_prompt(note: &str) -> String {
    format!(
        "Suggest 2-3 short, relevant tags for this financial note: \"{note}\". Keep tags in Chinese, no symbols."
    )
}

fn places_prompt(note: &str) -> String {
    format!(
        "Based on my current location and this note \"{note}\", suggest 3 likely business names nearby. Return ONLY the names as a comma-separated list in Chinese."
    )
}

/// Decodes a JSON array of strings, dropping blank entries.
pub(crate) fn parse_tag_list(text: &str) -> Result<Vec<String>, SuggestError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let tags: Vec<String> = serde_json::from_str(text)?;
    Ok(tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

/// Splits free text on commas (ASCII or full-width), spaces and newlines.
pub(crate) fn split_place_names(text: &str) -> Vec<String> {
    text.split(['，', ',', ' ', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_PLACES)
        .map(ToString::to_string)
        .collect()
}

impl GeminiSuggester {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{model}:generateContent",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Request for tag suggestions, or `None` when no call should be made.
    fn tags_request(&self, note: &str) -> Option<(String, GenerateRequest)> {
        self.api_key()?;
        if note.trim().is_empty() {
            return None;
        }
        let mut body = GenerateRequest::text(tags_prompt(note));
        body.generation_config = Some(GenerationConfig {
            response_mime_type: "application/json",
            response_schema: Schema {
                kind: "ARRAY",
                items: Some(Box::new(Schema {
                    kind: "STRING",
                    items: None,
                })),
            },
        });
        Some((self.endpoint(&self.config.tag_model), body))
    }

    fn places_request(
        &self,
        latitude: f64,
        longitude: f64,
        note: &str,
    ) -> Option<(String, GenerateRequest)> {
        self.api_key()?;
        let mut body = GenerateRequest::text(places_prompt(note));
        body.tools = vec![Tool {
            google_maps: GoogleMaps {},
        }];
        body.tool_config = Some(ToolConfig {
            retrieval_config: RetrievalConfig {
                lat_lng: LatLng {
                    latitude,
                    longitude,
                },
            },
        });
        Some((self.endpoint(&self.config.place_model), body))
    }

    async fn generate(&self, url: &str, body: &GenerateRequest) -> Result<String, SuggestError> {
        let key = self.api_key().ok_or(SuggestError::MissingCredential)?;
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", key)
            .timeout(REQUEST_TIMEOUT)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.text().ok_or(SuggestError::EmptyResponse)
    }
}

impl Suggester for GeminiSuggester {
    async fn suggest_tags(&self, note: &str) -> Vec<String> {
        let Some((url, body)) = self.tags_request(note) else {
            return Vec::new();
        };
        let result = match self.generate(&url, &body).await {
            Ok(text) => parse_tag_list(&text),
            Err(err) => Err(err),
        };
        result.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "tag suggestion failed");
            Vec::new()
        })
    }

    async fn suggest_nearby_places(
        &self,
        latitude: f64,
        longitude: f64,
        note: &str,
    ) -> Vec<String> {
        let Some((url, body)) = self.places_request(latitude, longitude, note) else {
            return Vec::new();
        };
        match self.generate(&url, &body).await {
            Ok(text) => split_place_names(&text),
            Err(err) => {
                tracing::warn!(error = %err, "place suggestion failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> GeminiSuggester {
        GeminiSuggester::new(GeminiConfig {
            api_key: Some("test-key".to_string()),
            ..GeminiConfig::default()
        })
    }

    #[test]
    fn no_call_without_key_or_text() {
        let keyless = GeminiSuggester::new(GeminiConfig::default());
        assert!(!keyless.has_credential());
        assert!(keyless.tags_request("午饭吃了牛肉面").is_none());
        assert!(keyless.places_request(31.2, 121.5, "咖啡").is_none());

        let blank_key = GeminiSuggester::new(GeminiConfig {
            api_key: Some("  ".to_string()),
            ..GeminiConfig::default()
        });
        assert!(!blank_key.has_credential());

        assert!(with_key().tags_request("").is_none());
        assert!(with_key().tags_request(" \n").is_none());
    }

    #[tokio::test]
    async fn empty_note_yields_no_tags() {
        assert!(with_key().suggest_tags("").await.is_empty());
    }

    #[test]
    fn tag_request_asks_for_a_string_array() {
        let (url, body) = with_key().tags_request("打车去机场").unwrap();
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["generationConfig"]["responseSchema"]["items"]["type"],
            "STRING"
        );
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert!(json.get("tools").is_none());
        let prompt = json["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("打车去机场"));
    }

    #[test]
    fn place_request_carries_position() {
        let (url, body) = with_key().places_request(31.23, 121.47, "咖啡").unwrap();
        assert!(url.ends_with("/models/gemini-2.5-flash:generateContent"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["toolConfig"]["retrievalConfig"]["latLng"]["latitude"], 31.23);
        assert!(json["tools"][0]["googleMaps"].is_object());
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"[\"餐饮\","},{"text":"\"工作\"]"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let text = parsed.text().unwrap();
        assert_eq!(parse_tag_list(&text).unwrap(), ["餐饮", "工作"]);

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.text().is_none());
    }

    #[test]
    fn tag_list_parsing() {
        assert!(parse_tag_list("  ").unwrap().is_empty());
        assert_eq!(parse_tag_list(r#"[" 交通 ", ""]"#).unwrap(), ["交通"]);
        assert!(matches!(
            parse_tag_list("餐饮, 工作"),
            Err(SuggestError::Json(_))
        ));
    }

    #[test]
    fn place_names_split_on_mixed_separators() {
        assert_eq!(
            split_place_names("星巴克，瑞幸咖啡, 全家\n罗森"),
            ["星巴克", "瑞幸咖啡", "全家"]
        );
        assert!(split_place_names(" ,，\n").is_empty());
    }
}
