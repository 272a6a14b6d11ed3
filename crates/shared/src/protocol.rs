use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::domain::{BrandVoice, GenerationForm, Industry, PredictionForm, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Generate,
    Predict,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Generate => "generate",
            Endpoint::Predict => "predict",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub company: String,
    pub has_media: bool,
    pub sentiment_target: f64,
    pub brand_voice: BrandVoice,
    pub industry: Industry,
    pub message: String,
}

impl GenerateRequest {
    /// Snapshot of the form with the 0-10 sentiment scaled to 0.0-1.0.
    pub fn from_form(form: &GenerationForm) -> Self {
        Self {
            company: form.company.clone(),
            has_media: form.has_media,
            sentiment_target: form.sentiment_target as f64 / 10.0,
            brand_voice: form.brand_voice,
            industry: form.industry,
            message: form.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub day: Weekday,
    pub hour: i64,
    pub username: String,
    pub company: String,
    pub has_media: bool,
    pub content: String,
}

impl PredictRequest {
    pub fn from_form(form: &PredictionForm) -> Self {
        Self {
            day: form.day,
            hour: form.hour,
            username: form.username.clone(),
            company: form.company.clone(),
            has_media: form.has_media,
            content: form.content.clone(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub generated_tweet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub predicted_likes: Number,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity_estimate: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: Map<String, Value>,
}

/// What the generate panel renders after a successful call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub generated_tweet: String,
    pub info: Map<String, Value>,
}

impl From<GenerateResponse> for GenerationResult {
    fn from(value: GenerateResponse) -> Self {
        Self {
            generated_tweet: value.generated_tweet,
            info: value.info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predicted_likes: Number,
    pub popularity_estimate: String,
    pub details: Map<String, Value>,
}

impl From<PredictResponse> for PredictionResult {
    fn from(value: PredictResponse) -> Self {
        Self {
            predicted_likes: value.predicted_likes,
            popularity_estimate: value.popularity_estimate,
            details: value.details,
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
