use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown {form} field '{name}'")]
    UnknownField { form: &'static str, name: String },
    #[error("field '{name}' expects {expected}")]
    WrongKind {
        name: &'static str,
        expected: &'static str,
    },
    #[error("field '{name}' is not a whole number: '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("'{value}' is not a valid {kind}")]
    UnknownOption { kind: &'static str, value: String },
}

/// Declares a select-control enum whose wire form is the variant name.
macro_rules! select_enum {
    ($name:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = FieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| FieldError::UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

select_enum!(BrandVoice, "brand voice", [Casual, Professional, Playful]);
select_enum!(Industry, "industry", [Tech, Food, Fashion, General]);
select_enum!(
    Weekday,
    "day",
    [Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday]
);

/// Raw value carried by a single input event.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    Flag(bool),
}

impl FieldValue {
    fn into_text(self, name: &'static str) -> Result<String, FieldError> {
        match self {
            FieldValue::Text(text) => Ok(text),
            _ => Err(FieldError::WrongKind {
                name,
                expected: "text",
            }),
        }
    }

    fn into_flag(self, name: &'static str) -> Result<bool, FieldError> {
        match self {
            FieldValue::Flag(flag) => Ok(flag),
            _ => Err(FieldError::WrongKind {
                name,
                expected: "a checkbox value",
            }),
        }
    }

    // An emptied number input reads as zero.
    fn into_number(self, name: &'static str) -> Result<i64, FieldError> {
        match self {
            FieldValue::Number(n) => Ok(n),
            FieldValue::Text(text) if text.trim().is_empty() => Ok(0),
            FieldValue::Text(text) => {
                text.trim()
                    .parse::<i64>()
                    .map_err(|_| FieldError::InvalidNumber { name, value: text })
            }
            FieldValue::Flag(_) => Err(FieldError::WrongKind {
                name,
                expected: "a number",
            }),
        }
    }

    fn into_option<T: FromStr<Err = FieldError>>(self, name: &'static str) -> Result<T, FieldError> {
        self.into_text(name)?.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationForm {
    pub company: String,
    pub has_media: bool,
    /// 0..=10 on screen; bounds are advisory.
    pub sentiment_target: i64,
    pub brand_voice: BrandVoice,
    pub industry: Industry,
    pub message: String,
}

impl Default for GenerationForm {
    fn default() -> Self {
        Self {
            company: String::new(),
            has_media: false,
            sentiment_target: 5,
            brand_voice: BrandVoice::Casual,
            industry: Industry::General,
            message: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationField {
    Company(String),
    HasMedia(bool),
    SentimentTarget(i64),
    BrandVoice(BrandVoice),
    Industry(Industry),
    Message(String),
}

impl GenerationField {
    /// Decodes a named input event into a typed delta.
    pub fn from_input(name: &str, value: FieldValue) -> Result<Self, FieldError> {
        match name {
            "company" => Ok(Self::Company(value.into_text("company")?)),
            "has_media" => Ok(Self::HasMedia(value.into_flag("has_media")?)),
            "sentiment_target" => Ok(Self::SentimentTarget(
                value.into_number("sentiment_target")?,
            )),
            "brand_voice" => Ok(Self::BrandVoice(value.into_option("brand_voice")?)),
            "industry" => Ok(Self::Industry(value.into_option("industry")?)),
            "message" => Ok(Self::Message(value.into_text("message")?)),
            other => Err(FieldError::UnknownField {
                form: "generation",
                name: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Company(_) => "company",
            Self::HasMedia(_) => "has_media",
            Self::SentimentTarget(_) => "sentiment_target",
            Self::BrandVoice(_) => "brand_voice",
            Self::Industry(_) => "industry",
            Self::Message(_) => "message",
        }
    }
}

impl GenerationForm {
    /// Returns a new snapshot with exactly one field replaced.
    pub fn apply(&self, delta: GenerationField) -> Self {
        let mut next = self.clone();
        match delta {
            GenerationField::Company(v) => next.company = v,
            GenerationField::HasMedia(v) => next.has_media = v,
            GenerationField::SentimentTarget(v) => next.sentiment_target = v,
            GenerationField::BrandVoice(v) => next.brand_voice = v,
            GenerationField::Industry(v) => next.industry = v,
            GenerationField::Message(v) => next.message = v,
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionForm {
    pub day: Weekday,
    /// 0..=24 on screen; bounds are advisory.
    pub hour: i64,
    pub username: String,
    pub company: String,
    pub has_media: bool,
    pub content: String,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            day: Weekday::Monday,
            hour: 12,
            username: String::new(),
            company: String::new(),
            has_media: false,
            content: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionField {
    Day(Weekday),
    Hour(i64),
    Username(String),
    Company(String),
    HasMedia(bool),
    Content(String),
}

impl PredictionField {
    pub fn from_input(name: &str, value: FieldValue) -> Result<Self, FieldError> {
        match name {
            "day" => Ok(Self::Day(value.into_option("day")?)),
            "hour" => Ok(Self::Hour(value.into_number("hour")?)),
            "username" => Ok(Self::Username(value.into_text("username")?)),
            "company" => Ok(Self::Company(value.into_text("company")?)),
            "has_media" => Ok(Self::HasMedia(value.into_flag("has_media")?)),
            "content" => Ok(Self::Content(value.into_text("content")?)),
            other => Err(FieldError::UnknownField {
                form: "prediction",
                name: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Day(_) => "day",
            Self::Hour(_) => "hour",
            Self::Username(_) => "username",
            Self::Company(_) => "company",
            Self::HasMedia(_) => "has_media",
            Self::Content(_) => "content",
        }
    }
}

impl PredictionForm {
    pub fn apply(&self, delta: PredictionField) -> Self {
        let mut next = self.clone();
        match delta {
            PredictionField::Day(v) => next.day = v,
            PredictionField::Hour(v) => next.hour = v,
            PredictionField::Username(v) => next.username = v,
            PredictionField::Company(v) => next.company = v,
            PredictionField::HasMedia(v) => next.has_media = v,
            PredictionField::Content(v) => next.content = v,
        }
        next
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
