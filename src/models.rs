//! Data models for the survey.
//!
//! This module contains the core data structures used throughout the
//! application: survey responses, their rating and favorite fields, the
//! emoji reactions viewers can toggle, and the raw form draft.

use crate::i18n::{Language, Msg};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique response identifier (creation time in milliseconds).
pub type ResponseId = u64;

/// Maximum accepted name length, in characters.
pub const MAX_NAME_CHARS: usize = 50;
/// Maximum accepted comment length, in characters.
pub const MAX_NOTES_CHARS: usize = 500;
/// Oldest accepted age.
pub const MAX_AGE: u8 = 120;

/// Satisfaction rating outside of 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("satisfaction must be between 1 and 5, got {0}")]
pub struct InvalidSatisfaction(pub u8);

/// Satisfaction rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Satisfaction(u8);

impl Satisfaction {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Returns the raw rating.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Renders the rating as filled and empty stars.
    pub fn stars(self) -> String {
        stars(self.0 as usize)
    }
}

impl Default for Satisfaction {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u8> for Satisfaction {
    type Error = InvalidSatisfaction;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidSatisfaction(value))
        }
    }
}

impl From<Satisfaction> for u8 {
    fn from(value: Satisfaction) -> Self {
        value.0
    }
}

impl fmt::Display for Satisfaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders `filled` stars out of five.
pub fn stars(filled: usize) -> String {
    let filled = filled.min(Satisfaction::MAX as usize);
    format!(
        "{}{}",
        "★".repeat(filled),
        "☆".repeat(Satisfaction::MAX as usize - filled)
    )
}

/// Fixed favorite-aspect categories offered by the form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    UiDesign,
    Performance,
    Accessibility,
    Content,
}

impl Category {
    /// Returns the label shown for this category.
    pub fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Category::UiDesign, _) => "UI Design",
            (Category::Performance, _) => "Performance",
            (Category::Accessibility, Language::En) => "Accessibility",
            (Category::Accessibility, Language::Es) => "Accesibilidad",
            (Category::Content, Language::En) => "Content",
            (Category::Content, Language::Es) => "Contenido",
        }
    }
}

/// What the respondent liked most: a fixed category or their own words.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Favorite {
    Category(Category),
    FreeText(String),
}

impl Default for Favorite {
    fn default() -> Self {
        Favorite::Category(Category::UiDesign)
    }
}

impl Favorite {
    /// Returns the label shown for this favorite.
    pub fn label(&self, lang: Language) -> String {
        match self {
            Favorite::Category(category) => category.label(lang).to_string(),
            Favorite::FreeText(text) => format!("{}: {}", Msg::OtherPrefix.text(lang), text),
        }
    }
}

/// Emoji reaction a viewer can toggle on a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Reaction {
    #[serde(rename = "👍")]
    ThumbsUp,
    #[serde(rename = "❤️", alias = "❤")]
    Heart,
    #[serde(rename = "👏")]
    Clap,
    #[serde(rename = "🎉")]
    Party,
}

impl Reaction {
    pub const ALL: [Reaction; 4] = [
        Reaction::ThumbsUp,
        Reaction::Heart,
        Reaction::Clap,
        Reaction::Party,
    ];

    /// Returns the emoji for this reaction.
    pub fn emoji(self) -> &'static str {
        match self {
            Reaction::ThumbsUp => "👍",
            Reaction::Heart => "❤️",
            Reaction::Clap => "👏",
            Reaction::Party => "🎉",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.emoji())
    }
}

impl FromStr for Reaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "👍" | "like" | "thumbsup" | "thumbs-up" => Ok(Reaction::ThumbsUp),
            "❤️" | "❤" | "love" | "heart" => Ok(Reaction::Heart),
            "👏" | "clap" | "applause" => Ok(Reaction::Clap),
            "🎉" | "party" | "tada" => Ok(Reaction::Party),
            other => Err(format!(
                "unknown reaction '{}' (expected one of 👍 ❤️ 👏 🎉 or like, love, clap, party)",
                other
            )),
        }
    }
}

/// One submitted survey entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    /// Unique identifier, monotonic by creation time.
    pub id: ResponseId,
    /// Respondent name or alias.
    pub name: String,
    /// Age, if given.
    #[serde(default, deserialize_with = "deserialize_age")]
    pub age: Option<u8>,
    /// Satisfaction rating.
    pub satisfaction: Satisfaction,
    /// Favorite aspect.
    pub favorite: Favorite,
    /// Free-text comment.
    #[serde(default)]
    pub notes: String,
    /// Creation time; never changes.
    pub created_at: DateTime<Utc>,
    /// Reactions toggled on by viewers.
    #[serde(default)]
    pub reactions: BTreeSet<Reaction>,
}

impl SurveyResponse {
    /// Adds the reaction if absent, removes it otherwise.
    ///
    /// Returns `true` when the reaction is now present.
    pub fn toggle_reaction(&mut self, reaction: Reaction) -> bool {
        if self.reactions.remove(&reaction) {
            false
        } else {
            self.reactions.insert(reaction);
            true
        }
    }

    /// Returns the age for display, or "—" when absent.
    pub fn age_label(&self) -> String {
        self.age
            .map(|age| age.to_string())
            .unwrap_or_else(|| "—".to_string())
    }
}

/// Accepts any JSON value and keeps only in-range integer ages.
///
/// Stored data written by older builds used placeholder strings for a
/// missing age; those become `None` instead of failing the whole load.
fn deserialize_age<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let age = match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(age
        .filter(|age| *age <= MAX_AGE as u64)
        .map(|age| age as u8))
}

/// Raw form input before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDraft {
    pub name: String,
    /// Age as typed; blank means "not given".
    pub age: String,
    pub satisfaction: u8,
    pub favorite: Favorite,
    pub notes: String,
}

impl Default for ResponseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            satisfaction: Satisfaction::MAX,
            favorite: Favorite::default(),
            notes: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_response() -> SurveyResponse {
        SurveyResponse {
            id: 1_741_953_600_000,
            name: "Ada".to_string(),
            age: Some(36),
            satisfaction: Satisfaction::try_from(4).unwrap(),
            favorite: Favorite::Category(Category::Performance),
            notes: "Fast".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap(),
            reactions: BTreeSet::new(),
        }
    }

    #[test]
    fn test_satisfaction_bounds() {
        assert!(Satisfaction::try_from(0).is_err());
        assert!(Satisfaction::try_from(1).is_ok());
        assert!(Satisfaction::try_from(5).is_ok());
        assert_eq!(Satisfaction::try_from(6), Err(InvalidSatisfaction(6)));
    }

    #[test]
    fn test_stars() {
        assert_eq!(Satisfaction::try_from(3).unwrap().stars(), "★★★☆☆");
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn test_reaction_from_str() {
        assert_eq!("👍".parse::<Reaction>(), Ok(Reaction::ThumbsUp));
        assert_eq!("❤".parse::<Reaction>(), Ok(Reaction::Heart));
        assert_eq!("LOVE".parse::<Reaction>(), Ok(Reaction::Heart));
        assert_eq!("tada".parse::<Reaction>(), Ok(Reaction::Party));
        assert!("🙃".parse::<Reaction>().is_err());
    }

    #[test]
    fn test_toggle_reaction() {
        let mut response = sample_response();
        assert!(response.toggle_reaction(Reaction::Clap));
        assert!(response.reactions.contains(&Reaction::Clap));
        assert!(!response.toggle_reaction(Reaction::Clap));
        assert!(response.reactions.is_empty());
    }

    #[test]
    fn test_favorite_label() {
        let other = Favorite::FreeText("Docs".to_string());
        assert_eq!(other.label(Language::En), "Other: Docs");
        assert_eq!(other.label(Language::Es), "Otra: Docs");
        assert_eq!(
            Favorite::Category(Category::Content).label(Language::Es),
            "Contenido"
        );
    }

    #[test]
    fn test_response_wire_fields() {
        let mut response = sample_response();
        response.toggle_reaction(Reaction::Heart);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], 1_741_953_600_000_u64);
        assert_eq!(json["satisfaction"], 4);
        assert_eq!(json["favorite"]["category"], "performance");
        assert_eq!(json["createdAt"], "2025-03-14T12:00:00Z");
        assert_eq!(json["reactions"][0], "❤️");

        let decoded: SurveyResponse = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_free_text_favorite_wire_format() {
        let favorite = Favorite::FreeText("Colors".to_string());
        let json = serde_json::to_string(&favorite).unwrap();
        assert_eq!(json, r#"{"freeText":"Colors"}"#);
    }

    #[test]
    fn test_malformed_age_is_dropped() {
        let json = r#"{
            "id": 1, "name": "x", "age": "—", "satisfaction": 3,
            "favorite": {"category": "content"}, "notes": "",
            "createdAt": "2025-01-01T00:00:00Z", "reactions": []
        }"#;
        let response: SurveyResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.age, None);

        let json = json.replace("\"—\"", "130");
        let response: SurveyResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response.age, None);
    }

    #[test]
    fn test_out_of_range_satisfaction_rejected() {
        let json = r#"{
            "id": 1, "name": "x", "age": null, "satisfaction": 9,
            "favorite": {"category": "content"}, "notes": "",
            "createdAt": "2025-01-01T00:00:00Z", "reactions": []
        }"#;
        assert!(serde_json::from_str::<SurveyResponse>(json).is_err());
    }
}
