//! Form validation.
//!
//! Validation is advisory: every check runs on each edit, errors are
//! reported per field, and nothing here panics. A draft with errors cannot
//! become a [`SurveyResponse`].

use crate::i18n::{Language, Msg};
use crate::models::{
    Favorite, ResponseDraft, ResponseId, Satisfaction, SurveyResponse, MAX_AGE, MAX_NAME_CHARS,
    MAX_NOTES_CHARS,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use thiserror::Error;

/// Form field an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Age,
    Satisfaction,
    Notes,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Age => write!(f, "age"),
            Field::Satisfaction => write!(f, "satisfaction"),
            Field::Notes => write!(f, "notes"),
        }
    }
}

/// A single field-scoped validation failure.
///
/// `Display` gives a diagnostic for logs; [`FieldError::message`] gives the
/// localized text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("name is {len} characters long")]
    NameTooLong { len: usize },
    #[error("age {input:?} is not a whole number in 0..={MAX_AGE}")]
    InvalidAge { input: String },
    #[error("satisfaction {value} is outside 1..=5")]
    InvalidSatisfaction { value: u8 },
    #[error("notes are {len} characters long")]
    NotesTooLong { len: usize },
}

impl FieldError {
    /// The field this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            FieldError::NameTooLong { .. } => Field::Name,
            FieldError::InvalidAge { .. } => Field::Age,
            FieldError::InvalidSatisfaction { .. } => Field::Satisfaction,
            FieldError::NotesTooLong { .. } => Field::Notes,
        }
    }

    /// Localized message for display next to the field.
    pub fn message(&self, lang: Language) -> String {
        match (self, lang) {
            (FieldError::NameTooLong { .. }, Language::En) => {
                format!("Name too long (max. {} characters)", MAX_NAME_CHARS)
            }
            (FieldError::NameTooLong { .. }, Language::Es) => {
                format!("Nombre demasiado largo (máx. {} caracteres)", MAX_NAME_CHARS)
            }
            (FieldError::InvalidAge { .. }, Language::En) => {
                format!("Invalid age (0-{})", MAX_AGE)
            }
            (FieldError::InvalidAge { .. }, Language::Es) => {
                format!("Edad inválida (0-{})", MAX_AGE)
            }
            (FieldError::InvalidSatisfaction { .. }, Language::En) => format!(
                "Satisfaction must be between {} and {}",
                Satisfaction::MIN,
                Satisfaction::MAX
            ),
            (FieldError::InvalidSatisfaction { .. }, Language::Es) => format!(
                "La satisfacción debe estar entre {} y {}",
                Satisfaction::MIN,
                Satisfaction::MAX
            ),
            (FieldError::NotesTooLong { .. }, Language::En) => {
                format!("Comment too long (max. {} characters)", MAX_NOTES_CHARS)
            }
            (FieldError::NotesTooLong { .. }, Language::Es) => format!(
                "Comentario demasiado largo (máx. {} caracteres)",
                MAX_NOTES_CHARS
            ),
        }
    }
}

/// A stored or imported record that breaks a collection invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("response {id}: {error}")]
    Field { id: ResponseId, error: FieldError },
    #[error("response id {id} appears more than once")]
    DuplicateId { id: ResponseId },
}

/// Checks a whole collection: text limits per record and unique ids.
///
/// Age and satisfaction ranges are already enforced when a record decodes.
pub fn check_records(responses: &[SurveyResponse]) -> Result<(), RecordError> {
    let mut seen = HashSet::with_capacity(responses.len());
    for response in responses {
        if !seen.insert(response.id) {
            return Err(RecordError::DuplicateId { id: response.id });
        }

        let name_len = response.name.trim().chars().count();
        if name_len > MAX_NAME_CHARS {
            return Err(RecordError::Field {
                id: response.id,
                error: FieldError::NameTooLong { len: name_len },
            });
        }

        let notes_len = response.notes.chars().count();
        if notes_len > MAX_NOTES_CHARS {
            return Err(RecordError::Field {
                id: response.id,
                error: FieldError::NotesTooLong { len: notes_len },
            });
        }
    }
    Ok(())
}

/// Parses the typed age. Blank input means "not given".
fn parse_age(input: &str) -> Result<Option<u8>, FieldError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<i64>() {
        Ok(age) if (0..=MAX_AGE as i64).contains(&age) => Ok(Some(age as u8)),
        _ => Err(FieldError::InvalidAge {
            input: input.to_string(),
        }),
    }
}

impl ResponseDraft {
    /// Runs every field check and returns all failures, in field order.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let name_len = self.name.trim().chars().count();
        if name_len > MAX_NAME_CHARS {
            errors.push(FieldError::NameTooLong { len: name_len });
        }

        if let Err(e) = parse_age(&self.age) {
            errors.push(e);
        }

        if Satisfaction::try_from(self.satisfaction).is_err() {
            errors.push(FieldError::InvalidSatisfaction {
                value: self.satisfaction,
            });
        }

        let notes_len = self.notes.chars().count();
        if notes_len > MAX_NOTES_CHARS {
            errors.push(FieldError::NotesTooLong { len: notes_len });
        }

        errors
    }

    /// Builds a response from a valid draft.
    ///
    /// Blank names become the localized "Anonymous"; name, notes and any
    /// free-text favorite are trimmed.
    pub fn into_response(
        self,
        id: ResponseId,
        created_at: DateTime<Utc>,
        lang: Language,
    ) -> Result<SurveyResponse, Vec<FieldError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let name = match self.name.trim() {
            "" => Msg::Anonymous.text(lang).to_string(),
            trimmed => trimmed.to_string(),
        };
        let age = parse_age(&self.age).map_err(|e| vec![e])?;
        let satisfaction =
            Satisfaction::try_from(self.satisfaction).map_err(|e| {
                vec![FieldError::InvalidSatisfaction { value: e.0 }]
            })?;
        let favorite = match self.favorite {
            Favorite::FreeText(text) => Favorite::FreeText(text.trim().to_string()),
            category => category,
        };

        Ok(SurveyResponse {
            id,
            name,
            age,
            satisfaction,
            favorite,
            notes: self.notes.trim().to_string(),
            created_at,
            reactions: BTreeSet::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn draft() -> ResponseDraft {
        ResponseDraft {
            name: "Grace".to_string(),
            age: "42".to_string(),
            satisfaction: 4,
            favorite: Favorite::Category(Category::Accessibility),
            notes: "Great".to_string(),
        }
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        assert!(draft().validate().is_empty());
        assert!(ResponseDraft::default().validate().is_empty());
    }

    #[test]
    fn test_name_length_boundary() {
        let mut d = draft();
        d.name = "a".repeat(50);
        assert!(d.validate().is_empty());

        d.name = "a".repeat(51);
        assert_eq!(d.validate(), vec![FieldError::NameTooLong { len: 51 }]);

        // Surrounding whitespace does not count.
        d.name = format!("  {}  ", "a".repeat(50));
        assert!(d.validate().is_empty());
    }

    #[test]
    fn test_name_counts_characters_not_bytes() {
        let mut d = draft();
        d.name = "ñ".repeat(50);
        assert!(d.validate().is_empty());
    }

    #[test]
    fn test_age_rules() {
        let mut d = draft();
        for ok in ["", "  ", "0", "120"] {
            d.age = ok.to_string();
            assert!(d.validate().is_empty(), "age {:?} should be valid", ok);
        }
        for bad in ["-1", "121", "abc", "4.5"] {
            d.age = bad.to_string();
            assert_eq!(d.validate().len(), 1, "age {:?} should be invalid", bad);
            assert_eq!(d.validate()[0].field(), Field::Age);
        }
    }

    #[test]
    fn test_notes_length_boundary() {
        let mut d = draft();
        d.notes = "x".repeat(500);
        assert!(d.validate().is_empty());
        d.notes = "x".repeat(501);
        assert_eq!(d.validate(), vec![FieldError::NotesTooLong { len: 501 }]);
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let mut d = draft();
        d.name = "n".repeat(60);
        d.age = "200".to_string();
        d.notes = "x".repeat(600);
        let fields: Vec<Field> = d.validate().iter().map(FieldError::field).collect();
        assert_eq!(fields, vec![Field::Name, Field::Age, Field::Notes]);
    }

    #[test]
    fn test_into_response_defaults_anonymous_name() {
        let mut d = draft();
        d.name = "   ".to_string();
        d.age = String::new();
        let now = Utc::now();

        let en = d.clone().into_response(1, now, Language::En).unwrap();
        assert_eq!(en.name, "Anonymous");
        assert_eq!(en.age, None);

        let es = d.into_response(2, now, Language::Es).unwrap();
        assert_eq!(es.name, "Anónimo");
    }

    #[test]
    fn test_into_response_trims_fields() {
        let mut d = draft();
        d.name = "  Grace ".to_string();
        d.notes = "\n hello \n".to_string();
        d.favorite = Favorite::FreeText("  Docs ".to_string());
        let response = d.into_response(7, Utc::now(), Language::En).unwrap();

        assert_eq!(response.id, 7);
        assert_eq!(response.name, "Grace");
        assert_eq!(response.age, Some(42));
        assert_eq!(response.notes, "hello");
        assert_eq!(response.favorite, Favorite::FreeText("Docs".to_string()));
        assert!(response.reactions.is_empty());
    }

    #[test]
    fn test_into_response_blocks_invalid_draft() {
        let mut d = draft();
        d.satisfaction = 0;
        let errors = d.into_response(1, Utc::now(), Language::En).unwrap_err();
        assert_eq!(errors, vec![FieldError::InvalidSatisfaction { value: 0 }]);
    }

    fn stored(id: ResponseId, name: &str, notes: &str) -> SurveyResponse {
        let mut d = draft();
        d.name = name.to_string();
        d.notes = notes.to_string();
        d.into_response(id, Utc::now(), Language::En).unwrap()
    }

    #[test]
    fn test_check_records_accepts_valid_collection() {
        let records = vec![stored(2, "Ada", "ok"), stored(1, "Lin", "")];
        assert_eq!(check_records(&records), Ok(()));
        assert_eq!(check_records(&[]), Ok(()));
    }

    #[test]
    fn test_check_records_rejects_duplicate_ids() {
        let records = vec![stored(7, "a", ""), stored(8, "b", ""), stored(7, "c", "")];
        let err = check_records(&records).unwrap_err();
        assert_eq!(err, RecordError::DuplicateId { id: 7 });
        assert_eq!(err.to_string(), "response id 7 appears more than once");
    }

    #[test]
    fn test_check_records_rejects_oversized_text() {
        let mut long_name = stored(3, "a", "");
        long_name.name = "n".repeat(80);
        let err = check_records(&[long_name]).unwrap_err();
        assert_eq!(err.to_string(), "response 3: name is 80 characters long");

        let mut long_notes = stored(4, "a", "");
        long_notes.notes = "x".repeat(900);
        assert_eq!(
            check_records(&[long_notes]),
            Err(RecordError::Field {
                id: 4,
                error: FieldError::NotesTooLong { len: 900 },
            })
        );
    }

    #[test]
    fn test_error_display_carries_details() {
        let e = FieldError::NotesTooLong { len: 612 };
        assert_eq!(e.to_string(), "notes are 612 characters long");
        let e = FieldError::InvalidAge {
            input: "abc".to_string(),
        };
        assert_eq!(e.to_string(), "age \"abc\" is not a whole number in 0..=120");
    }

    #[test]
    fn test_error_messages_are_localized() {
        let e = FieldError::InvalidAge {
            input: "x".to_string(),
        };
        assert_eq!(e.message(Language::En), "Invalid age (0-120)");
        assert_eq!(e.message(Language::Es), "Edad inválida (0-120)");
    }
}
