//! The persisted response collection.
//!
//! [`ResponseBook`] is the only writer of the `survey:responses` key. The
//! collection is kept newest-first: new responses are inserted at the head.
//!
//! Records are decoded one by one. A record that no longer decodes is hidden
//! from reads and moved under [`RESPONSES_BACKUP_KEY`] before the next write,
//! so a mutation never drops data it could not understand.

use super::error::{StoreError, StoreResult};
use super::kv::{KeyValueBackend, Store};
use crate::i18n::Language;
use crate::models::{Reaction, ResponseDraft, ResponseId, SurveyResponse};
use crate::validation::FieldError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Store key holding the response list.
pub const RESPONSES_KEY: &str = "survey:responses";
/// Store key holding records that failed to decode.
pub const RESPONSES_BACKUP_KEY: &str = "survey:responses:unreadable";

/// Why a submission was not stored.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("response has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Picks an id for a response created at `now`.
///
/// Ids are creation milliseconds, bumped past the largest existing id when
/// two responses land in the same millisecond (or the clock went backwards).
/// If the largest id is already `u64::MAX`, the lowest unused id is taken.
pub fn next_id(existing: &[SurveyResponse], now: DateTime<Utc>) -> ResponseId {
    let millis = now.timestamp_millis().max(0) as ResponseId;
    match existing.iter().map(|r| r.id).max() {
        Some(max) if max >= millis => max
            .checked_add(1)
            .unwrap_or_else(|| lowest_unused_id(existing)),
        _ => millis,
    }
}

fn lowest_unused_id(existing: &[SurveyResponse]) -> ResponseId {
    let taken: HashSet<ResponseId> = existing.iter().map(|r| r.id).collect();
    (0..).find(|id| !taken.contains(id)).unwrap_or(0)
}

/// Splits a raw stored value into decodable records and everything else.
fn decode_records(raw: Value) -> (Vec<SurveyResponse>, Vec<Value>) {
    let items = match raw {
        Value::Array(items) => items,
        Value::Null => return (Vec::new(), Vec::new()),
        other => return (Vec::new(), vec![other]),
    };

    let mut responses = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();
    for item in items {
        match serde_json::from_value::<SurveyResponse>(item.clone()) {
            Ok(response) => responses.push(response),
            Err(e) => {
                debug!("Skipping unreadable response record: {}", e);
                rejected.push(item);
            }
        }
    }
    (responses, rejected)
}

/// Response collection backed by a [`Store`].
pub struct ResponseBook<'a, B: KeyValueBackend> {
    store: &'a mut Store<B>,
}

impl<'a, B: KeyValueBackend> ResponseBook<'a, B> {
    pub fn new(store: &'a mut Store<B>) -> Self {
        Self { store }
    }

    /// Current snapshot, newest first.
    ///
    /// Records that fail to decode are left out; an unreadable store reads
    /// as an empty list.
    pub fn responses(&self) -> Vec<SurveyResponse> {
        let raw = self.store.get(RESPONSES_KEY, Value::Null);
        let (responses, rejected) = decode_records(raw);
        if !rejected.is_empty() {
            warn!(
                "{} stored response(s) could not be read and are hidden",
                rejected.len()
            );
        }
        responses
    }

    /// Finds a response by id.
    pub fn find(&self, id: ResponseId) -> Option<SurveyResponse> {
        self.responses().into_iter().find(|r| r.id == id)
    }

    /// Loads the collection for a mutation.
    ///
    /// Unreadable records are appended to the backup key first; if that
    /// write fails, the mutation is refused.
    fn load_for_write(&mut self) -> StoreResult<Vec<SurveyResponse>> {
        let raw = match self.store.try_get::<Value>(RESPONSES_KEY) {
            Ok(raw) => raw.unwrap_or(Value::Null),
            // The file backend quarantines a corrupt file on the next save.
            Err(StoreError::Corrupt { reason, .. }) => {
                warn!("Store file is unreadable ({}), starting empty", reason);
                Value::Null
            }
            Err(e) => return Err(e),
        };

        let (responses, rejected) = decode_records(raw);
        if !rejected.is_empty() {
            let mut backup = self.store.get(RESPONSES_BACKUP_KEY, Vec::<Value>::new());
            backup.extend(rejected);
            self.store.try_set(RESPONSES_BACKUP_KEY, &backup)?;
            warn!(
                "Moved unreadable response record(s) to '{}' ({} kept there)",
                RESPONSES_BACKUP_KEY,
                backup.len()
            );
        }
        Ok(responses)
    }

    fn save(&mut self, responses: &[SurveyResponse]) -> StoreResult<()> {
        self.store.try_set(RESPONSES_KEY, responses)
    }

    /// Validates the draft and, if valid, stores it at the head of the list.
    pub fn submit(
        &mut self,
        draft: ResponseDraft,
        now: DateTime<Utc>,
        lang: Language,
    ) -> Result<SurveyResponse, SubmitError> {
        let mut responses = self.load_for_write()?;
        let id = next_id(&responses, now);
        let response = draft
            .into_response(id, now, lang)
            .map_err(SubmitError::Invalid)?;

        responses.insert(0, response.clone());
        self.save(&responses)?;
        info!("Stored response {} ({} total)", id, responses.len());

        Ok(response)
    }

    /// Toggles a reaction on the response with `id`.
    ///
    /// Returns `Some(true)` if the reaction was added, `Some(false)` if it was
    /// removed, and `None` if no response has that id.
    pub fn toggle_reaction(
        &mut self,
        id: ResponseId,
        reaction: Reaction,
    ) -> StoreResult<Option<bool>> {
        let mut responses = self.load_for_write()?;
        let Some(response) = responses.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        let added = response.toggle_reaction(reaction);

        self.save(&responses)?;
        debug!("Reaction {} on {}: added={}", reaction, id, added);
        Ok(Some(added))
    }

    /// Removes the response with `id`, returning it.
    pub fn delete(&mut self, id: ResponseId) -> StoreResult<Option<SurveyResponse>> {
        let mut responses = self.load_for_write()?;
        let Some(index) = responses.iter().position(|r| r.id == id) else {
            return Ok(None);
        };
        let removed = responses.remove(index);

        self.save(&responses)?;
        info!("Deleted response {}", id);
        Ok(Some(removed))
    }

    /// Removes every response. Returns how many were removed.
    pub fn clear_all(&mut self) -> StoreResult<usize> {
        let count = self.load_for_write()?.len();
        self.save(&[])?;
        info!("Cleared {} responses", count);
        Ok(count)
    }

    /// Replaces the whole collection, keeping the given order.
    ///
    /// Callers are expected to have checked the records with
    /// [`crate::validation::check_records`].
    pub fn replace_all(&mut self, responses: &[SurveyResponse]) -> StoreResult<()> {
        self.load_for_write()?;
        info!("Replacing collection with {} responses", responses.len());
        self.save(responses)
    }
}
