use chrono::{DateTime, TimeZone};
use rand::Rng;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::calendar::{date_key_for_timestamp, format_date_key};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// One logged breakfast, exactly as it is persisted.
///
/// `id`, `timestamp` and `date_key` are fixed at creation. `date_key` is the
/// local calendar date of `timestamp` and is never recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakfastEntry {
    pub id: String,
    pub timestamp: i64,
    pub date_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
    pub rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_label: Option<String>,
}

/// POST /api/entries
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub photo_uri: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 2000, message = "Notes must be under 2000 characters"))]
    pub notes: Option<String>,

    #[validate(length(max = 100, message = "Label must be under 100 characters"))]
    pub primary_label: Option<String>,

    /// Epoch millis of the meal. Defaults to now.
    pub timestamp: Option<i64>,
}

/// PUT /api/entries/{id}: replaces every field except identity
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    pub photo_uri: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 2000, message = "Notes must be under 2000 characters"))]
    pub notes: Option<String>,

    #[validate(length(max = 100, message = "Label must be under 100 characters"))]
    pub primary_label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: String,
}

impl BreakfastEntry {
    /// Builds a new entry, stamping identity from `now` (or from the request
    /// timestamp) in the zone of `now`. Returns `None` if the requested
    /// timestamp is not a representable instant.
    pub fn create<Tz: TimeZone>(req: CreateEntryRequest, now: &DateTime<Tz>) -> Option<Self> {
        let now_ms = now.timestamp_millis();
        let (timestamp, date_key) = match req.timestamp {
            Some(ms) => (ms, date_key_for_timestamp(ms, &now.timezone())?),
            None => (now_ms, format_date_key(now)),
        };

        Some(Self {
            id: generate_entry_id(now_ms),
            timestamp,
            date_key,
            photo_uri: req.photo_uri,
            rating: req.rating,
            notes: trimmed(req.notes),
            primary_label: trimmed(req.primary_label),
        })
    }

    pub fn with_changes(&self, req: UpdateEntryRequest) -> Self {
        Self {
            id: self.id.clone(),
            timestamp: self.timestamp,
            date_key: self.date_key.clone(),
            photo_uri: req.photo_uri,
            rating: req.rating,
            notes: trimmed(req.notes),
            primary_label: trimmed(req.primary_label),
        }
    }
}

/// `entry_<millis>_<9 base-36 chars>`
pub fn generate_entry_id(now_ms: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("entry_{}_{}", now_ms, suffix)
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
