/// Core entity types for the weekly contest: weeks, entries, ballots.
/// These are the in-memory structures the ranker mutates and the store
/// serializes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One contest submission. Created blank when an entrant registers and
/// populated later by upload handling; `vote_score` and `vote_placement`
/// are only written by the ranker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub entrant_name: String,
    pub discord_id: Option<i64>,
    pub title: String,

    pub document: Option<Vec<u8>>,
    pub document_filename: Option<String>,
    pub audio: Option<Vec<u8>>,
    pub audio_format: Option<String>,
    pub audio_filename: Option<String>,

    /// Mean normalised rating, written during ranking.
    #[serde(default)]
    pub vote_score: f64,
    /// 1 = best; 0 until the entry has been ranked.
    #[serde(default)]
    pub vote_placement: usize,
}

impl Entry {
    /// A fresh, unpopulated entry with a random id.
    pub fn new(entrant_name: impl Into<String>, discord_id: Option<i64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            entrant_name: entrant_name.into(),
            discord_id,
            title: String::new(),
            document: None,
            document_filename: None,
            audio: None,
            audio_format: None,
            audio_filename: None,
            vote_score: 0.0,
            vote_placement: 0,
        }
    }

    /// An entry qualifies for ranking and counting only once every upload
    /// field is populated and both payloads are non-empty.
    pub fn is_valid(&self) -> bool {
        let blobs_present = matches!(&self.document, Some(d) if !d.is_empty())
            && matches!(&self.audio, Some(a) if !a.is_empty());

        blobs_present
            && self.document_filename.is_some()
            && self.audio_format.is_some()
            && self.audio_filename.is_some()
    }
}

// ---------------------------------------------------------------------------
// Rating / Vote
// ---------------------------------------------------------------------------

/// One (entry, category) judgment inside a ballot. Value 0 means
/// "unset/abstain"; 1–5 are active scores. The sanitizer enforces the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub entry: Uuid,
    pub category: String,
    pub value: i32,
}

/// One voter's full ballot for a week. `minimum` and `maximum` are scratch
/// space recomputed on every ranking run, never meaningful between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub voter: String,
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub minimum: i32,
    #[serde(default)]
    pub maximum: i32,
}

impl Vote {
    pub fn new(voter: impl Into<String>, ratings: Vec<Rating>) -> Self {
        Self {
            voter: voter.into(),
            ratings,
            minimum: 0,
            maximum: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Week
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Week {
    pub theme: String,
    pub date: String,
    pub submissions_open: bool,
    pub voting_open: bool,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub votes: Vec<Vote>,
}

/// Selects which of the two live weeks an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhichWeek {
    Current,
    Next,
}

impl Week {
    /// Placeholder week installed when no stored week exists yet, and as the
    /// fresh next week after a rollover.
    pub fn blank(submissions_open: bool) -> Self {
        Self {
            theme: "Week XYZ: Fill this in by hand!".to_string(),
            date: "Month day'th 20XX".to_string(),
            submissions_open,
            voting_open: true,
            entries: Vec::new(),
            votes: Vec::new(),
        }
    }

    pub fn find_entry(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn find_entry_mut(&mut self, id: Uuid) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }
}
