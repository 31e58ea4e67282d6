//! The week store: current and next week live as JSON documents under a
//! root directory, past weeks are archived on rollover.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use encore_common::{EncoreError, Entry, Result, Week, WhichWeek};
use tracing::info;
use uuid::Uuid;

const CURRENT_FILE: &str = "current-week.json";
const NEXT_FILE: &str = "next-week.json";
const ARCHIVE_DIR: &str = "archive";

/// Explicit handle over the two live weeks. Replaces any notion of global
/// week state; everything that mutates a week goes through this.
pub struct WeekStore {
    root: PathBuf,
    current: Week,
    next: Week,
}

impl WeekStore {
    /// Load both weeks from `root`. Missing files yield placeholder blank
    /// weeks: submissions closed for the current week, open for the next.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let current = load_week(&root.join(CURRENT_FILE))?.unwrap_or_else(|| Week::blank(false));
        let next = load_week(&root.join(NEXT_FILE))?.unwrap_or_else(|| Week::blank(true));
        Ok(Self { root, current, next })
    }

    pub fn week(&self, which: WhichWeek) -> &Week {
        match which {
            WhichWeek::Current => &self.current,
            WhichWeek::Next => &self.next,
        }
    }

    pub fn week_mut(&mut self, which: WhichWeek) -> &mut Week {
        match which {
            WhichWeek::Current => &mut self.current,
            WhichWeek::Next => &mut self.next,
        }
    }

    /// Write both week files.
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        write_week(&self.root.join(CURRENT_FILE), &self.current)?;
        write_week(&self.root.join(NEXT_FILE), &self.next)?;
        info!("week store: {CURRENT_FILE} and {NEXT_FILE} overwritten");
        Ok(())
    }

    /// Archive the current week under a date-stamped filename, promote the
    /// next week into its place, install a fresh blank next week, and save.
    pub fn advance(&mut self) -> Result<()> {
        let archive_dir = self.root.join(ARCHIVE_DIR);
        fs::create_dir_all(&archive_dir)?;
        let stamp = Local::now().format("%m-%d-%y");
        let archive_path = archive_dir.join(format!("{stamp}.json"));
        write_week(&archive_path, &self.current)?;
        info!("week store: archived current week to {}", archive_path.display());

        self.current = std::mem::replace(&mut self.next, Week::blank(true));
        self.save()
    }

    /// Register a blank entry for an entrant, returning its fresh id.
    /// Entrants register against the next week by default; the entry is
    /// populated later by upload handling.
    pub fn create_entry(
        &mut self,
        which: WhichWeek,
        entrant_name: &str,
        discord_id: Option<i64>,
    ) -> Uuid {
        let entry = Entry::new(entrant_name, discord_id);
        let id = entry.id;
        self.week_mut(which).entries.push(entry);
        id
    }

    /// Look an entry up across both live weeks, next week first.
    pub fn find_entry(&self, id: Uuid) -> Option<&Entry> {
        self.next.find_entry(id).or_else(|| self.current.find_entry(id))
    }

    pub fn find_entry_mut(&mut self, id: Uuid) -> Option<&mut Entry> {
        if self.next.find_entry(id).is_some() {
            return self.next.find_entry_mut(id);
        }
        self.current.find_entry_mut(id)
    }

    /// Like [`find_entry_mut`](Self::find_entry_mut) but an unknown id is an
    /// error. Upload handlers go through this so a stale id fails loudly.
    pub fn require_entry_mut(&mut self, id: Uuid) -> Result<&mut Entry> {
        self.find_entry_mut(id).ok_or(EncoreError::EntryNotFound(id))
    }

    /// Resolve a submitted file by entry id and stored filename, returning
    /// the payload and its content type. `None` when the entry is unknown,
    /// the filename matches neither upload, or the payload is not there yet.
    pub fn entry_file(&self, id: Uuid, filename: &str) -> Option<(&[u8], &'static str)> {
        let entry = self.find_entry(id)?;

        if entry.audio_filename.as_deref() == Some(filename) {
            return entry.audio.as_deref().map(|blob| (blob, "audio/mpeg"));
        }
        if entry.document_filename.as_deref() == Some(filename) {
            return entry.document.as_deref().map(|blob| (blob, "application/pdf"));
        }

        None
    }
}

fn load_week(path: &Path) -> Result<Option<Week>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_week(path: &Path, week: &Week) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(week)?)?;
    Ok(())
}
