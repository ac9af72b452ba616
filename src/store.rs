use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::Result;
use crate::models::{ChatTranscript, PersistedChatRecord};

/// Validity window for a persisted transcript (24 hours).
pub const EXPIRY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Durable, expiring persistence for exactly one transcript per client.
pub trait TranscriptStore: Send + Sync {
    /// Overwrite the stored record with the transcript and the current time.
    fn save(&self, transcript: &ChatTranscript) -> Result<()>;

    /// Read the stored transcript. An expired record is deleted here, by
    /// the reader, and reported as absent.
    fn load(&self) -> Result<Option<ChatTranscript>>;
}

/// File-backed store: one JSON record under a fixed path, standing in for
/// the browser's localStorage key.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranscriptStore for FileStore {
    fn save(&self, transcript: &ChatTranscript) -> Result<()> {
        let record = PersistedChatRecord {
            value: transcript.clone(),
            timestamp: Utc::now().timestamp_millis(),
        };
        fs::write(&self.path, serde_json::to_vec(&record)?)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<ChatTranscript>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: PersistedChatRecord = match serde_json::from_str(&contents) {
            Ok(record) => record,
            Err(e) => {
                // A corrupt record is as good as absent; drop it and reseed.
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable chat history");
                fs::remove_file(&self.path)?;
                return Ok(None);
            }
        };

        let now = Utc::now().timestamp_millis();
        if now - record.timestamp > EXPIRY_MILLIS {
            tracing::info!(path = %self.path.display(), "chat history expired, removing");
            fs::remove_file(&self.path)?;
            return Ok(None);
        }

        Ok(Some(record.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatMessage, Role};

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("chat_history.json"))
    }

    #[test]
    fn load_returns_none_when_nothing_saved() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn load_returns_saved_transcript_within_expiry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        let mut transcript = ChatTranscript::seeded();
        transcript.push(ChatMessage::new(Role::User, "What is the weather in Kyoto?"));
        transcript.push(ChatMessage::new(Role::Bot, "Cool and rainy, 14°C."));
        store.save(&transcript).expect("save");

        let loaded = store.load().expect("load").expect("present");
        assert_eq!(loaded, transcript);
    }

    #[test]
    fn expired_record_is_removed_on_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        // Write a record stamped 25 hours in the past.
        let record = PersistedChatRecord {
            value: ChatTranscript::seeded(),
            timestamp: Utc::now().timestamp_millis() - 25 * 60 * 60 * 1000,
        };
        fs::write(store.path(), serde_json::to_vec(&record).expect("serialize"))
            .expect("write record");

        assert_eq!(store.load().expect("load"), None);
        assert!(!store.path().exists(), "expired record should be deleted");
        assert_eq!(store.load().expect("second load"), None);
    }

    #[test]
    fn record_just_inside_the_window_survives() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        let record = PersistedChatRecord {
            value: ChatTranscript::seeded(),
            timestamp: Utc::now().timestamp_millis() - (EXPIRY_MILLIS - 60_000),
        };
        fs::write(store.path(), serde_json::to_vec(&record).expect("serialize"))
            .expect("write record");

        assert!(store.load().expect("load").is_some());
        assert!(store.path().exists());
    }

    #[test]
    fn corrupt_record_is_discarded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(store.path(), b"not json").expect("write");

        assert_eq!(store.load().expect("load"), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn save_overwrites_previous_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        store.save(&ChatTranscript::seeded()).expect("first save");

        let mut longer = ChatTranscript::seeded();
        longer.push(ChatMessage::new(Role::User, "weather in Lima"));
        store.save(&longer).expect("second save");

        assert_eq!(store.load().expect("load").expect("present"), longer);
    }
}
