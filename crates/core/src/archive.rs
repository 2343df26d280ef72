//! Session Archive
//!
//! Durable snapshots of sessions, with a lifecycle independent of the
//! live store: an archive may outlive the in-memory record, and a live
//! session may end without ever being archived. Records live in a fast
//! in-memory index and as one JSON file per session under the archive
//! directory.

use crate::session::{InterviewType, Session};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("archived session '{0}' not found")]
    NotFound(Uuid),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A serialized snapshot of a session plus the time it was saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedSession {
    pub session: Session,
    pub saved_at: DateTime<Utc>,
}

/// Summary row returned by [`SessionArchive::list`].
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveSummary {
    pub id: Uuid,
    pub interview_type: InterviewType,
    pub saved_at: DateTime<Utc>,
    pub turn_count: usize,
}

fn summary_of(archived: &ArchivedSession) -> ArchiveSummary {
    ArchiveSummary {
        id: archived.session.id,
        interview_type: archived.session.interview_type,
        saved_at: archived.saved_at,
        turn_count: archived.session.history.len(),
    }
}

async fn read_archived(path: &Path) -> Result<ArchivedSession, ArchiveError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// The archive store. Owns the durable copy once written; it never
/// reaches back into the live session store.
pub struct SessionArchive {
    index: RwLock<HashMap<Uuid, ArchivedSession>>,
    dir: PathBuf,
}

impl SessionArchive {
    /// Creates an archive rooted at `dir`, creating the directory if
    /// needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            index: RwLock::new(HashMap::new()),
            dir,
        })
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Snapshots `session`. Idempotent per id: a re-save overwrites the
    /// previous archive in both locations rather than appending a
    /// duplicate. A failed file write is logged but does not fail the
    /// save; the in-memory index still holds the record.
    pub async fn save(&self, session: Session) -> ArchivedSession {
        let archived = ArchivedSession {
            session,
            saved_at: Utc::now(),
        };
        let id = archived.session.id;
        self.index.write().await.insert(id, archived.clone());

        match serde_json::to_vec_pretty(&archived) {
            Ok(bytes) => {
                if let Err(err) = tokio::fs::write(self.path_for(id), bytes).await {
                    warn!(%id, error = %err, "failed to persist archived session to disk");
                }
            }
            Err(err) => {
                warn!(%id, error = %err, "failed to serialize archived session");
            }
        }
        archived
    }

    /// Summaries of everything archived, merged from the index and the
    /// directory and de-duplicated by id with the in-memory copy taking
    /// precedence.
    pub async fn list(&self) -> Vec<ArchiveSummary> {
        let mut summaries = Vec::new();
        let mut seen: HashSet<Uuid> = HashSet::new();

        {
            let index = self.index.read().await;
            for archived in index.values() {
                seen.insert(archived.session.id);
                summaries.push(summary_of(archived));
            }
        }

        // Disk entries not shadowed by the index.
        match tokio::fs::read_dir(&self.dir).await {
            Ok(mut entries) => {
                while let Ok(Some(entry)) = entries.next_entry().await {
                    let path = entry.path();
                    if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                        continue;
                    }
                    let Some(id) = path
                        .file_stem()
                        .and_then(|stem| stem.to_str())
                        .and_then(|stem| Uuid::parse_str(stem).ok())
                    else {
                        continue;
                    };
                    if seen.contains(&id) {
                        continue;
                    }
                    match read_archived(&path).await {
                        Ok(archived) => summaries.push(summary_of(&archived)),
                        Err(err) => {
                            warn!(path = %path.display(), error = %err, "skipping unreadable archive file");
                        }
                    }
                }
            }
            Err(err) => warn!(error = %err, "failed to read archive directory"),
        }

        summaries
    }

    /// Fetches an archived session, index first, then disk.
    pub async fn get(&self, id: Uuid) -> Result<ArchivedSession, ArchiveError> {
        if let Some(archived) = self.index.read().await.get(&id) {
            return Ok(archived.clone());
        }
        let path = self.path_for(id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(ArchiveError::NotFound(id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Removes an archived session from both locations. Succeeds when at
    /// least one location held the record.
    pub async fn delete(&self, id: Uuid) -> Result<(), ArchiveError> {
        let removed_from_index = self.index.write().await.remove(&id).is_some();
        let removed_from_disk = match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => true,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => false,
            Err(err) => return Err(err.into()),
        };

        if removed_from_index || removed_from_disk {
            Ok(())
        } else {
            Err(ArchiveError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Speaker, Tone, Turn, Verbosity};

    fn sample_session(turns: usize) -> Session {
        let history = (0..turns)
            .map(|i| {
                let speaker = if i % 2 == 0 {
                    Speaker::Interviewer
                } else {
                    Speaker::Candidate
                };
                Turn::now(speaker, format!("turn {i}"))
            })
            .collect();
        Session {
            id: Uuid::new_v4(),
            interview_type: InterviewType::SystemDesign,
            tone: Tone::Neutral,
            verbosity: Verbosity::Medium,
            topic: Some("Search Ranking System".to_string()),
            history,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let archive = SessionArchive::new(dir.path()).unwrap();
        let session = sample_session(3);
        let id = session.id;

        let archived = archive.save(session).await;
        assert_eq!(archived.session.id, id);

        let fetched = archive.get(id).await.unwrap();
        assert_eq!(fetched.session.history.len(), 3);
        assert_eq!(fetched.saved_at, archived.saved_at);
    }

    #[tokio::test]
    async fn test_save_is_idempotent_per_id() {
        let dir = tempfile::tempdir().unwrap();
        let archive = SessionArchive::new(dir.path()).unwrap();

        let mut session = sample_session(1);
        let id = session.id;
        archive.save(session.clone()).await;

        session.history.push(Turn::now(Speaker::Candidate, "more"));
        archive.save(session).await;

        let summaries = archive.list().await;
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, id);
        // The second save's content wins.
        assert_eq!(summaries[0].turn_count, 2);
        assert_eq!(archive.get(id).await.unwrap().session.history.len(), 2);
    }

    #[tokio::test]
    async fn test_list_merges_disk_entries_from_prior_process() {
        let dir = tempfile::tempdir().unwrap();
        let session = sample_session(2);
        let id = session.id;

        // First archive instance persists, then goes away.
        {
            let archive = SessionArchive::new(dir.path()).unwrap();
            archive.save(session).await;
        }

        // A fresh instance has an empty index but sees the file.
        let archive = SessionArchive::new(dir.path()).unwrap();
        let summaries = archive.list().await;
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, id);
        assert_eq!(summaries[0].turn_count, 2);

        let fetched = archive.get(id).await.unwrap();
        assert_eq!(fetched.session.id, id);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let archive = SessionArchive::new(dir.path()).unwrap();

        let result = archive.get(Uuid::new_v4()).await;
        assert!(matches!(result, Err(ArchiveError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_both_locations() {
        let dir = tempfile::tempdir().unwrap();
        let archive = SessionArchive::new(dir.path()).unwrap();
        let session = sample_session(1);
        let id = session.id;
        archive.save(session).await;

        archive.delete(id).await.unwrap();
        assert!(matches!(
            archive.get(id).await,
            Err(ArchiveError::NotFound(_))
        ));
        assert!(archive.list().await.is_empty());

        // A second delete finds the record in neither location.
        assert!(matches!(
            archive.delete(id).await,
            Err(ArchiveError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_succeeds_from_disk_only() {
        let dir = tempfile::tempdir().unwrap();
        let session = sample_session(1);
        let id = session.id;
        {
            let archive = SessionArchive::new(dir.path()).unwrap();
            archive.save(session).await;
        }

        // Fresh index; the record exists only on disk.
        let archive = SessionArchive::new(dir.path()).unwrap();
        archive.delete(id).await.unwrap();
        assert!(matches!(
            archive.get(id).await,
            Err(ArchiveError::NotFound(_))
        ));
    }
}
