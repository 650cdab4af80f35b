// log.rs — Append-only JSONL audit log.
//
// One JSON object per line, append-only, flushed per event. Each line's
// hash becomes the `previous_hash` of the next, so the file is a hash
// chain: verify_chain() walks it and reports the first broken link.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::AuditError;
use crate::event::AuditEvent;
use crate::hasher;

/// An append-only audit log backed by a JSONL file.
pub struct AuditLog {
    writer: BufWriter<File>,
    path: PathBuf,
    /// Hash of the last line written; the link the next event will carry.
    last_hash: Option<String>,
}

impl AuditLog {
    /// Open (or create) the log at `path`.
    ///
    /// An existing file is scanned to recover the chain tail so new
    /// events link onto the old history instead of starting over.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| AuditError::Open {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let last_hash = if path.exists() {
            last_line_hash(&path)?
        } else {
            None
        };

        // Append mode: history is never rewritten through this handle.
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| AuditError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            last_hash,
        })
    }

    /// The file this log writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an event, linking it to the previous one and flushing.
    pub fn append(&mut self, event: &mut AuditEvent) -> Result<(), AuditError> {
        event.previous_hash = self.last_hash.clone();

        let line = serde_json::to_string(event)?;
        self.last_hash = Some(hasher::hash_str(&line));

        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;

        Ok(())
    }

    /// Read every event from a log file, oldest first.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<AuditEvent>, AuditError> {
        let file = File::open(path.as_ref()).map_err(|source| AuditError::Open {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        let mut events = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            events.push(serde_json::from_str(&line)?);
        }
        Ok(events)
    }

    /// Walk the hash chain of a log file.
    ///
    /// Returns the number of verified events, or `ChainBroken` at the
    /// first line whose `previous_hash` does not match the digest of the
    /// line before it.
    pub fn verify_chain(path: impl AsRef<Path>) -> Result<usize, AuditError> {
        let file = File::open(path.as_ref()).map_err(|source| AuditError::Open {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        let mut expected: Option<String> = None;
        let mut verified = 0;

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let event: AuditEvent = serde_json::from_str(&line)?;
            if event.previous_hash != expected {
                return Err(AuditError::ChainBroken {
                    line: line_no + 1,
                    expected,
                    actual: event.previous_hash,
                });
            }

            expected = Some(hasher::hash_str(&line));
            verified += 1;
        }

        Ok(verified)
    }
}

/// Hash of the last non-empty line of an existing log file.
fn last_line_hash(path: &Path) -> Result<Option<String>, AuditError> {
    let file = File::open(path).map_err(|source| AuditError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut last = None;
    for line in BufReader::new(file).lines() {
        let line = line?;
        if !line.trim().is_empty() {
            last = Some(hasher::hash_str(&line));
        }
    }
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::AuditAction;
    use mp_model::{GoalId, Principal};
    use tempfile::tempdir;

    fn event(action: AuditAction) -> AuditEvent {
        AuditEvent::new(Principal::new("alice"), action, GoalId(1))
    }

    #[test]
    fn append_then_read_all_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        let mut log = AuditLog::open(&path).unwrap();
        log.append(&mut event(AuditAction::GoalCreated)).unwrap();
        log.append(&mut event(AuditAction::MilestoneAdded)).unwrap();

        let events = AuditLog::read_all(&path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action, AuditAction::GoalCreated);
        assert_eq!(events[1].action, AuditAction::MilestoneAdded);
    }

    #[test]
    fn chain_links_consecutive_events() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        let mut log = AuditLog::open(&path).unwrap();
        log.append(&mut event(AuditAction::GoalCreated)).unwrap();
        log.append(&mut event(AuditAction::GoalArchived)).unwrap();

        let events = AuditLog::read_all(&path).unwrap();
        assert!(events[0].previous_hash.is_none());
        assert!(events[1].previous_hash.is_some());
    }

    #[test]
    fn verify_chain_counts_intact_events() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        let mut log = AuditLog::open(&path).unwrap();
        for _ in 0..3 {
            log.append(&mut event(AuditAction::MilestoneCompleted)).unwrap();
        }

        assert_eq!(AuditLog::verify_chain(&path).unwrap(), 3);
    }

    #[test]
    fn tampered_line_breaks_the_chain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        let mut log = AuditLog::open(&path).unwrap();
        log.append(&mut event(AuditAction::GoalCreated)).unwrap();
        log.append(&mut event(AuditAction::GoalArchived)).unwrap();
        drop(log);

        // Edit the first line: change the actor.
        let contents = std::fs::read_to_string(&path).unwrap();
        let tampered = contents.replacen("alice", "mallory", 1);
        std::fs::write(&path, tampered).unwrap();

        let result = AuditLog::verify_chain(&path);
        assert!(matches!(result, Err(AuditError::ChainBroken { line: 2, .. })));
    }

    #[test]
    fn reopen_continues_the_chain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        {
            let mut log = AuditLog::open(&path).unwrap();
            log.append(&mut event(AuditAction::GoalCreated)).unwrap();
        }
        {
            let mut log = AuditLog::open(&path).unwrap();
            log.append(&mut event(AuditAction::GoalArchived)).unwrap();
        }

        assert_eq!(AuditLog::verify_chain(&path).unwrap(), 2);
    }
}
