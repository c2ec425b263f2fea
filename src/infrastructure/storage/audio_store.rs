use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use uuid::Uuid;

/// Filesystem store for audio artifacts.
///
/// Finals live at `{id}.mp3`, per-chunk temporaries at
/// `{id}_part{index}.mp3`. Every artifact is keyed by its job id, so
/// concurrent jobs never touch each other's files and no locking is
/// needed.
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the audio directory if it does not exist
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    pub fn final_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.mp3"))
    }

    fn part_path(&self, id: Uuid, index: usize) -> PathBuf {
        self.dir.join(format!("{id}_part{index}.mp3"))
    }

    pub async fn write_part(
        &self,
        id: Uuid,
        index: usize,
        audio: &[u8],
    ) -> std::io::Result<PathBuf> {
        let path = self.part_path(id, index);
        fs::write(&path, audio).await?;
        Ok(path)
    }

    pub async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        fs::read(path).await
    }

    pub async fn write_final(&self, id: Uuid, audio: &[u8]) -> std::io::Result<()> {
        fs::write(self.final_path(id), audio).await
    }

    /// Write an artifact under an explicit filename (single-shot path)
    pub async fn write_named(&self, filename: &str, audio: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.dir.join(filename);
        fs::write(&path, audio).await?;
        Ok(path)
    }

    pub async fn final_exists(&self, id: Uuid) -> bool {
        fs::try_exists(self.final_path(id)).await.unwrap_or(false)
    }

    pub async fn read_final(&self, id: Uuid) -> Option<Vec<u8>> {
        fs::read(self.final_path(id)).await.ok()
    }

    /// Best-effort removal of a job's part files. Missing files are fine;
    /// anything else is logged and skipped.
    pub async fn remove_parts(&self, id: Uuid) {
        let prefix = format!("{id}_part");
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!(error = %error, "could not scan audio directory for part files");
                return;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(&prefix) {
                if let Err(error) = fs::remove_file(entry.path()).await {
                    tracing::warn!(
                        error = %error,
                        file = name,
                        "could not remove part file"
                    );
                }
            }
        }
    }

    /// Delete finished artifacts older than `max_age`. Returns how many
    /// files were removed.
    pub async fn purge_stale(&self, max_age: Duration) -> std::io::Result<usize> {
        let cutoff = SystemTime::now()
            .checked_sub(max_age)
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let mut removed = 0;

        let mut entries = fs::read_dir(&self.dir).await?;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.ends_with(".mp3") {
                continue;
            }

            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            let Ok(modified) = metadata.modified() else {
                continue;
            };

            if modified < cutoff {
                match fs::remove_file(entry.path()).await {
                    Ok(()) => removed += 1,
                    Err(error) => {
                        tracing::warn!(error = %error, file = name, "could not purge audio file");
                    }
                }
            }
        }

        Ok(removed)
    }
}
