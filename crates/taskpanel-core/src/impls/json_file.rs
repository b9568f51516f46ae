//! JsonFilePersistence - タスク一覧を JSON ファイルに保存する
//!
//! # 保存手順
//! 1. 一覧全体をインデント付き JSON に変換
//! 2. 同じディレクトリの一時ファイル（`.<name>.tmp`）に書き込み、fsync
//! 3. rename で本来のファイルを置き換える
//!
//! rename は同一ファイルシステム内ではアトミックなので、書き込み途中で
//! プロセスが落ちても既存のファイルが壊れることはない。

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::domain::{PersistenceError, Task};
use crate::ports::TaskPersistence;

/// JSON ファイルを保存先とする TaskPersistence
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// 既定のファイル名（カレントディレクトリ相対）
    pub const DEFAULT_FILE: &'static str = "tasks.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or(OsStr::new("tasks")));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for JsonFilePersistence {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FILE)
    }
}

#[async_trait]
impl TaskPersistence for JsonFilePersistence {
    async fn load(&self) -> Result<Vec<Task>, PersistenceError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(self.io_error(e)),
        };

        // 空の一覧が `null` として保存されているファイルも受け付ける
        let tasks: Option<Vec<Task>> =
            serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Decode {
                path: self.path.clone(),
                source,
            })?;
        Ok(tasks.unwrap_or_default())
    }

    async fn save(&self, tasks: &[Task]) -> Result<(), PersistenceError> {
        let data = serde_json::to_vec_pretty(tasks).map_err(PersistenceError::Encode)?;
        let temp = self.temp_path();

        let mut file = tokio::fs::File::create(&temp)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(&data).await.map_err(|e| self.io_error(e))?;
        file.sync_all().await.map_err(|e| self.io_error(e))?;
        drop(file);

        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskConfig;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("t1", "ping", "09:30", "http_check").with_payload("https://example.com"),
            Task::new("cfg", "switch", "03:00", "update_config").with_config(TaskConfig {
                remote_url: "https://panel.example".to_string(),
                auth_token: "abc".to_string(),
            }),
            Task::new("t1", "duplicate id", "12:00", "http_check"),
        ]
    }

    #[tokio::test]
    async fn save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = JsonFilePersistence::new(dir.path().join("tasks.json"));

        let tasks = sample_tasks();
        persistence.save(&tasks).await.unwrap();

        let reloaded = JsonFilePersistence::new(dir.path().join("tasks.json"));
        assert_eq!(reloaded.load().await.unwrap(), tasks);
    }

    #[tokio::test]
    async fn saved_file_is_indented_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let persistence = JsonFilePersistence::new(&path);

        persistence
            .save(&[Task::new("t1", "ping", "09:30", "http_check")])
            .await
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": \"t1\""));
        // 一時ファイルは残らない
        assert!(!dir.path().join(".tasks.json.tmp").exists());
    }

    #[tokio::test]
    async fn save_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = JsonFilePersistence::new(dir.path().join("tasks.json"));

        persistence.save(&sample_tasks()).await.unwrap();
        persistence.save(&[]).await.unwrap();

        assert!(persistence.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = JsonFilePersistence::new(dir.path().join("absent.json"));

        let err = persistence.load().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn malformed_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFilePersistence::new(&path).load().await.unwrap_err();
        assert!(matches!(err, PersistenceError::Decode { .. }));
    }

    #[tokio::test]
    async fn null_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "null").unwrap();

        assert!(JsonFilePersistence::new(&path).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = JsonFilePersistence::new(dir.path().join("nope").join("tasks.json"));

        let err = persistence.save(&sample_tasks()).await.unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
    }

    #[test]
    fn temp_file_sits_next_to_target() {
        let persistence = JsonFilePersistence::new("/var/lib/panel/tasks.json");
        assert_eq!(
            persistence.temp_path(),
            PathBuf::from("/var/lib/panel/.tasks.json.tmp")
        );
    }
}
