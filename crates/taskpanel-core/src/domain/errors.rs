//! Errors - 永続化まわりのエラー型

use std::path::PathBuf;

use thiserror::Error;

/// PersistenceError はタスクファイルの読み書きで起きるエラー
///
/// store はこのエラーで操作を失敗させない。呼び出し側へ報告するだけ。
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("tasks file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tasks file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode tasks: {0}")]
    Encode(#[source] serde_json::Error),
}

impl PersistenceError {
    /// ファイルが存在しないだけか（初回起動時など）
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
