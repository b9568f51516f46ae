//! TaskPersistence port - メモリ上の一覧とディスクの境界
//!
//! # 実装
//! - **JsonFilePersistence**: インデント付き JSON ファイル（本番用）
//! - **NoopPersistence**: 何も保存しない（テスト・分離インスタンス用）

use async_trait::async_trait;

use crate::domain::{PersistenceError, Task};

/// TaskPersistence は一覧全体の読み込みと上書き保存を担う
#[async_trait]
pub trait TaskPersistence: Send + Sync {
    /// 保存済みの一覧を読み込む
    ///
    /// ファイルがなければ `PersistenceError::NotFound`。
    async fn load(&self) -> Result<Vec<Task>, PersistenceError>;

    /// 一覧全体で保存先を上書きする
    async fn save(&self, tasks: &[Task]) -> Result<(), PersistenceError>;
}
