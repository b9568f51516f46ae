//! TaskStore port - タスク一覧の正本（source of truth）
//!
//! TaskStore は以下を管理します：
//! - プロセス内で唯一のタスク一覧（挿入順）
//! - 変更のたびの永続化（TaskPersistence 経由）
//!
//! # 設計原則
//! - 読み取りは並行、書き込みは直列（reader/writer lock 1 本）
//! - 永続化の失敗で操作を失敗させない。結果は MutationReport で返す
//! - id の一意性は強制しない（update は最初の一致、delete は全一致）

use async_trait::async_trait;

use crate::domain::{PersistenceError, Task};

/// どの変更操作が行われたか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    ReplaceAll,
    Add,
    Update,
    Delete,
}

/// 変更操作の結果
///
/// メモリ上の変更は `saved` の成否に関わらず適用済み。
#[derive(Debug)]
pub struct MutationReport {
    pub mutation: Mutation,
    /// 影響を受けたタスク数（update/delete で 0 なら no-op）
    pub affected: usize,
    pub saved: Result<(), PersistenceError>,
}

impl MutationReport {
    pub fn is_noop(&self) -> bool {
        self.affected == 0
    }
}

/// TaskStore はタスク一覧の CRUD を提供する
///
/// update / delete は対象が見つからなくても成功扱い（`affected == 0`）。
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// 現在の一覧のスナップショット
    async fn list(&self) -> Vec<Task>;

    /// 一覧を丸ごと置き換える（検証なし）
    async fn replace_all(&self, tasks: Vec<Task>) -> MutationReport;

    /// 末尾に追加（id の重複チェックなし）
    async fn add(&self, task: Task) -> MutationReport;

    /// `id` に最初に一致したタスクを `replacement` で置き換える
    ///
    /// `replacement.id` は `id` と一致しなくてもよい。
    async fn update(&self, id: &str, replacement: Task) -> MutationReport;

    /// `id` に一致するタスクをすべて取り除く
    async fn delete(&self, id: &str) -> MutationReport;
}
