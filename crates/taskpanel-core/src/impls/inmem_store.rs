//! InMemoryTaskStore - RwLock で守られたタスク一覧
//!
//! # 実装詳細
//! - `tokio::sync::RwLock<Vec<Task>>` が唯一の共有状態
//! - list は read lock、変更系はすべて write lock
//! - write lock を保持したまま保存するので、保存の順序は変更の順序と一致する
//! - 保存に失敗してもメモリ上の変更は残る（結果は MutationReport で返す）

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::Task;
use crate::impls::NoopPersistence;
use crate::ports::{Mutation, MutationReport, TaskPersistence, TaskStore};

/// プロセス内のタスク一覧
///
/// # 使用例
/// ```ignore
/// let store = InMemoryTaskStore::open(JsonFilePersistence::new("tasks.json")).await;
/// store.add(Task::new("t1", "ping", "09:30", "http_check")).await;
/// ```
pub struct InMemoryTaskStore<P = NoopPersistence> {
    tasks: RwLock<Vec<Task>>,
    persistence: P,
}

impl<P: TaskPersistence> InMemoryTaskStore<P> {
    /// 空の store を作成
    pub fn new(persistence: P) -> Self {
        Self::with_tasks(persistence, Vec::new())
    }

    /// 初期一覧を指定して作成（永続化先からは読み込まない）
    pub fn with_tasks(persistence: P, tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
            persistence,
        }
    }

    /// 永続化先から一覧を読み込んで作成
    ///
    /// 読み込めなければ空で始める。起動は失敗させない。
    pub async fn open(persistence: P) -> Self {
        let tasks = match persistence.load().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "loaded tasks");
                tasks
            }
            Err(e) if e.is_not_found() => {
                info!("{e}, starting with an empty task list");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "could not load tasks, starting with an empty task list");
                Vec::new()
            }
        };
        Self::with_tasks(persistence, tasks)
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// 変更後の一覧を保存して報告を組み立てる（write lock 保持中に呼ぶ）
    async fn commit(&self, tasks: &[Task], mutation: Mutation, affected: usize) -> MutationReport {
        let saved = self.persistence.save(tasks).await;
        debug!(?mutation, affected, total = tasks.len(), saved = saved.is_ok(), "tasks mutated");
        MutationReport {
            mutation,
            affected,
            saved,
        }
    }
}

impl Default for InMemoryTaskStore<NoopPersistence> {
    fn default() -> Self {
        Self::new(NoopPersistence)
    }
}

#[async_trait]
impl<P: TaskPersistence> TaskStore for InMemoryTaskStore<P> {
    async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    async fn replace_all(&self, tasks: Vec<Task>) -> MutationReport {
        let mut guard = self.tasks.write().await;
        let affected = tasks.len();
        *guard = tasks;
        self.commit(&guard, Mutation::ReplaceAll, affected).await
    }

    async fn add(&self, task: Task) -> MutationReport {
        let mut guard = self.tasks.write().await;
        guard.push(task);
        self.commit(&guard, Mutation::Add, 1).await
    }

    async fn update(&self, id: &str, replacement: Task) -> MutationReport {
        let mut guard = self.tasks.write().await;
        let affected = match guard.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                *slot = replacement;
                1
            }
            None => 0,
        };
        self.commit(&guard, Mutation::Update, affected).await
    }

    async fn delete(&self, id: &str) -> MutationReport {
        let mut guard = self.tasks.write().await;
        let before = guard.len();
        guard.retain(|t| t.id != id);
        let affected = before - guard.len();
        self.commit(&guard, Mutation::Delete, affected).await
    }
}
