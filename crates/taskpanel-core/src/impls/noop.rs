//! NoopPersistence - 何も保存しない永続化先
//!
//! テストや一時的なインスタンスで、ディスクに触れずに store を使うため。

use async_trait::async_trait;

use crate::domain::{PersistenceError, Task};
use crate::ports::TaskPersistence;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPersistence;

#[async_trait]
impl TaskPersistence for NoopPersistence {
    async fn load(&self) -> Result<Vec<Task>, PersistenceError> {
        Ok(Vec::new())
    }

    async fn save(&self, _tasks: &[Task]) -> Result<(), PersistenceError> {
        Ok(())
    }
}
