//! Ports - 抽象化レイヤー
//!
//! store と永続化先をそれぞれ trait で切り離し、
//! HTTP 層は `dyn TaskStore` だけに依存します。

pub mod persistence;
pub mod task_store;

pub use self::persistence::TaskPersistence;
pub use self::task_store::{Mutation, MutationReport, TaskStore};
