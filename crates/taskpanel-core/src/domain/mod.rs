//! Domain model (Task, TaskConfig, errors).

pub mod errors;
pub mod task;

pub use self::errors::PersistenceError;
pub use self::task::{Task, TaskConfig, TaskType};
