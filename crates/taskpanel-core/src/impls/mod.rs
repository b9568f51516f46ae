//! Impls - ports の実装
//!
//! - InMemoryTaskStore: RwLock で守られたタスク一覧
//! - JsonFilePersistence: JSON ファイルへの保存（temp + rename）
//! - NoopPersistence: 保存しない（テスト用）

pub mod inmem_store;
pub mod json_file;
pub mod noop;

pub use self::inmem_store::InMemoryTaskStore;
pub use self::json_file::JsonFilePersistence;
pub use self::noop::NoopPersistence;
