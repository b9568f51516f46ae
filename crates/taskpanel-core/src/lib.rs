//! taskpanel-core
//!
//! Core building blocks for the task control panel.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Task, TaskConfig, TaskType, errors）
//! - **ports**: 抽象化レイヤー（TaskStore, TaskPersistence）
//! - **impls**: 実装（InMemoryTaskStore, JsonFilePersistence, NoopPersistence）
//! - **app**: HTTP 層（AppBuilder, auth, handlers, assets）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
