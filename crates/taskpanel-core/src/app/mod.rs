//! App - HTTP アプリケーション層
//!
//! ports を axum の Router に結びつけます。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: store と token から App を構築
//! - **auth**: bearer token middleware
//! - **handlers**: 5 つの API ルート
//! - **assets**: 同梱 UI とリダイレクト

pub mod assets;
pub mod auth;
pub mod builder;
pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use self::builder::{App, AppBuilder, BuildError};
pub use self::config::{DEFAULT_TOKEN, ServerConfig};
pub use self::error::ApiError;
pub use self::state::AppState;
