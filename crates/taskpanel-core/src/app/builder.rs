//! AppBuilder - store と token から HTTP アプリケーションを組み立てる
//!
//! # ルート
//! - `/api/*`: bearer token 必須（auth middleware）
//! - `/`: `/static/index.html` へリダイレクト
//! - `/static/*`: 同梱 UI（認証なし）
//!
//! # Fail-fast 設計
//! - token が空なら build() で BuildError を返す
//!   （空 token だと `Authorization: Bearer ` だけで通ってしまう）

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

use super::state::AppState;
use super::{assets, auth, handlers};
use crate::ports::TaskStore;

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new(store)
///     .token("my-secret")
///     .build()?;
/// app.serve(listener, shutdown_signal()).await?;
/// ```
pub struct AppBuilder {
    store: Arc<dyn TaskStore>,
    token: Option<String>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("bearer token must be set")]
    MissingToken,

    #[error("bearer token must not be empty")]
    EmptyToken,
}

impl AppBuilder {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store, token: None }
    }

    /// API に要求する共有シークレット
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let token = self.token.ok_or(BuildError::MissingToken)?;
        if token.is_empty() {
            return Err(BuildError::EmptyToken);
        }

        let state = AppState {
            store: self.store,
            token: token.into(),
        };
        Ok(App {
            router: router(state),
        })
    }
}

fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/tasks", get(handlers::list_tasks).post(handlers::replace_tasks))
        // PUT / DELETE は id が "add" のタスク宛て（`{id}` より静的ルートが優先されるため）
        .route(
            "/tasks/add",
            post(handlers::add_task)
                .put(handlers::update_task_named_add)
                .delete(handlers::delete_task_named_add),
        )
        .route(
            "/tasks/{id}",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/", get(assets::redirect_to_index))
        .route("/static/{*path}", get(assets::serve))
        .nest("/api", api)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// App は組み立て済みの HTTP アプリケーション
pub struct App {
    router: Router,
}

impl App {
    /// テストなどで直接リクエストを流すための Router
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// `shutdown` が完了するまで待ち受ける
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            info!("control panel listening on http://{addr}");
        }
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
