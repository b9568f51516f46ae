//! 同梱の UI（認証なし）

use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

/// バイナリに埋め込む静的ファイル
#[derive(Embed)]
#[folder = "assets/"]
pub struct Assets;

pub const INDEX_PATH: &str = "/static/index.html";

/// GET / - UI へ 302 で飛ばす
pub async fn redirect_to_index() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, INDEX_PATH)]).into_response()
}

/// GET /static/{*path}
pub async fn serve(Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
