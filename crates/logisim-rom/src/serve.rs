//! HTTP front end: upload a memory dump, download the ROM listing.

use anyhow::{Context, Result};
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::convert::{self, ConvertError};
use crate::input;
use crate::output::{self, DEFAULT_OUTPUT_NAME};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Logisim ROM converter</title></head>
<body>
<h1>Memory dump to Logisim ROM</h1>
<form action="/upload" method="post" enctype="multipart/form-data">
  <input type="file" name="file">
  <input type="submit" value="Convert">
</form>
</body>
</html>
"#;

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub addr: SocketAddr,
    pub upload_dir: PathBuf,
    pub processed_dir: PathBuf,
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServeConfig>,
    // Every upload overwrites the same listing file.
    processing: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: ServeConfig) -> Self {
        Self {
            config: Arc::new(config),
            processing: Arc::new(Mutex::new(())),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    fn internal_error(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        tracing::debug!(line = err.line(), "Rejecting malformed dump");
        Self::unprocessable(format!("malformed memory dump: {err}"))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal_error(format!("{err:#}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {}", self.message);
        } else {
            tracing::warn!("Request rejected: {}", self.message);
        }
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: ServeConfig) -> Result<()> {
    for dir in [&config.upload_dir, &config.processed_dir] {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }

    let addr = config.addr;
    let app = router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!("Listening on http://{addr}");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "ok"
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("malformed upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        // A `file` field without a filename is plain form data, not an upload.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if file_name.is_empty() {
            return Err(AppError::bad_request("No selected file"));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("malformed upload: {e}")))?;

        let upload_path = state.config.upload_dir.join(secure_filename(&file_name));
        let output_path = state.config.processed_dir.join(DEFAULT_OUTPUT_NAME);
        tracing::info!("Received {} ({} bytes)", file_name, data.len());

        let _guard = state.processing.lock().await;
        tokio::fs::write(&upload_path, &data)
            .await
            .with_context(|| format!("failed to save upload to {}", upload_path.display()))?;
        let raw = String::from_utf8(data.to_vec()).map_err(|e| {
            AppError::unprocessable(format!("memory dump is not valid UTF-8: {e}"))
        })?;
        let listing = tokio::task::spawn_blocking(move || convert_upload(&raw, &output_path))
                .await
                .map_err(|e| AppError::internal_error(format!("conversion task failed: {e}")))??;

        return Ok((
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{DEFAULT_OUTPUT_NAME}\""),
                ),
            ],
            listing,
        )
            .into_response());
    }

    Err(AppError::bad_request("No file in request"))
}

fn convert_upload(raw: &str, output_path: &Path) -> Result<String, AppError> {
    let words = input::parse_mem_dump(raw);
    let lines = convert::convert(&words)?;
    output::write_listing(output_path, &lines)?;
    Ok(output::render_listing(&lines))
}

/// Reduces a client-supplied file name to a flat, filesystem-safe one.
///
/// Path separators become `_`, characters outside `[A-Za-z0-9._-]` are
/// dropped, and leading/trailing dots and underscores are stripped.
pub fn secure_filename(name: &str) -> String {
    let flattened = name.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let cleaned = cleaned.trim_matches(['.', '_']);
    if cleaned.is_empty() {
        "upload.txt".to_string()
    } else {
        cleaned.to_string()
    }
}
