//! HTTP persistence gateway.
//!
//! The wire contract is blob-level: `GET /api/data` returns the whole stored
//! document as plain text and `POST /api/data` overwrites it entirely. The
//! JSON endpoints are read-only projections of the decoded document for
//! non-browser clients.

use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;

use crate::{
    chart,
    codec,
    config::ServerConfig,
    document::{BudgetDocument, Theme},
    errors::BudgetError,
    storage::{DocumentStore, TextStore},
};

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Serialize)]
struct SaveBody {
    success: bool,
    message: &'static str,
}

#[derive(Serialize)]
struct CategorySummary {
    emoji: String,
    name: String,
    key: String,
    total: i64,
}

#[derive(Serialize)]
struct SummaryBody {
    salary: i64,
    theme: Theme,
    total_expenses: i64,
    remaining: i64,
    categories: Vec<CategorySummary>,
}

/// Builds the application router around a shared document store.
pub fn router(store: Arc<TextStore>, public_dir: &Path) -> Router {
    Router::new()
        .route("/api/data", get(get_data).post(post_data))
        .route("/api/summary", get(get_summary))
        .route("/api/chart", get(get_chart))
        .fallback_service(ServeDir::new(public_dir))
        .layer(middleware::from_fn(no_cache_for_html))
        .with_state(store)
}

/// Binds the listener and serves until shutdown.
pub async fn run(config: ServerConfig) -> Result<(), BudgetError> {
    let store = Arc::new(TextStore::new(config.data_root.clone()));
    let app = router(store, &config.public_dir);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Troškovnik server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_data(State(store): State<Arc<TextStore>>) -> Response {
    match store.load() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            text,
        )
            .into_response(),
        Err(BudgetError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: "Data file not found",
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "error reading data file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to read data file",
                }),
            )
                .into_response()
        }
    }
}

async fn post_data(
    State(store): State<Arc<TextStore>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if !is_plain_text(&headers) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Content must be plain text",
            }),
        )
            .into_response();
    }
    match store.save(&body) {
        Ok(()) => Json(SaveBody {
            success: true,
            message: "Data saved successfully",
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "error writing data file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to write data file",
                }),
            )
                .into_response()
        }
    }
}

async fn get_summary(State(store): State<Arc<TextStore>>) -> Response {
    match current_document(store.as_ref()) {
        Ok(doc) => {
            let categories = doc
                .categories
                .iter()
                .map(|cat| CategorySummary {
                    emoji: cat.emoji.clone(),
                    name: cat.name.clone(),
                    key: cat.composite_key(),
                    total: doc.category_total(cat),
                })
                .collect();
            Json(SummaryBody {
                salary: doc.salary,
                theme: doc.theme,
                total_expenses: doc.total_expenses(),
                remaining: doc.remaining(),
                categories,
            })
            .into_response()
        }
        Err(err) => storage_failure(err),
    }
}

async fn get_chart(State(store): State<Arc<TextStore>>) -> Response {
    match current_document(store.as_ref()) {
        Ok(doc) => Json(chart::prepare(&doc)).into_response(),
        Err(err) => storage_failure(err),
    }
}

/// Decodes the stored document; a never-saved store reads as an empty budget.
fn current_document(store: &dyn DocumentStore) -> Result<BudgetDocument, BudgetError> {
    match store.load() {
        Ok(text) => Ok(codec::decode(&text)),
        Err(BudgetError::NotFound) => Ok(BudgetDocument::new()),
        Err(err) => Err(err),
    }
}

fn storage_failure(err: BudgetError) -> Response {
    tracing::error!(error = %err, "error reading data file");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Failed to read data file",
        }),
    )
        .into_response()
}

fn is_plain_text(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("text/plain"))
        .unwrap_or(false)
}

/// HTML responses must never be cached so document edits show up on reload.
async fn no_cache_for_html(request: Request, next: Next) -> Response {
    let html = {
        let path = request.uri().path();
        path == "/" || path.ends_with(".html")
    };
    let mut response = next.run(request).await;
    if html {
        let headers = response.headers_mut();
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, private"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    }
    response
}
