use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Json, Router};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;

use flexcat::api::ApiRequest;
use flexcat::hooks::HookRegistry;
use flexcat::page::ViewRequest;
use flexcat::site::{Wiki, WikiError};

use crate::ServeArgs;

const MAIN_PAGE: &str = "/wiki/Main_Page";

/// Render one page. Views touch SQLite, so they run off the async workers.
async fn page_handler(
    State(wiki): State<Arc<Wiki>>,
    Path(title): Path<String>,
    Query(request): Query<ViewRequest>,
) -> Response {
    let result = tokio::task::spawn_blocking(move || wiki.view(&title, request)).await;

    match result {
        Ok(Ok(page)) => Html(page.html).into_response(),
        Ok(Err(WikiError::InvalidTitle(title))) => {
            (StatusCode::BAD_REQUEST, format!("Invalid title: {title}")).into_response()
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "page view failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "page view task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `api.php?action=query&list=categoriesonanswers&coatitle=..`
async fn api_handler(
    State(wiki): State<Arc<Wiki>>,
    Query(request): Query<ApiRequest>,
) -> Response {
    let result = tokio::task::spawn_blocking(move || wiki.api(&request)).await;

    match result {
        Ok(Ok(body)) => Json(body).into_response(),
        // Usage errors are part of the API's normal answers
        Ok(Err(e)) if e.is_usage() => Json(e.to_json()).into_response(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "api query failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(e.to_json())).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "api task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn router(wiki: Arc<Wiki>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary(MAIN_PAGE) }))
        .route("/wiki/{*title}", get(page_handler))
        .route("/api.php", get(api_handler))
        .with_state(wiki)
}

pub async fn run(args: &ServeArgs) -> Result<(), anyhow::Error> {
    let config = super::load_config(args.config_file.as_deref())?;
    let wiki = Arc::new(Wiki::open(&config, HookRegistry::new())?);

    let app = router(wiki);

    // Parse the address
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;

    // Determine the URL to display
    let display_host = if args.bind == "0.0.0.0" {
        "localhost"
    } else {
        &args.bind
    };
    let url = format!("http://{}:{}", display_host, args.port);

    println!("\nServing wiki at {}", url);
    println!("Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
