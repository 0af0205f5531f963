use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::Local;

use crate::services::overview_service::{self, OverviewPageData};
use crate::web::{build_id, SharedConfig};

#[derive(Template)]
#[template(path = "overview.html")]
pub struct OverviewTemplate<'a> {
    pub page: &'a OverviewPageData,
    pub build_id: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub build_id: &'a str,
}

pub fn render_overview(page: &OverviewPageData) -> askama::Result<String> {
    OverviewTemplate {
        page,
        build_id: build_id(),
    }
    .render()
}

pub fn render_error(message: &str) -> Response {
    let template = ErrorTemplate {
        message,
        build_id: build_id(),
    };
    let body = template
        .render()
        .unwrap_or_else(|_| message.to_string());
    (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
}

pub async fn overview_handler(State(config): State<SharedConfig>) -> Response {
    let now = Local::now().naive_local();
    let result =
        tokio::task::spawn_blocking(move || overview_service::build_overview_page(&config, now))
            .await;

    let page = match result {
        Ok(Ok(page)) => page,
        Ok(Err(err)) => {
            tracing::error!(error = %err, "overview_handler_failed");
            return render_error(&format!("Could not load trial organizations: {err}"));
        }
        Err(err) => {
            tracing::error!(error = %err, "overview_handler_join_failed");
            return render_error("Could not load trial organizations");
        }
    };

    match render_overview(&page) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "overview_render_failed");
            render_error("Could not render trial organizations")
        }
    }
}
