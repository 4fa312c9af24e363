use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::config::AppConfig;
use crate::templates::{IndexTemplate, LogLine};
use crate::view::{DisplayRegion, PageView, SUBMIT_PENDING_LABEL};

pub fn render_template<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Build the form page from one request's view, consuming its flash
/// notices.
pub fn build_index_template(config: &AppConfig, view: &PageView) -> IndexTemplate {
    let page = view.snapshot();
    let flash_messages = view.take_flash();
    let has_flash_messages = !flash_messages.is_empty();

    let (table_html, message, message_is_error) = match page.display {
        DisplayRegion::Empty => (None, None, false),
        DisplayRegion::Table(html) => (Some(html), None, false),
        DisplayRegion::Message { text, is_error } => (None, Some(text), is_error),
    };

    IndexTemplate {
        version: env!("CARGO_PKG_VERSION"),
        configured: config.is_configured(),
        access_control: config.access_control,
        name: page.name,
        role: page.role,
        submit_label: page.submit_label.to_string(),
        pending_label: SUBMIT_PENDING_LABEL,
        pending: page.pending,
        table_html,
        message,
        message_is_error,
        show_log: config.debug_log,
        log_lines: page.log.iter().map(LogLine::from).collect(),
        flash_messages,
        has_flash_messages,
    }
}
