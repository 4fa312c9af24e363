use axum::{
    extract::{Form, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::helpers::{build_index_template, render_template};
use crate::api::Transport;
use crate::models::AppState;
use crate::view::{Field, View};

// Embed the default stylesheet in the binary
const DEFAULT_STYLESHEET: &str = include_str!("../../static/styles.css");

#[derive(Deserialize, Debug, Default)]
pub struct SubmitForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub key: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct RefreshForm {
    #[serde(default)]
    pub key: String,
}

pub async fn index_get<T: Transport + 'static>(State(state): State<AppState<T>>) -> Response {
    let client = state.client();
    if let Some(Err(e)) = client.start().await {
        tracing::warn!(%e, "Initial load failed");
    }
    render_template(build_index_template(&state.config, client.view()))
}

pub async fn submit_post<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Form(form): Form<SubmitForm>,
) -> Response {
    let client = state.client();
    let view = client.view();
    view.set_field(Field::Name, &form.name);
    view.set_field(Field::Role, &form.role);
    if state.config.access_control {
        view.set_field(Field::Key, &form.key);
    }

    match client.submit().await {
        Ok(outcome) => {
            view.push_flash("Saved to sheet.");
            if let Err(e) = outcome.refresh {
                tracing::warn!(%e, "Refresh after submit failed");
            }
        }
        Err(e) => view.push_flash(e.to_string()),
    }

    render_template(build_index_template(&state.config, view))
}

pub async fn refresh_post<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Form(form): Form<RefreshForm>,
) -> Response {
    let client = state.client();
    let view = client.view();
    if state.config.access_control {
        view.set_field(Field::Key, &form.key);
    }

    if let Err(e) = client.fetch_data().await {
        if e.is_validation() {
            view.push_flash(e.to_string());
        }
    }

    render_template(build_index_template(&state.config, view))
}

pub async fn stylesheet_get() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=3600"),
        ],
        DEFAULT_STYLESHEET,
    )
}
