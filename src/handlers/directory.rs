use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use crate::models::AppState;
use crate::templates::DirectoryPageTemplate;
use crate::util::hostname_from_url;

use super::helpers::render_template;

pub async fn directory_get(State(state): State<AppState>) -> impl IntoResponse {
    let view = state.view.lock().await;
    render_template(DirectoryPageTemplate {
        api_hostname: hostname_from_url(&state.api_base_url),
        records: view.records(),
        form_name: view.form_name(),
        form_email: view.form_email(),
        editing: view.editing_id().is_some(),
    })
}

#[derive(Deserialize)]
pub struct DirectoryForm {
    pub name: String,
    pub email: String,
}

#[axum::debug_handler]
pub async fn users_submit(
    State(state): State<AppState>,
    Form(form): Form<DirectoryForm>,
) -> Redirect {
    let mut view = state.view.lock().await;
    view.set_form(&form.name, &form.email);
    view.submit().await;
    Redirect::to("/")
}

pub async fn users_edit(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    let mut view = state.view.lock().await;
    view.begin_edit(&id);
    Redirect::to("/")
}

pub async fn users_cancel_edit(State(state): State<AppState>) -> Redirect {
    let mut view = state.view.lock().await;
    view.cancel_edit();
    Redirect::to("/")
}

pub async fn users_delete(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    let mut view = state.view.lock().await;
    view.remove(&id).await;
    Redirect::to("/")
}

pub async fn directory_refresh(State(state): State<AppState>) -> Redirect {
    let mut view = state.view.lock().await;
    view.load().await;
    Redirect::to("/")
}
