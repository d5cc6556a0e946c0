use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::Html,
};

use crate::data_models::FormInput;
use crate::render;
use crate::widget::Widget;

use super::AppState;
use super::models::SubmitResponse;

fn mount_page(state: &AppState, widget_html: &str) -> Result<Html<String>, (StatusCode, String)> {
    render::mount(&state.host_page, &state.container_id, widget_html)
        .map(Html)
        .map_err(|e| {
            tracing::error!("cannot mount widget: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}

pub async fn page_handler(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let widget = Widget::new(state.lookup.clone(), state.failure_policy);
    mount_page(&state, &widget.render(&FormInput::default()))
}

/// Plain form POST. The widget lives for this request only; if the client
/// goes away the handler is dropped and the lookup with it.
pub async fn form_submit_handler(
    State(state): State<AppState>,
    Form(input): Form<FormInput>,
) -> Result<(StatusCode, Html<String>), (StatusCode, String)> {
    let widget = Widget::new(state.lookup.clone(), state.failure_policy);

    let status = match widget.submit(&input).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::info!("form submission blocked: {}", e);
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };

    let page = mount_page(&state, &widget.render(&input))?;
    Ok((status, page))
}

pub async fn submit_handler(
    State(state): State<AppState>,
    Json(input): Json<FormInput>,
) -> Result<Json<SubmitResponse>, (StatusCode, String)> {
    let widget = Widget::new(state.lookup.clone(), state.failure_policy);

    let terminal = widget
        .submit(&input)
        .await
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    Ok(Json(SubmitResponse::from(terminal)))
}
