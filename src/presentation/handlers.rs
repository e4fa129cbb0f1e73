// HTTP request handlers
use crate::presentation::app_state::AppState;
use crate::presentation::markup::ConsolePage;
use crate::domain::view::{ControlId, InvalidViewError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use std::sync::{Arc, PoisonError};

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Console page with the current tiles and active view
pub async fn console_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let status = state.refresher.status();
    let switcher = state.switcher.lock().unwrap_or_else(PoisonError::into_inner);

    let page = ConsolePage {
        switcher: &switcher,
        container: state.container.as_ref(),
        host_view: &state.host_view,
        status: &status,
        reload_every: state.reload_every,
    };
    Html(page.render())
}

/// Navigation control click: activate the bound view and go back to the page
pub async fn navigate(
    Path(control_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Redirect, StatusCode> {
    let mut switcher = state.switcher.lock().unwrap_or_else(PoisonError::into_inner);

    let Some(view_id) = switcher.control_for(&ControlId::new(control_id)).cloned() else {
        return Err(StatusCode::NOT_FOUND);
    };

    switcher.activate(&view_id).map_err(miswired_control)?;

    Ok(Redirect::to("/"))
}

/// A control resolved to a view the switcher does not know. This is a wiring
/// defect: debug builds panic, release builds log it and answer 500.
fn miswired_control(e: InvalidViewError) -> StatusCode {
    if cfg!(debug_assertions) {
        panic!("navigation control bound to an unknown view: {e}");
    }
    tracing::error!(error = %e, "navigation control bound to an unknown view");
    StatusCode::INTERNAL_SERVER_ERROR
}
