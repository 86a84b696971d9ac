//! Hours endpoints

use axum::{
    Json, Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use libcal_hours_core::{HoursSource, ShortcodeAttrs};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router<S>() -> Router<AppState<S>>
where
    S: HoursSource + Send + Sync + 'static,
{
    Router::new()
        .route("/hours", get(hours::<S>))
        .route("/locations", get(locations::<S>))
        .route("/health", get(health))
}

/// GET /hours?location=..&num_weeks=.. - Rendered table fragment
///
/// Always answers 200; a failed render is an empty fragment, same as the
/// shortcode it replaces.
async fn hours<S>(
    State(state): State<AppState<S>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Html<String>
where
    S: HoursSource + Send + Sync + 'static,
{
    let attrs = ShortcodeAttrs::from_pairs(params);
    Html(state.renderer().render(&attrs).await)
}

/// GET /locations - Location names known to the provider
async fn locations<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<String>>, AppError>
where
    S: HoursSource + Send + Sync + 'static,
{
    let names = state.renderer().locations().await?;
    Ok(Json(names))
}

async fn health() -> &'static str {
    "ok"
}
