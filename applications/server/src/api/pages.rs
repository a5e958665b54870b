/// HTML pages
use crate::{error::Result, state::AppState};
use axum::{extract::State, response::Html};

/// GET / - every stored user, in id order
pub async fn index(State(app_state): State<AppState>) -> Result<Html<String>> {
    let users = app_state.store.get_all_users().await?;
    Ok(Html(roster_view::render_page(&users)))
}
