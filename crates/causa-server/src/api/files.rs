//! Attachment download endpoint.

use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::state::AppState;

/// Serve a stored case attachment. Stored names are randomized UUIDs, so
/// knowing a URL is the capability; the store still validates the name
/// against traversal.
pub async fn download(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Vec<u8>, ApiError> {
    let data = state.attachments.read_case_file(&name).await?;
    Ok(data)
}
