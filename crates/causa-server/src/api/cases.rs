//! Case endpoints: submission, listing, detail, moderation, unlock.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use causa_shared::types::{LegalCase, PublicationType, Urgency};

use crate::cases::{self, ContactDetails, NewCaseInput, UploadedFile};
use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

/// A case plus the viewer-specific `unlocked` flag lawyers use to tell
/// leads they already bought from the rest of the marketplace.
#[derive(Serialize)]
pub struct CaseResponse {
    #[serde(flatten)]
    pub case: LegalCase,
    pub unlocked: bool,
}

impl CaseResponse {
    fn for_viewer(case: LegalCase, viewer_id: Uuid) -> Self {
        let unlocked = case.is_unlocked_by(viewer_id);
        Self { case, unlocked }
    }
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<CaseResponse>>, ApiError> {
    let cases = cases::list_for(&state, &user).await?;
    Ok(Json(
        cases
            .into_iter()
            .map(|case| CaseResponse::for_viewer(case, user.id))
            .collect(),
    ))
}

/// Multipart submission: text fields plus any number of `files` parts.
pub async fn submit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CaseResponse>), ApiError> {
    let mut title = None;
    let mut legal_area = None;
    let mut description = None;
    let mut urgency = None;
    let mut city = None;
    let mut uf = None;
    let mut publication_type = None;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "files" {
            let file_name = field.file_name().unwrap_or("anexo").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file field: {e}")))?
                .to_vec();
            files.push(UploadedFile { file_name, data });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read field '{name}': {e}")))?;
        match name.as_str() {
            "title" => title = Some(value),
            "legalArea" => legal_area = Some(value),
            "description" => description = Some(value),
            "urgency" => urgency = Some(value),
            "city" => city = Some(value),
            "state" => uf = Some(value),
            "publicationType" => publication_type = Some(value),
            _ => {} // unknown fields are ignored
        }
    }

    let urgency = urgency
        .as_deref()
        .and_then(Urgency::parse)
        .ok_or_else(|| ApiError::BadRequest("Missing or invalid 'urgency'".to_string()))?;
    let publication_type = match publication_type.as_deref() {
        None => PublicationType::Public,
        Some(raw) => PublicationType::parse(raw)
            .ok_or_else(|| ApiError::BadRequest("Invalid 'publicationType'".to_string()))?,
    };

    let input = NewCaseInput {
        title: title.unwrap_or_default(),
        legal_area: legal_area.unwrap_or_default(),
        description: description.unwrap_or_default(),
        urgency,
        city: city.unwrap_or_default(),
        state: uf.unwrap_or_default(),
        publication_type,
    };

    let case = cases::submit(&state, &user, input, files).await?;
    Ok((
        StatusCode::CREATED,
        Json(CaseResponse::for_viewer(case, user.id)),
    ))
}

pub async fn detail(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CaseResponse>, ApiError> {
    let case = cases::get_detail(&state, &user, id).await?;
    Ok(Json(CaseResponse::for_viewer(case, user.id)))
}

pub async fn contact(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactDetails>, ApiError> {
    let details = cases::contact(&state, &user, id).await?;
    Ok(Json(details))
}

#[derive(Deserialize)]
pub struct ApproveRequest {
    pub price: f64,
}

pub async fn approve(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<CaseResponse>, ApiError> {
    let case = cases::approve(&state, &user, id, req.price).await?;
    Ok(Json(CaseResponse::for_viewer(case, user.id)))
}

#[derive(Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

pub async fn reject(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<CaseResponse>, ApiError> {
    let case = cases::reject(&state, &user, id, &req.reason).await?;
    Ok(Json(CaseResponse::for_viewer(case, user.id)))
}

pub async fn unlock(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CaseResponse>, ApiError> {
    let case = cases::unlock(&state, &user, id).await?;
    Ok(Json(CaseResponse::for_viewer(case, user.id)))
}
