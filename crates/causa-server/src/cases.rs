//! Case lifecycle: submission, moderation, and the lead-unlock workflow.

use chrono::Utc;
use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use causa_shared::constants::{is_legal_area, is_state_code, MAX_ATTACHMENTS};
use causa_shared::policy;
use causa_shared::types::{CaseStatus, LegalCase, PublicationType, Urgency, User, UserRole};
use causa_shared::{LifecycleError, PolicyError, ValidationError};

use crate::error::ApiError;
use crate::notify;
use crate::state::AppState;

/// Case submission form input. Status, views, and the unlock set are
/// never taken from the caller.
#[derive(Debug)]
pub struct NewCaseInput {
    pub title: String,
    pub legal_area: String,
    pub description: String,
    pub urgency: Urgency,
    pub city: String,
    pub state: String,
    pub publication_type: PublicationType,
}

/// One file received with a submission.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// The owner's contact details, revealed by unlocking a lead.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

fn validate_submission(input: &NewCaseInput, files: &[UploadedFile]) -> Result<(), ValidationError> {
    if input.title.trim().is_empty() {
        return Err(ValidationError::MissingField("title"));
    }
    if input.description.trim().is_empty() {
        return Err(ValidationError::MissingField("description"));
    }
    if input.city.trim().is_empty() {
        return Err(ValidationError::MissingField("city"));
    }
    if !is_legal_area(&input.legal_area) {
        return Err(ValidationError::UnknownLegalArea(input.legal_area.clone()));
    }
    if !is_state_code(&input.state) {
        return Err(ValidationError::UnknownState(input.state.clone()));
    }
    if files.len() > MAX_ATTACHMENTS {
        return Err(ValidationError::TooManyAttachments(MAX_ATTACHMENTS));
    }
    Ok(())
}

/// Submit a new case.
///
/// Attachments are stored first, as concurrently dispatched writes; the
/// submission is all-or-nothing — if any upload fails, files already
/// written are removed and no case record is created. The persisted case
/// always starts `Pending` with zero views and an empty unlock set, and
/// every active admin is notified of the new moderation item.
pub async fn submit(
    state: &AppState,
    owner: &User,
    input: NewCaseInput,
    files: Vec<UploadedFile>,
) -> Result<LegalCase, ApiError> {
    validate_submission(&input, &files)?;

    let stored = join_all(files.iter().map(|file| {
        let store = state.attachments.clone();
        async move { store.save_case_file(&file.file_name, &file.data).await }
    }))
    .await;

    let mut names = Vec::with_capacity(stored.len());
    let mut failure = None;
    for result in stored {
        match result {
            Ok(name) => names.push(name),
            Err(e) if failure.is_none() => failure = Some(e),
            Err(_) => {}
        }
    }
    if let Some(e) = failure {
        for name in &names {
            if let Err(cleanup) = state.attachments.delete_case_file(name).await {
                warn!(name = %name, error = %cleanup, "failed to clean up attachment");
            }
        }
        return Err(e);
    }

    let attachments = names
        .iter()
        .map(|name| state.attachments.public_url(&state.config.public_base_url, name))
        .collect();

    let case = LegalCase {
        id: Uuid::new_v4(),
        user_id: owner.id,
        client_name: owner.name.clone(),
        title: input.title.trim().to_string(),
        legal_area: input.legal_area,
        description: input.description.trim().to_string(),
        urgency: input.urgency,
        city: input.city.trim().to_string(),
        state: input.state,
        publication_type: input.publication_type,
        status: CaseStatus::Pending,
        unlock_price: None,
        rejection_reason: None,
        views: 0,
        unlocked_by: Vec::new(),
        attachments,
        created_at: Utc::now(),
    };

    let mut db = state.db.lock().await;
    db.insert_case(&case)?;

    info!(id = %case.id, owner = %owner.id, files = case.attachments.len(), "case submitted");
    if let Err(e) = notify::case_submitted(&db, &case) {
        warn!(error = %e, "failed to emit case-submitted notification");
    }

    Ok(case)
}

/// Role-scoped listing: clients see their own cases in any state,
/// lawyers browse the approved marketplace, admins see everything.
pub async fn list_for(state: &AppState, actor: &User) -> Result<Vec<LegalCase>, ApiError> {
    let db = state.db.lock().await;
    let cases = match actor.role {
        UserRole::Client => db.list_cases_by_owner(actor.id)?,
        UserRole::Lawyer => db.list_cases_by_status(CaseStatus::Approved)?,
        UserRole::Admin => db.list_cases()?,
    };
    Ok(cases)
}

/// Policy-gated case detail. Counts a marketplace view when a lawyer
/// who is not the owner opens the case.
pub async fn get_detail(state: &AppState, actor: &User, id: Uuid) -> Result<LegalCase, ApiError> {
    let db = state.db.lock().await;
    let mut case = db.get_case(id)?;

    if !policy::can_view(actor, &case) {
        return Err(PolicyError::CaseNotVisible.into());
    }

    if actor.role == UserRole::Lawyer && actor.id != case.user_id {
        db.increment_views(case.id)?;
        case.views += 1;
    }

    Ok(case)
}

/// The lead reveal: owner contact details, for the owner, an admin, or a
/// lawyer who has unlocked the case.
pub async fn contact(state: &AppState, actor: &User, id: Uuid) -> Result<ContactDetails, ApiError> {
    let db = state.db.lock().await;
    let case = db.get_case(id)?;

    if !policy::can_message(actor, &case) {
        return Err(PolicyError::NotParticipant.into());
    }

    let owner = db.get_profile(case.user_id)?;
    Ok(ContactDetails {
        name: owner.name,
        email: owner.email,
        phone: owner.phone,
    })
}

/// Admin: approve a pending case at the given unlock price. The owner is
/// notified and the case enters the lawyer marketplace.
pub async fn approve(
    state: &AppState,
    actor: &User,
    id: Uuid,
    price: f64,
) -> Result<LegalCase, ApiError> {
    if !policy::can_moderate(actor) {
        return Err(PolicyError::AdminOnly.into());
    }
    if !(price.is_finite() && price > 0.0) {
        return Err(ApiError::BadRequest("unlock price must be positive".to_string()));
    }

    let db = state.db.lock().await;
    let case = db.get_case(id)?;
    if case.status != CaseStatus::Pending {
        return Err(LifecycleError::InvalidTransition(case.status).into());
    }
    db.approve_case(id, price)?;

    let approved = db.get_case(id)?;
    info!(id = %id, admin = %actor.id, price, "case approved");
    if let Err(e) = notify::case_approved(&db, &approved) {
        warn!(error = %e, "failed to emit case-approved notification");
    }

    Ok(approved)
}

/// Admin: reject a pending case, recording the reason verbatim. The
/// owner is notified with the reason text.
pub async fn reject(
    state: &AppState,
    actor: &User,
    id: Uuid,
    reason: &str,
) -> Result<LegalCase, ApiError> {
    if !policy::can_moderate(actor) {
        return Err(PolicyError::AdminOnly.into());
    }
    if reason.trim().is_empty() {
        return Err(ValidationError::MissingField("reason").into());
    }

    let db = state.db.lock().await;
    let case = db.get_case(id)?;
    if case.status != CaseStatus::Pending {
        return Err(LifecycleError::InvalidTransition(case.status).into());
    }
    db.reject_case(id, reason.trim())?;

    let rejected = db.get_case(id)?;
    info!(id = %id, admin = %actor.id, "case rejected");
    if let Err(e) = notify::case_rejected(&db, &rejected, reason.trim()) {
        warn!(error = %e, "failed to emit case-rejected notification");
    }

    Ok(rejected)
}

/// Lawyer: pay to unlock an approved case.
///
/// Membership is added with an atomic set-union at the store, so two
/// lawyers unlocking concurrently both land. Re-unlocking is a no-op:
/// the case comes back unchanged and the owner is not notified again.
pub async fn unlock(state: &AppState, actor: &User, id: Uuid) -> Result<LegalCase, ApiError> {
    let db = state.db.lock().await;
    let case = db.get_case(id)?;

    if case.is_unlocked_by(actor.id) {
        return Ok(case);
    }
    if !policy::can_unlock(actor, &case) {
        return Err(if actor.role != UserRole::Lawyer {
            PolicyError::LawyerOnly.into()
        } else {
            ApiError::Policy(PolicyError::CaseNotUnlockable)
        });
    }

    let fresh = db.add_unlock(case.id, actor.id, Utc::now())?;
    if fresh {
        info!(case = %case.id, lawyer = %actor.id, "case unlocked");
        if let Err(e) = notify::case_unlocked(&db, &case, actor) {
            warn!(error = %e, "failed to emit case-unlocked notification");
        }
    }

    Ok(db.get_case(id)?)
}
