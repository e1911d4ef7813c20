//! Account registration, login, and admin moderation of profiles.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use causa_shared::constants::{is_state_code, MIN_PASSWORD_LEN};
use causa_shared::policy;
use causa_shared::types::{AccountStatus, User, UserRole};
use causa_shared::{AuthError, PolicyError, ValidationError};
use causa_store::StoreError;

use crate::error::ApiError;
use crate::notify;
use crate::password::{hash_password, verify_password};
use crate::session::new_token;
use crate::state::AppState;

/// Registration form input.
#[derive(Debug)]
pub struct RegisterInput {
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub oab: Option<String>,
    pub uf_oab: Option<String>,
}

/// An authenticated session: the profile plus its bearer token.
#[derive(Debug)]
pub struct SessionGrant {
    pub user: User,
    pub token: String,
}

/// What registration produced: an active session (clients, admins) or a
/// profile parked for admin review (lawyers).
#[derive(Debug)]
pub enum RegisterOutcome {
    Active(SessionGrant),
    AwaitingReview(User),
}

fn validate_registration(input: &RegisterInput) -> Result<(), ValidationError> {
    if input.name.trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    if input.email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if !input.email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    if input.phone.trim().is_empty() {
        return Err(ValidationError::MissingField("phone"));
    }
    if input.password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if input.password != input.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    if input.role == UserRole::Lawyer {
        let oab_ok = input.oab.as_deref().is_some_and(|s| !s.trim().is_empty());
        let uf = input.uf_oab.as_deref().unwrap_or("");
        if !oab_ok || uf.is_empty() {
            return Err(ValidationError::MissingOabCredentials);
        }
        if !is_state_code(uf) {
            return Err(ValidationError::UnknownState(uf.to_string()));
        }
    }

    Ok(())
}

/// Register a new account.
///
/// Clients and admins are approved immediately and come back logged in;
/// lawyers are parked as `Pending` until an admin reviews the
/// registration, and no session is established for them.
pub async fn register(state: &AppState, input: RegisterInput) -> Result<RegisterOutcome, ApiError> {
    validate_registration(&input)?;

    let password_hash = hash_password(&input.password)?;
    let user = User {
        id: Uuid::new_v4(),
        role: input.role,
        name: input.name.trim().to_string(),
        email: input.email.trim().to_lowercase(),
        phone: input.phone.trim().to_string(),
        password_hash,
        oab: input.oab.filter(|s| !s.trim().is_empty()),
        uf_oab: input.uf_oab.filter(|s| !s.trim().is_empty()),
        active: true,
        status: AccountStatus::initial_for(input.role),
        created_at: Utc::now(),
    };

    let db = state.db.lock().await;
    db.insert_profile(&user)?;

    info!(id = %user.id, role = %user.role, status = %user.status, "account registered");

    if user.status == AccountStatus::Approved {
        let token = new_token();
        db.insert_session(&token, user.id, Utc::now())?;
        Ok(RegisterOutcome::Active(SessionGrant { user, token }))
    } else {
        Ok(RegisterOutcome::AwaitingReview(user))
    }
}

/// Authenticate by email and password.
///
/// A correct password is not enough: accounts still pending review or
/// already rejected fail with their status-specific error and no session
/// is established.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<SessionGrant, ApiError> {
    let db = state.db.lock().await;

    let user = match db.get_profile_by_email(&email.trim().to_lowercase()) {
        Ok(user) => user,
        Err(StoreError::NotFound) => return Err(AuthError::InvalidCredentials.into()),
        Err(e) => return Err(e.into()),
    };

    if !verify_password(password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials.into());
    }

    match user.status {
        AccountStatus::Approved => {}
        AccountStatus::Pending => return Err(AuthError::AccountPending.into()),
        AccountStatus::Rejected => return Err(AuthError::AccountRejected.into()),
    }

    let token = new_token();
    db.insert_session(&token, user.id, Utc::now())?;

    info!(id = %user.id, "login");
    Ok(SessionGrant { user, token })
}

/// Invalidate a session token. Unknown tokens are not an error.
pub async fn logout(state: &AppState, token: &str) -> Result<(), ApiError> {
    let db = state.db.lock().await;
    db.delete_session(token)?;
    Ok(())
}

/// Admin: list every profile.
pub async fn list_users(state: &AppState, actor: &User) -> Result<Vec<User>, ApiError> {
    if !policy::can_moderate(actor) {
        return Err(PolicyError::AdminOnly.into());
    }
    let db = state.db.lock().await;
    Ok(db.list_profiles()?)
}

/// Admin: approve a pending registration. The user is notified.
pub async fn approve_user(state: &AppState, actor: &User, user_id: Uuid) -> Result<User, ApiError> {
    if !policy::can_moderate(actor) {
        return Err(PolicyError::AdminOnly.into());
    }

    let db = state.db.lock().await;
    if !db.set_profile_status(user_id, AccountStatus::Approved)? {
        return Err(ApiError::NotFound(format!("profile {user_id}")));
    }

    info!(id = %user_id, admin = %actor.id, "account approved");
    if let Err(e) = notify::account_approved(&db, user_id) {
        warn!(error = %e, "failed to emit account-approved notification");
    }

    Ok(db.get_profile(user_id)?)
}

/// Admin: reject a registration.
pub async fn reject_user(state: &AppState, actor: &User, user_id: Uuid) -> Result<User, ApiError> {
    if !policy::can_moderate(actor) {
        return Err(PolicyError::AdminOnly.into());
    }

    let db = state.db.lock().await;
    if !db.set_profile_status(user_id, AccountStatus::Rejected)? {
        return Err(ApiError::NotFound(format!("profile {user_id}")));
    }

    info!(id = %user_id, admin = %actor.id, "account rejected");
    Ok(db.get_profile(user_id)?)
}

/// Admin: irreversibly delete a profile. Cascades to the user's cases,
/// messages, notifications, and sessions.
pub async fn delete_user(state: &AppState, actor: &User, user_id: Uuid) -> Result<(), ApiError> {
    if !policy::can_moderate(actor) {
        return Err(PolicyError::AdminOnly.into());
    }

    let db = state.db.lock().await;
    if !db.delete_profile(user_id)? {
        return Err(ApiError::NotFound(format!("profile {user_id}")));
    }

    info!(id = %user_id, admin = %actor.id, "account deleted");
    Ok(())
}

/// Create the platform admin account at startup when it does not exist.
///
/// Skipped with a warning when `ADMIN_PASSWORD` is not configured, so a
/// bare development instance still boots.
pub async fn bootstrap_admin(state: &AppState) -> Result<(), ApiError> {
    let config = &state.config;
    let db = state.db.lock().await;

    match db.get_profile_by_email(&config.admin_email) {
        Ok(_) => return Ok(()),
        Err(StoreError::NotFound) => {}
        Err(e) => return Err(e.into()),
    }

    let Some(ref password) = config.admin_password else {
        warn!("ADMIN_PASSWORD not set; skipping admin bootstrap");
        return Ok(());
    };

    let admin = User {
        id: Uuid::new_v4(),
        role: UserRole::Admin,
        name: config.admin_name.clone(),
        email: config.admin_email.clone(),
        phone: String::new(),
        password_hash: hash_password(password)?,
        oab: None,
        uf_oab: None,
        active: true,
        status: AccountStatus::Approved,
        created_at: Utc::now(),
    };
    db.insert_profile(&admin)?;

    info!(email = %admin.email, "bootstrap admin account created");
    Ok(())
}
