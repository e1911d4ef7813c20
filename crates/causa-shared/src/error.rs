use thiserror::Error;

use crate::types::CaseStatus;

/// Input rejected before any state was touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Email address already registered")]
    EmailTaken,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Lawyer registration requires an OAB number and UF")]
    MissingOabCredentials,

    #[error("Unknown legal area: {0}")]
    UnknownLegalArea(String),

    #[error("Unknown state code: {0}")]
    UnknownState(String),

    #[error("Message text must not be empty")]
    EmptyMessage,

    #[error("Message text exceeds the maximum length")]
    MessageTooLong,

    #[error("Too many attachments (maximum {0})")]
    TooManyAttachments(usize),
}

/// Login failed; no session is established.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is awaiting review by an administrator")]
    AccountPending,

    #[error("Account registration was rejected")]
    AccountRejected,
}

/// Action attempted outside the access policy rules. Checked before every
/// mutation, regardless of what a client hides in its UI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Administrator privileges required")]
    AdminOnly,

    #[error("Only lawyers can unlock cases")]
    LawyerOnly,

    #[error("Case is not visible to this account")]
    CaseNotVisible,

    #[error("Case is not open for unlocking")]
    CaseNotUnlockable,

    #[error("Not a participant in this case's conversation")]
    NotParticipant,
}

/// A moderation action that the case lifecycle state machine forbids.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Invalid transition: case is '{0}', expected 'pendente'")]
    InvalidTransition(CaseStatus),
}
