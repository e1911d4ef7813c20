//! Notification emitter.
//!
//! Every function here corresponds to one state transition and writes
//! the notification records that transition owes to other users. The
//! texts are product copy, shown verbatim in the dashboards.
//!
//! Emission is best-effort from the caller's point of view: the parent
//! mutation has already committed, so services log a warning instead of
//! failing the request when an insert here goes wrong.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use causa_shared::types::{LegalCase, Notification, NotificationKind, User};
use causa_store::{Database, StoreError};

fn emit(
    db: &Database,
    user_id: Uuid,
    kind: NotificationKind,
    title: &str,
    message: String,
) -> Result<(), StoreError> {
    let notification = Notification {
        id: Uuid::new_v4(),
        user_id,
        kind,
        title: title.to_string(),
        message,
        read: false,
        created_at: Utc::now(),
    };
    db.insert_notification(&notification)?;
    debug!(user = %user_id, title = %title, "notification emitted");
    Ok(())
}

/// A client submitted a new case: tell every active admin there is a
/// moderation item waiting.
pub fn case_submitted(db: &Database, case: &LegalCase) -> Result<(), StoreError> {
    for admin in db.list_admins()? {
        emit(
            db,
            admin.id,
            NotificationKind::Info,
            "Novo Caso",
            format!("Um novo caso \"{}\" foi relatado.", case.title),
        )?;
    }
    Ok(())
}

/// The owner's case was approved and is now visible to lawyers.
pub fn case_approved(db: &Database, case: &LegalCase) -> Result<(), StoreError> {
    emit(
        db,
        case.user_id,
        NotificationKind::Success,
        "Caso Aprovado",
        format!(
            "Seu caso \"{}\" foi aprovado e já está visível para advogados.",
            case.title
        ),
    )
}

/// The owner's case was rejected; the message carries the reason text.
pub fn case_rejected(db: &Database, case: &LegalCase, reason: &str) -> Result<(), StoreError> {
    emit(
        db,
        case.user_id,
        NotificationKind::Warning,
        "Caso Recusado",
        format!("Seu caso \"{}\" foi recusado. Motivo: {}", case.title, reason),
    )
}

/// A lawyer paid to unlock the case; name them to the owner.
pub fn case_unlocked(db: &Database, case: &LegalCase, lawyer: &User) -> Result<(), StoreError> {
    emit(
        db,
        case.user_id,
        NotificationKind::Success,
        "Advogado Interessado",
        format!(
            "O advogado {} adquiriu seu contato para o caso \"{}\".",
            lawyer.name, case.title
        ),
    )
}

/// An admin approved the account registration.
pub fn account_approved(db: &Database, user_id: Uuid) -> Result<(), StoreError> {
    emit(
        db,
        user_id,
        NotificationKind::Success,
        "Cadastro Aprovado",
        "Seu cadastro foi aprovado! Você já pode acessar o sistema.".to_string(),
    )
}
