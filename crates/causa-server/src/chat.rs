//! Per-case chat channel, gated by the access policy.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use causa_shared::constants::MAX_MESSAGE_LEN;
use causa_shared::policy;
use causa_shared::types::{ChatMessage, User};
use causa_shared::{PolicyError, ValidationError};

use crate::error::ApiError;
use crate::state::AppState;

/// Append a message to a case's chat log.
///
/// Only the case owner, an admin, or a lawyer who has unlocked the case
/// may write; the sender's role is captured on the record so readers
/// never have to re-derive it.
pub async fn send(
    state: &AppState,
    actor: &User,
    case_id: Uuid,
    text: &str,
) -> Result<ChatMessage, ApiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyMessage.into());
    }
    if text.chars().count() > MAX_MESSAGE_LEN {
        return Err(ValidationError::MessageTooLong.into());
    }

    let db = state.db.lock().await;
    let case = db.get_case(case_id)?;
    if !policy::can_message(actor, &case) {
        return Err(PolicyError::NotParticipant.into());
    }

    let message = ChatMessage {
        id: Uuid::new_v4(),
        case_id,
        sender_id: actor.id,
        sender_role: actor.role,
        text: text.to_string(),
        created_at: Utc::now(),
    };
    db.insert_message(&message)?;

    info!(case = %case_id, sender = %actor.id, "chat message sent");
    Ok(message)
}

/// A case's chat log in creation order. Reading is gated the same way as
/// writing: the conversation is part of what an unlock buys.
pub async fn list(
    state: &AppState,
    actor: &User,
    case_id: Uuid,
) -> Result<Vec<ChatMessage>, ApiError> {
    let db = state.db.lock().await;
    let case = db.get_case(case_id)?;
    if !policy::can_message(actor, &case) {
        return Err(PolicyError::NotParticipant.into());
    }

    Ok(db.list_messages_for_case(case_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::{approve, submit, unlock};
    use crate::testutil::{new_case_input, seed_user, test_state};
    use causa_shared::types::UserRole;

    #[tokio::test]
    async fn unlock_grants_chat_rights() {
        let (state, _dir) = test_state().await;
        let admin = seed_user(&state, UserRole::Admin, "a1@teste.com").await;
        let maria = seed_user(&state, UserRole::Client, "maria@teste.com").await;
        let lawyer = seed_user(&state, UserRole::Lawyer, "adv@teste.com").await;

        let case = submit(&state, &maria, new_case_input(), vec![]).await.unwrap();
        approve(&state, &admin, case.id, 75.0).await.unwrap();

        // Before unlocking, the lawyer can neither write nor read.
        let err = send(&state, &lawyer, case.id, "Olá").await.unwrap_err();
        assert!(matches!(err, ApiError::Policy(PolicyError::NotParticipant)));
        assert!(list(&state, &lawyer, case.id).await.is_err());

        unlock(&state, &lawyer, case.id).await.unwrap();
        send(&state, &lawyer, case.id, "Olá, posso ajudar.").await.unwrap();

        let log = list(&state, &lawyer, case.id).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].sender_role, UserRole::Lawyer);
    }

    #[tokio::test]
    async fn owner_and_admin_always_have_access() {
        let (state, _dir) = test_state().await;
        let admin = seed_user(&state, UserRole::Admin, "a1@teste.com").await;
        let maria = seed_user(&state, UserRole::Client, "maria@teste.com").await;

        let case = submit(&state, &maria, new_case_input(), vec![]).await.unwrap();

        send(&state, &maria, case.id, "Alguma novidade?").await.unwrap();
        send(&state, &admin, case.id, "Seu caso está em análise.").await.unwrap();

        let log = list(&state, &maria, case.id).await.unwrap();
        let texts: Vec<&str> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Alguma novidade?", "Seu caso está em análise."]);
        assert_eq!(log[1].sender_role, UserRole::Admin);
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let (state, _dir) = test_state().await;
        let maria = seed_user(&state, UserRole::Client, "maria@teste.com").await;
        let case = submit(&state, &maria, new_case_input(), vec![]).await.unwrap();

        let err = send(&state, &maria, case.id, "   \n\t ").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::EmptyMessage)
        ));
        assert!(list(&state, &maria, case.id).await.unwrap().is_empty());
    }
}
