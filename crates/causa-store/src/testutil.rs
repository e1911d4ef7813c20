//! Shared fixtures for the store tests.

use chrono::Utc;
use tempfile::TempDir;
use uuid::Uuid;

use causa_shared::types::{
    AccountStatus, CaseStatus, ChatMessage, LegalCase, Notification, NotificationKind,
    PublicationType, Urgency, User, UserRole,
};

use crate::database::Database;

pub(crate) fn test_db() -> (Database, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("test.db")).unwrap();
    (db, dir)
}

pub(crate) fn sample_user(role: UserRole, email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        role,
        name: "Conta Teste".into(),
        email: email.into(),
        phone: "(11) 98888-7777".into(),
        password_hash: "$argon2id$fixture".into(),
        oab: matches!(role, UserRole::Lawyer).then(|| "123456".into()),
        uf_oab: matches!(role, UserRole::Lawyer).then(|| "SP".into()),
        active: true,
        status: AccountStatus::initial_for(role),
        created_at: Utc::now(),
    }
}

pub(crate) fn sample_case(owner: &User) -> LegalCase {
    LegalCase {
        id: Uuid::new_v4(),
        user_id: owner.id,
        client_name: owner.name.clone(),
        title: "Acidente de trabalho com afastamento".into(),
        legal_area: "Direito Trabalhista".into(),
        description: "A empresa não está pagando os encargos devidos.".into(),
        urgency: Urgency::High,
        city: "São Paulo".into(),
        state: "SP".into(),
        publication_type: PublicationType::Public,
        status: CaseStatus::Pending,
        unlock_price: None,
        rejection_reason: None,
        views: 0,
        unlocked_by: Vec::new(),
        attachments: Vec::new(),
        created_at: Utc::now(),
    }
}

pub(crate) fn sample_message(case: &LegalCase, sender: &User, text: &str) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4(),
        case_id: case.id,
        sender_id: sender.id,
        sender_role: sender.role,
        text: text.into(),
        created_at: Utc::now(),
    }
}

pub(crate) fn sample_notification(target: &User, title: &str) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        user_id: target.id,
        kind: NotificationKind::Info,
        title: title.into(),
        message: "Mensagem de teste.".into(),
        read: false,
        created_at: Utc::now(),
    }
}
