//! Shared fixtures for the server tests.

use chrono::Utc;
use tempfile::TempDir;
use uuid::Uuid;

use causa_shared::types::{AccountStatus, User, UserRole};
use causa_store::Database;

use crate::accounts::RegisterInput;
use crate::attachments::AttachmentStore;
use crate::cases::{NewCaseInput, UploadedFile};
use crate::config::ServerConfig;
use crate::state::AppState;

/// A fully wired [`AppState`] on temporary storage. Attachments are
/// capped at 64 KiB so oversize behavior is easy to trigger.
pub(crate) async fn test_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();

    let db = Database::open_at(&dir.path().join("test.db")).unwrap();
    let upload_dir = dir.path().join("uploads");
    let attachments = AttachmentStore::new(upload_dir.clone(), 64 * 1024)
        .await
        .unwrap();

    let config = ServerConfig {
        upload_dir,
        max_attachment_size: 64 * 1024,
        admin_password: Some("senha-bootstrap".into()),
        ..ServerConfig::default()
    };

    (AppState::new(db, attachments, config), dir)
}

pub(crate) fn register_input(role: UserRole, email: &str) -> RegisterInput {
    RegisterInput {
        role,
        name: "Conta Teste".into(),
        email: email.into(),
        phone: "(11) 98888-7777".into(),
        password: "segredo1".into(),
        confirm_password: "segredo1".into(),
        oab: matches!(role, UserRole::Lawyer).then(|| "123456".into()),
        uf_oab: matches!(role, UserRole::Lawyer).then(|| "SP".into()),
    }
}

/// Insert an already-approved profile directly, bypassing registration.
/// For flows that exercise login, use [`crate::accounts::register`].
pub(crate) async fn seed_user(state: &AppState, role: UserRole, email: &str) -> User {
    let user = User {
        id: Uuid::new_v4(),
        role,
        name: format!("Conta {email}"),
        email: email.into(),
        phone: "(11) 98888-7777".into(),
        password_hash: "$argon2id$fixture".into(),
        oab: matches!(role, UserRole::Lawyer).then(|| "123456".into()),
        uf_oab: matches!(role, UserRole::Lawyer).then(|| "SP".into()),
        active: true,
        status: AccountStatus::Approved,
        created_at: Utc::now(),
    };
    state.db.lock().await.insert_profile(&user).unwrap();
    user
}

pub(crate) fn new_case_input() -> NewCaseInput {
    NewCaseInput {
        title: "Acidente de trabalho com afastamento".into(),
        legal_area: "Direito Trabalhista".into(),
        description: "A empresa não está pagando os encargos devidos.".into(),
        urgency: causa_shared::types::Urgency::High,
        city: "São Paulo".into(),
        state: "SP".into(),
        publication_type: causa_shared::types::PublicationType::Public,
    }
}

pub(crate) fn upload(file_name: &str) -> UploadedFile {
    UploadedFile {
        file_name: file_name.into(),
        data: b"conteudo de teste".to_vec(),
    }
}
