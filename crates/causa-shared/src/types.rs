//! Domain model structs and the role/status taxonomies.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the API layer. Enum wire spellings match the product's
//! existing data (`cliente`, `aprovado`, `Baixa`, ...), so records written
//! by the previous frontend deserialize unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Roles and statuses
// ---------------------------------------------------------------------------

/// Account role. Determines which dashboard the user sees and which
/// operations the access policy grants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserRole {
    #[serde(rename = "cliente")]
    Client,
    #[serde(rename = "advogado")]
    Lawyer,
    #[serde(rename = "admin")]
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "cliente",
            Self::Lawyer => "advogado",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cliente" => Some(Self::Client),
            "advogado" => Some(Self::Lawyer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation state of an account, independent of the `active` flag.
///
/// Lawyers register as `Pending` and must be approved by an admin before
/// they can log in; clients and admins start out `Approved`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "rejected")]
    Rejected,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// The status a freshly registered account starts in.
    pub fn initial_for(role: UserRole) -> Self {
        match role {
            UserRole::Lawyer => Self::Pending,
            UserRole::Client | UserRole::Admin => Self::Approved,
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a case.
///
/// `Pending` is the only initial state. An admin moves a pending case to
/// `Approved` (setting the unlock price) or `Rejected` (recording a
/// reason). `Archived` is reserved in the taxonomy; no operation currently
/// produces it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CaseStatus {
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "aprovado")]
    Approved,
    #[serde(rename = "recusado")]
    Rejected,
    #[serde(rename = "arquivado")]
    Archived,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Approved => "aprovado",
            Self::Rejected => "recusado",
            Self::Archived => "arquivado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pendente" => Some(Self::Pending),
            "aprovado" => Some(Self::Approved),
            "recusado" => Some(Self::Rejected),
            "arquivado" => Some(Self::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgent the client considers the matter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Urgency {
    #[serde(rename = "Baixa")]
    Low,
    #[serde(rename = "Média")]
    Medium,
    #[serde(rename = "Alta")]
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Baixa",
            Self::Medium => "Média",
            Self::High => "Alta",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Baixa" => Some(Self::Low),
            "Média" => Some(Self::Medium),
            "Alta" => Some(Self::High),
            _ => None,
        }
    }
}

/// Whether the client allows the case summary to be shown publicly or only
/// to registered lawyers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PublicationType {
    #[serde(rename = "publico")]
    Public,
    #[serde(rename = "privado")]
    Private,
}

impl PublicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "publico",
            Self::Private => "privado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "publico" => Some(Self::Public),
            "privado" => Some(Self::Private),
            _ => None,
        }
    }
}

/// Severity class of a notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationKind {
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "warning")]
    Warning,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "info" => Some(Self::Info),
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered account (client, lawyer, or admin).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub role: UserRole,
    pub name: String,
    /// Unique login key.
    pub email: String,
    pub phone: String,
    /// Argon2id PHC string. Never serialized outward.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Bar registration number. Present only for lawyers.
    pub oab: Option<String>,
    /// Federative unit the OAB registration belongs to.
    pub uf_oab: Option<String>,
    pub active: bool,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// LegalCase
// ---------------------------------------------------------------------------

/// A legal matter reported by a client.
///
/// Once approved by an admin the case becomes a *lead*: lawyers browsing
/// the marketplace can pay `unlock_price` to join `unlocked_by`, which
/// reveals the client's contact details and opens the case chat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegalCase {
    pub id: Uuid,
    /// The client who reported the case.
    pub user_id: Uuid,
    /// Denormalized owner display name, captured at submission.
    pub client_name: String,
    pub title: String,
    /// One of [`crate::constants::LEGAL_AREAS`].
    pub legal_area: String,
    pub description: String,
    pub urgency: Urgency,
    pub city: String,
    /// One of [`crate::constants::STATES_BR`].
    pub state: String,
    pub publication_type: PublicationType,
    pub status: CaseStatus,
    /// Set exactly when the case is approved; absent in every other state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_price: Option<f64>,
    /// Set exactly when the case is rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub views: i64,
    /// Lawyer ids with paid access, in unlock order. Membership is
    /// monotonic: once added, never removed, never duplicated.
    #[serde(rename = "unlockedByIds")]
    pub unlocked_by: Vec<Uuid>,
    /// Public URLs of uploaded attachments, in submission order.
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl LegalCase {
    /// Whether the given account id already holds paid access.
    pub fn is_unlocked_by(&self, user_id: Uuid) -> bool {
        self.unlocked_by.contains(&user_id)
    }
}

// ---------------------------------------------------------------------------
// ChatMessage
// ---------------------------------------------------------------------------

/// One entry in a case's append-only chat log.
///
/// `sender_role` is captured when the message is created so the display
/// layer never has to re-derive a role from the sender id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub case_id: Uuid,
    pub sender_id: Uuid,
    pub sender_role: UserRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A per-user notification produced as a side effect of a state
/// transition (case moderation, unlock, account approval). Never created
/// directly by end-user action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_spellings_round_trip() {
        assert_eq!(serde_json::to_string(&UserRole::Lawyer).unwrap(), "\"advogado\"");
        assert_eq!(serde_json::to_string(&CaseStatus::Rejected).unwrap(), "\"recusado\"");
        assert_eq!(serde_json::to_string(&Urgency::Medium).unwrap(), "\"Média\"");

        let status: CaseStatus = serde_json::from_str("\"arquivado\"").unwrap();
        assert_eq!(status, CaseStatus::Archived);
    }

    #[test]
    fn parse_matches_as_str() {
        for role in [UserRole::Client, UserRole::Lawyer, UserRole::Admin] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        for status in [
            CaseStatus::Pending,
            CaseStatus::Approved,
            CaseStatus::Rejected,
            CaseStatus::Archived,
        ] {
            assert_eq!(CaseStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(UserRole::parse("juiz"), None);
    }

    #[test]
    fn initial_status_by_role() {
        assert_eq!(AccountStatus::initial_for(UserRole::Lawyer), AccountStatus::Pending);
        assert_eq!(AccountStatus::initial_for(UserRole::Client), AccountStatus::Approved);
        assert_eq!(AccountStatus::initial_for(UserRole::Admin), AccountStatus::Approved);
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            role: UserRole::Client,
            name: "Maria Silva".into(),
            email: "maria@example.com".into(),
            phone: "(11) 98888-7777".into(),
            password_hash: "$argon2id$secret".into(),
            oab: None,
            uf_oab: None,
            active: true,
            status: AccountStatus::Approved,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("passwordHash"));
    }
}
