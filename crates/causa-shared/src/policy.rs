//! Access policy for the case marketplace.
//!
//! Pure functions over a `(user, case)` pair. Every mutation in the
//! service layer consults these before touching the store; the results
//! also drive what each dashboard is allowed to fetch.

use crate::types::{CaseStatus, LegalCase, User, UserRole};

/// Whether `user` may see `case` at all.
///
/// Approved cases are marketplace-visible to everyone; owners always see
/// their own cases regardless of status; admins see everything.
pub fn can_view(user: &User, case: &LegalCase) -> bool {
    case.status == CaseStatus::Approved
        || case.user_id == user.id
        || user.role == UserRole::Admin
}

/// Whether `user` may pay to unlock `case`.
///
/// Only lawyers, only on approved cases, and only once.
pub fn can_unlock(user: &User, case: &LegalCase) -> bool {
    user.role == UserRole::Lawyer
        && case.status == CaseStatus::Approved
        && !case.is_unlocked_by(user.id)
}

/// Whether `user` may write to (and read) `case`'s chat channel.
///
/// The owner and admins always can; a lawyer only after unlocking.
pub fn can_message(user: &User, case: &LegalCase) -> bool {
    case.user_id == user.id
        || user.role == UserRole::Admin
        || (user.role == UserRole::Lawyer && case.is_unlocked_by(user.id))
}

/// Whether `user` may run moderation actions (case approval/rejection,
/// account approval/rejection, account deletion).
pub fn can_moderate(user: &User) -> bool {
    user.role == UserRole::Admin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountStatus, PublicationType, Urgency};
    use chrono::Utc;
    use uuid::Uuid;

    fn user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            role,
            name: "Conta Teste".into(),
            email: format!("{}@teste.com", Uuid::new_v4()),
            phone: "(11) 90000-0000".into(),
            password_hash: String::new(),
            oab: None,
            uf_oab: None,
            active: true,
            status: AccountStatus::Approved,
            created_at: Utc::now(),
        }
    }

    fn case(owner: &User, status: CaseStatus) -> LegalCase {
        LegalCase {
            id: Uuid::new_v4(),
            user_id: owner.id,
            client_name: owner.name.clone(),
            title: "Acidente de trabalho".into(),
            legal_area: "Direito Trabalhista".into(),
            description: "Afastamento sem pagamento dos encargos devidos.".into(),
            urgency: Urgency::High,
            city: "São Paulo".into(),
            state: "SP".into(),
            publication_type: PublicationType::Public,
            status,
            unlock_price: None,
            rejection_reason: None,
            views: 0,
            unlocked_by: Vec::new(),
            attachments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_views_own_case_in_any_status() {
        let owner = user(UserRole::Client);
        for status in [CaseStatus::Pending, CaseStatus::Approved, CaseStatus::Rejected] {
            assert!(can_view(&owner, &case(&owner, status)));
        }
    }

    #[test]
    fn strangers_only_view_approved_cases() {
        let owner = user(UserRole::Client);
        let lawyer = user(UserRole::Lawyer);

        assert!(can_view(&lawyer, &case(&owner, CaseStatus::Approved)));
        assert!(!can_view(&lawyer, &case(&owner, CaseStatus::Pending)));
        assert!(!can_view(&lawyer, &case(&owner, CaseStatus::Rejected)));
    }

    #[test]
    fn admin_views_everything() {
        let owner = user(UserRole::Client);
        let admin = user(UserRole::Admin);
        for status in [CaseStatus::Pending, CaseStatus::Rejected, CaseStatus::Archived] {
            assert!(can_view(&admin, &case(&owner, status)));
        }
    }

    #[test]
    fn unlock_requires_lawyer_and_approved_case() {
        let owner = user(UserRole::Client);
        let lawyer = user(UserRole::Lawyer);

        assert!(can_unlock(&lawyer, &case(&owner, CaseStatus::Approved)));
        assert!(!can_unlock(&lawyer, &case(&owner, CaseStatus::Pending)));
        assert!(!can_unlock(&owner, &case(&owner, CaseStatus::Approved)));
        assert!(!can_unlock(&user(UserRole::Admin), &case(&owner, CaseStatus::Approved)));
    }

    #[test]
    fn unlock_is_denied_once_member() {
        let owner = user(UserRole::Client);
        let lawyer = user(UserRole::Lawyer);
        let mut c = case(&owner, CaseStatus::Approved);
        c.unlocked_by.push(lawyer.id);

        assert!(!can_unlock(&lawyer, &c));
    }

    #[test]
    fn message_gating_law() {
        let owner = user(UserRole::Client);
        let admin = user(UserRole::Admin);
        let unlocked = user(UserRole::Lawyer);
        let locked_out = user(UserRole::Lawyer);

        let mut c = case(&owner, CaseStatus::Approved);
        c.unlocked_by.push(unlocked.id);

        assert!(can_message(&owner, &c));
        assert!(can_message(&admin, &c));
        assert!(can_message(&unlocked, &c));
        assert!(!can_message(&locked_out, &c));
    }

    #[test]
    fn only_admins_moderate() {
        assert!(can_moderate(&user(UserRole::Admin)));
        assert!(!can_moderate(&user(UserRole::Client)));
        assert!(!can_moderate(&user(UserRole::Lawyer)));
    }
}
