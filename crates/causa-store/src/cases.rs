//! CRUD and lifecycle mutations for [`LegalCase`] records.
//!
//! A case row carries the scalar fields; the unlock membership set lives
//! in `case_unlocks` and the attachment URL list in `case_attachments`.
//! Readers hydrate both before returning a [`LegalCase`].

use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use causa_shared::types::{CaseStatus, LegalCase, PublicationType, Urgency};

use crate::database::Database;
use crate::error::Result;
use crate::util::{parse_timestamp, parse_uuid, parse_variant};

const CASE_COLUMNS: &str = "id, user_id, client_name, title, legal_area, description, urgency, \
     city, state, publication_type, status, unlock_price, rejection_reason, views, created_at";

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new case together with its attachment URLs, atomically.
    ///
    /// The caller is expected to have already forced the submission
    /// invariants (`status = Pending`, `views = 0`, empty unlock set);
    /// any `unlocked_by` entries on the value are ignored.
    pub fn insert_case(&mut self, case: &LegalCase) -> Result<()> {
        let tx = self.conn_mut().transaction()?;

        tx.execute(
            "INSERT INTO cases
             (id, user_id, client_name, title, legal_area, description, urgency,
              city, state, publication_type, status, unlock_price, rejection_reason,
              views, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                case.id.to_string(),
                case.user_id.to_string(),
                case.client_name,
                case.title,
                case.legal_area,
                case.description,
                case.urgency.as_str(),
                case.city,
                case.state,
                case.publication_type.as_str(),
                case.status.as_str(),
                case.unlock_price,
                case.rejection_reason,
                case.views,
                case.created_at.to_rfc3339(),
            ],
        )?;

        for (position, url) in case.attachments.iter().enumerate() {
            tx.execute(
                "INSERT INTO case_attachments (case_id, position, url) VALUES (?1, ?2, ?3)",
                params![case.id.to_string(), position as i64, url],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single case by id, with unlock set and attachments.
    pub fn get_case(&self, id: Uuid) -> Result<LegalCase> {
        let mut case = self.conn().query_row(
            &format!("SELECT {CASE_COLUMNS} FROM cases WHERE id = ?1"),
            params![id.to_string()],
            row_to_case,
        )?;
        self.hydrate_case(&mut case)?;
        Ok(case)
    }

    /// List all cases, newest first.
    pub fn list_cases(&self) -> Result<Vec<LegalCase>> {
        self.query_cases(
            &format!("SELECT {CASE_COLUMNS} FROM cases ORDER BY created_at DESC"),
            params![],
        )
    }

    /// List cases reported by a specific client, newest first.
    pub fn list_cases_by_owner(&self, user_id: Uuid) -> Result<Vec<LegalCase>> {
        self.query_cases(
            &format!(
                "SELECT {CASE_COLUMNS} FROM cases WHERE user_id = ?1 ORDER BY created_at DESC"
            ),
            params![user_id.to_string()],
        )
    }

    /// List cases in a given lifecycle state, newest first.
    pub fn list_cases_by_status(&self, status: CaseStatus) -> Result<Vec<LegalCase>> {
        self.query_cases(
            &format!(
                "SELECT {CASE_COLUMNS} FROM cases WHERE status = ?1 ORDER BY created_at DESC"
            ),
            params![status.as_str()],
        )
    }

    // ------------------------------------------------------------------
    // Lifecycle mutations
    // ------------------------------------------------------------------

    /// Approve a pending case at the given unlock price.
    ///
    /// The status precondition is part of the statement, so a concurrent
    /// moderation action cannot approve the same case twice. Returns
    /// `false` when the case was not in the pending state (or absent).
    pub fn approve_case(&self, id: Uuid, price: f64) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE cases SET status = 'aprovado', unlock_price = ?2
             WHERE id = ?1 AND status = 'pendente'",
            params![id.to_string(), price],
        )?;
        Ok(affected > 0)
    }

    /// Reject a pending case, recording the reason verbatim.
    ///
    /// Same conditional shape as [`Database::approve_case`].
    pub fn reject_case(&self, id: Uuid, reason: &str) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE cases SET status = 'recusado', rejection_reason = ?2
             WHERE id = ?1 AND status = 'pendente'",
            params![id.to_string(), reason],
        )?;
        Ok(affected > 0)
    }

    /// Add a lawyer to a case's unlock set.
    ///
    /// The write is a single `INSERT OR IGNORE` against the composite
    /// primary key: concurrent unlocks by different lawyers both land,
    /// and re-unlocking is a no-op. Returns `true` only when the
    /// membership is new.
    pub fn add_unlock(&self, case_id: Uuid, lawyer_id: Uuid, at: DateTime<Utc>) -> Result<bool> {
        let affected = self.conn().execute(
            "INSERT OR IGNORE INTO case_unlocks (case_id, lawyer_id, created_at)
             VALUES (?1, ?2, ?3)",
            params![case_id.to_string(), lawyer_id.to_string(), at.to_rfc3339()],
        )?;
        Ok(affected > 0)
    }

    /// Atomically bump a case's view counter. Returns `true` if the case
    /// exists.
    pub fn increment_views(&self, id: Uuid) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE cases SET views = views + 1 WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(affected > 0)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn query_cases<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<LegalCase>> {
        let mut cases = {
            let mut stmt = self.conn().prepare(sql)?;
            let rows = stmt.query_map(params, row_to_case)?;

            let mut cases = Vec::new();
            for row in rows {
                cases.push(row?);
            }
            cases
        };

        for case in &mut cases {
            self.hydrate_case(case)?;
        }
        Ok(cases)
    }

    /// Load the unlock set (in unlock order) and attachment URLs (in
    /// submission order) for a case.
    fn hydrate_case(&self, case: &mut LegalCase) -> Result<()> {
        let mut stmt = self.conn().prepare(
            "SELECT lawyer_id FROM case_unlocks WHERE case_id = ?1 ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map(params![case.id.to_string()], |row| {
            let id_str: String = row.get(0)?;
            parse_uuid(0, &id_str)
        })?;
        case.unlocked_by = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        let mut stmt = self.conn().prepare(
            "SELECT url FROM case_attachments WHERE case_id = ?1 ORDER BY position ASC",
        )?;
        let rows = stmt.query_map(params![case.id.to_string()], |row| row.get::<_, String>(0))?;
        case.attachments = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(())
    }
}

/// Map a `rusqlite::Row` to a [`LegalCase`] with empty unlock/attachment
/// lists (hydrated separately).
fn row_to_case(row: &rusqlite::Row<'_>) -> rusqlite::Result<LegalCase> {
    let id_str: String = row.get(0)?;
    let user_id_str: String = row.get(1)?;
    let urgency_str: String = row.get(6)?;
    let publication_str: String = row.get(9)?;
    let status_str: String = row.get(10)?;
    let created_str: String = row.get(14)?;

    Ok(LegalCase {
        id: parse_uuid(0, &id_str)?,
        user_id: parse_uuid(1, &user_id_str)?,
        client_name: row.get(2)?,
        title: row.get(3)?,
        legal_area: row.get(4)?,
        description: row.get(5)?,
        urgency: parse_variant(6, &urgency_str, Urgency::parse, "urgency")?,
        city: row.get(7)?,
        state: row.get(8)?,
        publication_type: parse_variant(
            9,
            &publication_str,
            PublicationType::parse,
            "publication type",
        )?,
        status: parse_variant(10, &status_str, CaseStatus::parse, "case status")?,
        unlock_price: row.get(11)?,
        rejection_reason: row.get(12)?,
        views: row.get(13)?,
        unlocked_by: Vec::new(),
        attachments: Vec::new(),
        created_at: parse_timestamp(14, &created_str)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::testutil::{sample_case, sample_user, test_db};
    use causa_shared::types::{CaseStatus, UserRole};
    use chrono::Utc;

    #[test]
    fn insert_and_get_round_trip() {
        let (mut db, _dir) = test_db();
        let owner = sample_user(UserRole::Client, "maria@teste.com");
        db.insert_profile(&owner).unwrap();

        let mut case = sample_case(&owner);
        case.attachments = vec![
            "/files/cases/a1b2.pdf".into(),
            "/files/cases/c3d4.jpg".into(),
        ];
        db.insert_case(&case).unwrap();

        let found = db.get_case(case.id).unwrap();
        assert_eq!(found.title, case.title);
        assert_eq!(found.status, CaseStatus::Pending);
        assert_eq!(found.attachments, case.attachments);
        assert!(found.unlocked_by.is_empty());
    }

    #[test]
    fn approve_sets_price_only_from_pending() {
        let (mut db, _dir) = test_db();
        let owner = sample_user(UserRole::Client, "maria@teste.com");
        db.insert_profile(&owner).unwrap();
        let case = sample_case(&owner);
        db.insert_case(&case).unwrap();

        assert!(db.approve_case(case.id, 150.0).unwrap());
        let approved = db.get_case(case.id).unwrap();
        assert_eq!(approved.status, CaseStatus::Approved);
        assert_eq!(approved.unlock_price, Some(150.0));

        // Already approved: the conditional update refuses to re-run.
        assert!(!db.approve_case(case.id, 999.0).unwrap());
        assert!(!db.reject_case(case.id, "tarde demais").unwrap());
        assert_eq!(db.get_case(case.id).unwrap().unlock_price, Some(150.0));
    }

    #[test]
    fn reject_stores_reason_verbatim() {
        let (mut db, _dir) = test_db();
        let owner = sample_user(UserRole::Client, "maria@teste.com");
        db.insert_profile(&owner).unwrap();
        let case = sample_case(&owner);
        db.insert_case(&case).unwrap();

        assert!(db.reject_case(case.id, "Inconsistência de dados").unwrap());
        let rejected = db.get_case(case.id).unwrap();
        assert_eq!(rejected.status, CaseStatus::Rejected);
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("Inconsistência de dados")
        );
        assert_eq!(rejected.unlock_price, None);
    }

    #[test]
    fn unlock_preserves_order_and_never_duplicates() {
        let (mut db, _dir) = test_db();
        let owner = sample_user(UserRole::Client, "maria@teste.com");
        let l1 = sample_user(UserRole::Lawyer, "l1@teste.com");
        let l2 = sample_user(UserRole::Lawyer, "l2@teste.com");
        db.insert_profile(&owner).unwrap();
        db.insert_profile(&l1).unwrap();
        db.insert_profile(&l2).unwrap();

        let case = sample_case(&owner);
        db.insert_case(&case).unwrap();
        db.approve_case(case.id, 75.0).unwrap();

        assert!(db.add_unlock(case.id, l2.id, Utc::now()).unwrap());
        assert!(db.add_unlock(case.id, l1.id, Utc::now()).unwrap());
        // Idempotent: re-adding an existing member is a no-op.
        assert!(!db.add_unlock(case.id, l1.id, Utc::now()).unwrap());

        let found = db.get_case(case.id).unwrap();
        assert_eq!(found.unlocked_by, vec![l2.id, l1.id]);
    }

    #[test]
    fn views_increment_atomically() {
        let (mut db, _dir) = test_db();
        let owner = sample_user(UserRole::Client, "maria@teste.com");
        db.insert_profile(&owner).unwrap();
        let case = sample_case(&owner);
        db.insert_case(&case).unwrap();

        db.increment_views(case.id).unwrap();
        db.increment_views(case.id).unwrap();
        assert_eq!(db.get_case(case.id).unwrap().views, 2);
    }

    #[test]
    fn deleting_owner_cascades_to_cases() {
        let (mut db, _dir) = test_db();
        let owner = sample_user(UserRole::Client, "maria@teste.com");
        db.insert_profile(&owner).unwrap();
        let case = sample_case(&owner);
        db.insert_case(&case).unwrap();

        assert!(db.delete_profile(owner.id).unwrap());
        assert!(db.get_case(case.id).is_err());
        assert!(db.list_cases().unwrap().is_empty());
    }
}
