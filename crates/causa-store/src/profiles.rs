//! CRUD operations for [`User`] records (the `profiles` collection).

use rusqlite::params;
use uuid::Uuid;

use causa_shared::types::{AccountStatus, User, UserRole};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::util::{parse_timestamp, parse_uuid, parse_variant};

const USER_COLUMNS: &str =
    "id, role, name, email, phone, password_hash, oab, uf_oab, active, status, created_at";

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new profile.
    ///
    /// Fails with [`StoreError::Conflict`] when the email address is
    /// already registered (the `email` column is UNIQUE).
    pub fn insert_profile(&self, user: &User) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO profiles
                 (id, role, name, email, phone, password_hash, oab, uf_oab, active, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    user.id.to_string(),
                    user.role.as_str(),
                    user.name,
                    user.email,
                    user.phone,
                    user.password_hash,
                    user.oab,
                    user.uf_oab,
                    user.active as i32,
                    user.status.as_str(),
                    user.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| StoreError::from(e).on_conflict("email"))?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single profile by id.
    pub fn get_profile(&self, id: Uuid) -> Result<User> {
        let user = self.conn().query_row(
            &format!("SELECT {USER_COLUMNS} FROM profiles WHERE id = ?1"),
            params![id.to_string()],
            row_to_user,
        )?;
        Ok(user)
    }

    /// Fetch a single profile by email (the unique login key).
    pub fn get_profile_by_email(&self, email: &str) -> Result<User> {
        let user = self.conn().query_row(
            &format!("SELECT {USER_COLUMNS} FROM profiles WHERE email = ?1"),
            params![email],
            row_to_user,
        )?;
        Ok(user)
    }

    /// List all profiles, newest first.
    pub fn list_profiles(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {USER_COLUMNS} FROM profiles ORDER BY created_at DESC"
        ))?;

        let rows = stmt.query_map([], row_to_user)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    /// List all active admin accounts (notification targets for new
    /// case submissions).
    pub fn list_admins(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {USER_COLUMNS} FROM profiles
             WHERE role = 'admin' AND active = 1
             ORDER BY created_at ASC"
        ))?;

        let rows = stmt.query_map([], row_to_user)?;

        let mut admins = Vec::new();
        for row in rows {
            admins.push(row?);
        }
        Ok(admins)
    }

    // ------------------------------------------------------------------
    // Update / delete
    // ------------------------------------------------------------------

    /// Set a profile's moderation status. Returns `true` if a row changed.
    pub fn set_profile_status(&self, id: Uuid, status: AccountStatus) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE profiles SET status = ?2 WHERE id = ?1",
            params![id.to_string(), status.as_str()],
        )?;
        Ok(affected > 0)
    }

    /// Delete a profile. Cascades to the profile's cases, unlocks,
    /// messages, notifications, and sessions via foreign keys.
    pub fn delete_profile(&self, id: Uuid) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM profiles WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`User`].
fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let id_str: String = row.get(0)?;
    let role_str: String = row.get(1)?;
    let status_str: String = row.get(9)?;
    let created_str: String = row.get(10)?;
    let active_int: i32 = row.get(8)?;

    Ok(User {
        id: parse_uuid(0, &id_str)?,
        role: parse_variant(1, &role_str, UserRole::parse, "role")?,
        name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        password_hash: row.get(5)?,
        oab: row.get(6)?,
        uf_oab: row.get(7)?,
        active: active_int != 0,
        status: parse_variant(9, &status_str, AccountStatus::parse, "status")?,
        created_at: parse_timestamp(10, &created_str)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::testutil::{sample_user, test_db};
    use causa_shared::types::{AccountStatus, UserRole};

    #[test]
    fn insert_and_fetch_by_email() {
        let (db, _dir) = test_db();
        let user = sample_user(UserRole::Client, "maria@teste.com");
        db.insert_profile(&user).unwrap();

        let found = db.get_profile_by_email("maria@teste.com").unwrap();
        assert_eq!(found, user);
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let (db, _dir) = test_db();
        db.insert_profile(&sample_user(UserRole::Client, "dup@teste.com"))
            .unwrap();

        let err = db
            .insert_profile(&sample_user(UserRole::Lawyer, "dup@teste.com"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict("email")));
    }

    #[test]
    fn missing_profile_is_not_found() {
        let (db, _dir) = test_db();
        let err = db.get_profile_by_email("ninguem@teste.com").unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn status_update() {
        let (db, _dir) = test_db();
        let mut lawyer = sample_user(UserRole::Lawyer, "adv@teste.com");
        lawyer.status = AccountStatus::Pending;
        db.insert_profile(&lawyer).unwrap();

        assert!(db.set_profile_status(lawyer.id, AccountStatus::Approved).unwrap());
        let found = db.get_profile(lawyer.id).unwrap();
        assert_eq!(found.status, AccountStatus::Approved);
    }

    #[test]
    fn list_admins_filters_role() {
        let (db, _dir) = test_db();
        db.insert_profile(&sample_user(UserRole::Client, "c@teste.com")).unwrap();
        db.insert_profile(&sample_user(UserRole::Admin, "a@teste.com")).unwrap();

        let admins = db.list_admins().unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "a@teste.com");
    }
}
