//! Login sessions: opaque bearer tokens resolved to profiles.

use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use causa_shared::types::User;

use crate::database::Database;
use crate::error::Result;

impl Database {
    pub fn insert_session(&self, token: &str, user_id: Uuid, at: DateTime<Utc>) -> Result<()> {
        self.conn().execute(
            "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![token, user_id.to_string(), at.to_rfc3339()],
        )?;
        Ok(())
    }

    /// Resolve a bearer token to its profile, or `NotFound` when the
    /// session does not exist (logged out, deleted user, or bogus token).
    pub fn get_session_user(&self, token: &str) -> Result<User> {
        let user_id: String = self.conn().query_row(
            "SELECT user_id FROM sessions WHERE token = ?1",
            params![token],
            |row| row.get(0),
        )?;
        self.get_profile(Uuid::parse_str(&user_id)?)
    }

    /// Delete a session. Returns `true` if a row was removed.
    pub fn delete_session(&self, token: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::testutil::{sample_user, test_db};
    use causa_shared::types::UserRole;
    use chrono::Utc;

    #[test]
    fn session_round_trip_and_logout() {
        let (db, _dir) = test_db();
        let user = sample_user(UserRole::Client, "maria@teste.com");
        db.insert_profile(&user).unwrap();

        db.insert_session("tok-abc", user.id, Utc::now()).unwrap();
        assert_eq!(db.get_session_user("tok-abc").unwrap().id, user.id);

        assert!(db.delete_session("tok-abc").unwrap());
        assert!(matches!(
            db.get_session_user("tok-abc").unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[test]
    fn deleting_user_invalidates_sessions() {
        let (db, _dir) = test_db();
        let user = sample_user(UserRole::Lawyer, "adv@teste.com");
        db.insert_profile(&user).unwrap();
        db.insert_session("tok-xyz", user.id, Utc::now()).unwrap();

        db.delete_profile(user.id).unwrap();
        assert!(db.get_session_user("tok-xyz").is_err());
    }
}
