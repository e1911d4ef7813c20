//! Append-only chat log, keyed by case.

use rusqlite::params;
use uuid::Uuid;

use causa_shared::types::{ChatMessage, UserRole};

use crate::database::Database;
use crate::error::Result;
use crate::util::{parse_timestamp, parse_uuid, parse_variant};

impl Database {
    pub fn insert_message(&self, message: &ChatMessage) -> Result<()> {
        self.conn().execute(
            "INSERT INTO messages (id, case_id, sender_id, sender_role, text, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                message.id.to_string(),
                message.case_id.to_string(),
                message.sender_id.to_string(),
                message.sender_role.as_str(),
                message.text,
                message.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Messages for a case in creation order (insertion order is the
    /// display order; no reordering or editing).
    pub fn list_messages_for_case(&self, case_id: Uuid) -> Result<Vec<ChatMessage>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, case_id, sender_id, sender_role, text, created_at
             FROM messages
             WHERE case_id = ?1
             ORDER BY created_at ASC, rowid ASC",
        )?;

        let rows = stmt.query_map(params![case_id.to_string()], row_to_message)?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        Ok(messages)
    }
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChatMessage> {
    let id_str: String = row.get(0)?;
    let case_id_str: String = row.get(1)?;
    let sender_id_str: String = row.get(2)?;
    let role_str: String = row.get(3)?;
    let created_str: String = row.get(5)?;

    Ok(ChatMessage {
        id: parse_uuid(0, &id_str)?,
        case_id: parse_uuid(1, &case_id_str)?,
        sender_id: parse_uuid(2, &sender_id_str)?,
        sender_role: parse_variant(3, &role_str, UserRole::parse, "sender role")?,
        text: row.get(4)?,
        created_at: parse_timestamp(5, &created_str)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::testutil::{sample_case, sample_message, sample_user, test_db};
    use causa_shared::types::UserRole;

    #[test]
    fn messages_come_back_in_creation_order() {
        let (mut db, _dir) = test_db();
        let owner = sample_user(UserRole::Client, "maria@teste.com");
        db.insert_profile(&owner).unwrap();
        let case = sample_case(&owner);
        db.insert_case(&case).unwrap();

        for text in ["primeira", "segunda", "terceira"] {
            db.insert_message(&sample_message(&case, &owner, text)).unwrap();
        }

        let log = db.list_messages_for_case(case.id).unwrap();
        let texts: Vec<&str> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["primeira", "segunda", "terceira"]);
    }

    #[test]
    fn sender_role_is_persisted() {
        let (mut db, _dir) = test_db();
        let owner = sample_user(UserRole::Client, "maria@teste.com");
        let admin = sample_user(UserRole::Admin, "admin@teste.com");
        db.insert_profile(&owner).unwrap();
        db.insert_profile(&admin).unwrap();
        let case = sample_case(&owner);
        db.insert_case(&case).unwrap();

        db.insert_message(&sample_message(&case, &admin, "em análise")).unwrap();

        let log = db.list_messages_for_case(case.id).unwrap();
        assert_eq!(log[0].sender_role, UserRole::Admin);
    }
}
