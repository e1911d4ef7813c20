//! Per-user notifications, written by the server's notification emitter.

use rusqlite::params;
use uuid::Uuid;

use causa_shared::types::{Notification, NotificationKind};

use crate::database::Database;
use crate::error::Result;
use crate::util::{parse_timestamp, parse_uuid, parse_variant};

impl Database {
    pub fn insert_notification(&self, notification: &Notification) -> Result<()> {
        self.conn().execute(
            "INSERT INTO notifications (id, user_id, kind, title, message, read, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                notification.id.to_string(),
                notification.user_id.to_string(),
                notification.kind.as_str(),
                notification.title,
                notification.message,
                notification.read as i32,
                notification.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// A user's notifications, newest first.
    pub fn list_notifications_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, user_id, kind, title, message, read, created_at
             FROM notifications
             WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC",
        )?;

        let rows = stmt.query_map(params![user_id.to_string()], row_to_notification)?;

        let mut notifications = Vec::new();
        for row in rows {
            notifications.push(row?);
        }
        Ok(notifications)
    }

    /// Flip a notification's read flag. Scoped to the owning user so one
    /// account cannot mark another's notifications. Returns `true` if a
    /// row changed.
    pub fn mark_notification_read(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE notifications SET read = 1 WHERE id = ?1 AND user_id = ?2",
            params![id.to_string(), user_id.to_string()],
        )?;
        Ok(affected > 0)
    }
}

fn row_to_notification(row: &rusqlite::Row<'_>) -> rusqlite::Result<Notification> {
    let id_str: String = row.get(0)?;
    let user_id_str: String = row.get(1)?;
    let kind_str: String = row.get(2)?;
    let read_int: i32 = row.get(5)?;
    let created_str: String = row.get(6)?;

    Ok(Notification {
        id: parse_uuid(0, &id_str)?,
        user_id: parse_uuid(1, &user_id_str)?,
        kind: parse_variant(2, &kind_str, NotificationKind::parse, "notification kind")?,
        title: row.get(3)?,
        message: row.get(4)?,
        read: read_int != 0,
        created_at: parse_timestamp(6, &created_str)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::testutil::{sample_notification, sample_user, test_db};
    use causa_shared::types::UserRole;

    #[test]
    fn list_is_scoped_to_user() {
        let (db, _dir) = test_db();
        let a = sample_user(UserRole::Client, "a@teste.com");
        let b = sample_user(UserRole::Client, "b@teste.com");
        db.insert_profile(&a).unwrap();
        db.insert_profile(&b).unwrap();

        db.insert_notification(&sample_notification(&a, "Caso Aprovado")).unwrap();
        db.insert_notification(&sample_notification(&b, "Novo Caso")).unwrap();

        let for_a = db.list_notifications_for_user(a.id).unwrap();
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].title, "Caso Aprovado");
        assert!(!for_a[0].read);
    }

    #[test]
    fn mark_read_requires_ownership() {
        let (db, _dir) = test_db();
        let a = sample_user(UserRole::Client, "a@teste.com");
        let b = sample_user(UserRole::Client, "b@teste.com");
        db.insert_profile(&a).unwrap();
        db.insert_profile(&b).unwrap();

        let n = sample_notification(&a, "Caso Aprovado");
        db.insert_notification(&n).unwrap();

        assert!(!db.mark_notification_read(n.id, b.id).unwrap());
        assert!(db.mark_notification_read(n.id, a.id).unwrap());
        assert!(db.list_notifications_for_user(a.id).unwrap()[0].read);
    }
}
