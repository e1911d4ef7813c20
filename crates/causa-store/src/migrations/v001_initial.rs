//! v001 -- Initial schema creation.
//!
//! Creates the core tables: `profiles`, `cases`, `case_unlocks`,
//! `case_attachments`, `messages`, `notifications`, and `sessions`.
//! Deleting a profile cascades through everything that references it,
//! directly or via the profile's cases.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Profiles (accounts)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS profiles (
    id            TEXT PRIMARY KEY NOT NULL,  -- UUID v4
    role          TEXT NOT NULL,              -- cliente / advogado / admin
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,       -- login key
    phone         TEXT NOT NULL,
    password_hash TEXT NOT NULL,              -- Argon2id PHC string
    oab           TEXT,                       -- lawyers only
    uf_oab        TEXT,
    active        INTEGER NOT NULL DEFAULT 1, -- boolean 0/1
    status        TEXT NOT NULL,              -- pending / approved / rejected
    created_at    TEXT NOT NULL               -- ISO-8601 / RFC-3339
);

CREATE INDEX IF NOT EXISTS idx_profiles_status ON profiles(status);

-- ----------------------------------------------------------------
-- Cases
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS cases (
    id               TEXT PRIMARY KEY NOT NULL, -- UUID v4
    user_id          TEXT NOT NULL,             -- FK -> profiles(id)
    client_name      TEXT NOT NULL,             -- denormalized owner name
    title            TEXT NOT NULL,
    legal_area       TEXT NOT NULL,
    description      TEXT NOT NULL,
    urgency          TEXT NOT NULL,             -- Baixa / Média / Alta
    city             TEXT NOT NULL,
    state            TEXT NOT NULL,             -- UF code
    publication_type TEXT NOT NULL,             -- publico / privado
    status           TEXT NOT NULL,             -- pendente / aprovado / recusado / arquivado
    unlock_price     REAL,                      -- set iff status = aprovado
    rejection_reason TEXT,                      -- set iff status = recusado
    views            INTEGER NOT NULL DEFAULT 0,
    created_at       TEXT NOT NULL,

    FOREIGN KEY (user_id) REFERENCES profiles(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_cases_status ON cases(status);
CREATE INDEX IF NOT EXISTS idx_cases_user ON cases(user_id);

-- ----------------------------------------------------------------
-- Case unlocks (paid-access membership set)
-- ----------------------------------------------------------------
-- Membership is monotonic and duplicate-free by construction: writes go
-- through INSERT OR IGNORE against the composite primary key, and
-- readback follows rowid so unlock order is preserved.
CREATE TABLE IF NOT EXISTS case_unlocks (
    case_id    TEXT NOT NULL,                  -- FK -> cases(id)
    lawyer_id  TEXT NOT NULL,                  -- FK -> profiles(id)
    created_at TEXT NOT NULL,

    PRIMARY KEY (case_id, lawyer_id),
    FOREIGN KEY (case_id) REFERENCES cases(id) ON DELETE CASCADE,
    FOREIGN KEY (lawyer_id) REFERENCES profiles(id) ON DELETE CASCADE
);

-- ----------------------------------------------------------------
-- Case attachments (ordered public URLs)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS case_attachments (
    case_id  TEXT NOT NULL,                    -- FK -> cases(id)
    position INTEGER NOT NULL,                 -- submission order, 0-based
    url      TEXT NOT NULL,

    PRIMARY KEY (case_id, position),
    FOREIGN KEY (case_id) REFERENCES cases(id) ON DELETE CASCADE
);

-- ----------------------------------------------------------------
-- Messages (append-only per-case chat)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS messages (
    id          TEXT PRIMARY KEY NOT NULL,     -- UUID v4
    case_id     TEXT NOT NULL,                 -- FK -> cases(id)
    sender_id   TEXT NOT NULL,                 -- FK -> profiles(id)
    sender_role TEXT NOT NULL,                 -- captured at creation time
    text        TEXT NOT NULL,
    created_at  TEXT NOT NULL,

    FOREIGN KEY (case_id) REFERENCES cases(id) ON DELETE CASCADE,
    FOREIGN KEY (sender_id) REFERENCES profiles(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_messages_case_ts
    ON messages(case_id, created_at ASC);

-- ----------------------------------------------------------------
-- Notifications
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS notifications (
    id         TEXT PRIMARY KEY NOT NULL,      -- UUID v4
    user_id    TEXT NOT NULL,                  -- FK -> profiles(id)
    kind       TEXT NOT NULL,                  -- info / success / warning
    title      TEXT NOT NULL,
    message    TEXT NOT NULL,
    read       INTEGER NOT NULL DEFAULT 0,     -- boolean 0/1
    created_at TEXT NOT NULL,

    FOREIGN KEY (user_id) REFERENCES profiles(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_notifications_user
    ON notifications(user_id, created_at DESC);

-- ----------------------------------------------------------------
-- Sessions
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS sessions (
    token      TEXT PRIMARY KEY NOT NULL,      -- random bearer token
    user_id    TEXT NOT NULL,                  -- FK -> profiles(id)
    created_at TEXT NOT NULL,

    FOREIGN KEY (user_id) REFERENCES profiles(id) ON DELETE CASCADE
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
