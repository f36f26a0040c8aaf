pub const SCHEMA: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS incidents (
    id            TEXT PRIMARY KEY,
    reporter_id   TEXT NOT NULL,
    reporter_name TEXT NOT NULL,
    lat           REAL NOT NULL,
    lng           REAL NOT NULL,
    category      TEXT NOT NULL,
    priority      TEXT NOT NULL,
    details       TEXT NOT NULL DEFAULT '',
    has_infants   INTEGER NOT NULL DEFAULT 0,
    has_elderly   INTEGER NOT NULL DEFAULT 0,
    status        TEXT NOT NULL,
    created_at    TEXT NOT NULL,
    resolved_at   TEXT
);
"#,
    r#"
CREATE INDEX IF NOT EXISTS idx_incidents_status ON incidents (status);
"#,
    r#"
CREATE INDEX IF NOT EXISTS idx_incidents_reporter ON incidents (reporter_id, status);
"#,
    r#"
CREATE TABLE IF NOT EXISTS persons (
    id           TEXT PRIMARY KEY,
    name         TEXT,
    last_lat     REAL,
    last_lng     REAL,
    last_seen_at TEXT
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS families (
    id         TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    join_code  TEXT NOT NULL UNIQUE,
    admin_id   TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS family_members (
    family_id TEXT NOT NULL,
    person_id TEXT NOT NULL,
    PRIMARY KEY (family_id, person_id)
);
"#,
];

pub const INSERT_INCIDENT: &str = r#"
INSERT INTO incidents (id, reporter_id, reporter_name, lat, lng, category, priority, details, has_infants, has_elderly, status, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);
"#;

pub const SELECT_INCIDENT: &str = r#"
SELECT * FROM incidents WHERE id = ?1;
"#;

pub const SELECT_ACTIVE_INCIDENTS: &str = r#"
SELECT * FROM incidents WHERE status = 'active' ORDER BY created_at;
"#;

pub const SELECT_ACTIVE_FOR_REPORTER: &str = r#"
SELECT id FROM incidents WHERE reporter_id = ?1 AND status = 'active' LIMIT 1;
"#;

pub const SELECT_ACTIVE_REPORTERS: &str = r#"
SELECT DISTINCT reporter_id FROM incidents WHERE status = 'active';
"#;

pub const UPDATE_INCIDENT_DETAILS: &str = r#"
UPDATE incidents
SET category    = COALESCE(?1, category),
    details     = COALESCE(?2, details),
    has_infants = COALESCE(?3, has_infants),
    has_elderly = COALESCE(?4, has_elderly)
WHERE id = ?5;
"#;

pub const RESOLVE_INCIDENT: &str = r#"
UPDATE incidents
SET status = 'resolved',
    resolved_at = ?1
WHERE id = ?2 AND status = 'active';
"#;

pub const UPSERT_PERSON_LOCATION: &str = r#"
INSERT INTO persons (id, name, last_lat, last_lng, last_seen_at)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT (id) DO UPDATE
SET name = COALESCE(excluded.name, persons.name),
    last_lat = excluded.last_lat,
    last_lng = excluded.last_lng,
    last_seen_at = excluded.last_seen_at;
"#;

pub const UPSERT_PERSON: &str = r#"
INSERT INTO persons (id, name)
VALUES (?1, ?2)
ON CONFLICT (id) DO UPDATE
SET name = COALESCE(excluded.name, persons.name);
"#;

pub const INSERT_FAMILY: &str = r#"
INSERT INTO families (id, name, join_code, admin_id, created_at)
VALUES (?1, ?2, ?3, ?4, ?5);
"#;

pub const SELECT_FAMILY: &str = r#"
SELECT * FROM families WHERE id = ?1;
"#;

pub const SELECT_FAMILY_BY_CODE: &str = r#"
SELECT * FROM families WHERE join_code = ?1;
"#;

pub const SELECT_FAMILIES_FOR_PERSON: &str = r#"
SELECT f.* FROM families f
JOIN family_members fm ON fm.family_id = f.id
WHERE fm.person_id = ?1
ORDER BY f.created_at;
"#;

pub const INSERT_FAMILY_MEMBER: &str = r#"
INSERT OR IGNORE INTO family_members (family_id, person_id) VALUES (?1, ?2);
"#;

pub const SELECT_FAMILY_MEMBERS: &str = r#"
SELECT fm.person_id, p.name, p.last_lat, p.last_lng, p.last_seen_at
FROM family_members fm
LEFT JOIN persons p ON p.id = fm.person_id
WHERE fm.family_id = ?1
ORDER BY fm.person_id;
"#;
