//! Table layout of the navigation store.
//!
//! Column names follow the layout of databases created by earlier releases
//! (camelCase settings columns, a `desc` column on tools), so an existing
//! `nav.db` can be opened and upgraded in place.

pub const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS nav_user (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        password TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS nav_setting (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        favicon TEXT,
        title TEXT,
        govRecord TEXT,
        logo192 TEXT,
        logo512 TEXT,
        hideAdmin INTEGER DEFAULT 0,
        hideGithub INTEGER DEFAULT 0,
        jumpTargetBlank INTEGER DEFAULT 1,
        customJS TEXT,
        customCSS TEXT,
        guestPassword TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS nav_table (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        url TEXT,
        logo TEXT,
        catelog TEXT,
        "desc" TEXT,
        sort INTEGER DEFAULT 0,
        hide INTEGER DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS nav_catelog (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        sort INTEGER DEFAULT 0,
        hide INTEGER DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS nav_api_token (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        value TEXT,
        disabled INTEGER DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS nav_img (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT,
        value TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_nav_img_url ON nav_img(url)",
];

/// Columns introduced after the first release: (table, column, definition)
pub const ADDED_COLUMNS: &[(&str, &str, &str)] = &[
    ("nav_table", "sort", "INTEGER DEFAULT 0"),
    ("nav_table", "hide", "INTEGER DEFAULT 0"),
    ("nav_catelog", "sort", "INTEGER DEFAULT 0"),
    ("nav_catelog", "hide", "INTEGER DEFAULT 0"),
    ("nav_setting", "hideAdmin", "INTEGER DEFAULT 0"),
    ("nav_setting", "hideGithub", "INTEGER DEFAULT 0"),
    ("nav_setting", "jumpTargetBlank", "INTEGER DEFAULT 1"),
    ("nav_setting", "customJS", "TEXT"),
    ("nav_setting", "customCSS", "TEXT"),
    ("nav_setting", "guestPassword", "TEXT"),
];

pub const BACKFILL_DEFAULTS: &[&str] = &[
    "UPDATE nav_table SET sort = 0 WHERE sort IS NULL",
    "UPDATE nav_table SET hide = 0 WHERE hide IS NULL",
    "UPDATE nav_catelog SET sort = 0 WHERE sort IS NULL",
    "UPDATE nav_catelog SET hide = 0 WHERE hide IS NULL",
    "UPDATE nav_setting SET hideAdmin = 0 WHERE hideAdmin IS NULL",
    "UPDATE nav_setting SET hideGithub = 0 WHERE hideGithub IS NULL",
    "UPDATE nav_setting SET jumpTargetBlank = 1 WHERE jumpTargetBlank IS NULL",
];

pub const SEED_SETTING: &str = r#"
    INSERT INTO nav_setting
        (favicon, title, govRecord, logo192, logo512, hideAdmin, hideGithub, jumpTargetBlank, customJS, customCSS, guestPassword)
    VALUES
        ('favicon.ico', 'Van Nav', '', 'logo192.png', 'logo512.png', 0, 0, 1, '', '', '')
"#;

pub const SEED_USER: &str = "INSERT INTO nav_user (name, password) VALUES ('admin', 'admin')";
