pub const SCHEMA: &str = r#"
-- Categories group videos on the public board
CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    slug TEXT NOT NULL UNIQUE,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Curated videos; category fields are denormalized so the public listing
-- is a single query
CREATE TABLE IF NOT EXISTS videos (
    id TEXT PRIMARY KEY,
    tiktok_url TEXT NOT NULL,
    tiktok_id TEXT NOT NULL,
    caption TEXT NOT NULL DEFAULT '',
    category_name TEXT NOT NULL,
    category_slug TEXT NOT NULL,
    plays INTEGER NOT NULL DEFAULT 0,
    notes TEXT NOT NULL DEFAULT '',
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Create indexes
CREATE INDEX IF NOT EXISTS idx_videos_category_slug ON videos(category_slug);
CREATE INDEX IF NOT EXISTS idx_videos_created ON videos(created_at);
"#;
