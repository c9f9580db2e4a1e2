//! SQL DDL for initializing the database schema.

/// Snippets table. MySQL has no `CREATE INDEX IF NOT EXISTS`, so the index
/// lives inline in the table definition.
pub const MYSQL_INIT: &str = r"
CREATE TABLE IF NOT EXISTS snippets (
    id BIGINT NOT NULL AUTO_INCREMENT,
    title VARCHAR(100) NOT NULL,
    content TEXT NOT NULL,
    created DATETIME NOT NULL,
    expires DATETIME NOT NULL,
    PRIMARY KEY (id),
    INDEX idx_snippets_created (created)
);
";
