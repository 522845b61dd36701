//! Event log migrations - embedded SQL files
//!
//! Applied to logs.duckdb by the logging service, separately from the local
//! store's migrations. Same (name, sql) format, applied in listed order.

pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_initial_schema.sql", include_str!("001_initial_schema.sql")),
];
