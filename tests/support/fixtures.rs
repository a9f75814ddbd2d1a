use std::path::{Path, PathBuf};

use sql_dictionary::app::config::ConnectionSettings;
use sql_dictionary::{AppConfig, ColumnDescriptor, ForeignKeyConstraint, KeyKind};

use super::fakes::FakeSchemaReader;

pub const DATABASE: &str = "breeze_db";

pub fn column(name: &str, raw_type: &str, nullable: bool, key: KeyKind) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.to_string(),
        raw_type: raw_type.to_string(),
        nullable,
        key_kind: key,
        comment: String::new(),
    }
}

pub fn foreign_key(column: &str, table: &str, referenced: &str) -> ForeignKeyConstraint {
    ForeignKeyConstraint {
        constraint_name: format!("{column}_foreign"),
        column_name: column.to_string(),
        referenced_table_name: Some(table.to_string()),
        referenced_column_name: Some(referenced.to_string()),
    }
}

/// `users` with a primary key, a plain column and a role reference, plus
/// `roles` and `password_resets`.
pub fn users_reader() -> FakeSchemaReader {
    FakeSchemaReader::new()
        .with_table(
            "password_resets",
            vec![
                column("email", "varchar(255)", false, KeyKind::None),
                column("token", "varchar(255)", false, KeyKind::None),
            ],
            Vec::new(),
        )
        .with_table(
            "roles",
            vec![
                column("id", "int(10) unsigned", false, KeyKind::Primary),
                column("name", "enum('admin','editor','viewer')", false, KeyKind::None),
            ],
            Vec::new(),
        )
        .with_table(
            "users",
            vec![
                column("id", "bigint(20) unsigned", false, KeyKind::Primary),
                column("email", "varchar(255)", false, KeyKind::None),
                column("role_id", "int", false, KeyKind::ForeignCandidate),
            ],
            vec![foreign_key("role_id", "roles", "id")],
        )
}

pub fn app_config(tables: &[&str], ignore_columns: &[&str], out_dir: &Path) -> AppConfig {
    AppConfig {
        connection: ConnectionSettings::Params {
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
        },
        db_name: DATABASE.to_string(),
        tables: tables.iter().map(|t| t.to_string()).collect(),
        ignore_columns: ignore_columns.iter().map(|c| c.to_string()).collect(),
        md_out: out_dir.join("data_dictionary.md"),
        html_out: None,
        print: false,
    }
}

pub fn html_path(out_dir: &Path) -> PathBuf {
    out_dir.join("data_dictionary.html")
}
