//! Turns raw table metadata into display-ready dictionary rows.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::app::error::DictionaryError;
use crate::app::inspector::{SchemaReader, read_table_schema};
use crate::app::models::{
    AllowedValues, ColumnDescriptor, Dictionary, DictionaryRow, ForeignKeyConstraint, KeyKind,
    TableSchema,
};

pub const PRIMARY_KEY_COMMENT: &str = "Auto-incremental unique identifier";

/// Builds one row per retained column of `table`, in column order.
///
/// Columns named in `ignored_columns` (exact, case-sensitive) are dropped.
/// A primary key is never reported as a foreign key, even when a constraint
/// row names it.
pub fn build_rows(table: &TableSchema, ignored_columns: &BTreeSet<String>) -> Vec<DictionaryRow> {
    let rows: Vec<DictionaryRow> = table
        .columns
        .iter()
        .filter(|column| !ignored_columns.contains(&column.name))
        .map(|column| build_row(column, &table.constraints))
        .collect();

    debug!(
        table = %table.table_name,
        retained = rows.len(),
        dropped = table.columns.len() - rows.len(),
        "Built dictionary rows"
    );

    rows
}

fn build_row(column: &ColumnDescriptor, constraints: &[ForeignKeyConstraint]) -> DictionaryRow {
    let relationship = constraints
        .iter()
        .find(|constraint| constraint.column_name == column.name);

    let is_primary_key = column.key_kind == KeyKind::Primary;
    let is_foreign_key = !is_primary_key && relationship.is_some();

    let foreign_table = relationship.and_then(|c| c.referenced_table_name.clone());
    let foreign_column = relationship.and_then(|c| c.referenced_column_name.clone());

    let comment = if !column.comment.trim().is_empty() {
        column.comment.clone()
    } else if is_primary_key {
        PRIMARY_KEY_COMMENT.to_string()
    } else if is_foreign_key {
        format!(
            "Stores a referenced value of {} in the {} table",
            foreign_column.as_deref().unwrap_or_default(),
            foreign_table.as_deref().unwrap_or_default()
        )
    } else {
        String::new()
    };

    DictionaryRow {
        name: column.name.clone(),
        column_type: base_type(&column.raw_type).to_string(),
        nullable: column.nullable,
        is_primary_key,
        is_foreign_key,
        foreign_table,
        foreign_column,
        allowed_values: allowed_values(&column.raw_type),
        comment,
    }
}

/// Type token up to the first space, so `int(10) unsigned` becomes `int(10)`.
pub fn base_type(raw_type: &str) -> &str {
    raw_type.split(' ').next().unwrap_or(raw_type)
}

/// Literal options of an `enum(...)` type; `NotApplicable` for anything else.
pub fn allowed_values(raw_type: &str) -> AllowedValues {
    if !raw_type.to_ascii_lowercase().contains("enum") {
        return AllowedValues::NotApplicable;
    }

    let (Some(open), Some(close)) = (raw_type.find('('), raw_type.rfind(')')) else {
        return AllowedValues::Values(Vec::new());
    };
    if close <= open {
        return AllowedValues::Values(Vec::new());
    }

    AllowedValues::Values(parse_literal_list(&raw_type[open + 1..close]))
}

// Splits `'a','b,c','it''s'` into its unquoted values.
fn parse_literal_list(list: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = list.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' if in_quotes && chars.peek() == Some(&'\'') => {
                current.push('\'');
                chars.next();
            }
            '\'' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            c if in_quotes => current.push(c),
            c if !c.is_whitespace() => current.push(c),
            _ => {}
        }
    }

    if quoted || !current.is_empty() || !values.is_empty() {
        values.push(current);
    }

    values
}

/// Collects a [`Dictionary`] for a database through a [`SchemaReader`].
#[derive(Debug, Clone, Default)]
pub struct DictionaryBuilder {
    tables: Vec<String>,
    ignored_columns: BTreeSet<String>,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables to document. Empty means every table the reader lists.
    pub fn tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for table in tables {
            let table = table.into();
            if !table.is_empty() && !self.tables.contains(&table) {
                self.tables.push(table);
            }
        }
        self
    }

    pub fn ignore_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_columns.extend(
            columns
                .into_iter()
                .map(Into::into)
                .filter(|column: &String| !column.is_empty()),
        );
        self
    }

    pub fn ignored_columns(&self) -> &BTreeSet<String> {
        &self.ignored_columns
    }

    /// Resolves the table selection against what the reader reports.
    /// Requested tables the reader does not know are dropped without error.
    pub fn select_tables(&self, available: Vec<String>) -> Vec<String> {
        if self.tables.is_empty() {
            return available;
        }

        self.tables
            .iter()
            .filter(|table| {
                let known = available.contains(table);
                if !known {
                    warn!(table = %table, "Requested table not found, skipping");
                }
                known
            })
            .cloned()
            .collect()
    }

    pub async fn collect<R>(&self, database: &str, reader: &mut R) -> Result<Dictionary, DictionaryError>
    where
        R: SchemaReader + ?Sized,
    {
        let available = reader.list_tables().await?;
        let selected = self.select_tables(available);

        let mut dictionary = Dictionary::new(database);
        for table in &selected {
            let schema = read_table_schema(&mut *reader, table).await?;
            dictionary.push_table(table.clone(), build_rows(&schema, &self.ignored_columns));
        }

        Ok(dictionary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, raw_type: &str, key: KeyKind) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            raw_type: raw_type.to_string(),
            nullable: false,
            key_kind: key,
            comment: String::new(),
        }
    }

    fn constraint(column: &str, table: &str, referenced: &str) -> ForeignKeyConstraint {
        ForeignKeyConstraint {
            constraint_name: format!("fk_{column}"),
            column_name: column.to_string(),
            referenced_table_name: Some(table.to_string()),
            referenced_column_name: Some(referenced.to_string()),
        }
    }

    fn schema(columns: Vec<ColumnDescriptor>, constraints: Vec<ForeignKeyConstraint>) -> TableSchema {
        TableSchema {
            table_name: "users".to_string(),
            columns,
            constraints,
        }
    }

    #[test]
    fn ignored_columns_are_dropped() {
        let table = schema(
            vec![
                column("id", "bigint(20) unsigned", KeyKind::Primary),
                column("password", "varchar(255)", KeyKind::None),
                column("Password", "varchar(255)", KeyKind::None),
            ],
            Vec::new(),
        );
        let ignored = BTreeSet::from(["password".to_string()]);

        let rows = build_rows(&table, &ignored);

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["id", "Password"]);
    }

    #[test]
    fn base_type_strips_modifiers() {
        assert_eq!(base_type("bigint(20) unsigned"), "bigint(20)");
        assert_eq!(base_type("varchar(255)"), "varchar(255)");
        assert_eq!(base_type(""), "");
    }

    #[test]
    fn primary_key_wins_over_constraint() {
        let table = schema(
            vec![column("user_id", "int", KeyKind::Primary)],
            vec![constraint("user_id", "users", "id")],
        );

        let rows = build_rows(&table, &BTreeSet::new());

        assert!(rows[0].is_primary_key);
        assert!(!rows[0].is_foreign_key);
        assert_eq!(rows[0].comment, PRIMARY_KEY_COMMENT);
    }

    #[test]
    fn foreign_key_comes_from_constraint_not_key_flag() {
        let table = schema(
            vec![
                column("role_id", "int", KeyKind::None),
                column("team_id", "int", KeyKind::ForeignCandidate),
            ],
            vec![constraint("role_id", "roles", "id")],
        );

        let rows = build_rows(&table, &BTreeSet::new());

        assert!(rows[0].is_foreign_key);
        assert_eq!(rows[0].foreign_table.as_deref(), Some("roles"));
        assert_eq!(
            rows[0].comment,
            "Stores a referenced value of id in the roles table"
        );
        assert!(!rows[1].is_foreign_key);
        assert_eq!(rows[1].foreign_table, None);
        assert_eq!(rows[1].foreign_column, None);
        assert_eq!(rows[1].comment, "");
    }

    #[test]
    fn first_matching_constraint_is_used() {
        let table = schema(
            vec![column("owner_id", "int", KeyKind::ForeignCandidate)],
            vec![
                constraint("owner_id", "accounts", "id"),
                constraint("owner_id", "legacy_accounts", "uuid"),
            ],
        );

        let rows = build_rows(&table, &BTreeSet::new());

        assert_eq!(rows[0].foreign_table.as_deref(), Some("accounts"));
        assert_eq!(rows[0].foreign_column.as_deref(), Some("id"));
    }

    #[test]
    fn engine_comment_is_kept() {
        let mut described = column("id", "int", KeyKind::Primary);
        described.comment = "Row id".to_string();
        let mut blank = column("note", "text", KeyKind::None);
        blank.comment = "   ".to_string();

        let rows = build_rows(&schema(vec![described, blank], Vec::new()), &BTreeSet::new());

        assert_eq!(rows[0].comment, "Row id");
        assert_eq!(rows[1].comment, "");
    }

    #[test]
    fn enum_values_are_parsed() {
        assert_eq!(
            allowed_values("enum('a','b','c')"),
            AllowedValues::Values(vec!["a".into(), "b".into(), "c".into()])
        );
        assert_eq!(
            allowed_values("ENUM('on hold', 'x,y', 'it''s')"),
            AllowedValues::Values(vec!["on hold".into(), "x,y".into(), "it's".into()])
        );
        assert_eq!(allowed_values("varchar(20)"), AllowedValues::NotApplicable);
    }

    #[test]
    fn selection_keeps_requested_order_and_drops_unknown() {
        let builder = DictionaryBuilder::new().tables(["roles", "ghosts", "users", "roles"]);

        let selected = builder.select_tables(vec!["users".into(), "roles".into()]);

        assert_eq!(selected, vec!["roles".to_string(), "users".to_string()]);
    }

    #[test]
    fn empty_selection_means_everything() {
        let builder = DictionaryBuilder::new();
        let selected = builder.select_tables(vec!["a".into(), "b".into()]);
        assert_eq!(selected, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn empty_ignore_entries_are_skipped() {
        let builder = DictionaryBuilder::new().ignore_columns(["", "password"]);
        assert_eq!(builder.ignored_columns().len(), 1);
    }
}
