use sqlx::FromRow;

// Raw rows as the driver hands them back. Converted right away at the
// inspector boundary; nothing past it sees these.

#[derive(FromRow, Debug, Clone)]
pub struct ColumnRow {
    pub column_name: String,
    pub column_type: String,
    pub is_nullable: String,
    pub column_key: String,
    pub column_comment: String,
}

#[derive(FromRow, Debug, Clone)]
pub struct ConstraintRow {
    pub constraint_name: String,
    pub column_name: String,
    pub referenced_table_name: Option<String>,
    pub referenced_column_name: Option<String>,
}

/// Key classification reported by the engine for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    None,
    Primary,
    /// Non-unique index (`MUL`). Only a hint; constraint rows decide whether
    /// the column is really a foreign key.
    ForeignCandidate,
}

impl KeyKind {
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim() {
            "PRI" => Self::Primary,
            "MUL" => Self::ForeignCandidate,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub raw_type: String,
    pub nullable: bool,
    pub key_kind: KeyKind,
    pub comment: String,
}

impl From<ColumnRow> for ColumnDescriptor {
    fn from(row: ColumnRow) -> Self {
        Self {
            name: row.column_name,
            raw_type: row.column_type,
            nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
            key_kind: KeyKind::from_flag(&row.column_key),
            comment: row.column_comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyConstraint {
    pub constraint_name: String,
    pub column_name: String,
    pub referenced_table_name: Option<String>,
    pub referenced_column_name: Option<String>,
}

impl From<ConstraintRow> for ForeignKeyConstraint {
    fn from(row: ConstraintRow) -> Self {
        Self {
            constraint_name: row.constraint_name,
            column_name: row.column_name,
            referenced_table_name: row.referenced_table_name,
            referenced_column_name: row.referenced_column_name,
        }
    }
}

// Separates the "Scanning" phase from the "Building" phase.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnDescriptor>,
    /// Kept in query order; the first match for a column wins.
    pub constraints: Vec<ForeignKeyConstraint>,
}

/// Literal options of an enumeration column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedValues {
    NotApplicable,
    Values(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryRow {
    pub name: String,
    pub column_type: String,
    pub nullable: bool,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub foreign_table: Option<String>,
    pub foreign_column: Option<String>,
    pub allowed_values: AllowedValues,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryTable {
    pub name: String,
    pub rows: Vec<DictionaryRow>,
}

/// Everything the renderer needs: tables in output order, each with its
/// retained columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    pub database: String,
    pub tables: Vec<DictionaryTable>,
}

impl Dictionary {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            tables: Vec::new(),
        }
    }

    pub fn push_table(&mut self, name: impl Into<String>, rows: Vec<DictionaryRow>) {
        self.tables.push(DictionaryTable {
            name: name.into(),
            rows,
        });
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn row_count(&self) -> usize {
        self.tables.iter().map(|table| table.rows.len()).sum()
    }

    pub fn table(&self, name: &str) -> Option<&DictionaryTable> {
        self.tables.iter().find(|table| table.name == name)
    }
}
