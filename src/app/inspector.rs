use async_trait::async_trait;
use sqlx::MySqlConnection;
use tracing::debug;

use crate::app::error::DictionaryError;
use crate::app::models::{
    ColumnDescriptor, ColumnRow, ConstraintRow, ForeignKeyConstraint, TableSchema,
};

/// Source of raw schema metadata.
#[async_trait]
pub trait SchemaReader: Send {
    /// All base tables of the configured database.
    async fn list_tables(&mut self) -> Result<Vec<String>, DictionaryError>;

    /// Column metadata in the engine's ordinal order.
    async fn describe_table(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>, DictionaryError>;

    /// Non-primary key usages of `table` that reference another table.
    /// An empty result is valid.
    async fn table_constraints(
        &mut self,
        table: &str,
    ) -> Result<Vec<ForeignKeyConstraint>, DictionaryError>;
}

/// Describes one table and fetches its constraints.
pub async fn read_table_schema<R>(reader: &mut R, table: &str) -> Result<TableSchema, DictionaryError>
where
    R: SchemaReader + ?Sized,
{
    let columns = reader.describe_table(table).await?;
    let constraints = reader.table_constraints(table).await?;

    debug!(
        table,
        columns = columns.len(),
        constraints = constraints.len(),
        "Read table metadata"
    );

    Ok(TableSchema {
        table_name: table.to_string(),
        columns,
        constraints,
    })
}

// It handles all database interaction.

pub struct Inspector<'a> {
    conn: &'a mut MySqlConnection,
    database: String,
}

impl<'a> Inspector<'a> {
    pub fn new(conn: &'a mut MySqlConnection, database: impl Into<String>) -> Self {
        Self {
            conn,
            database: database.into(),
        }
    }
}

#[async_trait]
impl SchemaReader for Inspector<'_> {
    async fn list_tables(&mut self) -> Result<Vec<String>, DictionaryError> {
        let tables: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT CAST(TABLE_NAME AS CHAR) AS table_name
            FROM information_schema.TABLES
            WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
            ORDER BY TABLE_NAME
            "#,
        )
        .bind(&self.database)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(|e| DictionaryError::from_sqlx(format!("tables of `{}`", self.database), e))?;

        Ok(tables.into_iter().map(|(name,)| name).collect())
    }

    async fn describe_table(
        &mut self,
        table: &str,
    ) -> Result<Vec<ColumnDescriptor>, DictionaryError> {
        let rows = sqlx::query_as::<_, ColumnRow>(
            r#"
            SELECT
                CAST(COLUMN_NAME AS CHAR) AS column_name,
                CAST(COLUMN_TYPE AS CHAR) AS column_type,
                CAST(IS_NULLABLE AS CHAR) AS is_nullable,
                CAST(COLUMN_KEY AS CHAR) AS column_key,
                CAST(COLUMN_COMMENT AS CHAR) AS column_comment
            FROM information_schema.COLUMNS
            WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
            ORDER BY ORDINAL_POSITION
            "#,
        )
        .bind(&self.database)
        .bind(table)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(|e| DictionaryError::from_sqlx(format!("columns of `{table}`"), e))?;

        // A base table always has at least one column.
        if rows.is_empty() {
            return Err(DictionaryError::missing_table(table));
        }

        Ok(rows.into_iter().map(ColumnDescriptor::from).collect())
    }

    async fn table_constraints(
        &mut self,
        table: &str,
    ) -> Result<Vec<ForeignKeyConstraint>, DictionaryError> {
        let rows = sqlx::query_as::<_, ConstraintRow>(
            r#"
            SELECT
                CAST(CONSTRAINT_NAME AS CHAR) AS constraint_name,
                CAST(COLUMN_NAME AS CHAR) AS column_name,
                CAST(REFERENCED_TABLE_NAME AS CHAR) AS referenced_table_name,
                CAST(REFERENCED_COLUMN_NAME AS CHAR) AS referenced_column_name
            FROM information_schema.KEY_COLUMN_USAGE
            WHERE TABLE_SCHEMA = ?
              AND TABLE_NAME = ?
              AND CONSTRAINT_NAME <> 'PRIMARY'
              AND REFERENCED_TABLE_NAME IS NOT NULL
            ORDER BY CONSTRAINT_NAME, ORDINAL_POSITION
            "#,
        )
        .bind(&self.database)
        .bind(table)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(|e| DictionaryError::from_sqlx(format!("constraints of `{table}`"), e))?;

        Ok(rows.into_iter().map(ForeignKeyConstraint::from).collect())
    }
}
