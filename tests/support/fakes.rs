use std::collections::HashMap;

use async_trait::async_trait;
use sql_dictionary::{ColumnDescriptor, DictionaryError, ForeignKeyConstraint, SchemaReader};

#[derive(Default)]
pub struct FakeSchemaReader {
    tables: Vec<String>,
    columns: HashMap<String, Vec<ColumnDescriptor>>,
    constraints: HashMap<String, Vec<ForeignKeyConstraint>>,
    failing_table: Option<String>,
    connection_lost: bool,
    queries: Vec<String>,
}

impl FakeSchemaReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(
        mut self,
        name: &str,
        columns: Vec<ColumnDescriptor>,
        constraints: Vec<ForeignKeyConstraint>,
    ) -> Self {
        self.tables.push(name.to_string());
        self.columns.insert(name.to_string(), columns);
        self.constraints.insert(name.to_string(), constraints);
        self
    }

    pub fn fail_describing(mut self, table: &str) -> Self {
        self.failing_table = Some(table.to_string());
        self
    }

    pub fn lose_connection(mut self) -> Self {
        self.connection_lost = true;
        self
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }
}

#[async_trait]
impl SchemaReader for FakeSchemaReader {
    async fn list_tables(&mut self) -> Result<Vec<String>, DictionaryError> {
        self.queries.push("tables".to_string());
        if self.connection_lost {
            let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "server gone away");
            return Err(DictionaryError::from_sqlx("tables", sqlx::Error::Io(io)));
        }
        Ok(self.tables.clone())
    }

    async fn describe_table(
        &mut self,
        table: &str,
    ) -> Result<Vec<ColumnDescriptor>, DictionaryError> {
        self.queries.push(format!("describe {table}"));
        if self.failing_table.as_deref() == Some(table) {
            return Err(DictionaryError::from_sqlx(
                format!("columns of `{table}`"),
                sqlx::Error::Protocol("malformed column packet".to_string()),
            ));
        }
        self.columns
            .get(table)
            .cloned()
            .ok_or_else(|| DictionaryError::missing_table(table))
    }

    async fn table_constraints(
        &mut self,
        table: &str,
    ) -> Result<Vec<ForeignKeyConstraint>, DictionaryError> {
        self.queries.push(format!("constraints {table}"));
        Ok(self.constraints.get(table).cloned().unwrap_or_default())
    }
}
