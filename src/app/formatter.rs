use crate::app::models::{AllowedValues, Dictionary, DictionaryRow, DictionaryTable};
use std::fmt::Write;

pub const TABLE_HEADERS: [&str; 9] = [
    "Name",
    "Type",
    "Nullable",
    "Primary Key",
    "Foreign Key",
    "Foreign Table",
    "Foreign Column",
    "Allowed",
    "Comment",
];

pub const TABLE_PLACEHOLDER: &str = "Descriptions of table goes here";
pub const NOT_APPLICABLE: &str = "n/a";

pub struct OutputGenerator;

impl OutputGenerator {
    /// Renders the whole dictionary. Blocks are separated by a blank line.
    pub fn generate_markdown(
        db_name: &str,
        dictionary: &Dictionary,
    ) -> Result<String, std::fmt::Error> {
        let mut blocks = Vec::with_capacity(dictionary.tables.len() + 1);
        blocks.push(Self::preamble(db_name, dictionary.table_count())?);

        for table in &dictionary.tables {
            blocks.push(Self::table_block(table)?);
        }

        let mut output = blocks.join("\n\n");
        output.push('\n');
        Ok(output)
    }

    fn preamble(db_name: &str, table_count: usize) -> Result<String, std::fmt::Error> {
        let mut output = String::new();

        writeln!(output, "### TABLES DESCRIPTIONS")?;
        write!(
            output,
            "The database {db_name}, contains {table_count} tables that are described below. \
             For each table is presented their name, their description, and a table describing \
             each field. In the cases when the field has a custom data type, the possible \
             options will show at the column Allowed."
        )?;

        Ok(output)
    }

    fn table_block(table: &DictionaryTable) -> Result<String, std::fmt::Error> {
        let mut output = String::new();

        writeln!(output, "### {} ({})", heading(&table.name), table.name)?;
        writeln!(output, "{TABLE_PLACEHOLDER}")?;
        writeln!(output)?;

        writeln!(output, "|{}|", TABLE_HEADERS.join("|"))?;
        let separator: Vec<String> = TABLE_HEADERS
            .iter()
            .map(|header| "-".repeat(header.len()))
            .collect();
        write!(output, "|{}|", separator.join("|"))?;

        for row in &table.rows {
            write!(output, "\n|{}|", row_cells(row).join("|"))?;
        }

        Ok(output)
    }
}

/// `order_items` becomes `ORDER ITEMS`.
pub fn heading(table_name: &str) -> String {
    table_name.to_uppercase().replace('_', " ")
}

pub fn row_cells(row: &DictionaryRow) -> [String; 9] {
    [
        cell(&row.name),
        cell(&row.column_type),
        yes_no(row.nullable),
        yes_no(row.is_primary_key),
        yes_no(row.is_foreign_key),
        cell(row.foreign_table.as_deref().unwrap_or_default()),
        cell(row.foreign_column.as_deref().unwrap_or_default()),
        match &row.allowed_values {
            AllowedValues::Values(values) => cell(&values.join(",")),
            AllowedValues::NotApplicable => NOT_APPLICABLE.to_string(),
        },
        cell(&row.comment),
    ]
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "Yes" } else { "No" };
    text.to_string()
}

// Keeps a value on one line and inside its column.
fn cell(value: &str) -> String {
    value
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}
