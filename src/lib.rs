pub mod app;

// Re-export useful types for library users
pub use app::builder::{DictionaryBuilder, build_rows};
pub use app::config::AppConfig;
pub use app::error::DictionaryError;
pub use app::formatter::OutputGenerator;
pub use app::html::{HtmlExporter, TableStyle};
pub use app::inspector::{Inspector, SchemaReader};
pub use app::models::{
    AllowedValues, ColumnDescriptor, Dictionary, DictionaryRow, DictionaryTable,
    ForeignKeyConstraint, KeyKind, TableSchema,
};
pub use app::{collect_dictionary, generate_report, publish};
