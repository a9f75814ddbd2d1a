use thiserror::Error;

/// Failures raised while reading metadata or converting the rendered output.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("introspection query failed for {target}: {source}")]
    Query {
        target: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("markdown to html conversion failed: {0}")]
    Conversion(String),
}

impl DictionaryError {
    /// Sorts a driver error into a connection or query failure.
    ///
    /// Transport-level problems mean the handle itself is unusable; anything
    /// else is blamed on the statement issued for `target`.
    pub fn from_sqlx(target: impl Into<String>, err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolClosed
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::WorkerCrashed => Self::Connection(err),
            other => Self::Query {
                target: target.into(),
                source: other,
            },
        }
    }

    pub fn missing_table(table: &str) -> Self {
        Self::Query {
            target: format!("table `{table}`"),
            source: sqlx::Error::RowNotFound,
        }
    }
}
