use sea_orm::DatabaseConnection;

use crate::ResultEngine;

mod records;
mod reports;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
///
/// The transaction is dropped, and therefore rolled back, on every early return
/// out of the body.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Outcome of a predicate-scoped bulk mutation.
///
/// Matching nothing is a normal result, not an error, so callers can tell
/// "nothing matched" apart from "something broke".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affected {
    NotFound,
    Rows(u64),
}

impl Affected {
    /// Number of records the mutation applied to (0 for `NotFound`).
    pub fn count(self) -> u64 {
        match self {
            Self::NotFound => 0,
            Self::Rows(count) => count,
        }
    }
}

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
