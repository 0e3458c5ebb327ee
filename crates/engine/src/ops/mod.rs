use sea_orm::DatabaseConnection;

use crate::{Auto, EngineError, ResultEngine, repo::AutoRepository};

mod autos;
mod ventas;

pub use ventas::VentaListFilter;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
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

/// Entry point of every inventory and sales operation.
///
/// The engine owns the store handle and opens one transaction per
/// operation. Checks involving both cars and sales (chassis uniqueness,
/// sale to car references, composite reads) happen here, on top of the
/// single-entity repositories.
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

async fn require_auto<C: sea_orm::ConnectionTrait>(db: &C, auto_id: i32) -> ResultEngine<Auto> {
    AutoRepository::new(db)
        .get_by_id(auto_id)
        .await?
        .ok_or_else(|| auto_not_found(auto_id))
}

fn auto_not_found(auto_id: i32) -> EngineError {
    EngineError::KeyNotFound(format!("auto {auto_id}"))
}

fn venta_not_found(venta_id: i32) -> EngineError {
    EngineError::KeyNotFound(format!("venta {venta_id}"))
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
