//! Repositories: the only code touching the `auto` and `venta` tables.
//!
//! A repository wraps a borrowed connection (`DatabaseConnection` or an open
//! `DatabaseTransaction`) and knows about a single entity. Checks spanning
//! both entities live in the [`Engine`](crate::Engine) operations.

use crate::{EngineError, ResultEngine};

mod autos;
mod ventas;

pub use autos::AutoRepository;
pub use ventas::VentaRepository;

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 1000;
/// Offsets are bound as signed 64 bit integers by the store.
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// Offset/limit window applied to list queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub(crate) skip: u64,
    pub(crate) limit: u64,
}

impl Page {
    /// Build a page, `limit` must be in `1..=MAX_LIMIT` and `skip` at most
    /// `MAX_SKIP`.
    pub fn new(skip: u64, limit: u64) -> ResultEngine<Self> {
        if skip > MAX_SKIP {
            return Err(EngineError::Validation(format!(
                "skip must be at most {MAX_SKIP}"
            )));
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(EngineError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        Ok(Self { skip, limit })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Drop empty or blank filter values.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
