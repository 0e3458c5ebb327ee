//! Car inventory and sales engine.
//!
//! The crate is layered bottom-up:
//!
//! - [`validation`]: field rules shared by every write.
//! - [`Auto`] / [`Venta`] with their create and update shapes, backed by the
//!   `auto` and `venta` tables.
//! - [`repo`]: one repository per table, the only code issuing queries.
//! - [`Engine`]: one transaction per operation, plus the checks that involve
//!   both cars and sales.

pub use autos::{Auto, AutoNew, AutoUpdate, AutoWithVentas};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder, VentaListFilter};
pub use repo::Page;
pub use ventas::{Venta, VentaNew, VentaUpdate, VentaWithAuto};

mod autos;
mod error;
mod ops;
pub mod repo;
pub mod validation;
mod ventas;

pub type ResultEngine<T> = Result<T, EngineError>;
