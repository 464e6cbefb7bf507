//! Unit catalogs: lookups between names and units, used by the
//! expression parser and formatter.

mod base;
mod default_catalog;
mod prefix;
mod table;

pub use base::{UnitCatalog, NullaryCatalog};
pub use default_catalog::{default_catalog, default_units_table, default_quantities};
pub use prefix::PrefixCatalog;
pub use table::TableCatalog;
