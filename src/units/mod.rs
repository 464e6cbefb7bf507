//! Subsystem for building units of measure, converting between them
//! and reading and writing them as text.

pub mod catalog;
pub mod conversion;
pub mod converter;
pub mod dimension;
pub mod format;
pub mod power;
pub mod prefix;
pub mod product;
pub mod quantity;
pub mod rational;
pub mod si;
pub mod simplifier;
pub mod unit;

#[cfg(test)]
pub(crate) mod test_utils;

pub use converter::{Converter, ConverterError};
pub use dimension::{Dimension, BaseDimension};
pub use format::{UnitFormat, FormatOptions, ParseError, ParseErrorKind, ValidationError};
pub use power::RationalPower;
pub use product::ProductUnit;
pub use quantity::{Quantity, QuantityCatalog, QuantityLookupError, quantity_of};
pub use rational::{ExactRational, DivideByZeroError};
pub use unit::{Unit, UnitError, BaseUnit, AlternateUnit, AlternateName, TransformedUnit};
