//! Resolving a unit to the physical quantity it measures.

use super::simplifier::deep_simplify;
use super::unit::Unit;

use itertools::Itertools;
use thiserror::Error;

/// A physical quantity (length, energy, ...) and its canonical SI
/// unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
  pub name: String,
  pub unit: Unit,
}

/// A read-only registry of known quantities.
pub trait QuantityCatalog {
  fn quantities(&self) -> &[Quantity];

  fn quantity_named(&self, name: &str) -> Option<&Quantity> {
    self.quantities().iter().find(|q| q.name == name)
  }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuantityLookupError {
  #[error("No known quantity is measured in '{unit}'")]
  NotFound { unit: String },
  #[error("Unit '{unit}' could measure any of: {}", .candidates.join(", "))]
  Ambiguous { unit: String, candidates: Vec<String> },
}

impl Quantity {
  pub fn new(name: impl Into<String>, unit: Unit) -> Self {
    Self { name: name.into(), unit }
  }
}

impl QuantityCatalog for [Quantity] {
  fn quantities(&self) -> &[Quantity] {
    self
  }
}

impl QuantityCatalog for Vec<Quantity> {
  fn quantities(&self) -> &[Quantity] {
    self
  }
}

impl<'a, C: QuantityCatalog + ?Sized> QuantityCatalog for &'a C {
  fn quantities(&self) -> &[Quantity] {
    (**self).quantities()
  }
}

/// Finds the quantity in `catalog` which `unit` measures.
///
/// A quantity wrapper resolves to the quantity it names, if the
/// catalog knows it. Any other unit is first reduced to its standard
/// unit and matched exactly against the catalog's canonical units.
/// Failing a unique exact match, units are compared by their
/// expansion into base units; this is where distinct quantities of
/// the same dimension (energy and torque) collide, which is reported
/// as an ambiguity rather than resolved arbitrarily.
#[tracing::instrument(level = "trace", skip_all, fields(unit = %unit))]
pub fn quantity_of<'a, C>(unit: &Unit, catalog: &'a C) -> Result<&'a Quantity, QuantityLookupError>
where C: QuantityCatalog + ?Sized {
  if let Some(tag) = unit.quantity_tag() {
    if let Some(quantity) = catalog.quantity_named(tag) {
      return Ok(quantity);
    }
  }

  let standard = unit.standard_unit();
  if &standard != unit {
    return quantity_of(&standard, catalog);
  }

  if unit.is_one() {
    return catalog.quantities().iter()
      .find(|q| q.unit.is_one())
      .ok_or_else(|| QuantityLookupError::NotFound { unit: unit.to_string() });
  }

  let exact_matches: Vec<&Quantity> = catalog.quantities().iter()
    .filter(|q| q.unit.standard_unit() == standard || deep_simplify(&q.unit) == standard)
    .collect();
  if let [quantity] = exact_matches.as_slice() {
    return Ok(*quantity);
  }

  let base_units = standard.base_units();
  tracing::debug!(
    exact_matches = exact_matches.len(),
    base_units = %base_units,
    "falling back to base unit comparison"
  );
  let base_matches: Vec<&Quantity> = catalog.quantities().iter()
    .filter(|q| q.unit.base_units() == base_units)
    .collect();
  match base_matches.as_slice() {
    [] => Err(QuantityLookupError::NotFound { unit: unit.to_string() }),
    [quantity] => Ok(*quantity),
    candidates => Err(QuantityLookupError::Ambiguous {
      unit: unit.to_string(),
      candidates: candidates.iter().map(|q| q.name.clone()).sorted().collect(),
    }),
  }
}

impl Unit {
  pub fn quantity_in<'a, C>(&self, catalog: &'a C) -> Result<&'a Quantity, QuantityLookupError>
  where C: QuantityCatalog + ?Sized {
    quantity_of(self, catalog)
  }
}
