use super::base::UnitCatalog;
use crate::units::unit::Unit;

use std::collections::HashMap;

/// A [`UnitCatalog`] which looks up names in a pre-determined hash
/// table.
///
/// Each unit has one preferred name, which is the first name it was
/// inserted under. Aliases resolve to a unit but are never produced
/// by [`UnitCatalog::name_for`].
#[derive(Debug, Clone, Default)]
pub struct TableCatalog {
  units: HashMap<String, Unit>,
  names: HashMap<Unit, String>,
}

impl TableCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a named unit. If the unit already has a preferred name,
  /// `name` becomes an alias.
  pub fn insert(&mut self, name: impl Into<String>, unit: Unit) {
    let name = name.into();
    self.names.entry(unit.clone()).or_insert_with(|| name.clone());
    self.units.insert(name, unit);
  }

  /// Adds an alternative spelling for a unit.
  pub fn alias(&mut self, name: impl Into<String>, unit: Unit) {
    self.units.insert(name.into(), unit);
  }

  pub fn len(&self) -> usize {
    self.units.len()
  }

  pub fn is_empty(&self) -> bool {
    self.units.is_empty()
  }

  /// All names known to this table, including aliases, with their
  /// units.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Unit)> {
    self.units.iter().map(|(name, unit)| (name.as_str(), unit))
  }
}

impl UnitCatalog for TableCatalog {
  fn unit_for(&self, name: &str) -> Option<Unit> {
    self.units.get(name).cloned()
  }

  fn name_for(&self, unit: &Unit) -> Option<String> {
    self.names.get(unit).cloned()
  }
}

impl<S: Into<String>> FromIterator<(S, Unit)> for TableCatalog {
  fn from_iter<I: IntoIterator<Item = (S, Unit)>>(iter: I) -> Self {
    let mut table = TableCatalog::new();
    for (name, unit) in iter {
      table.insert(name, unit);
    }
    table
  }
}
