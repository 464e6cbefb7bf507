//! Reading and writing units as text, with a registry of explicit
//! labels and aliases layered over a [`UnitCatalog`].

mod options;
pub(crate) mod output;
mod parser;

pub use options::FormatOptions;
pub use parser::{parse_unit, is_identifier, ParseError, ParseErrorKind, STRUCTURAL_CHARS};

use output::Renderer;
use super::catalog::{default_catalog, PrefixCatalog, TableCatalog, UnitCatalog};
use super::unit::Unit;

use thiserror::Error;

use std::collections::HashMap;

/// Parser and formatter for unit expressions.
///
/// Names are resolved against explicit labels and aliases first, and
/// then against the catalog. When formatting, a unit's label wins
/// over its catalog name, and units with neither are written out
/// structurally.
///
/// Labels and aliases should be registered up front. The registry
/// takes `&mut self`, so it cannot change while a `parse` or `format`
/// call holds a shared reference.
#[derive(Debug, Clone)]
pub struct UnitFormat<C> {
  catalog: C,
  labels: HashMap<Unit, String>,
  units: HashMap<String, Unit>,
  options: FormatOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("'{0}' is not a valid unit name")]
  InvalidName(String),
  #[error("Unit name '{name}' contains the reserved character '{reserved}'")]
  ReservedName { name: String, reserved: char },
}

impl<C: UnitCatalog> UnitFormat<C> {
  pub fn new(catalog: C) -> Self {
    Self {
      catalog,
      labels: HashMap::new(),
      units: HashMap::new(),
      options: FormatOptions::default(),
    }
  }

  pub fn with_options(mut self, options: FormatOptions) -> Self {
    self.options = options;
    self
  }

  pub fn options(&self) -> &FormatOptions {
    &self.options
  }

  pub fn catalog(&self) -> &C {
    &self.catalog
  }

  /// Makes `name` the name of `unit`, both for parsing and for
  /// formatting. Any previous label of `unit` is dropped, as is any
  /// other unit's claim on `name`.
  pub fn label(&mut self, unit: Unit, name: impl Into<String>) -> Result<(), ValidationError> {
    let name = name.into();
    validate_name(&name)?;
    if let Some(old_name) = self.labels.remove(&unit) {
      tracing::debug!(unit = %unit, old_name = %old_name, new_name = %name, "Replacing unit label");
      self.units.remove(&old_name);
    }
    self.release_name(&name);
    tracing::debug!(unit = %unit, name = %name, "Registering unit label");
    self.units.insert(name.clone(), unit.clone());
    self.labels.insert(unit, name);
    Ok(())
  }

  /// Makes `name` parse as `unit`, without changing how `unit` is
  /// formatted.
  pub fn alias(&mut self, unit: Unit, name: impl Into<String>) -> Result<(), ValidationError> {
    let name = name.into();
    validate_name(&name)?;
    self.release_name(&name);
    tracing::debug!(unit = %unit, name = %name, "Registering unit alias");
    self.units.insert(name, unit);
    Ok(())
  }

  /// Removes `name` from the registry, along with the label it
  /// provides, if any.
  fn release_name(&mut self, name: &str) {
    if let Some(previous) = self.units.remove(name) {
      if self.labels.get(&previous).is_some_and(|label| label == name) {
        tracing::debug!(unit = %previous, name = %name, "Unit loses its label");
        self.labels.remove(&previous);
      }
    }
  }

  pub fn unit_for(&self, name: &str) -> Option<Unit> {
    self.units.get(name).cloned().or_else(|| self.catalog.unit_for(name))
  }

  pub fn name_for(&self, unit: &Unit) -> Option<String> {
    self.labels.get(unit).cloned().or_else(|| self.catalog.name_for(unit))
  }

  fn display_name(&self, unit: &Unit) -> Option<String> {
    self.labels.get(unit).cloned().or_else(|| {
      if self.options.use_catalog_names {
        self.catalog.name_for(unit)
      } else {
        None
      }
    })
  }

  pub fn parse(&self, text: &str) -> Result<Unit, ParseError> {
    parse_unit(text, &|name| self.unit_for(name))
  }

  pub fn format(&self, unit: &Unit) -> String {
    let names = |unit: &Unit| self.display_name(unit);
    Renderer::new(&names, &self.options).render(unit)
  }
}

impl Default for UnitFormat<PrefixCatalog<TableCatalog>> {
  fn default() -> Self {
    Self::new(default_catalog())
  }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
  if let Some(reserved) = name.chars().find(|c| STRUCTURAL_CHARS.contains(*c)) {
    return Err(ValidationError::ReservedName { name: name.to_owned(), reserved });
  }
  if !is_identifier(name) {
    return Err(ValidationError::InvalidName(name.to_owned()));
  }
  Ok(())
}
