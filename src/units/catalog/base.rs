use crate::units::unit::Unit;

/// A read-only source of named units. A unit catalog only knows
/// about individual named units (including prefixed ones), not about
/// composite unit expressions.
pub trait UnitCatalog {
  /// The unit with the given name, if any.
  fn unit_for(&self, name: &str) -> Option<Unit>;

  /// The preferred name of the given unit, if any. For any name
  /// returned, `unit_for` must resolve that name back to `unit`.
  fn name_for(&self, unit: &Unit) -> Option<String>;
}

/// Nullary unit catalog. Knows no units.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullaryCatalog;

impl UnitCatalog for NullaryCatalog {
  fn unit_for(&self, _name: &str) -> Option<Unit> {
    None
  }

  fn name_for(&self, _unit: &Unit) -> Option<String> {
    None
  }
}

impl<'a, C> UnitCatalog for &'a C
where C: UnitCatalog + ?Sized {
  fn unit_for(&self, name: &str) -> Option<Unit> {
    (**self).unit_for(name)
  }

  fn name_for(&self, unit: &Unit) -> Option<String> {
    (**self).name_for(unit)
  }
}

impl<C> UnitCatalog for Box<C>
where C: UnitCatalog + ?Sized {
  fn unit_for(&self, name: &str) -> Option<Unit> {
    (**self).unit_for(name)
  }

  fn name_for(&self, unit: &Unit) -> Option<String> {
    (**self).name_for(unit)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::si::metre;

  #[test]
  fn test_nullary_catalog() {
    assert_eq!(NullaryCatalog.unit_for("m"), None);
    assert_eq!(NullaryCatalog.name_for(&metre()), None);
  }

  #[test]
  fn test_boxed_dyn_catalog() {
    let catalog: Box<dyn UnitCatalog> = Box::new(NullaryCatalog);
    assert_eq!(catalog.unit_for(""), None);
    assert_eq!((&catalog).name_for(&Unit::one()), None);
  }
}
