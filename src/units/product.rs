use super::dimension::Dimension;
use super::power::RationalPower;
use crate::util::stricteq::StrictEq;

use num::One;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A product of rational powers of units.
///
/// Product units are only ever built by the normalizer in
/// [`simplifier`](super::simplifier), so the following always hold:
/// no element's base is itself a product, each base appears at most
/// once, and no exponent is zero. The empty product is the
/// dimensionless unit "one".
///
/// Elements keep the order in which their bases were first
/// encountered, which the formatter uses. Equality and hashing ignore
/// that order.
#[derive(Debug, Clone, Default)]
pub struct ProductUnit {
  elements: Vec<RationalPower>,
}

impl ProductUnit {
  pub(super) fn from_normalized(elements: Vec<RationalPower>) -> Self {
    Self { elements }
  }

  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }

  pub fn len(&self) -> usize {
    self.elements.len()
  }

  pub fn elements(&self) -> &[RationalPower] {
    &self.elements
  }

  pub fn iter(&self) -> impl Iterator<Item = &RationalPower> {
    self.elements.iter()
  }

  pub fn dimension(&self) -> Dimension {
    self.elements.iter()
      .map(RationalPower::dimension)
      .fold(Dimension::one(), |acc, dim| acc * dim)
  }
}

impl PartialEq for ProductUnit {
  fn eq(&self, other: &Self) -> bool {
    // Bases are unique within a normalized product, so a one-way
    // containment check plus equal lengths is enough.
    self.elements.len() == other.elements.len() &&
      self.elements.iter().all(|elem| other.elements.contains(elem))
  }
}

impl Eq for ProductUnit {}

impl Hash for ProductUnit {
  fn hash<H: Hasher>(&self, state: &mut H) {
    let combined = self.elements.iter()
      .map(|elem| {
        let mut hasher = DefaultHasher::new();
        elem.hash(&mut hasher);
        hasher.finish()
      })
      .fold(0u64, u64::wrapping_add);
    self.elements.len().hash(state);
    combined.hash(state);
  }
}

impl StrictEq for ProductUnit {
  fn strict_eq(&self, other: &Self) -> bool {
    self.elements.strict_eq(&other.elements)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::dimension::BaseDimension;
  use crate::units::si::{metre, second, kilogram};

  use num::pow::Pow;

  fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
  }

  #[test]
  fn test_equality_ignores_order() {
    let a = ProductUnit::from_normalized(vec![
      RationalPower::new(metre(), 1),
      RationalPower::new(second(), -2),
    ]);
    let b = ProductUnit::from_normalized(vec![
      RationalPower::new(second(), -2),
      RationalPower::new(metre(), 1),
    ]);
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert!(!a.strict_eq(&b));
  }

  #[test]
  fn test_inequality() {
    let a = ProductUnit::from_normalized(vec![
      RationalPower::new(metre(), 1),
      RationalPower::new(second(), -2),
    ]);
    let b = ProductUnit::from_normalized(vec![
      RationalPower::new(metre(), 1),
      RationalPower::new(second(), -1),
    ]);
    let c = ProductUnit::from_normalized(vec![
      RationalPower::new(metre(), 1),
    ]);
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_ne!(c, a);
  }

  #[test]
  fn test_dimension() {
    let unit = ProductUnit::from_normalized(vec![
      RationalPower::new(kilogram(), 1),
      RationalPower::new(metre(), 2),
      RationalPower::new(second(), -2),
    ]);
    assert_eq!(
      unit.dimension(),
      BaseDimension::Mass * BaseDimension::Length.pow(2) / BaseDimension::Time.pow(2),
    );
    assert_eq!(ProductUnit::default().dimension(), Dimension::one());
  }
}
