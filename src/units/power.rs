use super::dimension::Dimension;
use super::rational::ExactRational;
use super::unit::Unit;
use crate::util::stricteq::StrictEq;

use num::pow::Pow;

use std::fmt::{self, Formatter, Display};

/// A unit raised to a rational power. This is the element type of a
/// product unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RationalPower {
  pub base: Unit,
  pub exponent: ExactRational,
}

impl RationalPower {
  pub fn new(base: Unit, exponent: impl Into<ExactRational>) -> Self {
    Self { base, exponent: exponent.into() }
  }

  /// The base to the first power.
  pub fn unit(base: Unit) -> Self {
    Self::new(base, ExactRational::one())
  }

  pub fn dimension(&self) -> Dimension {
    (&self.base.dimension()).pow(&self.exponent)
  }

  pub fn recip(&self) -> Self {
    Self { base: self.base.clone(), exponent: self.exponent.negate() }
  }

  /// Multiplies the exponent by `power`.
  pub fn raised(&self, power: &ExactRational) -> Self {
    Self { base: self.base.clone(), exponent: self.exponent.times(power) }
  }
}

impl StrictEq for RationalPower {
  fn strict_eq(&self, other: &Self) -> bool {
    self.exponent == other.exponent && self.base.strict_eq(&other.base)
  }
}

impl Display for RationalPower {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if self.exponent.is_one() {
      write!(f, "{}", self.base)
    } else if self.exponent.is_integer() {
      write!(f, "({})^{}", self.base, self.exponent)
    } else {
      write!(f, "({})^({})", self.base, self.exponent)
    }
  }
}
