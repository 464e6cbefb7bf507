use super::rational::ExactRational;
use crate::util::zip_with;

use num::One;
use num::pow::Pow;

use std::ops::{Mul, Div};
use std::fmt::{self, Formatter, Display};

/// A dimension is a formal product and quotient of zero or more
/// [`BaseDimension`] values, raised to rational powers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Dimension {
  dims: [ExactRational; NDIMS],
}

/// The seven SI base dimensions. Every base unit measures a product
/// of these (usually exactly one of them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseDimension {
  Length,
  Mass,
  Time,
  Current,
  Temperature,
  AmountOfSubstance,
  LuminousIntensity,
}

pub const NDIMS: usize = 7;

impl Dimension {
  pub fn singleton(base: BaseDimension) -> Self {
    let mut dimension = Dimension::one();
    dimension.dims[base.dimension_index()] = ExactRational::one();
    dimension
  }

  pub fn get(&self, base: BaseDimension) -> &ExactRational {
    &self.dims[base.dimension_index()]
  }

  /// A simple dimension is exactly one base dimension to the first
  /// power.
  pub fn is_simple(&self) -> bool {
    let mut nonzero = self.dims.iter().filter(|x| !x.is_zero());
    matches!((nonzero.next(), nonzero.next()), (Some(x), None) if x.is_one())
  }

  pub fn components(&self) -> impl Iterator<Item = (BaseDimension, &ExactRational)> + '_ {
    BaseDimension::ALL.iter()
      .copied()
      .zip(self.dims.iter())
      .filter(|(_, x)| !x.is_zero())
  }

  pub fn recip(&self) -> Self {
    Dimension {
      dims: self.dims.clone().map(|x| x.negate()),
    }
  }
}

impl BaseDimension {
  pub const ALL: [BaseDimension; NDIMS] = [
    BaseDimension::Length,
    BaseDimension::Mass,
    BaseDimension::Time,
    BaseDimension::Current,
    BaseDimension::Temperature,
    BaseDimension::AmountOfSubstance,
    BaseDimension::LuminousIntensity,
  ];

  fn dimension_index(self) -> usize {
    match self {
      BaseDimension::Length => 0,
      BaseDimension::Mass => 1,
      BaseDimension::Time => 2,
      BaseDimension::Current => 3,
      BaseDimension::Temperature => 4,
      BaseDimension::AmountOfSubstance => 5,
      BaseDimension::LuminousIntensity => 6,
    }
  }
}

impl From<BaseDimension> for Dimension {
  fn from(base: BaseDimension) -> Self {
    Dimension::singleton(base)
  }
}

impl Pow<&ExactRational> for &Dimension {
  type Output = Dimension;

  fn pow(self, power: &ExactRational) -> Dimension {
    Dimension {
      dims: self.dims.clone().map(|x| x.times(power)),
    }
  }
}

impl Pow<i64> for &Dimension {
  type Output = Dimension;

  fn pow(self, power: i64) -> Dimension {
    self.pow(&ExactRational::integer(power))
  }
}

impl Pow<i64> for BaseDimension {
  type Output = Dimension;

  fn pow(self, power: i64) -> Dimension {
    (&Dimension::singleton(self)).pow(power)
  }
}

impl Mul for Dimension {
  type Output = Self;

  fn mul(self, rhs: Self) -> Self {
    Dimension {
      dims: zip_with(self.dims, rhs.dims, |a, b| a.add(&b)),
    }
  }
}

impl Mul<BaseDimension> for Dimension {
  type Output = Self;

  fn mul(self, rhs: BaseDimension) -> Self {
    self * Dimension::singleton(rhs)
  }
}

impl Div for Dimension {
  type Output = Self;

  fn div(self, rhs: Self) -> Self {
    Dimension {
      dims: zip_with(self.dims, rhs.dims, |a, b| a.add(&b.negate())),
    }
  }
}

impl Div<BaseDimension> for Dimension {
  type Output = Self;

  fn div(self, rhs: BaseDimension) -> Self {
    self / Dimension::singleton(rhs)
  }
}

impl Mul for BaseDimension {
  type Output = Dimension;

  fn mul(self, rhs: Self) -> Dimension {
    Dimension::singleton(self) * Dimension::singleton(rhs)
  }
}

impl Mul<Dimension> for BaseDimension {
  type Output = Dimension;

  fn mul(self, rhs: Dimension) -> Dimension {
    Dimension::singleton(self) * rhs
  }
}

impl Div for BaseDimension {
  type Output = Dimension;

  fn div(self, rhs: Self) -> Dimension {
    Dimension::singleton(self) / Dimension::singleton(rhs)
  }
}

impl Div<Dimension> for BaseDimension {
  type Output = Dimension;

  fn div(self, rhs: Dimension) -> Dimension {
    Dimension::singleton(self) / rhs
  }
}

impl One for Dimension {
  fn one() -> Self {
    Dimension::default()
  }

  fn is_one(&self) -> bool {
    self.dims.iter().all(|x| x.is_zero())
  }
}

impl Display for BaseDimension {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      BaseDimension::Length => write!(f, "length"),
      BaseDimension::Mass => write!(f, "mass"),
      BaseDimension::Time => write!(f, "time"),
      BaseDimension::Current => write!(f, "current"),
      BaseDimension::Temperature => write!(f, "temperature"),
      BaseDimension::AmountOfSubstance => write!(f, "amount"),
      BaseDimension::LuminousIntensity => write!(f, "intensity"),
    }
  }
}

impl Display for Dimension {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let mut numerator: Vec<String> = Vec::new();
    let mut denominator: Vec<String> = Vec::new();
    for (dim, power) in self.components() {
      let magnitude = power.abs();
      let term = if magnitude.is_one() {
        dim.to_string()
      } else if magnitude.is_integer() {
        format!("{}^{}", dim, magnitude)
      } else {
        format!("{}^({})", dim, magnitude)
      };
      if power.is_positive() {
        numerator.push(term);
      } else {
        denominator.push(term);
      }
    }
    if numerator.is_empty() {
      write!(f, "1")?;
    } else {
      write!(f, "{}", numerator.join(" "))?;
    }
    if !denominator.is_empty() {
      write!(f, " / {}", denominator.join(" "))?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn dims(values: [i64; NDIMS]) -> Dimension {
    Dimension { dims: values.map(ExactRational::integer) }
  }

  #[test]
  fn test_singleton() {
    let value = Dimension::singleton(BaseDimension::Time);
    assert_eq!(value, dims([0, 0, 1, 0, 0, 0, 0]));
  }

  #[test]
  fn test_pow() {
    let value = (&dims([1, 2, 3, 4, 5, 6, 7])).pow(2);
    assert_eq!(value, dims([2, 4, 6, 8, 10, 12, 14]));
    let value = (&dims([1, -1, 2, 2, -3, 3, 10])).pow(-2);
    assert_eq!(value, dims([-2, 2, -4, -4, 6, -6, -20]));
    let value = (&dims([1, -1, 2, 2, -3, 3, 10])).pow(0);
    assert_eq!(value, Dimension::one());
  }

  #[test]
  fn test_rational_pow() {
    let value = (&dims([2, 0, -1, 0, 0, 0, 0])).pow(&ExactRational::new(1, 2));
    assert_eq!(value.get(BaseDimension::Length), &ExactRational::one());
    assert_eq!(value.get(BaseDimension::Time), &ExactRational::new(-1, 2));
  }

  #[test]
  fn test_get() {
    let value = dims([1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(value.get(BaseDimension::LuminousIntensity), &ExactRational::integer(7));
    assert_eq!(value.get(BaseDimension::Mass), &ExactRational::integer(2));
  }

  #[test]
  fn test_mul() {
    let a = dims([1, 2, 3, 4, 5, 6, 7]);
    let b = dims([-1, 2, 2, 2, 10, 10, 10]);
    assert_eq!(a * b, dims([0, 4, 5, 6, 15, 16, 17]));
  }

  #[test]
  fn test_div() {
    let a = dims([1, 2, 3, 4, 5, 6, 7]);
    let b = dims([-1, 2, 2, 2, 10, 10, 10]);
    assert_eq!(a / b, dims([2, 0, 1, 2, -5, -4, -3]));
  }

  #[test]
  fn test_base_dimension_arithmetic() {
    use BaseDimension::*;
    assert_eq!(Length / Time, dims([1, 0, -1, 0, 0, 0, 0]));
    assert_eq!(Mass * Length / Time.pow(2), dims([1, 1, -2, 0, 0, 0, 0]));
    assert_eq!(Length.pow(3).recip(), dims([-3, 0, 0, 0, 0, 0, 0]));
  }

  #[test]
  fn test_display_on_singleton() {
    assert_eq!(dims([0, 1, 0, 0, 0, 0, 0]).to_string(), "mass");
  }

  #[test]
  fn test_display_on_power() {
    assert_eq!(dims([0, 3, 0, 0, 0, 0, 0]).to_string(), "mass^3");
    assert_eq!(dims([0, 0, 0, 0, -3, 0, 0]).to_string(), "1 / temperature^3");
    assert_eq!(dims([0, 0, 0, 0, -1, 0, 0]).to_string(), "1 / temperature");
    let root = (&Dimension::singleton(BaseDimension::Length)).pow(&ExactRational::new(1, 2));
    assert_eq!(root.to_string(), "length^(1/2)");
  }

  #[test]
  fn test_display_on_one() {
    assert_eq!(Dimension::one().to_string(), "1");
  }

  #[test]
  fn test_display_on_composite() {
    let dim = dims([0, 1, 3, 0, -1, 1, -2]);
    assert_eq!(dim.to_string(), "mass time^3 amount / temperature intensity^2");
  }

  #[test]
  fn test_is_simple() {
    assert!(dims([0, 0, 1, 0, 0, 0, 0]).is_simple());
    assert!(dims([0, 0, 0, 0, 0, 1, 0]).is_simple());
    assert!(!dims([0, 0, 0, 0, 0, 0, 0]).is_simple());
    assert!(!dims([0, 0, 0, -1, 0, 0, 0]).is_simple());
    assert!(!dims([0, 0, 0, 1, 0, 0, 1]).is_simple());
    assert!(!dims([0, 0, 0, 2, 0, 0, 0]).is_simple());
  }
}
