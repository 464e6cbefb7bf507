//! Numeric transforms between a unit and its parent, together with
//! their composition algebra.

use super::rational::ExactRational;
use crate::util::stricteq::StrictEq;

use either::Either;
use num::traits::ToPrimitive;
use thiserror::Error;

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A numeric transform from values in one unit to values in another.
///
/// Converters are immutable. Build them with the smart constructors
/// ([`Converter::add`], [`Converter::multiply`],
/// [`Converter::rational`], ...), which collapse trivial transforms
/// to [`Converter::Identity`].
///
/// `PartialEq` is operational: two converters are equal if composing
/// one with the inverse of the other yields the identity. This is
/// exact for identity, offset and rational converters, but for
/// floating-point factors it only holds when the product of the
/// factors rounds to exactly `1.0`. Use [`StrictEq`] to compare
/// structure instead.
#[derive(Debug, Clone)]
pub enum Converter {
  Identity,
  /// `x + offset`
  Add(f64),
  /// `x * factor`
  Multiply(f64),
  /// `x * factor`, with an exact factor.
  Rational(ExactRational),
  /// `log_base(x)`
  Log(f64),
  /// `base^x`, the inverse of [`Converter::Log`].
  Exp(f64),
  /// Applies `first`, then `second`.
  Compound(Arc<Converter>, Arc<Converter>),
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConverterError {
  #[error("Converter constant {0} is out of range")]
  OutOfRange(f64),
  #[error("Exponent {0} is out of range")]
  ExponentOutOfRange(i64),
  #[error("Converter is not linear")]
  NonLinear,
}

impl Converter {
  pub fn add(offset: f64) -> Converter {
    if offset == 0.0 {
      Converter::Identity
    } else {
      Converter::Add(offset)
    }
  }

  /// Panics if `factor` is zero, not finite, or has no finite
  /// reciprocal. See [`Converter::try_multiply`] for a fallible
  /// version.
  pub fn multiply(factor: f64) -> Converter {
    Converter::try_multiply(factor)
      .unwrap_or_else(|err| panic!("Invalid scale factor: {err}"))
  }

  pub fn try_multiply(factor: f64) -> Result<Converter, ConverterError> {
    if factor == 0.0 || !factor.is_finite() || !(1.0 / factor).is_finite() {
      Err(ConverterError::OutOfRange(factor))
    } else if factor == 1.0 {
      Ok(Converter::Identity)
    } else {
      Ok(Converter::Multiply(factor))
    }
  }

  fn try_add(offset: f64) -> Result<Converter, ConverterError> {
    if offset.is_finite() {
      Ok(Converter::add(offset))
    } else {
      Err(ConverterError::OutOfRange(offset))
    }
  }

  /// Panics if `factor` is zero.
  pub fn rational(factor: impl Into<ExactRational>) -> Converter {
    let factor = factor.into();
    assert!(!factor.is_zero(), "Scale factor must be nonzero");
    if factor.is_one() {
      Converter::Identity
    } else {
      Converter::Rational(factor)
    }
  }

  pub fn log(base: f64) -> Converter {
    Converter::Log(base)
  }

  pub fn exp(base: f64) -> Converter {
    Converter::Exp(base)
  }

  fn compound(first: Converter, second: Converter) -> Converter {
    Converter::Compound(Arc::new(first), Arc::new(second))
  }

  pub fn is_identity(&self) -> bool {
    matches!(self, Converter::Identity)
  }

  pub fn is_linear(&self) -> bool {
    match self {
      Converter::Identity | Converter::Multiply(_) | Converter::Rational(_) => true,
      Converter::Add(_) | Converter::Log(_) | Converter::Exp(_) => false,
      Converter::Compound(first, second) => first.is_linear() && second.is_linear(),
    }
  }

  /// Returns the converter which first applies `other`, then applies
  /// `self`.
  ///
  /// If merging two floating-point stages would leave the `f64` range,
  /// the stages are kept apart in a [`Converter::Compound`]. Use
  /// [`Converter::try_concatenate`] to reject such compositions.
  pub fn concatenate(&self, other: &Converter) -> Converter {
    self.try_concatenate(other)
      .unwrap_or_else(|_| Converter::compound(other.clone(), self.clone()))
  }

  /// As [`Converter::concatenate`], but fails if a merged constant is
  /// out of range.
  pub fn try_concatenate(&self, other: &Converter) -> Result<Converter, ConverterError> {
    if let Some(merged) = self.merge(other)? {
      return Ok(merged);
    }
    // Re-associate so that adjacent stages get a chance to merge.
    if let Converter::Compound(first, second) = other {
      if let Some(merged) = self.merge(second)? {
        return merged.try_concatenate(first);
      }
    }
    if let Converter::Compound(first, second) = self {
      if let Some(merged) = first.merge(other)? {
        return second.try_concatenate(&merged);
      }
    }
    Ok(Converter::compound(other.clone(), self.clone()))
  }

  /// Composition rules for adjacent primitive stages. `None` means
  /// the pair does not simplify.
  fn merge(&self, other: &Converter) -> Result<Option<Converter>, ConverterError> {
    let merged = match (self, other) {
      (_, Converter::Identity) => self.clone(),
      (Converter::Identity, _) => other.clone(),
      (Converter::Add(a), Converter::Add(b)) => Converter::try_add(a + b)?,
      (Converter::Multiply(a), Converter::Multiply(b)) => Converter::try_multiply(a * b)?,
      (Converter::Multiply(a), Converter::Rational(r)) | (Converter::Rational(r), Converter::Multiply(a)) => {
        let (numer, denom) = parts_as_f64(r);
        Converter::try_multiply(a * numer / denom)?
      }
      (Converter::Rational(a), Converter::Rational(b)) => Converter::rational(a.times(b)),
      (Converter::Log(a), Converter::Exp(b)) | (Converter::Exp(a), Converter::Log(b)) if a == b => {
        Converter::Identity
      }
      _ => return Ok(None),
    };
    Ok(Some(merged))
  }

  /// The converter which undoes `self`.
  ///
  /// A zero factor, which the smart constructors never produce, is
  /// inverted to an infinite one, as `Multiply(0.0)` is.
  pub fn inverse(&self) -> Converter {
    match self {
      Converter::Identity => Converter::Identity,
      Converter::Add(offset) => Converter::Add(-offset),
      Converter::Multiply(factor) => Converter::Multiply(1.0 / factor),
      Converter::Rational(factor) => match factor.inverse() {
        Ok(inverse) => Converter::Rational(inverse),
        Err(_) => Converter::Multiply(f64::INFINITY),
      },
      Converter::Log(base) => Converter::Exp(*base),
      Converter::Exp(base) => Converter::Log(*base),
      Converter::Compound(first, second) => Converter::compound(second.inverse(), first.inverse()),
    }
  }

  /// Applies the converter to a floating-point value.
  pub fn convert(&self, value: f64) -> f64 {
    match self {
      Converter::Identity => value,
      Converter::Add(offset) => value + offset,
      Converter::Multiply(factor) => value * factor,
      Converter::Rational(factor) => {
        // Multiply before dividing, so integral results (1 km = 1000
        // m) stay exact.
        let (numer, denom) = parts_as_f64(factor);
        value * numer / denom
      }
      Converter::Log(base) => value.ln() / base.ln(),
      Converter::Exp(base) => base.powf(value),
      Converter::Compound(first, second) => second.convert(first.convert(value)),
    }
  }

  /// Applies the converter exactly, if every stage of it is exact.
  /// Returns `None` for floating-point and nonlinear stages.
  pub fn convert_exact(&self, value: &ExactRational) -> Option<ExactRational> {
    match self {
      Converter::Identity => Some(value.clone()),
      Converter::Rational(factor) => Some(value.times(factor)),
      Converter::Compound(first, second) => second.convert_exact(&first.convert_exact(value)?),
      Converter::Add(_) | Converter::Multiply(_) | Converter::Log(_) | Converter::Exp(_) => None,
    }
  }

  /// The overall scale factor of a linear converter, exact where
  /// possible. `None` if the converter is not linear.
  pub fn linear_factor(&self) -> Option<Either<ExactRational, f64>> {
    match self {
      Converter::Identity => Some(Either::Left(ExactRational::one())),
      Converter::Rational(factor) => Some(Either::Left(factor.clone())),
      Converter::Multiply(factor) => Some(Either::Right(*factor)),
      Converter::Compound(first, second) => {
        let factor = match (first.linear_factor()?, second.linear_factor()?) {
          (Either::Left(a), Either::Left(b)) => Either::Left(a.times(&b)),
          (a, b) => Either::Right(factor_to_f64(&a) * factor_to_f64(&b)),
        };
        Some(factor)
      }
      Converter::Add(_) | Converter::Log(_) | Converter::Exp(_) => None,
    }
  }

  /// Raises a linear converter to an integer power, i.e. the
  /// converter for `u^exponent` given the converter for `u`.
  pub fn powi(&self, exponent: i64) -> Result<Converter, ConverterError> {
    match self.linear_factor().ok_or(ConverterError::NonLinear)? {
      Either::Left(factor) => {
        let powered = factor.checked_powi(exponent).ok_or(ConverterError::ExponentOutOfRange(exponent))?;
        Ok(Converter::rational(powered))
      }
      Either::Right(factor) => {
        let exponent = i32::try_from(exponent).map_err(|_| ConverterError::ExponentOutOfRange(exponent))?;
        Converter::try_multiply(factor.powi(exponent))
      }
    }
  }
}

fn parts_as_f64(factor: &ExactRational) -> (f64, f64) {
  let numer = factor.numerator().to_f64().unwrap_or(f64::NAN);
  let denom = factor.denominator().to_f64().unwrap_or(f64::NAN);
  (numer, denom)
}

fn factor_to_f64(factor: &Either<ExactRational, f64>) -> f64 {
  match factor {
    Either::Left(r) => r.to_f64(),
    Either::Right(f) => *f,
  }
}

impl Default for Converter {
  fn default() -> Self {
    Converter::Identity
  }
}

impl PartialEq for Converter {
  fn eq(&self, other: &Self) -> bool {
    self.strict_eq(other) || self.concatenate(&other.inverse()).is_identity()
  }
}

impl Eq for Converter {}

impl Hash for Converter {
  // Operationally equal converters can differ in structure, so only
  // linearity is hashed.
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.is_identity().hash(state);
    self.is_linear().hash(state);
  }
}

impl StrictEq for Converter {
  fn strict_eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Converter::Identity, Converter::Identity) => true,
      (Converter::Add(a), Converter::Add(b)) => a == b,
      (Converter::Multiply(a), Converter::Multiply(b)) => a == b,
      (Converter::Rational(a), Converter::Rational(b)) => a == b,
      (Converter::Log(a), Converter::Log(b)) => a == b,
      (Converter::Exp(a), Converter::Exp(b)) => a == b,
      (Converter::Compound(a1, b1), Converter::Compound(a2, b2)) => a1.strict_eq(a2) && b1.strict_eq(b2),
      _ => false,
    }
  }
}

impl Display for Converter {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Converter::Identity => write!(f, "id"),
      Converter::Add(offset) => write!(f, "+{}", offset),
      Converter::Multiply(factor) => write!(f, "*{}", factor),
      Converter::Rational(factor) => write!(f, "*{}", factor),
      Converter::Log(base) => write!(f, "log({})", base),
      Converter::Exp(base) => write!(f, "exp({})", base),
      Converter::Compound(first, second) => write!(f, "{} then {}", first, second),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::stricteq::Strictly;

  use approx::assert_relative_eq;

  fn sample_converters() -> Vec<Converter> {
    vec![
      Converter::Identity,
      Converter::add(273.15),
      Converter::add(-40.0),
      Converter::multiply(0.3048),
      Converter::multiply(std::f64::consts::PI / 180.0),
      Converter::rational(1000),
      Converter::rational((5, 9)),
      Converter::rational((-1, 12)),
      Converter::log(10.0),
      Converter::exp(2.0),
      Converter::rational((5, 9)).concatenate(&Converter::add(459.67)),
      Converter::add(32.0).concatenate(&Converter::multiply(1.8)),
    ]
  }

  #[test]
  fn test_smart_constructors_collapse() {
    assert_eq!(Strictly(&Converter::add(0.0)), Strictly(&Converter::Identity));
    assert_eq!(Strictly(&Converter::multiply(1.0)), Strictly(&Converter::Identity));
    assert_eq!(Strictly(&Converter::rational((3, 3))), Strictly(&Converter::Identity));
  }

  #[test]
  #[should_panic]
  fn test_zero_rational_panics() {
    Converter::rational(0);
  }

  #[test]
  fn test_concatenate_identity() {
    for c in sample_converters() {
      assert_eq!(Strictly(&c.concatenate(&Converter::Identity)), Strictly(&c));
      assert_eq!(Strictly(&Converter::Identity.concatenate(&c)), Strictly(&c));
    }
  }

  #[test]
  fn test_concatenate_add() {
    let c = Converter::add(1.5).concatenate(&Converter::add(2.0));
    assert_eq!(Strictly(&c), Strictly(&Converter::Add(3.5)));
    let c = Converter::add(1.5).concatenate(&Converter::add(-1.5));
    assert_eq!(Strictly(&c), Strictly(&Converter::Identity));
  }

  #[test]
  fn test_concatenate_multiply() {
    let c = Converter::multiply(2.0).concatenate(&Converter::multiply(4.0));
    assert_eq!(Strictly(&c), Strictly(&Converter::Multiply(8.0)));
    let c = Converter::multiply(2.0).concatenate(&Converter::multiply(0.5));
    assert_eq!(Strictly(&c), Strictly(&Converter::Identity));
  }

  #[test]
  fn test_concatenate_multiply_with_rational() {
    let c = Converter::multiply(2.0).concatenate(&Converter::rational((3, 4)));
    assert_eq!(Strictly(&c), Strictly(&Converter::Multiply(1.5)));
    let c = Converter::rational((3, 4)).concatenate(&Converter::multiply(2.0));
    assert_eq!(Strictly(&c), Strictly(&Converter::Multiply(1.5)));
  }

  #[test]
  fn test_concatenate_rational_is_exact() {
    let c = Converter::rational((1, 12)).concatenate(&Converter::rational(12));
    assert_eq!(Strictly(&c), Strictly(&Converter::Identity));
    let c = Converter::rational((5, 9)).concatenate(&Converter::rational((9, 10)));
    assert_eq!(Strictly(&c), Strictly(&Converter::Rational(ExactRational::new(1, 2))));

    // A thousand round trips through 1/3 stay exact.
    let mut c = Converter::Identity;
    for _ in 0..1000 {
      c = c.concatenate(&Converter::rational((1, 3))).concatenate(&Converter::rational(3));
    }
    assert!(c.is_identity());
  }

  #[test]
  fn test_concatenate_generic_compound() {
    let c = Converter::multiply(1.8).concatenate(&Converter::add(-273.15));
    match &c {
      Converter::Compound(first, second) => {
        assert_eq!(Strictly(first.as_ref()), Strictly(&Converter::Add(-273.15)));
        assert_eq!(Strictly(second.as_ref()), Strictly(&Converter::Multiply(1.8)));
      }
      other => panic!("Expected compound converter, got {other:?}"),
    }
    assert_relative_eq!(c.convert(373.15), 180.0, epsilon = 1e-9);
    assert!(!c.is_linear());
  }

  #[test]
  fn test_concatenate_reassociates() {
    let c = Converter::rational((5, 9)).concatenate(&Converter::add(459.67));
    let c = Converter::rational(1000).concatenate(&c);
    match &c {
      Converter::Compound(first, second) => {
        assert_eq!(Strictly(first.as_ref()), Strictly(&Converter::Add(459.67)));
        assert_eq!(Strictly(second.as_ref()), Strictly(&Converter::Rational(ExactRational::new(5000, 9))));
      }
      other => panic!("Expected compound converter, got {other:?}"),
    }
  }

  #[test]
  fn test_inverse() {
    assert_eq!(Strictly(&Converter::add(2.0).inverse()), Strictly(&Converter::Add(-2.0)));
    assert_eq!(Strictly(&Converter::multiply(4.0).inverse()), Strictly(&Converter::Multiply(0.25)));
    assert_eq!(
      Strictly(&Converter::rational((-2, 3)).inverse()),
      Strictly(&Converter::Rational(ExactRational::new(-3, 2))),
    );
    assert_eq!(Strictly(&Converter::log(10.0).inverse()), Strictly(&Converter::Exp(10.0)));
    assert_eq!(Strictly(&Converter::exp(10.0).inverse()), Strictly(&Converter::Log(10.0)));
  }

  #[test]
  fn test_inverse_law() {
    for c in sample_converters() {
      for x in [0.5, 1.0, 2.0, 37.0, 123.5] {
        assert_relative_eq!(c.inverse().convert(c.convert(x)), x, max_relative = 1e-9);
      }
    }
  }

  #[test]
  fn test_concatenate_with_inverse_is_identity() {
    let exact = [
      Converter::Identity,
      Converter::add(273.15),
      Converter::multiply(4.0),
      Converter::rational((5, 9)),
      Converter::log(10.0),
    ];
    for c in exact {
      assert!(c.concatenate(&c.inverse()).is_identity(), "{c:?}");
    }
    for c in sample_converters() {
      assert_eq!(c, c.clone());
    }
  }

  #[test]
  fn test_operational_equality() {
    assert_eq!(Converter::rational(1000), Converter::rational(1000));
    assert_eq!(Converter::multiply(2.0), Converter::rational(2));
    assert_ne!(Converter::rational(1000), Converter::rational(100));
    assert_ne!(Converter::add(1.0), Converter::multiply(1.0 + 1.0));
  }

  #[test]
  fn test_convert() {
    assert_eq!(Converter::rational(1000).convert(1.0), 1000.0);
    assert_eq!(Converter::rational((1, 1000)).convert(1500.0), 1.5);
    assert_eq!(Converter::add(273.15).convert(0.0), 273.15);
    assert_relative_eq!(Converter::log(10.0).convert(1000.0), 3.0, epsilon = 1e-12);
    assert_relative_eq!(Converter::exp(2.0).convert(10.0), 1024.0, epsilon = 1e-9);
  }

  #[test]
  fn test_convert_exact() {
    let c = Converter::rational((1, 12)).concatenate(&Converter::rational((5, 7)));
    assert_eq!(c.convert_exact(&ExactRational::integer(84)), Some(ExactRational::integer(5)));
    assert_eq!(Converter::add(1.0).convert_exact(&ExactRational::one()), None);
    assert_eq!(Converter::multiply(1.5).convert_exact(&ExactRational::one()), None);
  }

  #[test]
  fn test_is_linear() {
    assert!(Converter::Identity.is_linear());
    assert!(Converter::multiply(2.0).is_linear());
    assert!(Converter::rational(3).is_linear());
    assert!(!Converter::add(2.0).is_linear());
    assert!(!Converter::log(10.0).is_linear());
    assert!(!Converter::exp(10.0).is_linear());
    let linear_compound = Converter::Compound(
      Arc::new(Converter::Multiply(2.0)),
      Arc::new(Converter::Rational(ExactRational::integer(3))),
    );
    assert!(linear_compound.is_linear());
  }

  #[test]
  fn test_powi() {
    let c = Converter::rational(1000).powi(2).unwrap();
    assert_eq!(Strictly(&c), Strictly(&Converter::Rational(ExactRational::integer(1_000_000))));
    let c = Converter::rational(1000).powi(-1).unwrap();
    assert_eq!(Strictly(&c), Strictly(&Converter::Rational(ExactRational::new(1, 1000))));
    let c = Converter::multiply(2.0).powi(3).unwrap();
    assert_eq!(Strictly(&c), Strictly(&Converter::Multiply(8.0)));
    assert_eq!(Converter::add(1.0).powi(2).unwrap_err(), ConverterError::NonLinear);
  }

  #[test]
  fn test_powi_out_of_range() {
    assert_eq!(Converter::multiply(1e200).powi(2).unwrap_err(), ConverterError::OutOfRange(f64::INFINITY));
    assert_eq!(Converter::multiply(1e-200).powi(2).unwrap_err(), ConverterError::OutOfRange(0.0));
    // Exponents beyond i32 are not truncated.
    assert_eq!(
      Converter::multiply(2.0).powi(4_294_967_298).unwrap_err(),
      ConverterError::ExponentOutOfRange(4_294_967_298),
    );
    assert_eq!(
      Converter::rational(1000).powi(99_999_999_999).unwrap_err(),
      ConverterError::ExponentOutOfRange(99_999_999_999),
    );
  }

  #[test]
  fn test_try_multiply() {
    assert_eq!(Strictly(&Converter::try_multiply(2.5).unwrap()), Strictly(&Converter::Multiply(2.5)));
    assert_eq!(Strictly(&Converter::try_multiply(1.0).unwrap()), Strictly(&Converter::Identity));
    assert_eq!(Converter::try_multiply(0.0).unwrap_err(), ConverterError::OutOfRange(0.0));
    assert!(Converter::try_multiply(f64::NAN).is_err());
    assert!(Converter::try_multiply(f64::INFINITY).is_err());
    // No finite reciprocal.
    assert!(Converter::try_multiply(1e-310).is_err());
  }

  #[test]
  fn test_try_concatenate_out_of_range() {
    let big = Converter::multiply(1e200);
    assert_eq!(big.try_concatenate(&big).unwrap_err(), ConverterError::OutOfRange(f64::INFINITY));
    let small = Converter::multiply(1e-200);
    assert_eq!(small.try_concatenate(&small).unwrap_err(), ConverterError::OutOfRange(0.0));
    let offset = Converter::add(f64::MAX);
    assert!(offset.try_concatenate(&offset).is_err());
    let mixed = Converter::multiply(1e300).try_concatenate(&Converter::rational(ExactRational::power_of_ten(10)));
    assert!(mixed.is_err());
  }

  #[test]
  fn test_concatenate_out_of_range_keeps_stages() {
    let big = Converter::multiply(1e200);
    let c = big.concatenate(&big);
    match &c {
      Converter::Compound(first, second) => {
        assert_eq!(Strictly(first.as_ref()), Strictly(&Converter::Multiply(1e200)));
        assert_eq!(Strictly(second.as_ref()), Strictly(&Converter::Multiply(1e200)));
      }
      other => panic!("Expected compound converter, got {other:?}"),
    }
    assert_relative_eq!(c.convert(1e-300), 1e100, max_relative = 1e-12);
  }

  #[test]
  fn test_inverse_of_zero_factor() {
    let c = Converter::Rational(ExactRational::zero()).inverse();
    assert_eq!(Strictly(&c), Strictly(&Converter::Multiply(f64::INFINITY)));
  }

  #[test]
  fn test_display() {
    assert_eq!(Converter::add(273.15).to_string(), "+273.15");
    assert_eq!(Converter::rational((1, 1000)).to_string(), "*1/1000");
    assert_eq!(Converter::log(10.0).to_string(), "log(10)");
  }
}
