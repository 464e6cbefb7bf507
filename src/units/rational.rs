use num::{BigInt, BigRational, Zero, One, Signed};
use num::pow::pow;
use num::traits::ToPrimitive;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use std::fmt::{self, Display, Formatter};
use std::ops::{Mul, Add, Neg};

/// An exact fraction, always stored in lowest terms with a positive
/// denominator.
///
/// Unit exponents and exact scale factors (SI prefixes, `1/12`,
/// `5/9`, and so on) are stored as `ExactRational` so that repeated
/// composition never accumulates floating-point error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "BigRational", into = "BigRational")]
pub struct ExactRational(BigRational);

/// The largest exponent magnitude accepted by
/// [`ExactRational::checked_powi`].
pub const MAX_EXACT_EXPONENT: u64 = 1024;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Cannot invert a zero rational")]
pub struct DivideByZeroError;

impl ExactRational {
  /// Constructs the reduced fraction `numer / denom`.
  ///
  /// Panics if `denom == 0`.
  pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Self {
    let denom = denom.into();
    assert!(!denom.is_zero(), "ExactRational denominator must be nonzero");
    ExactRational(BigRational::new(numer.into(), denom))
  }

  pub fn try_new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<Self, DivideByZeroError> {
    let denom = denom.into();
    if denom.is_zero() {
      Err(DivideByZeroError)
    } else {
      Ok(ExactRational(BigRational::new(numer.into(), denom)))
    }
  }

  pub fn integer(value: impl Into<BigInt>) -> Self {
    ExactRational(BigRational::from_integer(value.into()))
  }

  pub fn zero() -> Self {
    ExactRational(BigRational::zero())
  }

  pub fn one() -> Self {
    ExactRational(BigRational::one())
  }

  /// `10^exponent`, exactly.
  pub fn power_of_ten(exponent: i32) -> Self {
    ExactRational::integer(10).powi(exponent as i64)
  }

  pub fn numerator(&self) -> &BigInt {
    self.0.numer()
  }

  pub fn denominator(&self) -> &BigInt {
    self.0.denom()
  }

  pub fn times(&self, other: &ExactRational) -> ExactRational {
    ExactRational(&self.0 * &other.0)
  }

  pub fn add(&self, other: &ExactRational) -> ExactRational {
    ExactRational(&self.0 + &other.0)
  }

  pub fn negate(&self) -> ExactRational {
    ExactRational(-&self.0)
  }

  /// The reciprocal of `self`. The sign always ends up on the
  /// numerator.
  pub fn inverse(&self) -> Result<ExactRational, DivideByZeroError> {
    if self.is_zero() {
      Err(DivideByZeroError)
    } else {
      Ok(ExactRational(self.0.recip()))
    }
  }

  pub fn abs(&self) -> ExactRational {
    ExactRational(self.0.abs())
  }

  /// Raises `self` to an integer power. `0^0` is treated as 1, and a
  /// negative power of zero yields zero rather than failing; callers
  /// that care must check [`ExactRational::is_zero`] first.
  pub fn powi(&self, exp: i64) -> ExactRational {
    if self.is_zero() {
      return if exp == 0 { ExactRational::one() } else { ExactRational::zero() };
    }
    let magnitude = pow(self.0.clone(), exp.unsigned_abs() as usize);
    if exp < 0 {
      ExactRational(magnitude.recip())
    } else {
      ExactRational(magnitude)
    }
  }

  /// As [`ExactRational::powi`], but `None` if `|exp|` exceeds
  /// [`MAX_EXACT_EXPONENT`].
  pub fn checked_powi(&self, exp: i64) -> Option<ExactRational> {
    (exp.unsigned_abs() <= MAX_EXACT_EXPONENT).then(|| self.powi(exp))
  }

  pub fn is_zero(&self) -> bool {
    self.0.is_zero()
  }

  pub fn is_one(&self) -> bool {
    self.0.is_one()
  }

  pub fn is_integer(&self) -> bool {
    self.0.is_integer()
  }

  pub fn is_positive(&self) -> bool {
    self.0.is_positive()
  }

  pub fn is_negative(&self) -> bool {
    self.0.is_negative()
  }

  /// The value as an `i64`, if it is an integer in range.
  pub fn to_i64(&self) -> Option<i64> {
    if self.is_integer() {
      self.0.numer().to_i64()
    } else {
      None
    }
  }

  /// Nearest `f64` approximation of `self`.
  pub fn to_f64(&self) -> f64 {
    self.0.to_f64().unwrap_or_else(|| {
      // Fall back to dividing the parts; only reachable if the
      // numerator or denominator exceeds the f64 range on its own.
      let numer = self.0.numer().to_f64().unwrap_or(f64::NAN);
      let denom = self.0.denom().to_f64().unwrap_or(f64::NAN);
      numer / denom
    })
  }

  pub fn as_big_rational(&self) -> &BigRational {
    &self.0
  }
}

impl Default for ExactRational {
  fn default() -> Self {
    ExactRational::zero()
  }
}

impl From<i64> for ExactRational {
  fn from(value: i64) -> Self {
    ExactRational::integer(value)
  }
}

impl From<i32> for ExactRational {
  fn from(value: i32) -> Self {
    ExactRational::integer(value)
  }
}

impl From<BigInt> for ExactRational {
  fn from(value: BigInt) -> Self {
    ExactRational::integer(value)
  }
}

impl From<BigRational> for ExactRational {
  fn from(value: BigRational) -> Self {
    // Values built with `Ratio::new_raw` (as deserialized ones are)
    // may not be in lowest terms.
    let (numer, denom) = value.into_raw();
    ExactRational(BigRational::new(numer, denom))
  }
}

impl From<ExactRational> for BigRational {
  fn from(value: ExactRational) -> Self {
    value.0
  }
}

impl From<(i64, i64)> for ExactRational {
  /// Panics if the denominator is zero.
  fn from((numer, denom): (i64, i64)) -> Self {
    ExactRational::new(numer, denom)
  }
}

impl Mul for &ExactRational {
  type Output = ExactRational;

  fn mul(self, rhs: &ExactRational) -> ExactRational {
    self.times(rhs)
  }
}

impl Add for &ExactRational {
  type Output = ExactRational;

  fn add(self, rhs: &ExactRational) -> ExactRational {
    ExactRational::add(self, rhs)
  }
}

impl Neg for &ExactRational {
  type Output = ExactRational;

  fn neg(self) -> ExactRational {
    self.negate()
  }
}

impl Display for ExactRational {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if self.is_integer() {
      write!(f, "{}", self.numerator())
    } else {
      write!(f, "{}/{}", self.numerator(), self.denominator())
    }
  }
}
