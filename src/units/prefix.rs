use super::rational::ExactRational;
use super::unit::Unit;

use std::fmt::{self, Display, Formatter};

/// A decimal prefix, such as `k` (10³) or `μ` (10⁻⁶).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricPrefix {
  pub prefix_name: String,
  pub exponent: i32,
}

impl MetricPrefix {
  pub fn new(prefix_name: impl Into<String>, exponent: i32) -> MetricPrefix {
    MetricPrefix {
      prefix_name: prefix_name.into(),
      exponent,
    }
  }

  /// The exact factor `10^exponent`.
  pub fn factor(&self) -> ExactRational {
    ExactRational::power_of_ten(self.exponent)
  }

  pub fn apply(&self, unit: &Unit) -> Unit {
    unit.scaled(self.factor())
  }

  /// Inverse of [`MetricPrefix::apply`].
  pub fn unapply(&self, unit: &Unit) -> Unit {
    unit.scaled(ExactRational::power_of_ten(-self.exponent))
  }

  /// The SI prefixes, largest first.
  pub fn si_prefixes() -> Vec<MetricPrefix> {
    vec![
      MetricPrefix::new("Q", 30),
      MetricPrefix::new("R", 27),
      MetricPrefix::new("Y", 24),
      MetricPrefix::new("Z", 21),
      MetricPrefix::new("E", 18),
      MetricPrefix::new("P", 15),
      MetricPrefix::new("T", 12),
      MetricPrefix::new("G", 9),
      MetricPrefix::new("M", 6),
      MetricPrefix::new("k", 3),
      MetricPrefix::new("h", 2),
      MetricPrefix::new("da", 1),
      MetricPrefix::new("d", -1),
      MetricPrefix::new("c", -2),
      MetricPrefix::new("m", -3),
      // Note: We accept both "μ" and "u" for micro, and print "μ".
      MetricPrefix::new("μ", -6),
      MetricPrefix::new("u", -6),
      MetricPrefix::new("n", -9),
      MetricPrefix::new("p", -12),
      MetricPrefix::new("f", -15),
      MetricPrefix::new("a", -18),
      MetricPrefix::new("z", -21),
      MetricPrefix::new("y", -24),
      MetricPrefix::new("r", -27),
      MetricPrefix::new("q", -30),
    ]
  }
}

impl Display for MetricPrefix {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.prefix_name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::converter::Converter;
  use crate::units::si::{metre, gram, kilogram};
  use crate::assert_strict_eq;

  fn prefix(name: &str) -> MetricPrefix {
    MetricPrefix::si_prefixes().into_iter().find(|p| p.prefix_name == name).unwrap()
  }

  #[test]
  fn apply_test() {
    let kilometre = prefix("k").apply(&metre());
    let transformed = kilometre.as_transformed().unwrap();
    assert_strict_eq!(transformed.parent().clone(), metre());
    assert_strict_eq!(transformed.to_parent().clone(), Converter::Rational(ExactRational::integer(1000)));
  }

  #[test]
  fn test_apply_composes() {
    assert_strict_eq!(prefix("k").apply(&gram()), kilogram());
    let milligram = prefix("m").apply(&gram());
    assert_strict_eq!(
      milligram.as_transformed().unwrap().to_parent().clone(),
      Converter::Rational(ExactRational::new(1, 1_000_000)),
    );
  }

  #[test]
  fn test_unapply() {
    let nanometre = prefix("n").apply(&metre());
    assert_strict_eq!(prefix("n").unapply(&nanometre), metre());
  }

  #[test]
  fn test_micro_spellings() {
    assert_eq!(prefix("μ").factor(), prefix("u").factor());
    assert_eq!(prefix("da").factor(), ExactRational::integer(10));
    assert_eq!(prefix("q").factor(), ExactRational::power_of_ten(-30));
  }
}
