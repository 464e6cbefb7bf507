use std::fmt::{self, Debug, Formatter};

/// Trait for defining a stricter notion of equality than the usual
/// [`PartialEq`].
///
/// Like `PartialEq`, the equality relation defined here should be a
/// partial equivalence relation. That is, it should be symmetric and
/// transitive. Further, `a.strict_eq(b)` should imply `a == b`.
///
/// Units and converters compare operationally under `PartialEq` (a
/// `m*1000` built from a float factor equals one built from an exact
/// factor). `StrictEq` compares their structure.
pub trait StrictEq: PartialEq {
  fn strict_eq(&self, other: &Self) -> bool;
}

/// Lifts a [`StrictEq`] relation into `PartialEq` for use with macros
/// like `assert_eq!`.
///
/// The `Debug` impl for `Strictly<'a, T>` prints equivalently to a
/// simple `T`, to make debug output prettier.
pub struct Strictly<'a, T>(pub &'a T);

impl<'a, T: StrictEq> PartialEq for Strictly<'a, T> {
  fn eq(&self, other: &Self) -> bool {
    self.0.strict_eq(other.0)
  }
}

impl<'a, T: Debug> Debug for Strictly<'a, T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}", self.0)
  }
}

impl<T: StrictEq> StrictEq for Vec<T> {
  fn strict_eq(&self, other: &Self) -> bool {
    if self.len() != other.len() {
      return false;
    }
    self.iter().zip(other).all(|(a, b)| a.strict_eq(b))
  }
}

impl<T: StrictEq> StrictEq for Option<T> {
  fn strict_eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Some(a), Some(b)) => a.strict_eq(b),
      (None, None) => true,
      _ => false,
    }
  }
}

#[macro_export]
macro_rules! assert_strict_eq {
  ($left:expr, $right:expr $(,)?) => {
    match (&$left, &$right) {
      (left_val, right_val) => {
        assert_eq!(
          $crate::util::stricteq::Strictly(left_val),
          $crate::util::stricteq::Strictly(right_val),
        )
      }
    }
  }
}

#[macro_export]
macro_rules! assert_strict_ne {
  ($left:expr, $right:expr $(,)?) => {
    match (&$left, &$right) {
      (left_val, right_val) => {
        assert_ne!(
          $crate::util::stricteq::Strictly(left_val),
          $crate::util::stricteq::Strictly(right_val),
        )
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Equal under `PartialEq` when the values agree modulo 10, but
  /// strictly equal only when they agree exactly.
  #[derive(Debug, Clone, Copy)]
  struct Mod10(u32);

  impl PartialEq for Mod10 {
    fn eq(&self, other: &Self) -> bool {
      self.0 % 10 == other.0 % 10
    }
  }

  impl StrictEq for Mod10 {
    fn strict_eq(&self, other: &Self) -> bool {
      self.0 == other.0
    }
  }

  #[test]
  fn test_strictly() {
    assert_eq!(Mod10(3), Mod10(13));
    assert_ne!(Strictly(&Mod10(3)), Strictly(&Mod10(13)));
    assert_eq!(Strictly(&Mod10(3)), Strictly(&Mod10(3)));
  }

  #[test]
  fn test_vec_and_option() {
    assert!(vec![Mod10(1), Mod10(2)].strict_eq(&vec![Mod10(1), Mod10(2)]));
    assert!(!vec![Mod10(1), Mod10(2)].strict_eq(&vec![Mod10(1), Mod10(12)]));
    assert!(!vec![Mod10(1)].strict_eq(&vec![Mod10(1), Mod10(2)]));
    assert!(Some(Mod10(4)).strict_eq(&Some(Mod10(4))));
    assert!(!Some(Mod10(4)).strict_eq(&None));
  }

  #[test]
  fn test_macros() {
    assert_strict_eq!(Mod10(7), Mod10(7));
    assert_strict_ne!(Mod10(7), Mod10(17));
  }
}
