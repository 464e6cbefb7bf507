use std::fmt::{self, Display, Formatter};
use std::ops::{Add, AddAssign};

/// Thin wrapper around `usize` that represents a byte position in a
/// parsed string. Usually used for error reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceOffset(pub usize);

/// A span of source offsets. Spans should be considered half-open
/// intervals, with `start` being included and `end` being excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
  pub start: SourceOffset,
  pub end: SourceOffset,
}

impl Span {
  pub fn new(start: SourceOffset, end: SourceOffset) -> Self {
    Self { start, end }
  }

  /// The empty span at `pos`.
  pub fn empty(pos: SourceOffset) -> Self {
    Self { start: pos, end: pos }
  }

  pub fn len(&self) -> usize {
    self.end.0.saturating_sub(self.start.0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The text covered by this span. Out of range spans produce an
  /// empty string.
  pub fn slice<'a>(&self, text: &'a str) -> &'a str {
    text.get(self.start.0..self.end.0).unwrap_or("")
  }
}

impl From<usize> for SourceOffset {
  fn from(i: usize) -> Self {
    SourceOffset(i)
  }
}

impl From<SourceOffset> for usize {
  fn from(i: SourceOffset) -> Self {
    i.0
  }
}

impl Display for SourceOffset {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Add<usize> for SourceOffset {
  type Output = Self;

  fn add(self, rhs: usize) -> Self::Output {
    Self(self.0 + rhs)
  }
}

impl AddAssign<usize> for SourceOffset {
  fn add_assign(&mut self, rhs: usize) {
    self.0 += rhs
  }
}

impl Display for Span {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.start, self.end)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_span_len() {
    let span = Span::new(SourceOffset(2), SourceOffset(5));
    assert_eq!(span.len(), 3);
    assert!(!span.is_empty());
    assert!(Span::empty(SourceOffset(4)).is_empty());
  }

  #[test]
  fn test_span_slice() {
    let text = "kg·m/s²";
    // "·" and "²" are two bytes each.
    assert_eq!(Span::new(SourceOffset(0), SourceOffset(2)).slice(text), "kg");
    assert_eq!(Span::new(SourceOffset(2), SourceOffset(4)).slice(text), "·");
    assert_eq!(Span::new(SourceOffset(7), SourceOffset(9)).slice(text), "²");
    assert_eq!(Span::new(SourceOffset(3), SourceOffset(4)).slice(text), "");
    assert_eq!(Span::new(SourceOffset(8), SourceOffset(99)).slice(text), "");
  }

  #[test]
  fn test_display() {
    let mut offset = SourceOffset(3);
    offset += 2;
    assert_eq!(offset, SourceOffset(5));
    assert_eq!(Span::new(SourceOffset(1), offset + 1).to_string(), "1-6");
  }
}
