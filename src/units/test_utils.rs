use super::catalog::UnitCatalog;
use super::format::UnitFormat;
use super::unit::Unit;

/// Asserts that `unit` survives formatting and parsing with `format`,
/// and that formatting is stable across the round trip.
pub fn assert_round_trip<C: UnitCatalog>(format: &UnitFormat<C>, unit: &Unit) {
  let text = format.format(unit);
  let parsed = format.parse(&text).unwrap_or_else(|err| panic!("Failed to parse '{}': {}", text, err));
  assert_eq!(&parsed, unit, "Round trip through '{}'", text);
  assert_eq!(format.format(&parsed), text);
}
