//! Converting values between compatible units.

use super::converter::Converter;
use super::unit::{Unit, UnitError};

/// Computes the converter which takes values in `source` to values in
/// `target`.
///
/// Both units are reduced to their standard units; if those agree,
/// the result is the source's converter to the standard unit followed
/// by the inverse of the target's. Units with different standard
/// units cannot be converted, even if they share a dimension (the
/// newton metre and the joule, for instance).
#[tracing::instrument(level = "trace", skip_all, fields(source = %source, target = %target))]
pub fn converter_to(source: &Unit, target: &Unit) -> Result<Converter, UnitError> {
  if source == target {
    return Ok(Converter::Identity);
  }
  if source.standard_unit() != target.standard_unit() {
    tracing::trace!("standard units differ");
    return Err(UnitError::Incompatible {
      from_unit: source.to_string(),
      to_unit: target.to_string(),
    });
  }
  let source_to_standard = source.to_standard_unit()?;
  let target_to_standard = target.to_standard_unit()?;
  Ok(target_to_standard.inverse().try_concatenate(&source_to_standard)?)
}

/// Whether two units measure the same kind of thing: they are equal,
/// share a standard unit, or at least share a dimension.
pub fn is_compatible(a: &Unit, b: &Unit) -> bool {
  a == b || a.standard_unit() == b.standard_unit() || a.dimension() == b.dimension()
}

impl Unit {
  pub fn converter_to(&self, target: &Unit) -> Result<Converter, UnitError> {
    converter_to(self, target)
  }

  pub fn is_compatible(&self, other: &Unit) -> bool {
    is_compatible(self, other)
  }

  /// Converts `value` from this unit to `target`.
  pub fn convert(&self, value: f64, target: &Unit) -> Result<f64, UnitError> {
    Ok(self.converter_to(target)?.convert(value))
  }
}
