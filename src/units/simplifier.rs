//! Normalization of products of rational powers of units.
//!
//! Every product unit in the crate goes through [`normalize`], so
//! product units are always flat, have at most one element per base,
//! and carry no zero exponents.

use super::power::RationalPower;
use super::product::ProductUnit;
use super::rational::ExactRational;
use super::unit::Unit;

use std::sync::Arc;

/// Builds the normalized unit equal to the product of `elements`.
///
/// Nested products are flattened (multiplying exponents through),
/// quantity wrappers are looked through, the dimensionless unit is
/// dropped, repeated bases have their exponents summed, and zero
/// exponents are removed. A single base to the first power is
/// returned as the bare base unit, and the empty product is
/// [`Unit::one`].
///
/// Merged elements keep the order in which their base first appears.
pub fn normalize(elements: impl IntoIterator<Item = RationalPower>) -> Unit {
  let mut flat = Vec::new();
  for elem in elements {
    flatten_into(&mut flat, &elem.base, &elem.exponent);
  }

  let mut merged: Vec<RationalPower> = Vec::with_capacity(flat.len());
  for elem in flat {
    match merged.iter_mut().find(|existing| existing.base == elem.base) {
      Some(existing) => existing.exponent = existing.exponent.add(&elem.exponent),
      None => merged.push(elem),
    }
  }
  merged.retain(|elem| !elem.exponent.is_zero());

  if merged.len() == 1 && merged[0].exponent.is_one() {
    // unwrap: Length was just checked.
    return merged.pop().unwrap().base;
  }
  Unit::Product(Arc::new(ProductUnit::from_normalized(merged)))
}

fn flatten_into(out: &mut Vec<RationalPower>, base: &Unit, exponent: &ExactRational) {
  let base = base.unwrap_quantity();
  match base {
    Unit::Product(product) => {
      for elem in product.iter() {
        flatten_into(out, &elem.base, &elem.exponent.times(exponent));
      }
    }
    _ => {
      out.push(RationalPower { base: base.clone(), exponent: exponent.clone() });
    }
  }
}

/// Normalizes `unit` after additionally replacing every factor whose
/// standard unit is a product by that product.
///
/// The converters of replaced factors are discarded, so the result is
/// only meaningful for comparing the shape of units (as the quantity
/// resolver does), not for converting values.
pub fn deep_simplify(unit: &Unit) -> Unit {
  let expanded = unit.unwrap_quantity().to_powers()
    .into_iter()
    .map(|elem| {
      let standard = elem.base.standard_unit();
      if standard.as_product().is_some() {
        RationalPower { base: standard, exponent: elem.exponent }
      } else {
        elem
      }
    });
  normalize(expanded)
}
