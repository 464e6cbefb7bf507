//! Rendering units as text in the grammar accepted by
//! [`parse_unit`](super::parser::parse_unit).

use super::options::FormatOptions;
use super::parser::is_identifier;
use crate::units::converter::Converter;
use crate::units::product::ProductUnit;
use crate::units::rational::ExactRational;
use crate::units::unit::{Unit, AlternateName};
use crate::util::partition_mapped;

use either::Either;
use num::One;

/// Renders units, preferring names from `names` for any unit or
/// sub-unit that has one and falling back to structure otherwise.
pub(crate) struct Renderer<'a> {
  names: Option<&'a dyn Fn(&Unit) -> Option<String>>,
  prefers_unicode_output: bool,
}

impl<'a> Renderer<'a> {
  pub fn new(names: &'a dyn Fn(&Unit) -> Option<String>, options: &FormatOptions) -> Self {
    Self { names: Some(names), prefers_unicode_output: options.prefers_unicode_output }
  }

  /// A renderer which knows no names, and so writes every unit in
  /// terms of its symbols.
  pub fn structural() -> Renderer<'static> {
    Renderer { names: None, prefers_unicode_output: true }
  }

  pub fn render(&self, unit: &Unit) -> String {
    if let Some(name) = self.names.and_then(|names| names(unit)) {
      return name;
    }
    match unit {
      Unit::Base(base) => base.symbol().to_owned(),
      Unit::Alternate(alt) => match alt.name() {
        AlternateName::Symbol(symbol) => symbol.clone(),
        AlternateName::Quantity(_) => self.render(alt.parent()),
      },
      Unit::Product(product) => self.render_product(product),
      Unit::Transformed(transformed) => self.render_transformed(transformed.parent(), transformed.to_parent()),
    }
  }

  fn separator(&self) -> &'static str {
    if self.prefers_unicode_output { "·" } else { "*" }
  }

  fn render_product(&self, product: &ProductUnit) -> String {
    let (numer, denom): (Vec<String>, Vec<String>) = partition_mapped(product.iter(), |elem| {
      if elem.exponent.is_negative() {
        Either::Right(self.render_power(&elem.base, &elem.exponent.negate()))
      } else {
        Either::Left(self.render_power(&elem.base, &elem.exponent))
      }
    });
    let numer = if numer.is_empty() { String::from("1") } else { numer.join(self.separator()) };
    match denom.len() {
      0 => numer,
      1 => format!("{}/{}", numer, denom[0]),
      _ => format!("{}/({})", numer, denom.join(self.separator())),
    }
  }

  /// Renders one factor of a product. Anything but a single name is
  /// parenthesized, even without an exponent, so that a scale or
  /// offset suffix stays attached to its own factor.
  fn render_power(&self, base: &Unit, exponent: &ExactRational) -> String {
    let text = wrap(self.render(base));
    if exponent.is_one() {
      return text;
    }
    format!("{}{}", text, self.render_exponent(exponent))
  }

  fn render_exponent(&self, exponent: &ExactRational) -> String {
    match exponent.to_i64() {
      Some(2) if self.prefers_unicode_output => String::from("²"),
      Some(3) if self.prefers_unicode_output => String::from("³"),
      Some(n) => format!("^{}", n),
      None => format!("^{}:{}", exponent.numerator(), exponent.denominator()),
    }
  }

  /// Renders `parent` transformed by `to_parent`. Chains of simple
  /// stages are written innermost first, so that `K*5/9` with an
  /// offset applied becomes `(K*5/9)+459.67`.
  fn render_transformed(&self, parent: &Unit, to_parent: &Converter) -> String {
    match to_parent {
      Converter::Identity => self.render(parent),
      Converter::Compound(first, second) => match simple_suffix(first) {
        Some(suffix) => format!("{}{}", wrap(self.render_transformed(parent, second)), suffix),
        None => unformattable(&self.render(parent), to_parent),
      },
      _ => match simple_suffix(to_parent) {
        Some(suffix) => format!("{}{}", wrap(self.render(parent)), suffix),
        None => unformattable(&self.render(parent), to_parent),
      },
    }
  }
}

/// The text appended to a unit to apply a single-stage converter, if
/// the grammar can express it.
fn simple_suffix(converter: &Converter) -> Option<String> {
  match converter {
    Converter::Add(offset) if *offset < 0.0 => Some(format!("-{}", -offset)),
    Converter::Add(offset) => Some(format!("+{}", offset)),
    Converter::Multiply(factor) => Some(format!("*{}", format_float(*factor))),
    Converter::Rational(factor) => {
      let mut suffix = String::new();
      if !factor.numerator().is_one() {
        suffix.push_str(&format!("*{}", factor.numerator()));
      }
      if !factor.denominator().is_one() {
        suffix.push_str(&format!("/{}", factor.denominator()));
      }
      Some(suffix)
    }
    Converter::Identity | Converter::Log(_) | Converter::Exp(_) | Converter::Compound(_, _) => None,
  }
}

fn unformattable(parent: &str, converter: &Converter) -> String {
  format!("[{}; {}]", parent, converter)
}

/// Parenthesizes `text` unless it is a single identifier.
fn wrap(text: String) -> String {
  if is_identifier(&text) {
    text
  } else {
    format!("({})", text)
  }
}

/// Formats a float so that it reads back as a float rather than an
/// exact integer.
fn format_float(value: f64) -> String {
  let text = value.to_string();
  if !value.is_finite() || text.contains(['.', 'e', 'E']) {
    text
  } else {
    format!("{}.0", text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::si::{metre, second, kilogram, kelvin, newton, radian, celsius, fahrenheit, kilometre, hertz, litre};

  fn render(unit: &Unit) -> String {
    Renderer::structural().render(unit)
  }

  fn render_ascii(unit: &Unit) -> String {
    let no_names = |_: &Unit| -> Option<String> { None };
    Renderer::new(&no_names, &FormatOptions::ascii()).render(unit)
  }

  #[test]
  fn test_render_symbols() {
    assert_eq!(render(&metre()), "m");
    assert_eq!(render(&newton()), "N");
    assert_eq!(render(&radian()), "rad");
  }

  #[test]
  fn test_render_products() {
    assert_eq!(render(&metre().divide(&second())), "m/s");
    assert_eq!(render(&metre().divide(&second().pow(2))), "m/s²");
    assert_eq!(render(&metre().pow(3)), "m³");
    assert_eq!(render(&metre().pow(4)), "m^4");
    assert_eq!(render(&kilogram().divide(&metre().times(&second().pow(2)))), "kg/(m·s²)");
    assert_eq!(render(&second().inverse()), "1/s");
    assert_eq!(render(&second().pow(-2)), "1/s²");
    assert_eq!(render(&Unit::one()), "1");
  }

  #[test]
  fn test_render_fractional_exponents() {
    assert_eq!(render(&metre().root(2)), "m^1:2");
    assert_eq!(render(&second().pow(ExactRational::new(-3, 2))), "1/s^3:2");
  }

  #[test]
  fn test_render_ascii() {
    assert_eq!(render_ascii(&metre().divide(&second().pow(2))), "m/s^2");
    assert_eq!(render_ascii(&kilogram().times(&metre()).divide(&second().pow(2))), "kg*m/s^2");
    assert_eq!(render_ascii(&metre().pow(3)), "m^3");
  }

  #[test]
  fn test_render_transformed() {
    assert_eq!(render(&kilometre()), "m*1000");
    assert_eq!(render(&metre().scaled((1, 1000))), "m/1000");
    assert_eq!(render(&kelvin().scaled((5, 9))), "K*5/9");
    assert_eq!(render(&celsius()), "K+273.15");
    assert_eq!(render(&kelvin().plus(-40.0)), "K-40");
    assert_eq!(render(&fahrenheit()), "(K*5/9)+459.67");
    assert_eq!(render(&litre()), "(m³)/1000");
    assert_eq!(render(&metre().scaled_by(2.0)), "m*2.0");
    assert_eq!(render(&metre().scaled_by(0.3048)), "m*0.3048");
  }

  #[test]
  fn test_render_transformed_inside_product() {
    let kmh = kilometre().divide(&second().scaled(3600));
    assert_eq!(render(&kmh), "(m*1000)/(s*3600)");
    assert_eq!(render(&kilometre().pow(2)), "(m*1000)²");
    assert_eq!(render(&kilometre().times(&metre())), "(m*1000)·m");
    assert_eq!(render(&metre().times(&kilometre())), "m·(m*1000)");
    assert_eq!(render(&kelvin().plus(-40.0).divide(&second())), "(K-40)/s");
    assert_eq!(render(&celsius().times(&second())), "(K+273.15)·s");
    assert_eq!(render(&metre().times(&second()).scaled(3).inverse()), "1/((m·s)*3)");
    assert_eq!(render(&metre().scaled_by(0.25).divide(&second())), "(m*0.25)/s");
  }

  #[test]
  fn test_render_unformattable() {
    let unit = hertz().transform(Converter::log(10.0));
    assert!(render(&unit).starts_with("[Hz; "));
  }

  #[test]
  fn test_render_prefers_names() {
    let names = |unit: &Unit| (unit == &kilometre()).then(|| String::from("km"));
    let renderer = Renderer::new(&names, &FormatOptions::default());
    assert_eq!(renderer.render(&kilometre()), "km");
    assert_eq!(renderer.render(&kilometre().divide(&second())), "km/s");
    assert_eq!(renderer.render(&metre()), "m");
  }

  #[test]
  fn test_format_float() {
    assert_eq!(format_float(2.0), "2.0");
    assert_eq!(format_float(0.5), "0.5");
    assert_eq!(format_float(-3.0), "-3.0");
  }
}
