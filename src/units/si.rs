//! Constructors for common SI and SI-accepted units.
//!
//! Each call builds a fresh value. Base units are identified by
//! symbol, so separately constructed copies compare equal.

use super::dimension::BaseDimension;
use super::rational::ExactRational;
use super::unit::Unit;

use std::f64::consts::PI;

pub fn metre() -> Unit {
  Unit::base("m", BaseDimension::Length)
}

pub fn kilogram() -> Unit {
  Unit::base("kg", BaseDimension::Mass)
}

pub fn second() -> Unit {
  Unit::base("s", BaseDimension::Time)
}

pub fn ampere() -> Unit {
  Unit::base("A", BaseDimension::Current)
}

pub fn kelvin() -> Unit {
  Unit::base("K", BaseDimension::Temperature)
}

pub fn mole() -> Unit {
  Unit::base("mol", BaseDimension::AmountOfSubstance)
}

pub fn candela() -> Unit {
  Unit::base("cd", BaseDimension::LuminousIntensity)
}

pub fn gram() -> Unit {
  kilogram().scaled((1, 1000))
}

pub fn kilometre() -> Unit {
  metre().scaled(1000)
}

pub fn minute() -> Unit {
  second().scaled(60)
}

pub fn hour() -> Unit {
  second().scaled(3600)
}

pub fn litre() -> Unit {
  metre().pow(3).scaled((1, 1000))
}

pub fn inch() -> Unit {
  metre().scaled(ExactRational::new(254, 10_000))
}

pub fn foot() -> Unit {
  inch().scaled(12)
}

pub fn radian() -> Unit {
  Unit::alternate("rad", &Unit::one())
}

pub fn degree() -> Unit {
  radian().scaled_by(PI / 180.0)
}

pub fn hertz() -> Unit {
  Unit::alternate("Hz", &second().inverse())
}

pub fn newton() -> Unit {
  Unit::alternate("N", &kilogram().times(&metre()).divide(&second().pow(2)))
}

pub fn joule() -> Unit {
  Unit::alternate("J", &newton().times(&metre()))
}

pub fn watt() -> Unit {
  Unit::alternate("W", &joule().divide(&second()))
}

pub fn pascal() -> Unit {
  Unit::alternate("Pa", &newton().divide(&metre().pow(2)))
}

pub fn coulomb() -> Unit {
  Unit::alternate("C", &ampere().times(&second()))
}

pub fn volt() -> Unit {
  Unit::alternate("V", &watt().divide(&ampere()))
}

pub fn celsius() -> Unit {
  kelvin().plus(273.15)
}

/// Degrees Fahrenheit: `x °F = (x + 459.67) · 5/9 K`.
pub fn fahrenheit() -> Unit {
  kelvin().scaled((5, 9)).plus(459.67)
}
