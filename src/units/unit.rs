use super::converter::{Converter, ConverterError};
use super::dimension::Dimension;
use super::format::output::Renderer;
use super::power::RationalPower;
use super::product::ProductUnit;
use super::rational::ExactRational;
use super::simplifier::normalize;
use crate::util::stricteq::StrictEq;

use num::pow::Pow;
use thiserror::Error;

use std::fmt::{self, Formatter, Display};
use std::hash::{Hash, Hasher};
use std::ops::{Mul, Div};
use std::sync::Arc;

/// A unit of measure.
///
/// Units are immutable and cheap to clone: composite units share their
/// components through reference counting. Build composite units with
/// the combinators ([`Unit::times`], [`Unit::divide`], [`Unit::pow`],
/// [`Unit::scaled`], [`Unit::plus`], ...), which always produce
/// normalized values.
#[derive(Debug, Clone)]
pub enum Unit {
  Base(Arc<BaseUnit>),
  Alternate(Arc<AlternateUnit>),
  Product(Arc<ProductUnit>),
  Transformed(Arc<TransformedUnit>),
}

/// A dimensionally independent unit, such as the metre or the
/// second. Base units are identified by their symbol alone.
#[derive(Debug, Clone)]
pub struct BaseUnit {
  symbol: String,
  dimension: Dimension,
}

/// A named unit which is dimensionally identical to its parent but
/// semantically distinct from it, such as the radian (parent: one) or
/// the newton (parent: kg·m/s²).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlternateUnit {
  name: AlternateName,
  parent: Unit,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AlternateName {
  /// A genuinely new unit with its own symbol.
  Symbol(String),
  /// A unit which only records that its parent measures the named
  /// quantity. Wrappers are transparent to conversion and are
  /// unwrapped when products are normalized.
  Quantity(String),
}

/// A unit reached from `parent` by applying `to_parent` to a value.
/// The converter is never the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransformedUnit {
  parent: Unit,
  to_parent: Converter,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UnitError {
  #[error("Unit '{unit}' has a non-linear converter and cannot appear in a product")]
  NonLinear { unit: String },
  #[error("Cannot raise '{unit}' to the fractional power {exponent}")]
  FractionalExponent { unit: String, exponent: ExactRational },
  #[error("Cannot convert from '{from_unit}' to '{to_unit}'")]
  Incompatible { from_unit: String, to_unit: String },
  #[error(transparent)]
  Converter(#[from] ConverterError),
}

impl Unit {
  /// Constructs a new base unit.
  pub fn base(symbol: impl Into<String>, dimension: impl Into<Dimension>) -> Unit {
    Unit::Base(Arc::new(BaseUnit {
      symbol: symbol.into(),
      dimension: dimension.into(),
    }))
  }

  /// Constructs a new named unit which is dimensionally `parent` but
  /// distinct from it.
  pub fn alternate(symbol: impl Into<String>, parent: &Unit) -> Unit {
    Unit::Alternate(Arc::new(AlternateUnit {
      name: AlternateName::Symbol(symbol.into()),
      parent: parent.clone(),
    }))
  }

  /// Tags `parent` as a unit of the given quantity.
  pub fn for_quantity(parent: &Unit, quantity: impl Into<String>) -> Unit {
    Unit::Alternate(Arc::new(AlternateUnit {
      name: AlternateName::Quantity(quantity.into()),
      parent: parent.clone(),
    }))
  }

  /// The dimensionless unit.
  pub fn one() -> Unit {
    Unit::Product(Arc::new(ProductUnit::default()))
  }

  pub fn is_one(&self) -> bool {
    matches!(self, Unit::Product(product) if product.is_empty())
  }

  /// The symbol of a base unit or a named alternate unit.
  pub fn symbol(&self) -> Option<&str> {
    match self {
      Unit::Base(base) => Some(&base.symbol),
      Unit::Alternate(alt) => match &alt.name {
        AlternateName::Symbol(symbol) => Some(symbol),
        AlternateName::Quantity(_) => None,
      },
      Unit::Product(_) | Unit::Transformed(_) => None,
    }
  }

  /// The quantity name of a quantity wrapper.
  pub fn quantity_tag(&self) -> Option<&str> {
    match self {
      Unit::Alternate(alt) => match &alt.name {
        AlternateName::Quantity(tag) => Some(tag),
        AlternateName::Symbol(_) => None,
      },
      _ => None,
    }
  }

  /// Strips any quantity wrappers from the outside of this unit.
  pub fn unwrap_quantity(&self) -> &Unit {
    let mut unit = self;
    while let Unit::Alternate(alt) = unit {
      if !matches!(alt.name, AlternateName::Quantity(_)) {
        break;
      }
      unit = &alt.parent;
    }
    unit
  }

  pub fn as_product(&self) -> Option<&ProductUnit> {
    match self {
      Unit::Product(product) => Some(product),
      _ => None,
    }
  }

  pub fn as_transformed(&self) -> Option<&TransformedUnit> {
    match self {
      Unit::Transformed(transformed) => Some(transformed),
      _ => None,
    }
  }

  /// This unit as a list of rational powers: the elements of a
  /// product, or the unit itself to the first power.
  pub fn to_powers(&self) -> Vec<RationalPower> {
    match self {
      Unit::Product(product) => product.elements().to_vec(),
      _ => vec![RationalPower::unit(self.clone())],
    }
  }

  pub fn times(&self, other: &Unit) -> Unit {
    normalize([RationalPower::unit(self.clone()), RationalPower::unit(other.clone())])
  }

  pub fn divide(&self, other: &Unit) -> Unit {
    self.times(&other.inverse())
  }

  pub fn inverse(&self) -> Unit {
    normalize([RationalPower::new(self.clone(), -1)])
  }

  pub fn pow(&self, exponent: impl Into<ExactRational>) -> Unit {
    normalize([RationalPower::new(self.clone(), exponent)])
  }

  /// The `n`th root of this unit. Panics if `n == 0`.
  pub fn root(&self, n: i64) -> Unit {
    self.pow(ExactRational::new(1, n))
  }

  /// The unit equal to `factor` of this unit, with an exact factor.
  /// `metre.scaled(1000)` is the kilometre.
  ///
  /// Panics if `factor` is zero.
  pub fn scaled(&self, factor: impl Into<ExactRational>) -> Unit {
    self.transform(Converter::rational(factor))
  }

  /// The unit equal to `factor` of this unit, with a floating-point
  /// factor.
  ///
  /// Panics if `factor` is zero or not finite.
  pub fn scaled_by(&self, factor: f64) -> Unit {
    self.transform(Converter::multiply(factor))
  }

  /// The unit whose zero lies at `offset` of this unit.
  /// `kelvin.plus(273.15)` is degrees Celsius.
  pub fn plus(&self, offset: f64) -> Unit {
    self.transform(Converter::add(offset))
  }

  /// The unit reached by first applying `operation` and then
  /// converting as `self` does. Transforms of a transformed unit
  /// collapse into one converter chain on the innermost parent.
  pub fn transform(&self, operation: Converter) -> Unit {
    match self {
      Unit::Transformed(transformed) => {
        Unit::with_converter(&transformed.parent, transformed.to_parent.concatenate(&operation))
      }
      _ => Unit::with_converter(self, operation),
    }
  }

  /// As [`Unit::transform`], but fails instead of keeping separate
  /// stages when composing floating-point factors leaves the `f64`
  /// range.
  pub fn try_transform(&self, operation: Converter) -> Result<Unit, ConverterError> {
    match self {
      Unit::Transformed(transformed) => {
        Ok(Unit::with_converter(&transformed.parent, transformed.to_parent.try_concatenate(&operation)?))
      }
      _ => Ok(Unit::with_converter(self, operation)),
    }
  }

  fn with_converter(parent: &Unit, to_parent: Converter) -> Unit {
    if to_parent.is_identity() {
      parent.clone()
    } else {
      Unit::Transformed(Arc::new(TransformedUnit {
        parent: parent.clone(),
        to_parent,
      }))
    }
  }

  /// The canonical system unit this unit converts through: a base
  /// unit, a named alternate unit, or a product of those.
  pub fn standard_unit(&self) -> Unit {
    match self {
      Unit::Base(_) => self.clone(),
      Unit::Alternate(alt) => match alt.name {
        AlternateName::Symbol(_) => self.clone(),
        AlternateName::Quantity(_) => alt.parent.standard_unit(),
      },
      Unit::Product(product) => {
        normalize(product.iter().map(|elem| RationalPower {
          base: elem.base.standard_unit(),
          exponent: elem.exponent.clone(),
        }))
      }
      Unit::Transformed(transformed) => transformed.parent.standard_unit(),
    }
  }

  /// The converter from this unit to [`Unit::standard_unit`].
  ///
  /// Fails if a factor of a product has a non-linear converter (such
  /// as degrees Celsius inside `°C/s`), if a factor with a
  /// non-trivial converter is raised to a fractional power, or if the
  /// overall scale factor is out of range.
  pub fn to_standard_unit(&self) -> Result<Converter, UnitError> {
    match self {
      Unit::Base(_) => Ok(Converter::Identity),
      Unit::Alternate(alt) => match alt.name {
        AlternateName::Symbol(_) => Ok(Converter::Identity),
        AlternateName::Quantity(_) => alt.parent.to_standard_unit(),
      },
      Unit::Product(product) => {
        let mut converter = Converter::Identity;
        for elem in product.iter() {
          let elem_converter = elem.base.to_standard_unit()?;
          if elem_converter.is_identity() {
            continue;
          }
          if !elem_converter.is_linear() {
            return Err(UnitError::NonLinear { unit: elem.base.to_string() });
          }
          let Some(exponent) = elem.exponent.to_i64() else {
            return Err(UnitError::FractionalExponent {
              unit: elem.base.to_string(),
              exponent: elem.exponent.clone(),
            });
          };
          let powered = elem_converter.powi(exponent)?;
          converter = converter.try_concatenate(&powered)?;
        }
        Ok(converter)
      }
      Unit::Transformed(transformed) => {
        let parent_converter = transformed.parent.to_standard_unit()?;
        Ok(parent_converter.try_concatenate(&transformed.to_parent)?)
      }
    }
  }

  pub fn dimension(&self) -> Dimension {
    match self {
      Unit::Base(base) => base.dimension.clone(),
      Unit::Alternate(alt) => alt.parent.dimension(),
      Unit::Product(product) => product.dimension(),
      Unit::Transformed(transformed) => transformed.parent.dimension(),
    }
  }

  /// This unit expanded all the way down to a product of base units,
  /// looking through alternate units and transforms.
  pub fn base_units(&self) -> Unit {
    match self {
      Unit::Base(_) => self.clone(),
      Unit::Alternate(alt) => alt.parent.base_units(),
      Unit::Product(product) => {
        normalize(product.iter().map(|elem| RationalPower {
          base: elem.base.base_units(),
          exponent: elem.exponent.clone(),
        }))
      }
      Unit::Transformed(transformed) => transformed.parent.base_units(),
    }
  }
}

impl BaseUnit {
  pub fn symbol(&self) -> &str {
    &self.symbol
  }

  pub fn dimension(&self) -> &Dimension {
    &self.dimension
  }
}

impl AlternateUnit {
  pub fn name(&self) -> &AlternateName {
    &self.name
  }

  pub fn parent(&self) -> &Unit {
    &self.parent
  }
}

impl TransformedUnit {
  pub fn parent(&self) -> &Unit {
    &self.parent
  }

  pub fn to_parent(&self) -> &Converter {
    &self.to_parent
  }
}

impl PartialEq for BaseUnit {
  fn eq(&self, other: &Self) -> bool {
    self.symbol == other.symbol
  }
}

impl Eq for BaseUnit {}

impl Hash for BaseUnit {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.symbol.hash(state);
  }
}

impl PartialEq for Unit {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Unit::Base(a), Unit::Base(b)) => Arc::ptr_eq(a, b) || a == b,
      (Unit::Alternate(a), Unit::Alternate(b)) => Arc::ptr_eq(a, b) || a == b,
      (Unit::Product(a), Unit::Product(b)) => Arc::ptr_eq(a, b) || a == b,
      (Unit::Transformed(a), Unit::Transformed(b)) => Arc::ptr_eq(a, b) || a == b,
      _ => false,
    }
  }
}

impl Eq for Unit {}

impl Hash for Unit {
  fn hash<H: Hasher>(&self, state: &mut H) {
    std::mem::discriminant(self).hash(state);
    match self {
      Unit::Base(base) => base.hash(state),
      Unit::Alternate(alt) => alt.hash(state),
      Unit::Product(product) => product.hash(state),
      Unit::Transformed(transformed) => transformed.hash(state),
    }
  }
}

impl StrictEq for Unit {
  fn strict_eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Unit::Base(a), Unit::Base(b)) => a.symbol == b.symbol && a.dimension == b.dimension,
      (Unit::Alternate(a), Unit::Alternate(b)) => a.name == b.name && a.parent.strict_eq(&b.parent),
      (Unit::Product(a), Unit::Product(b)) => a.strict_eq(b),
      (Unit::Transformed(a), Unit::Transformed(b)) => {
        a.parent.strict_eq(&b.parent) && a.to_parent.strict_eq(&b.to_parent)
      }
      _ => false,
    }
  }
}

impl Default for Unit {
  fn default() -> Self {
    Unit::one()
  }
}

impl Display for Unit {
  /// Renders the unit structurally, from symbols alone. Use
  /// [`UnitFormat`](super::format::UnitFormat) to render with
  /// catalog names and labels.
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", Renderer::structural().render(self))
  }
}

impl Display for AlternateName {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      AlternateName::Symbol(symbol) => write!(f, "{}", symbol),
      AlternateName::Quantity(tag) => write!(f, "<{}>", tag),
    }
  }
}

impl Mul for &Unit {
  type Output = Unit;

  fn mul(self, rhs: &Unit) -> Unit {
    self.times(rhs)
  }
}

impl Div for &Unit {
  type Output = Unit;

  fn div(self, rhs: &Unit) -> Unit {
    self.divide(rhs)
  }
}

impl Pow<i64> for &Unit {
  type Output = Unit;

  fn pow(self, rhs: i64) -> Unit {
    Unit::pow(self, rhs)
  }
}

impl Pow<ExactRational> for &Unit {
  type Output = Unit;

  fn pow(self, rhs: ExactRational) -> Unit {
    Unit::pow(self, rhs)
  }
}
