use super::prefix::PrefixCatalog;
use super::table::TableCatalog;
use crate::units::quantity::Quantity;
use crate::units::si::*;
use crate::units::unit::Unit;

/// The default unit catalog: [`default_units_table`] with SI
/// prefixes.
pub fn default_catalog() -> PrefixCatalog<TableCatalog> {
  PrefixCatalog::new_si(default_units_table())
}

pub fn default_units_table() -> TableCatalog {
  let units = vec![
    // Base units
    ("m", metre()),
    ("kg", kilogram()),
    ("s", second()),
    ("A", ampere()),
    ("K", kelvin()),
    ("mol", mole()),
    ("cd", candela()),
    // Derived units with special names
    ("g", gram()),
    ("rad", radian()),
    ("Hz", hertz()),
    ("N", newton()),
    ("J", joule()),
    ("W", watt()),
    ("Pa", pascal()),
    ("C", coulomb()),
    ("V", volt()),
    // Non-SI units
    ("L", litre()),
    ("min", minute()),
    ("h", hour()),
    ("in", inch()),
    ("ft", foot()),
    ("deg", degree()),
    ("°C", celsius()),
    ("°F", fahrenheit()),
  ];
  let mut table: TableCatalog = units.into_iter().collect();
  table.alias("l", litre());
  table.alias("hr", hour());
  table.alias("sec", second());
  table.alias("°", degree());
  table.alias("degC", celsius());
  table.alias("degF", fahrenheit());
  table
}

/// The quantities of the SI base units and the common derived
/// quantities.
pub fn default_quantities() -> Vec<Quantity> {
  vec![
    Quantity::new("Dimensionless", Unit::one()),
    Quantity::new("Length", metre()),
    Quantity::new("Mass", kilogram()),
    Quantity::new("Time", second()),
    Quantity::new("ElectricCurrent", ampere()),
    Quantity::new("Temperature", kelvin()),
    Quantity::new("AmountOfSubstance", mole()),
    Quantity::new("LuminousIntensity", candela()),
    Quantity::new("Angle", radian()),
    Quantity::new("Area", metre().pow(2)),
    Quantity::new("Volume", metre().pow(3)),
    Quantity::new("Velocity", metre().divide(&second())),
    Quantity::new("Acceleration", metre().divide(&second().pow(2))),
    Quantity::new("Density", kilogram().divide(&metre().pow(3))),
    Quantity::new("Frequency", hertz()),
    Quantity::new("Force", newton()),
    Quantity::new("Energy", joule()),
    Quantity::new("Torque", Unit::for_quantity(&newton().times(&metre()), "Torque")),
    Quantity::new("Power", watt()),
    Quantity::new("Pressure", pascal()),
    Quantity::new("Charge", coulomb()),
    Quantity::new("Voltage", volt()),
  ]
}
