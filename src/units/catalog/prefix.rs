use super::base::UnitCatalog;
use crate::units::prefix::MetricPrefix;
use crate::units::unit::Unit;

use std::collections::HashMap;

/// A catalog which extends an inner catalog with prefixed names, such
/// as `km` for the `k` prefix applied to the inner catalog's `m`.
///
/// Names known to the inner catalog always win over prefixed
/// readings, so `min` is the minute and not a milli-inch.
pub struct PrefixCatalog<C> {
  inner: C,
  prefixes: Vec<MetricPrefix>,
  prefixes_by_name: HashMap<String, MetricPrefix>,
  longest_prefix_len: usize,
}

impl<C> PrefixCatalog<C> {
  /// Prefixes earlier in `prefixes` are preferred when naming units.
  pub fn new(inner: C, prefixes: impl IntoIterator<Item = MetricPrefix>) -> Self {
    let prefixes: Vec<_> = prefixes.into_iter().collect();
    let prefixes_by_name: HashMap<_, _> = prefixes.iter().map(|p| (p.prefix_name.clone(), p.clone())).collect();
    let longest_prefix_len = prefixes.iter().map(|p| p.prefix_name.len()).max().unwrap_or(0);
    Self { inner, prefixes, prefixes_by_name, longest_prefix_len }
  }

  /// A `PrefixCatalog` based on the given inner catalog, which accepts
  /// standard SI prefixes, as per [`MetricPrefix::si_prefixes`].
  pub fn new_si(inner: C) -> Self {
    Self::new(inner, MetricPrefix::si_prefixes())
  }

  pub fn inner(&self) -> &C {
    &self.inner
  }

  pub fn prefixes(&self) -> &[MetricPrefix] {
    &self.prefixes
  }
}

impl<C: UnitCatalog> UnitCatalog for PrefixCatalog<C> {
  fn unit_for(&self, name: &str) -> Option<Unit> {
    self.inner.unit_for(name).or_else(|| {
      for i in 1..=self.longest_prefix_len {
        if !name.is_char_boundary(i) {
          continue;
        }
        let (prefix, rest) = name.split_at(i);
        if let Some(prefix) = self.prefixes_by_name.get(prefix) {
          if let Some(unit) = self.inner.unit_for(rest) {
            return Some(prefix.apply(&unit));
          }
        }
      }
      None
    })
  }

  fn name_for(&self, unit: &Unit) -> Option<String> {
    self.inner.name_for(unit).or_else(|| {
      // Only transformed units can carry a prefix.
      unit.as_transformed()?;
      self.prefixes.iter().find_map(|prefix| {
        let unprefixed = prefix.unapply(unit);
        let inner_name = self.inner.name_for(&unprefixed)?;
        let name = format!("{}{}", prefix, inner_name);
        // Reject names that read back as something else, such as a
        // prefixed name which collides with an inner name.
        (self.unit_for(&name).as_ref() == Some(unit)).then_some(name)
      })
    })
  }
}
