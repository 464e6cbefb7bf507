use serde::{Serialize, Deserialize};

/// Display settings for a [`UnitFormat`](super::UnitFormat).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
  /// If true, products are joined with `·` and small exponents are
  /// written as superscripts. Otherwise `*` and `^2` are used. This
  /// does NOT affect input, which always accepts either form,
  /// regardless of this flag.
  pub prefers_unicode_output: bool,
  /// If true, the formatter asks the unit catalog for a name when no
  /// explicit label exists.
  pub use_catalog_names: bool,
}

impl FormatOptions {
  pub fn ascii() -> Self {
    Self { prefers_unicode_output: false, ..Self::default() }
  }

  pub fn from_json(json: &str) -> serde_json::Result<Self> {
    serde_json::from_str(json)
  }

  pub fn product_separator(&self) -> &'static str {
    if self.prefers_unicode_output { "·" } else { "*" }
  }
}

impl Default for FormatOptions {
  fn default() -> Self {
    Self {
      prefers_unicode_output: true,
      use_catalog_names: true,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let options = FormatOptions::default();
    assert!(options.prefers_unicode_output);
    assert!(options.use_catalog_names);
    assert_eq!(options.product_separator(), "·");
    assert_eq!(FormatOptions::ascii().product_separator(), "*");
  }

  #[test]
  fn test_from_json_fills_missing_fields() {
    let options = FormatOptions::from_json(r#"{"prefers_unicode_output": false}"#).unwrap();
    assert_eq!(options, FormatOptions::ascii());
    let options = FormatOptions::from_json("{}").unwrap();
    assert_eq!(options, FormatOptions::default());
  }

  #[test]
  fn test_json_round_trip() {
    let options = FormatOptions { prefers_unicode_output: false, use_catalog_names: false };
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!(FormatOptions::from_json(&json).unwrap(), options);
  }

  #[test]
  fn test_from_json_rejects_bad_types() {
    assert!(FormatOptions::from_json(r#"{"use_catalog_names": 1}"#).is_err());
  }
}
