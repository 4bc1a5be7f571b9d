//! Tri-state field values for partial updates.

use serde::{Deserialize, Deserializer};

/// One field of an update request.
///
/// `Unset` means the client never mentioned the field, `Null` means it sent an explicit
/// `null`, and `Value` carries the supplied value. Deserialized with `#[serde(default)]`,
/// a missing JSON key becomes `Unset`:
///
/// ```rust
/// use catalog::model::Patch;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Body {
///     #[serde(default)]
///     name: Patch<String>,
/// }
///
/// let missing: Body = serde_json::from_str("{}").unwrap();
/// let null: Body = serde_json::from_str(r#"{"name": null}"#).unwrap();
/// let value: Body = serde_json::from_str(r#"{"name": "Mug"}"#).unwrap();
///
/// assert_eq!(missing.name, Patch::Unset);
/// assert_eq!(null.name, Patch::Null);
/// assert_eq!(value.name, Patch::Value("Mug".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Unset,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    /// Whether the field was supplied at all, null included.
    pub fn is_set(&self) -> bool {
        !matches!(self, Patch::Unset)
    }

    /// The supplied value; `None` when unset or null.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(value) => Some(value),
            Patch::Unset | Patch::Null => None,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Patch::Null, Patch::Value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_set_but_has_no_value() {
        let patch: Patch<f64> = None.into();
        assert!(patch.is_set());
        assert_eq!(patch.value(), None);

        assert!(!Patch::<f64>::Unset.is_set());
        assert_eq!(Patch::Value(2.5).value(), Some(&2.5));
    }
}
