//! Present/absent field marker for partial updates.

use serde::{Deserialize, Deserializer};

/// A field of a partial-update payload.
///
/// Distinguishes three wire states: the field was absent, the field was
/// present but null, and the field carried a value. Only `Value` overwrites
/// stored state; `Null` is currently treated like `Absent`. Keeping the
/// three states separate means "present null clears the field" becomes a
/// local change here if that behavior is ever wanted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    /// Overwrite `target` if this patch carries a value.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Value(value) = self {
            *target = value;
        }
    }

    /// Overwrite an optional `target` if this patch carries a value.
    pub fn apply_to_option(self, target: &mut Option<T>) {
        if let Patch::Value(value) = self {
            *target = Some(value);
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Reached only when the field is present; `#[serde(default)]` on the
        // containing struct produces `Absent` for missing fields.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Default)]
    struct Payload {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        address: Patch<String>,
    }

    #[test]
    fn distinguishes_absent_null_and_value() {
        let payload: Payload = serde_json::from_str(r#"{"name": "A", "address": null}"#).unwrap();
        assert_eq!(payload.name, Patch::Value("A".to_string()));
        assert_eq!(payload.address, Patch::Null);

        let payload: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.name, Patch::Absent);
    }

    #[test]
    fn only_values_overwrite() {
        let mut name = "before".to_string();
        Patch::Absent.apply_to(&mut name);
        assert_eq!(name, "before");
        Patch::Null.apply_to(&mut name);
        assert_eq!(name, "before");
        Patch::Value("after".to_string()).apply_to(&mut name);
        assert_eq!(name, "after");

        let mut address = Some("old".to_string());
        Patch::Null.apply_to_option(&mut address);
        assert_eq!(address.as_deref(), Some("old"));
        Patch::Value("new".to_string()).apply_to_option(&mut address);
        assert_eq!(address.as_deref(), Some("new"));
    }
}
