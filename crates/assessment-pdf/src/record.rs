//! Form data as handed over by the form collaborator

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One element of a repeatable section, keyed by sub-field name.
pub type GroupRecord = HashMap<String, String>;

/// Value stored under a top-level form key.
///
/// Numbers and bools are kept as their JSON text, `null` as `""`. Anything
/// that is neither a scalar nor an array of objects lands in `Other` and is
/// never rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Groups(Vec<GroupRecord>),
    Other(Value),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) if items.iter().all(Value::is_object) => FieldValue::Groups(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(map) => Some(
                            map.into_iter()
                                .map(|(k, v)| (k, scalar_text(v).unwrap_or_default()))
                                .collect(),
                        ),
                        _ => None,
                    })
                    .collect(),
            ),
            other @ (Value::Array(_) | Value::Object(_)) => FieldValue::Other(other),
            scalar => FieldValue::Text(scalar_text(scalar).unwrap_or_default()),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FieldValue::from)
    }
}

/// Text form of a JSON scalar; `None` for arrays and objects.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Submitted form, keyed by field name.
///
/// Key order carries no meaning; rendering order comes from
/// [`crate::fields::FIELD_ORDER`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormRecord {
    fields: HashMap<String, FieldValue>,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a form from its JSON object representation
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), FieldValue::Text(value.into()));
    }

    pub fn insert_groups(&mut self, key: impl Into<String>, groups: Vec<GroupRecord>) {
        self.fields.insert(key.into(), FieldValue::Groups(groups));
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for FormRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_scalars_and_groups() {
        let json = r#"{
            "Collateral Owner": "Ada",
            "Collateral": [{"Collateral Type": "Car"}, {"Collateral Type": "Land"}]
        }"#;
        let form = FormRecord::from_json(json).unwrap();

        assert_eq!(form.len(), 2);
        assert_eq!(
            form.get("Collateral Owner"),
            Some(&FieldValue::Text("Ada".to_string()))
        );
        match form.get("Collateral") {
            Some(FieldValue::Groups(groups)) => {
                assert_eq!(groups.len(), 2);
                assert_eq!(groups[1]["Collateral Type"], "Land");
            }
            other => panic!("expected groups, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_group_array_parses_as_groups() {
        let form = FormRecord::from_json(r#"{"Vehicle Mortgage": []}"#).unwrap();
        assert_eq!(
            form.get("Vehicle Mortgage"),
            Some(&FieldValue::Groups(vec![]))
        );
    }

    #[test]
    fn test_null_scalar_reads_as_empty() {
        let form = FormRecord::from_json(r#"{"HG": null, "Witness Name": "Bola"}"#).unwrap();
        assert_eq!(form.get("HG"), Some(&FieldValue::Text(String::new())));
        assert_eq!(
            form.get("Witness Name"),
            Some(&FieldValue::Text("Bola".to_string()))
        );
    }

    #[test]
    fn test_numbers_and_bools_read_as_text() {
        let form =
            FormRecord::from_json(r#"{"Inventory Market Value": 1500000, "Foo": true}"#).unwrap();
        assert_eq!(
            form.get("Inventory Market Value"),
            Some(&FieldValue::Text("1500000".to_string()))
        );
        assert_eq!(form.get("Foo"), Some(&FieldValue::Text("true".to_string())));
    }

    #[test]
    fn test_group_sub_fields_are_coerced() {
        let json = r#"{"Collateral": [{"Collateral Type": null, "Collateral Value": 250000}]}"#;
        let form = FormRecord::from_json(json).unwrap();
        match form.get("Collateral") {
            Some(FieldValue::Groups(groups)) => {
                assert_eq!(groups[0]["Collateral Type"], "");
                assert_eq!(groups[0]["Collateral Value"], "250000");
            }
            other => panic!("expected groups, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognised_shapes_are_kept_aside() {
        let form = FormRecord::from_json(r#"{"Foo": {"a": 1}, "Bar": [1, 2]}"#).unwrap();
        assert!(matches!(form.get("Foo"), Some(FieldValue::Other(_))));
        assert!(matches!(form.get("Bar"), Some(FieldValue::Other(_))));
    }

    #[test]
    fn test_builder_methods() {
        let mut form = FormRecord::new();
        assert!(form.is_empty());
        form.insert_text("HG", "yes");
        form.insert_groups("Collateral", vec![GroupRecord::new()]);
        assert_eq!(form.len(), 2);
    }
}
