//! Flattens a form into label/value pairs in the fixed render order

use crate::fields::{FieldFormat, FieldSpec, GroupKind, TopLevelField, FIELD_ORDER};
use crate::record::{FieldValue, FormRecord, GroupRecord};

/// A label and its unformatted value, tagged with the format to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedPair {
    pub label: String,
    pub value: String,
    pub format: FieldFormat,
}

impl OrderedPair {
    fn new(spec: &FieldSpec, value: &str) -> Self {
        Self {
            label: spec.name.to_string(),
            value: value.to_string(),
            format: spec.format,
        }
    }
}

/// Order a form using the built-in field tables.
pub fn order_fields(form: &FormRecord) -> Vec<OrderedPair> {
    order_fields_with(form, FIELD_ORDER)
}

/// Order a form against an explicit top-level table.
///
/// Keys not named by `order` are dropped. Missing values become empty
/// strings.
pub fn order_fields_with(form: &FormRecord, order: &[TopLevelField]) -> Vec<OrderedPair> {
    let mut pairs = Vec::new();

    for field in order {
        match field {
            TopLevelField::Scalar(spec) => {
                let value = match form.get(spec.name) {
                    Some(FieldValue::Text(text)) => text.as_str(),
                    _ => "",
                };
                pairs.push(OrderedPair::new(spec, value));
            }
            TopLevelField::Group(kind) => match form.get(kind.field_name()) {
                Some(FieldValue::Groups(groups)) => {
                    for group in groups {
                        push_group(&mut pairs, *kind, group);
                    }
                }
                // A group field without an array still shows up as one empty line.
                _ => pairs.push(OrderedPair {
                    label: kind.field_name().to_string(),
                    value: String::new(),
                    format: FieldFormat::classify(kind.field_name()),
                }),
            },
        }
    }

    pairs
}

fn push_group(pairs: &mut Vec<OrderedPair>, kind: GroupKind, group: &GroupRecord) {
    for spec in kind.sub_fields() {
        let value = group.get(spec.name).map(String::as_str).unwrap_or("");
        pairs.push(OrderedPair::new(spec, value));
    }
}
