//! Fixed field order tables for the guarantor assessment form
//!
//! Every renderable field is listed here together with the format applied to
//! its value. Anything the form carries that is not listed is never rendered.

use serde::{Deserialize, Serialize};

/// How a field's raw value is transformed before it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    /// Calendar date rendered as `DD/MM/YYYY`
    Date,
    /// Number rendered with thousands separators
    Currency,
    /// Value written unchanged
    PlainText,
}

impl FieldFormat {
    /// Classify a label by case-insensitive substring match.
    ///
    /// "date" wins over "value"/"purchase". This is purely lexical, so any
    /// label that happens to contain one of the words is caught too
    /// ("Candidate" contains "date"). The order tables carry explicit formats
    /// instead of calling this at render time.
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("date") {
            FieldFormat::Date
        } else if label.contains("value") || label.contains("purchase") {
            FieldFormat::Currency
        } else {
            FieldFormat::PlainText
        }
    }
}

/// A named field and the format of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub format: FieldFormat,
}

const fn plain(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        format: FieldFormat::PlainText,
    }
}

const fn currency(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        format: FieldFormat::Currency,
    }
}

const fn date(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        format: FieldFormat::Date,
    }
}

/// Repeatable sections of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Collateral,
    VehicleMortgage,
    LandBuildingMortgage,
}

impl GroupKind {
    /// Form key holding the array of group records
    pub fn field_name(&self) -> &'static str {
        match self {
            GroupKind::Collateral => "Collateral",
            GroupKind::VehicleMortgage => "Vehicle Mortgage",
            GroupKind::LandBuildingMortgage => "Land & Building Mortgage",
        }
    }

    /// Sub-fields in render order
    pub fn sub_fields(&self) -> &'static [FieldSpec] {
        match self {
            GroupKind::Collateral => COLLATERAL_FIELDS,
            GroupKind::VehicleMortgage => VEHICLE_MORTGAGE_FIELDS,
            GroupKind::LandBuildingMortgage => LAND_BUILDING_FIELDS,
        }
    }
}

/// One entry of the top-level order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevelField {
    Scalar(FieldSpec),
    Group(GroupKind),
}

impl TopLevelField {
    pub fn name(&self) -> &'static str {
        match self {
            TopLevelField::Scalar(spec) => spec.name,
            TopLevelField::Group(kind) => kind.field_name(),
        }
    }
}

pub const COLLATERAL_FIELDS: &[FieldSpec] = &[
    plain("Collateral Type"),
    plain("Collateral Desc of item"),
    // currency through "purchase": 2019 renders as 2,019
    currency("Collateral Year of Purchase"),
    currency("Collateral Purchase Value"),
    currency("Collateral Market Value"),
    currency("Collateral Liquidation Value"),
];

pub const VEHICLE_MORTGAGE_FIELDS: &[FieldSpec] = &[
    plain("Vehicle Mortgage Year"),
    plain("Vehicle Mortgage Color"),
    plain("Vehicle Mortgage Type"),
    plain("Vehicle Mortgage Reg No"),
    plain("Vehicle Mortgage Engine No"),
    plain("Vehicle Mortgage Chasis No"),
    currency("Vehicle Mortgage Purchase Value"),
    currency("Vehicle Mortgage Market Value"),
    currency("Vehicle Mortgage Liquidation Value"),
];

pub const LAND_BUILDING_FIELDS: &[FieldSpec] = &[
    currency("Land & Building Market Value"),
    currency("Land & Building Force Sale Value"),
    plain("Land & Building Description"),
];

pub const FIELD_ORDER: &[TopLevelField] = &[
    TopLevelField::Scalar(plain("Collateral Owner")),
    TopLevelField::Group(GroupKind::Collateral),
    TopLevelField::Scalar(currency("Inventory Market Value")),
    TopLevelField::Scalar(currency("Inventory Liquidation Value")),
    TopLevelField::Group(GroupKind::VehicleMortgage),
    TopLevelField::Group(GroupKind::LandBuildingMortgage),
    TopLevelField::Scalar(plain("HG")),
    TopLevelField::Scalar(plain("BA")),
    TopLevelField::Scalar(plain("INV")),
    TopLevelField::Scalar(plain("VMG")),
    TopLevelField::Scalar(plain("LBMG")),
    TopLevelField::Scalar(plain("Others")),
    TopLevelField::Scalar(plain("Collateral Owner Name")),
    TopLevelField::Scalar(date("Collateral Owner Signature Date")),
    TopLevelField::Scalar(plain("Witness Name")),
    TopLevelField::Scalar(date("Witness Signature Date")),
];

/// All group kinds in top-level order
pub fn group_kinds() -> impl Iterator<Item = GroupKind> {
    FIELD_ORDER.iter().filter_map(|field| match field {
        TopLevelField::Group(kind) => Some(*kind),
        TopLevelField::Scalar(_) => None,
    })
}
