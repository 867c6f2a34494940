//! Normalisation and matching of records against query parameters.
//!
//! # Matching rules
//!
//! - Text fields (`name`, `loc`, `add`, `location`) match when the normalised
//!   record value *contains* the normalised query value.
//! - Donor `id` and `bloodgroup` match on normalised equality. The Rh sign is
//!   punctuation to [`normalize`], so `?bloodgroup=O` finds `O+` and `O-` donors.
//! - Absent (or empty) parameters impose no constraint; present ones are ANDed.
//!
//! Record fields holding strings or numbers are compared through their string
//! form. A present constraint is never satisfied by a missing field.

use serde_json::Value;

use crate::config::AvailabilityPolicy;
use crate::model::{BloodbankQuery, DonorQuery, LocationQuery, Record};

/// Lowercase `text` and drop every character that is not alphanumeric.
///
/// `"St. Mary's  Hospital"` becomes `"stmaryshospital"`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// How a single field is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Normalised substring containment.
    Contains,
    /// Normalised equality.
    Exact,
}

/// A constraint on one record field. The expected value is stored normalised.
#[derive(Debug, Clone)]
pub struct FieldMatch {
    field: &'static str,
    expected: String,
    mode: MatchMode,
}

impl FieldMatch {
    /// Build a constraint on `field`, normalising `value`.
    pub fn new(field: &'static str, value: &str, mode: MatchMode) -> Self {
        Self {
            field,
            expected: normalize(value),
            mode,
        }
    }

    /// Whether `record` satisfies this constraint.
    pub fn matches(&self, record: &Record) -> bool {
        let Some(actual) = record.get(self.field).and_then(field_text) else {
            return false;
        };
        let actual = normalize(&actual);

        match self.mode {
            MatchMode::Contains => actual.contains(&self.expected),
            MatchMode::Exact => actual == self.expected,
        }
    }
}

/// The conjunction of field constraints for one collection request.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    fields: Vec<FieldMatch>,
    require_available: bool,
}

impl RecordFilter {
    /// A filter that accepts every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint when `value` is present and non-empty.
    pub fn with_field(mut self, field: &'static str, value: Option<&str>, mode: MatchMode) -> Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.fields.push(FieldMatch::new(field, value, mode));
        }
        self
    }

    /// Only accept records whose `available` field is `true`.
    pub fn require_available(mut self) -> Self {
        self.require_available = true;
        self
    }

    /// Whether any field constraint is present.
    pub fn has_constraints(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Whether `record` satisfies every constraint.
    pub fn matches(&self, record: &Record) -> bool {
        if self.require_available && !is_available(record) {
            return false;
        }
        self.fields.iter().all(|field| field.matches(record))
    }

    /// Keep the records that satisfy every constraint, preserving order.
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }

    /// Filter for `GET /bloodbank`.
    pub fn for_bloodbanks(query: &BloodbankQuery) -> Self {
        Self::new()
            .with_field("name", query.name.as_deref(), MatchMode::Contains)
            .with_field("loc", query.loc.as_deref(), MatchMode::Contains)
            .with_field("add", query.add.as_deref(), MatchMode::Contains)
    }

    /// Filter for `GET /donor`.
    pub fn for_donors(query: &DonorQuery, policy: AvailabilityPolicy) -> Self {
        let filter = Self::new()
            .with_field("id", query.id.as_deref(), MatchMode::Exact)
            .with_field("location", query.location.as_deref(), MatchMode::Contains)
            .with_field("bloodgroup", query.bloodgroup.as_deref(), MatchMode::Exact);

        match policy {
            AvailabilityPolicy::Always => filter.require_available(),
            AvailabilityPolicy::WhenFiltered if filter.has_constraints() => {
                filter.require_available()
            }
            AvailabilityPolicy::WhenFiltered => filter,
        }
    }

    /// Filter for `GET /camps` and `GET /events`.
    pub fn for_locations(query: &LocationQuery) -> Self {
        Self::new().with_field("location", query.location.as_deref(), MatchMode::Contains)
    }
}

/// First record whose `id` equals `id` exactly.
pub fn find_by_id(records: Vec<Record>, id: &str) -> Option<Record> {
    records
        .into_iter()
        .find(|record| record.get("id").and_then(field_text).as_deref() == Some(id))
}

/// String form of a scalar field value.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_available(record: &Record) -> bool {
    record.get("available").and_then(Value::as_bool) == Some(true)
}
