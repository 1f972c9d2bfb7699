//! Survey normalization
//!
//! A raw survey nests its work entries under `sors` as either a flat list or
//! a category → list-of-items mapping (sometimes two levels deep in older
//! batches). Normalization rebuilds that discriminated union once, as a flat
//! tagged list of [`LineItem`]s with the category stamped on each item, so no
//! dashboard re-derives flatten-by-category logic.

use super::coerce;
use super::date::parse_date_stamp;
use crate::store::RawRecord;
use crate::types::{DateStamp, LngLat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category key under which contractor work entries are filed
pub const CONTRACTOR_CATEGORY: &str = "contractor work";

/// One quoted/recharged work entry, flattened out of the nested raw shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The `sors` section this item came from (empty for list-form records)
    pub category: String,
    /// Schedule-of-rates code
    pub code: String,
    /// Work description
    pub description: String,
    /// Quantity quoted
    pub quantity: f64,
    /// Quoted cost
    pub cost: f64,
    /// Whether the item is flagged as rechargeable
    pub recharge: bool,
    /// Recharge cost for this item
    pub recharge_cost: f64,
    /// Recharge time for this item
    pub recharge_time: f64,
    /// Surveyor comment
    pub comment: String,
    /// Time estimate in minutes
    pub time_estimate: f64,
    /// Contractor name, if one was assigned
    pub contractor: String,
}

impl LineItem {
    fn from_value(category: &str, value: &Value) -> Option<LineItem> {
        let obj = value.as_object()?;
        Some(LineItem {
            category: category.to_string(),
            code: coerce::string(obj.get("code")),
            description: coerce::string(obj.get("description")),
            quantity: coerce::num(obj.get("quantity")),
            cost: coerce::num(obj.get("cost")),
            recharge: coerce::truthy_flag(obj.get("recharge")),
            recharge_cost: coerce::num(obj.get("rechargeCost")),
            recharge_time: coerce::num(obj.get("rechargeTime")),
            comment: coerce::string(obj.get("comment")),
            time_estimate: coerce::num(obj.get("timeEstimate")),
            contractor: coerce::string(obj.get("contractor")),
        })
    }
}

/// Pre-computed totals carried on the raw survey
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurveyTotals {
    /// Total quoted cost
    pub cost: f64,
    /// Total recharge cost
    pub recharge_cost: f64,
    /// Void duration in decimal days
    pub days_decimal: f64,
    /// Recharge duration in decimal days
    pub recharge_days_decimal: f64,
    /// Standard minute value total
    pub smv: f64,
}

/// A survey submission in stable, flat form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSurvey {
    /// Document id
    pub id: String,
    /// Submitting surveyor, `"Unknown"` when missing
    pub surveyor_name: String,
    /// Property address, empty when missing
    pub property_address: String,
    /// Submission timestamp
    pub submitted_at: DateStamp,
    /// Void classification, `"Unknown"` when missing
    pub void_type: String,
    /// Visit classification, `"Unknown"` when missing
    pub visit_type: String,
    /// Survey location, when the record carried plausible coordinates
    pub location: Option<LngLat>,
    /// Gifted-items notes, lowercased; empty means not gifted
    pub gifted_notes: String,
    /// Flattened, category-tagged work entries
    pub line_items: Vec<LineItem>,
    /// Pre-computed totals
    pub totals: SurveyTotals,
}

/// Flatten the raw `sors` field into a tagged item list
///
/// Accepts a list, a category → list mapping, or a category → section →
/// list mapping; any other shape (including absent/null) yields an empty
/// list. Non-object entries inside lists are skipped.
pub fn flatten_line_items(sors: Option<&Value>) -> Vec<LineItem> {
    let mut items = Vec::new();
    match sors {
        Some(Value::Array(list)) => {
            items.extend(list.iter().filter_map(|v| LineItem::from_value("", v)));
        }
        Some(Value::Object(sections)) => {
            for (category, section) in sections {
                collect_section(category, section, &mut items);
            }
        }
        _ => {}
    }
    items
}

/// Collect one section's items, keeping the outer category on nested maps
fn collect_section(category: &str, section: &Value, out: &mut Vec<LineItem>) {
    match section {
        Value::Array(list) => {
            out.extend(list.iter().filter_map(|v| LineItem::from_value(category, v)));
        }
        Value::Object(subsections) => {
            for sub in subsections.values() {
                if let Value::Array(list) = sub {
                    out.extend(
                        list.iter().filter_map(|v| LineItem::from_value(category, v)),
                    );
                }
            }
        }
        _ => {}
    }
}

/// Reads a coordinate component strictly: number or numeric string only
fn finite_num(value: Option<&Value>) -> Option<f64> {
    let f = match value {
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    f.is_finite().then_some(f)
}

fn location_of(raw: &RawRecord) -> Option<LngLat> {
    let loc = raw.get("location")?.as_object()?;
    let lat = finite_num(loc.get("latitude"))?;
    let lng = finite_num(loc.get("longitude"))?;
    LngLat::new(lng, lat)
}

fn totals_of(raw: &RawRecord) -> SurveyTotals {
    match raw.get("totals").and_then(Value::as_object) {
        Some(totals) => SurveyTotals {
            cost: coerce::num(totals.get("cost")),
            recharge_cost: coerce::num(totals.get("rechargeCost")),
            days_decimal: coerce::num(totals.get("daysDecimal")),
            recharge_days_decimal: coerce::num(totals.get("rechargeDaysDecimal")),
            smv: coerce::num(totals.get("smv")),
        },
        // Oldest batches carried a single top-level totalCost instead
        None => SurveyTotals {
            cost: coerce::num(raw.get("totalCost")),
            ..SurveyTotals::default()
        },
    }
}

/// Build a [`NormalizedSurvey`] from a raw record
///
/// Pure and idempotent: identical input always yields an identical entity.
/// Every field is defensively defaulted; nothing here can fail.
pub fn normalize_survey(raw: &RawRecord) -> NormalizedSurvey {
    NormalizedSurvey {
        id: coerce::string(raw.get("id")),
        surveyor_name: coerce::string_or(raw.get("surveyorName"), "Unknown"),
        property_address: coerce::string(raw.get("propertyAddress")),
        submitted_at: parse_date_stamp(raw.get("submittedAt").or_else(|| raw.get("timestamp"))),
        void_type: coerce::string_or(raw.get("voidType"), "Unknown"),
        visit_type: coerce::string_or(raw.get("visitType"), "Unknown"),
        location: location_of(raw),
        gifted_notes: coerce::string(raw.get("giftedItemsNotes")).to_lowercase(),
        line_items: flatten_line_items(raw.get("sors")),
        totals: totals_of(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(fields: serde_json::Value) -> RawRecord {
        fields.as_object().unwrap().clone()
    }

    #[test]
    fn test_flatten_accepts_list_form() {
        let sors = json!([
            {"description": "Fencing", "cost": 120},
            {"description": "Skip hire", "cost": 80}
        ]);
        let items = flatten_line_items(Some(&sors));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, "");
        assert_eq!(items[0].cost, 120.0);
    }

    #[test]
    fn test_flatten_accepts_category_map_form() {
        let sors = json!({
            "contractor work": [{"description": "Fencing", "cost": 120}],
            "internal": [{"description": "Paint", "cost": 30}]
        });
        let items = flatten_line_items(Some(&sors));
        assert_eq!(items.len(), 2);
        let fencing = items.iter().find(|i| i.description == "Fencing").unwrap();
        assert_eq!(fencing.category, CONTRACTOR_CATEGORY);
    }

    #[test]
    fn test_flatten_keeps_outer_category_on_nested_sections() {
        let sors = json!({
            "contractor work": {
                "garden": [{"description": "Fencing", "cost": 120}],
                "interior": [{"description": "Plaster", "cost": 200}]
            }
        });
        let items = flatten_line_items(Some(&sors));
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.category == CONTRACTOR_CATEGORY));
    }

    #[test]
    fn test_flatten_other_shapes_are_empty() {
        assert!(flatten_line_items(None).is_empty());
        assert!(flatten_line_items(Some(&json!(null))).is_empty());
        assert!(flatten_line_items(Some(&json!("sors"))).is_empty());
        assert!(flatten_line_items(Some(&json!(7))).is_empty());
        // Non-object entries inside lists are skipped, not errors
        assert!(flatten_line_items(Some(&json!([null, "x", 3]))).is_empty());
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let raw = record(json!({
            "id": "abc",
            "surveyorName": "Alice",
            "propertyAddress": "1 High St",
            "submittedAt": "2024-04-15T09:30:00Z",
            "voidType": "Major",
            "visitType": "Initial",
            "location": {"latitude": 52.5, "longitude": -1.9},
            "giftedItemsNotes": "Carpet in lounge",
            "sors": {"contractor work": [{"description": "Fencing", "cost": "120"}]},
            "totals": {"cost": 120, "rechargeCost": 0, "daysDecimal": 2.5}
        }));
        assert_eq!(normalize_survey(&raw), normalize_survey(&raw));
    }

    #[test]
    fn test_normalize_defaults_every_field() {
        let survey = normalize_survey(&record(json!({})));
        assert_eq!(survey.surveyor_name, "Unknown");
        assert_eq!(survey.property_address, "");
        assert_eq!(survey.submitted_at, DateStamp::Unknown);
        assert_eq!(survey.void_type, "Unknown");
        assert!(survey.location.is_none());
        assert!(survey.line_items.is_empty());
        assert_eq!(survey.totals.cost, 0.0);
    }

    #[test]
    fn test_normalize_coerces_string_numbers() {
        let survey = normalize_survey(&record(json!({
            "sors": [{"cost": "99.5", "quantity": "2", "recharge": "TRUE"}]
        })));
        assert_eq!(survey.line_items[0].cost, 99.5);
        assert_eq!(survey.line_items[0].quantity, 2.0);
        assert!(survey.line_items[0].recharge);
    }

    #[test]
    fn test_normalize_lowercases_gifted_notes() {
        let survey = normalize_survey(&record(json!({"giftedItemsNotes": "New CARPET"})));
        assert_eq!(survey.gifted_notes, "new carpet");
    }

    #[test]
    fn test_location_requires_both_finite_components() {
        let survey = normalize_survey(&record(json!({
            "location": {"latitude": 52.5}
        })));
        assert!(survey.location.is_none());

        let survey = normalize_survey(&record(json!({
            "location": {"latitude": "52.5", "longitude": "-1.9"}
        })));
        let loc = survey.location.unwrap();
        assert_eq!(loc.lat, 52.5);
        assert_eq!(loc.lng, -1.9);

        let survey = normalize_survey(&record(json!({
            "location": {"latitude": "north", "longitude": -1.9}
        })));
        assert!(survey.location.is_none());
    }

    #[test]
    fn test_totals_fall_back_to_top_level_total_cost() {
        let survey = normalize_survey(&record(json!({"totalCost": 340.25})));
        assert_eq!(survey.totals.cost, 340.25);

        // A totals map wins over the legacy field
        let survey = normalize_survey(&record(json!({
            "totalCost": 1.0,
            "totals": {"cost": 2.0}
        })));
        assert_eq!(survey.totals.cost, 2.0);
    }

    #[test]
    fn test_timestamp_alias_for_submitted_at() {
        let survey = normalize_survey(&record(json!({"timestamp": "2024-04-15T09:30:00Z"})));
        assert!(survey.submitted_at.is_known());
    }
}
