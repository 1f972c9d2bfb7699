//! Tabular exports
//!
//! Exports are WYSIWYG: each table is built from the same view model the
//! dashboard currently renders, so exported rows equal the displayed rows in
//! the same order. Rendering to CSV quotes fields the way spreadsheet
//! imports expect; JSON export serializes the view model directly through
//! serde.
//!
//! # Example
//!
//! ```
//! use voidhub::aggregate::BandSpec;
//! use voidhub::dashboard::contractor_view;
//! use voidhub::export::contractor_works_table;
//! use voidhub::filter::SurveyFilter;
//!
//! let view = contractor_view(&[], &SurveyFilter::default(), &BandSpec::new(&[100.0]));
//! let table = contractor_works_table(&view);
//! assert!(table.to_csv().starts_with("Surveyor,Property,Description"));
//! ```

use crate::dashboard::{ContractorView, GiftingView, RechargeView};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A rendered table with a fixed column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTable {
    /// Table title, used by document-style renderers
    pub title: String,
    /// Column headers, in order
    pub headers: Vec<String>,
    /// Rows, in display order
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Render as CSV with a header row
    ///
    /// Fields containing commas, quotes, or newlines are double-quoted with
    /// embedded quotes doubled.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&csv_line(&self.headers));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&csv_line(row));
        }
        out
    }
}

fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Serialize a view model as pretty JSON
pub fn to_json<T: Serialize>(view: &T) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(|e| Error::Serialization(e.to_string()))
}

/// The contractor works table, one row per displayed item
pub fn contractor_works_table(view: &ContractorView) -> ExportTable {
    ExportTable {
        title: "Contractor Works".to_string(),
        headers: ["Surveyor", "Property", "Description", "Cost", "Comment", "Submitted At"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
        rows: view
            .works
            .iter()
            .map(|w| {
                vec![
                    w.surveyor_name.clone(),
                    w.property_address.clone(),
                    w.item.description.clone(),
                    format!("{:.2}", w.item.cost),
                    w.item.comment.clone(),
                    w.submitted_at.date_label(),
                ]
            })
            .collect(),
    }
}

/// The recharge detail table, one row per displayed recharge void
pub fn recharge_detail_table(view: &RechargeView) -> ExportTable {
    ExportTable {
        title: "Recharge Detail Table".to_string(),
        headers: [
            "Property Address",
            "Surveyor",
            "Submitted",
            "Recharge Cost (£)",
            "Recharge Time (mins)",
            "Recharge Items",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect(),
        rows: view
            .detail
            .iter()
            .map(|r| {
                vec![
                    or_na(&r.property_address),
                    or_na(&r.surveyor_name),
                    r.submitted_at.date_label(),
                    format!("{:.2}", r.recharge_cost),
                    format!("{}", r.recharge_minutes),
                    or_na(&r.items),
                ]
            })
            .collect(),
    }
}

/// The gifted items table, one row per displayed gifted record
pub fn gifted_items_table(view: &GiftingView) -> ExportTable {
    ExportTable {
        title: "Gifted Items".to_string(),
        headers: ["Address", "Surveyor", "Gifted Items Notes"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
        rows: view
            .gifted
            .iter()
            .map(|g| vec![or_na(&g.address), g.surveyor_name.clone(), g.notes.clone()])
            .collect(),
    }
}

fn or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}
