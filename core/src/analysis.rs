//! Read-only structural inspection of a success payload.
//!
//! Feeds the "analysis" and "formatted" views. Nothing here mutates the
//! payload or fails: shapes that cannot be inspected report
//! `NothingToAnalyze`.

use serde::Serialize;
use serde_json::{Map, Value};

/// Key holding the result list in paged search responses.
pub const ITEMS_KEY: &str = "Items";
pub const TOTAL_RESULT_COUNT_KEY: &str = "TotalResultCount";
pub const RXNORM_CONCEPTS_KEY: &str = "RxNormConcepts";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Analysis {
    Mapping {
        key_count: usize,
        keys: Vec<String>,
        /// Present when the mapping wraps an `Items` array.
        items: Option<ItemsSummary>,
        total_result_count: Option<u64>,
    },
    Sequence {
        len: usize,
        /// Keys of the first element, when it is a mapping.
        first_item_fields: Option<Vec<String>>,
    },
    NothingToAnalyze,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemsSummary {
    pub count: usize,
    pub first_item_fields: Option<Vec<String>>,
}

/// Inspect `payload`; `None` and scalars have nothing to analyze.
pub fn analyze(payload: Option<&Value>) -> Analysis {
    match payload {
        Some(Value::Object(map)) => Analysis::Mapping {
            key_count: map.len(),
            keys: key_names(map),
            items: map.get(ITEMS_KEY).and_then(Value::as_array).map(|items| ItemsSummary {
                count: items.len(),
                first_item_fields: first_item_fields(items),
            }),
            total_result_count: map.get(TOTAL_RESULT_COUNT_KEY).and_then(Value::as_u64),
        },
        Some(Value::Array(items)) => Analysis::Sequence {
            len: items.len(),
            first_item_fields: first_item_fields(items),
        },
        _ => Analysis::NothingToAnalyze,
    }
}

fn key_names(map: &Map<String, Value>) -> Vec<String> {
    map.keys().cloned().collect()
}

fn first_item_fields(items: &[Value]) -> Option<Vec<String>> {
    items.first().and_then(Value::as_object).map(key_names)
}

impl Analysis {
    /// Display lines for the analysis pane.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Analysis::Mapping {
                key_count,
                keys,
                items,
                total_result_count,
            } => {
                let mut lines = vec![
                    format!("Number of top-level keys: {key_count}"),
                    format!("Available fields: {}", keys.join(", ")),
                ];
                if let Some(total) = total_result_count {
                    lines.push(format!("Total results: {total}"));
                }
                if let Some(items) = items {
                    lines.push(format!("Number of items: {}", items.count));
                    if let Some(fields) = &items.first_item_fields {
                        lines.push(format!("Fields in each item: {}", fields.join(", ")));
                    }
                }
                lines
            }
            Analysis::Sequence {
                len,
                first_item_fields,
            } => {
                let mut lines = vec![format!("Number of items: {len}")];
                if let Some(fields) = first_item_fields {
                    lines.push(format!("Fields in first item: {}", fields.join(", ")));
                }
                lines
            }
            Analysis::NothingToAnalyze => vec!["No data to analyze".to_string()],
        }
    }
}

/// Labelled fields pulled out of one result record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlights {
    pub total_result_count: Option<u64>,
    pub records: Vec<Highlight>,
}

const ITEM_FIELDS: [(&str, &str); 6] = [
    ("Drug", "PrescribableDrugDesc"),
    ("Generic", "DispensableGenericDesc"),
    ("Category", "DefaultETCDesc"),
    ("RxNorm ID", "RxNormID"),
    ("Route", "RouteDesc"),
    ("Dose Form", "DoseFormDesc"),
];

const RXNORM_FIELDS: [(&str, &str); 3] = [
    ("RxNorm ID", "RxNormID"),
    ("Name", "RxNormName"),
    ("Type", "RxNormType"),
];

/// Common fields of each record in an `Items` or `RxNormConcepts` payload.
/// Returns `None` for any other shape; the renderer then shows the payload
/// as-is.
pub fn highlights(payload: Option<&Value>) -> Option<Highlights> {
    let map = payload?.as_object()?;
    if let Some(items) = map.get(ITEMS_KEY).and_then(Value::as_array) {
        return Some(Highlights {
            total_result_count: Some(
                map.get(TOTAL_RESULT_COUNT_KEY)
                    .and_then(Value::as_u64)
                    .unwrap_or(0),
            ),
            records: items.iter().map(|item| pick(item, &ITEM_FIELDS)).collect(),
        });
    }
    if let Some(concepts) = map.get(RXNORM_CONCEPTS_KEY).and_then(Value::as_array) {
        return Some(Highlights {
            total_result_count: None,
            records: concepts.iter().map(|c| pick(c, &RXNORM_FIELDS)).collect(),
        });
    }
    None
}

fn pick(record: &Value, fields: &[(&str, &str)]) -> Highlight {
    let fields = fields
        .iter()
        .filter_map(|(label, key)| {
            let value = record.get(*key)?;
            Some((label.to_string(), scalar_text(value)))
        })
        .collect();
    Highlight { fields }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
