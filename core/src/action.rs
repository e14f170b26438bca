//! Operator-facing actions and the request each one maps to.
//!
//! # Design
//! Each variant corresponds to one form of the testing tool. `to_request`
//! turns it into a `(ResourcePath, QueryParams)` pair for the builder, or
//! rejects it when a required field is blank so no request is attempted.

use crate::error::ActionError;
use crate::params::{new_call_id, QueryParams, CALL_ID};
use crate::resource::{Collection, ResourcePath, Subresource};

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 1000;

/// How the search text is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    StartsWith,
    Contains,
    Equals,
}

impl SearchType {
    /// Lower-case form taken by `searchtype` on `PrescribableDrugs`.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::StartsWith => "startswith",
            SearchType::Contains => "contains",
            SearchType::Equals => "equals",
        }
    }

    /// Capitalized form taken by `searchType` on collection search.
    pub fn as_title(self) -> &'static str {
        match self {
            SearchType::StartsWith => "StartsWith",
            SearchType::Contains => "Contains",
            SearchType::Equals => "Equals",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationType {
    Etc,
    Usc,
    Ahfs,
}

impl ClassificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassificationType::Etc => "ETC",
            ClassificationType::Usc => "USC",
            ClassificationType::Ahfs => "AHFS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteroperableType {
    RxNormSemanticClinicalDrug,
    RxNormPreciseIngredient,
}

impl InteroperableType {
    pub fn as_str(self) -> &'static str {
        match self {
            InteroperableType::RxNormSemanticClinicalDrug => "RxNormSemanticClinicalDrug",
            InteroperableType::RxNormPreciseIngredient => "RxNormPreciseIngredient",
        }
    }
}

/// Result window passed through verbatim; the core does not page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Window {
    /// Clamp `limit` into `1..=MAX_LIMIT`, as the search form does.
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset,
        }
    }

    fn apply(self, params: &mut QueryParams) {
        params.insert("limit", self.limit.to_string());
        params.insert("offset", self.offset.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiAction {
    /// `{collection}/search?searchText=…[&searchType=…]`
    DrugSearch {
        collection: Collection,
        search_text: String,
        search_type: Option<SearchType>,
        window: Window,
    },
    /// `PrescribableDrugs?searchtext=…&searchtype=…`
    PrescribableSearch {
        search_text: String,
        search_type: SearchType,
        window: Window,
    },
    /// `{collection}/{id}`
    DrugDetails { collection: Collection, id: String },
    /// `{collection}/{id}/{subresource}`
    DrugSubresource {
        collection: Collection,
        id: String,
        subresource: Subresource,
    },
    /// `Classifications/{id}/InteroperableDrugLinks`
    InteroperableDrugLinks {
        classification_id: String,
        classification_type: ClassificationType,
        interoperable_type: InteroperableType,
    },
    /// `RoutedDoseFormDrugs`, optionally filtered by text.
    RoutedDoseFormDrugs {
        search_text: Option<String>,
        window: Window,
    },
}

impl ApiAction {
    /// Resource path and parameters for this action, with a fresh `callID`.
    pub fn to_request(&self) -> Result<(ResourcePath, QueryParams), ActionError> {
        self.to_request_with_call_id(&new_call_id())
    }

    pub fn to_request_with_call_id(
        &self,
        call_id: &str,
    ) -> Result<(ResourcePath, QueryParams), ActionError> {
        let mut params = QueryParams::new();
        let path = match self {
            ApiAction::DrugSearch {
                collection,
                search_text,
                search_type,
                window,
            } => {
                params.insert("searchText", required("search text", search_text)?);
                if let Some(search_type) = search_type {
                    params.insert("searchType", search_type.as_title());
                }
                window.apply(&mut params);
                ResourcePath::search(*collection)
            }
            ApiAction::PrescribableSearch {
                search_text,
                search_type,
                window,
            } => {
                params.insert("searchtext", required("search text", search_text)?);
                params.insert("searchtype", search_type.as_str());
                window.apply(&mut params);
                ResourcePath::from_segments([Collection::PrescribableDrugs.as_str()])
            }
            ApiAction::DrugDetails { collection, id } => {
                ResourcePath::record(*collection, identifier("drug id", id)?)
            }
            ApiAction::DrugSubresource {
                collection,
                id,
                subresource,
            } => {
                let id = identifier("drug id", id)?;
                ResourcePath::subresource(*collection, id, *subresource)
            }
            ApiAction::InteroperableDrugLinks {
                classification_id,
                classification_type,
                interoperable_type,
            } => {
                params.insert("classificationType", classification_type.as_str());
                params.insert("interoperableType", interoperable_type.as_str());
                ResourcePath::from_segments([
                    "Classifications",
                    identifier("classification id", classification_id)?,
                    "InteroperableDrugLinks",
                ])
            }
            ApiAction::RoutedDoseFormDrugs {
                search_text,
                window,
            } => {
                window.apply(&mut params);
                let text = search_text.as_deref().map(str::trim);
                if let Some(text) = text.filter(|t| !t.is_empty()) {
                    params.insert("searchText", text);
                }
                ResourcePath::from_segments(["RoutedDoseFormDrugs"])
            }
        };
        params.insert_default(CALL_ID, call_id);
        Ok((path, params))
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ActionError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ActionError::MissingField(field));
    }
    Ok(value)
}

/// A required value that becomes a single path segment.
fn identifier<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ActionError> {
    let value = required(field, value)?;
    if value.contains('/') {
        return Err(ActionError::SlashInField(field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALL: &str = "20240101120000";

    #[test]
    fn drug_search_maps_to_collection_search() {
        let action = ApiAction::DrugSearch {
            collection: Collection::DispensableDrugs,
            search_text: "  paclitaxel ".to_string(),
            search_type: None,
            window: Window::default(),
        };
        let (path, params) = action.to_request_with_call_id(CALL).unwrap();
        assert_eq!(path.to_string(), "DispensableDrugs/search");
        assert_eq!(
            params.encode(),
            "searchText=paclitaxel&limit=100&offset=0&callID=20240101120000"
        );
    }

    #[test]
    fn drug_search_sends_capitalized_search_type() {
        let action = ApiAction::DrugSearch {
            collection: Collection::DispensableGenerics,
            search_text: "ibuprofen".to_string(),
            search_type: Some(SearchType::Contains),
            window: Window::new(25, 0),
        };
        let (path, params) = action.to_request_with_call_id(CALL).unwrap();
        assert_eq!(path.to_string(), "DispensableGenerics/search");
        assert_eq!(
            params.encode(),
            "searchText=ibuprofen&searchType=Contains&limit=25&offset=0&callID=20240101120000"
        );
    }

    #[test]
    fn blank_search_text_is_rejected() {
        let action = ApiAction::DrugSearch {
            collection: Collection::PackagedDrugs,
            search_text: "   ".to_string(),
            search_type: Some(SearchType::Contains),
            window: Window::default(),
        };
        assert_eq!(
            action.to_request_with_call_id(CALL).unwrap_err(),
            ActionError::MissingField("search text")
        );
    }

    #[test]
    fn prescribable_search_uses_lowercase_keys() {
        let action = ApiAction::PrescribableSearch {
            search_text: "clopidogrel".to_string(),
            search_type: SearchType::Contains,
            window: Window::new(10, 20),
        };
        let (path, params) = action.to_request_with_call_id(CALL).unwrap();
        assert_eq!(path.to_string(), "PrescribableDrugs");
        assert_eq!(params.get("searchtext"), Some("clopidogrel"));
        assert_eq!(params.get("searchtype"), Some("contains"));
        assert_eq!(params.get("limit"), Some("10"));
        assert_eq!(params.get("offset"), Some("20"));
    }

    #[test]
    fn window_limit_is_clamped() {
        assert_eq!(Window::new(0, 0).limit, 1);
        assert_eq!(Window::new(5000, 3), Window { limit: 1000, offset: 3 });
    }

    #[test]
    fn subresource_paths() {
        let action = ApiAction::DrugSubresource {
            collection: Collection::DispensableDrugs,
            id: "157468".to_string(),
            subresource: Subresource::Contraindications,
        };
        let (path, params) = action.to_request_with_call_id(CALL).unwrap();
        assert_eq!(path.to_string(), "DispensableDrugs/157468/contraindications");
        assert_eq!(params.encode(), "callID=20240101120000");
    }

    #[test]
    fn details_require_an_id() {
        let action = ApiAction::DrugDetails {
            collection: Collection::DispensableDrugs,
            id: String::new(),
        };
        assert!(action.to_request().is_err());
    }

    #[test]
    fn ids_with_a_slash_are_rejected() {
        let action = ApiAction::DrugDetails {
            collection: Collection::DispensableDrugs,
            id: "101/interactions".to_string(),
        };
        assert_eq!(
            action.to_request_with_call_id(CALL).unwrap_err(),
            ActionError::SlashInField("drug id")
        );

        let action = ApiAction::InteroperableDrugLinks {
            classification_id: "../2553".to_string(),
            classification_type: ClassificationType::Etc,
            interoperable_type: InteroperableType::RxNormPreciseIngredient,
        };
        assert_eq!(
            action.to_request_with_call_id(CALL).unwrap_err(),
            ActionError::SlashInField("classification id")
        );
    }

    #[test]
    fn interoperable_links_carry_type_params() {
        let action = ApiAction::InteroperableDrugLinks {
            classification_id: "2553".to_string(),
            classification_type: ClassificationType::Ahfs,
            interoperable_type: InteroperableType::RxNormPreciseIngredient,
        };
        let (path, params) = action.to_request_with_call_id(CALL).unwrap();
        assert_eq!(path.to_string(), "Classifications/2553/InteroperableDrugLinks");
        assert_eq!(
            params.encode(),
            "classificationType=AHFS&interoperableType=RxNormPreciseIngredient\
             &callID=20240101120000"
        );
    }

    #[test]
    fn routed_dose_form_search_text_is_optional() {
        let without = ApiAction::RoutedDoseFormDrugs {
            search_text: Some("  ".to_string()),
            window: Window::default(),
        };
        let (_, params) = without.to_request_with_call_id(CALL).unwrap();
        assert!(!params.contains("searchText"));

        let with = ApiAction::RoutedDoseFormDrugs {
            search_text: Some("oral".to_string()),
            window: Window::default(),
        };
        let (path, params) = with.to_request_with_call_id(CALL).unwrap();
        assert_eq!(path.to_string(), "RoutedDoseFormDrugs");
        assert_eq!(params.get("searchText"), Some("oral"));
    }

    #[test]
    fn fresh_call_id_is_attached() {
        let action = ApiAction::DrugDetails {
            collection: Collection::PackagedDrugs,
            id: "1".to_string(),
        };
        let (_, params) = action.to_request().unwrap();
        assert_eq!(params.get(CALL_ID).map(str::len), Some(14));
    }
}
