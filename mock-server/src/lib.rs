//! In-process imitation of the drug-information API.
//!
//! Serves a small fixed catalog under [`API_ROOT`] with the same auth and
//! status behavior as the real service, so clients can be exercised
//! against every outcome: 200 mapping, 200 sequence, 200 empty body, 400,
//! 401, 404 and 500.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const API_ROOT: &str = "/CC/api/v1_4";

/// Drug id that makes the server fail with a plain-text 500.
pub const FAULT_ID: &str = "fault";
/// Drug id that answers 200 with an empty body.
pub const BLANK_ID: &str = "blank";

const COLLECTIONS: [&str; 4] = [
    "DispensableDrugs",
    "DispensableGenerics",
    "PackagedDrugs",
    "PrescribableDrugs",
];

/// The single shared key the server accepts.
#[derive(Clone, Debug)]
pub struct ApiKey {
    pub client_id: String,
    pub client_secret: String,
}

impl ApiKey {
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }

    fn header_value(&self) -> String {
        format!("SHAREDKEY {}:{}", self.client_id, self.client_secret)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Drug {
    #[serde(rename = "DispensableDrugID")]
    pub id: String,
    #[serde(rename = "PrescribableDrugDesc")]
    pub description: String,
    #[serde(rename = "DispensableGenericDesc")]
    pub generic: String,
    #[serde(rename = "DefaultETCDesc")]
    pub category: String,
    #[serde(rename = "RxNormID")]
    pub rxnorm_id: String,
    #[serde(rename = "RouteDesc")]
    pub route: String,
    #[serde(rename = "DoseFormDesc")]
    pub dose_form: String,
}

/// `(id, description, generic, category, rxnorm_id, dose_form)`
type CatalogRow = [&'static str; 6];

const CATALOG: [CatalogRow; 6] = [
    ["101", "acetaminophen 500 mg tablet", "acetaminophen", "Analgesic", "198440", "tablet"],
    ["102", "ibuprofen 200 mg tablet", "ibuprofen", "NSAID", "310965", "tablet"],
    ["103", "amoxicillin 500 mg capsule", "amoxicillin", "Penicillin", "308191", "capsule"],
    ["104", "lisinopril 10 mg tablet", "lisinopril", "ACE Inhibitor", "314076", "tablet"],
    ["105", "metformin 500 mg tablet", "metformin", "Biguanide", "861007", "tablet"],
    ["106", "clopidogrel 75 mg tablet", "clopidogrel", "Platelet Inhibitor", "309362", "tablet"],
];

pub fn catalog() -> Vec<Drug> {
    CATALOG
        .iter()
        .map(|&[id, description, generic, category, rxnorm_id, dose_form]| Drug {
            id: id.to_string(),
            description: description.to_string(),
            generic: generic.to_string(),
            category: category.to_string(),
            rxnorm_id: rxnorm_id.to_string(),
            route: "oral".to_string(),
            dose_form: dose_form.to_string(),
        })
        .collect()
}

#[derive(Clone)]
struct AppState {
    key: ApiKey,
    catalog: Arc<Vec<Drug>>,
}

type Params = Query<HashMap<String, String>>;

pub fn app(key: ApiKey) -> Router {
    let state = AppState {
        key,
        catalog: Arc::new(catalog()),
    };
    let api = Router::new()
        .route("/{resource}", get(top_level))
        .route("/{collection}/{segment}", get(record_or_search))
        .route("/{collection}/{id}/{subresource}", get(nested))
        .with_state(state);
    Router::new().nest(API_ROOT, api)
}

pub async fn run(listener: TcpListener, key: ApiKey) -> Result<(), std::io::Error> {
    axum::serve(listener, app(key)).await
}

/// Shared-key and `callSystemName` checks every route applies first.
fn guard(
    state: &AppState,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
) -> Result<(), Response> {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == state.key.header_value());
    if !authorized {
        log::info!("rejecting request with missing or wrong shared key");
        let body = json!({"Message": "Authorization has been denied for this request."});
        return Err((StatusCode::UNAUTHORIZED, Json(body)).into_response());
    }
    if param(params, "callSystemName").is_none() {
        return Err(bad_request("callSystemName is required"));
    }
    Ok(())
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "Message": message }))).into_response()
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn window(params: &HashMap<String, String>) -> (usize, usize) {
    let limit = param(params, "limit").and_then(|v| v.parse().ok()).unwrap_or(100);
    let offset = param(params, "offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    (limit, offset)
}

fn search(catalog: &[Drug], text: &str, mode: &str, params: &HashMap<String, String>) -> Response {
    let needle = text.to_lowercase();
    let matches: Vec<&Drug> = catalog
        .iter()
        .filter(|d| {
            let hay = d.description.to_lowercase();
            match mode {
                "startswith" => hay.starts_with(&needle),
                "equals" => d.generic.to_lowercase() == needle,
                _ => hay.contains(&needle),
            }
        })
        .collect();
    if matches.is_empty() {
        return StatusCode::NOT_FOUND.into_response();
    }
    let (limit, offset) = window(params);
    let page: Vec<&Drug> = matches.iter().copied().skip(offset).take(limit).collect();
    Json(json!({ "Items": page, "TotalResultCount": matches.len() })).into_response()
}

fn find<'a>(catalog: &'a [Drug], id: &str) -> Option<&'a Drug> {
    catalog.iter().find(|d| d.id == id)
}

/// `PrescribableDrugs` and `RoutedDoseFormDrugs`.
async fn top_level(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    log::info!("GET /{resource}");
    if let Err(rejection) = guard(&state, &headers, &params) {
        return rejection;
    }
    match resource.as_str() {
        "PrescribableDrugs" => match param(&params, "searchtext") {
            Some(text) => {
                let mode = param(&params, "searchtype").unwrap_or("startswith");
                search(&state.catalog, text, mode, &params)
            }
            None => bad_request("searchtext is required"),
        },
        "RoutedDoseFormDrugs" => {
            let text = param(&params, "searchText").unwrap_or("");
            search(&state.catalog, text, "contains", &params)
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// `{collection}/search` and `{collection}/{id}`.
async fn record_or_search(
    State(state): State<AppState>,
    Path((collection, segment)): Path<(String, String)>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    log::info!("GET /{collection}/{segment}");
    if let Err(rejection) = guard(&state, &headers, &params) {
        return rejection;
    }
    if !COLLECTIONS.contains(&collection.as_str()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if segment == "search" {
        let mode = param(&params, "searchType")
            .unwrap_or("contains")
            .to_ascii_lowercase();
        return match param(&params, "searchText") {
            Some(text) => search(&state.catalog, text, &mode, &params),
            None => bad_request("searchText is required"),
        };
    }
    match segment.as_str() {
        FAULT_ID => (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response(),
        BLANK_ID => StatusCode::OK.into_response(),
        id => match find(&state.catalog, id) {
            Some(drug) => Json(drug).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
    }
}

/// `{collection}/{id}/{subresource}` and
/// `Classifications/{id}/InteroperableDrugLinks`.
async fn nested(
    State(state): State<AppState>,
    Path((collection, id, subresource)): Path<(String, String, String)>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    log::info!("GET /{collection}/{id}/{subresource}");
    if let Err(rejection) = guard(&state, &headers, &params) {
        return rejection;
    }
    if collection == "Classifications" && subresource == "InteroperableDrugLinks" {
        return interoperable_links(&id, &params);
    }
    if !COLLECTIONS.contains(&collection.as_str()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if id == FAULT_ID {
        return (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response();
    }
    let Some(drug) = find(&state.catalog, &id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let body: Value = match subresource.to_lowercase().as_str() {
        "interactions" => json!({
            "Items": [{
                "InteractingDrugDesc": "warfarin",
                "SeverityDesc": "Moderate",
                "ScreenMessage":
                    format!("{} may increase bleeding risk with warfarin", drug.generic),
            }],
        }),
        "doserecords" => json!([
            {
                "DoseRecordID": format!("{}-1", drug.id),
                "DoseDesc": "1 tablet every 8 hours",
                "AgeGroup": "adult",
            },
            {
                "DoseRecordID": format!("{}-2", drug.id),
                "DoseDesc": "as directed",
                "AgeGroup": "pediatric",
            },
        ]),
        "contraindications" => json!({ "Items": [], "TotalResultCount": 0 }),
        "rxnormconcepts" => json!({
            "RxNormConcepts": [{
                "RxNormID": drug.rxnorm_id,
                "RxNormName": drug.description,
                "RxNormType": "SCD",
            }],
        }),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    Json(body).into_response()
}

fn interoperable_links(classification_id: &str, params: &HashMap<String, String>) -> Response {
    let (Some(classification_type), Some(interoperable_type)) =
        (param(params, "classificationType"), param(params, "interoperableType"))
    else {
        return bad_request("classificationType and interoperableType are required");
    };
    Json(json!({
        "Items": [{
            "ClassificationID": classification_id,
            "ClassificationType": classification_type,
            "InteroperableType": interoperable_type,
            "InteroperableID": "1191",
        }],
        "TotalResultCount": 1,
    }))
    .into_response()
}
