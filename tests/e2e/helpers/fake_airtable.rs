use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::fixtures::DirectoryFixtures;

pub const TEST_API_KEY: &str = "pat-test-key";
pub const TEST_BASE_ID: &str = "appTestBase";

/// In-memory stand-in for the Airtable REST API.
///
/// Supports listing with `pageSize`/`offset`, the comma-delimited
/// `FIND(",name,", "," & ARRAYJOIN(..., ",") & ",")` filter the listing
/// endpoint sends, and single-record lookups.
pub struct FakeAirtable {
    fixtures: DirectoryFixtures,
    list_requests: Mutex<Vec<String>>,
    failing_tables: Mutex<HashSet<String>>,
}

impl FakeAirtable {
    /// Start the fake on a random port; returns it with its `/v0` base URL
    pub async fn spawn(fixtures: DirectoryFixtures) -> (Arc<Self>, String) {
        let fake = Arc::new(Self {
            fixtures,
            list_requests: Mutex::new(Vec::new()),
            failing_tables: Mutex::new(HashSet::new()),
        });

        let app = Router::new()
            .route("/v0/:base_id/:table", get(list_records))
            .route("/v0/:base_id/:table/:record_id", get(find_record))
            .with_state(fake.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake Airtable");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (fake, format!("http://{}/v0", addr))
    }

    /// Number of list calls made against a table
    pub fn list_count(&self, table: &str) -> usize {
        self.list_requests
            .lock()
            .iter()
            .filter(|t| t.as_str() == table)
            .count()
    }

    /// Make every request to `table` answer 503 until `recover` is called
    pub fn fail(&self, table: &str) {
        self.failing_tables.lock().insert(table.to_string());
    }

    pub fn recover(&self, table: &str) {
        self.failing_tables.lock().remove(table);
    }

    fn table(&self, name: &str) -> Option<&[Value]> {
        match name {
            "Categories" => Some(self.fixtures.categories.as_slice()),
            "Subcategories" => Some(self.fixtures.subcategories.as_slice()),
            "Businesses" => Some(self.fixtures.businesses.as_slice()),
            _ => None,
        }
    }

    /// Primary-field names of the linked records as `"," & ARRAYJOIN(field, ",") & ","`
    fn joined_links(&self, record: &Value, field: &str, table: &str) -> String {
        let ids: Vec<&str> = record["fields"][field]
            .as_array()
            .map(|ids| ids.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let rows = self.table(table).unwrap_or_default();
        let names = ids
            .iter()
            .filter_map(|id| rows.iter().find(|r| r["id"] == *id))
            .filter_map(|r| r["fields"]["Name"].as_str())
            .collect::<Vec<_>>()
            .join(",");
        format!(",{},", names)
    }

    fn guard(&self, headers: &HeaderMap, table: &str) -> Option<Response> {
        let expected = format!("Bearer {}", TEST_API_KEY);
        let authorized = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == expected);

        if !authorized {
            return Some(error(
                StatusCode::UNAUTHORIZED,
                json!({ "type": "AUTHENTICATION_REQUIRED", "message": "Authentication required" }),
            ));
        }
        if self.failing_tables.lock().contains(table) {
            return Some(error(
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "type": "SERVICE_UNAVAILABLE", "message": "Try again later" }),
            ));
        }
        None
    }
}

async fn list_records(
    State(fake): State<Arc<FakeAirtable>>,
    Path((_base_id, table)): Path<(String, String)>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    fake.list_requests.lock().push(table.clone());
    if let Some(rejection) = fake.guard(&headers, &table) {
        return rejection;
    }
    let Some(rows) = fake.table(&table) else {
        return error(StatusCode::NOT_FOUND, json!("TABLE_NOT_FOUND"));
    };

    let param = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let matching: Vec<&Value> = match param("filterByFormula") {
        Some(formula) => {
            let terms = find_terms(formula);
            let (Some(category), Some(subcategory)) = (terms.first(), terms.get(1)) else {
                return error(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({ "type": "INVALID_FILTER_BY_FORMULA", "message": "Invalid formula" }),
                );
            };
            rows.iter()
                .filter(|r| {
                    fake.joined_links(r, "Category", "Categories")
                        .contains(category.as_str())
                        && fake
                            .joined_links(r, "Subcategory", "Subcategories")
                            .contains(subcategory.as_str())
                })
                .collect()
        }
        None => rows.iter().collect(),
    };

    let page_size: usize = param("pageSize").and_then(|v| v.parse().ok()).unwrap_or(100);
    let start: usize = match param("offset") {
        Some(offset) => match offset.strip_prefix("itr").and_then(|v| v.parse().ok()) {
            Some(start) => start,
            None => {
                return error(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({ "type": "LIST_RECORDS_ITERATOR_NOT_AVAILABLE", "message": "Bad offset" }),
                )
            }
        },
        None => 0,
    };

    let end = (start + page_size).min(matching.len());
    let records: Vec<&Value> = matching.get(start..end).unwrap_or_default().to_vec();

    let mut body = json!({ "records": records });
    if end < matching.len() {
        body["offset"] = json!(format!("itr{}", end));
    }

    (StatusCode::OK, Json(body)).into_response()
}

async fn find_record(
    State(fake): State<Arc<FakeAirtable>>,
    Path((_base_id, table, record_id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejection) = fake.guard(&headers, &table) {
        return rejection;
    }

    match fake
        .table(&table)
        .and_then(|rows| rows.iter().find(|r| r["id"] == record_id.as_str()))
    {
        Some(record) => (StatusCode::OK, Json(record.clone())).into_response(),
        None => error(StatusCode::NOT_FOUND, json!("NOT_FOUND")),
    }
}

fn error(status: StatusCode, error: Value) -> Response {
    (status, Json(json!({ "error": error }))).into_response()
}

/// Quoted needles of every `FIND("...", ...)` in a formula, unescaped
fn find_terms(formula: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut rest = formula;

    while let Some(pos) = rest.find("FIND(\"") {
        let mut chars = rest[pos + 6..].char_indices();
        let mut term = String::new();
        let mut consumed = rest.len() - pos - 6;

        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        term.push(escaped);
                    }
                }
                '"' => {
                    consumed = i + 1;
                    break;
                }
                other => term.push(other),
            }
        }

        terms.push(term);
        rest = &rest[pos + 6 + consumed..];
    }

    terms
}
