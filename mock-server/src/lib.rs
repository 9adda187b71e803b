//! In-memory imitation of the Voucherify `/v1` API.
//!
//! Records are stored as raw JSON objects so partial updates merge the same
//! way the real service does. Errors use the service's error shape
//! (`code`, `key`, `message`, `details`, `resource_type`).

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// A collection served under `/v1/{path}/`.
#[derive(Debug)]
pub struct Resource {
    pub path: &'static str,
    pub object: &'static str,
    pub data_ref: &'static str,
    pub id_prefix: &'static str,
    pub resource_type: &'static str,
}

pub static CUSTOMERS: Resource = Resource {
    path: "customers",
    object: "customer",
    data_ref: "customers",
    id_prefix: "cust_",
    resource_type: "customer",
};

pub static ORDERS: Resource = Resource {
    path: "orders",
    object: "order",
    data_ref: "orders",
    id_prefix: "ord_",
    resource_type: "order",
};

pub static PRODUCTS: Resource = Resource {
    path: "products",
    object: "product",
    data_ref: "products",
    id_prefix: "prod_",
    resource_type: "product",
};

pub static VALIDATION_RULES: Resource = Resource {
    path: "validation-rules",
    object: "validation_rules",
    data_ref: "data",
    id_prefix: "val_",
    resource_type: "validation_rules",
};

const VOUCHERS: &str = "vouchers";
const REDEMPTIONS: &str = "redemptions";
const ROLLBACKS: &str = "rollbacks";
const ASSIGNMENTS: &str = "assignments";

/// Collections keyed by name, records keyed by id (or code for vouchers).
pub type Db = Arc<RwLock<HashMap<&'static str, BTreeMap<String, Value>>>>;

#[derive(Clone)]
struct Scoped {
    db: Db,
    resource: &'static Resource,
}

/// An error rendered in the service's JSON error shape.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    fn new(status: StatusCode, key: &str, message: &str, details: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({
                "code": status.as_u16(),
                "key": key,
                "message": message,
                "details": details.into(),
                "request_id": format!("v-{}", Uuid::new_v4().simple()),
            }),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        let mut err = Self::new(
            StatusCode::NOT_FOUND,
            "not_found",
            "Resource not found",
            format!("Cannot find {resource_type} with id {id}"),
        );
        err.body["resource_id"] = json!(id);
        err.body["resource_type"] = json!(resource_type);
        err
    }

    pub fn bad_request(key: &str, message: &str, details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, key, message, details)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RedeemQuery {
    pub tracking_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RollbackQuery {
    pub reason: Option<String>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    let scoped = |resource: &'static Resource| Scoped {
        db: db.clone(),
        resource,
    };
    Router::new()
        .merge(crud_routes(&CUSTOMERS, true).with_state(scoped(&CUSTOMERS)))
        .merge(crud_routes(&ORDERS, false).with_state(scoped(&ORDERS)))
        .merge(crud_routes(&PRODUCTS, false).with_state(scoped(&PRODUCTS)))
        .merge(
            crud_routes(&VALIDATION_RULES, false)
                .route("/v1/validation-rules/{id}/assignments", post(assign_rule))
                .with_state(scoped(&VALIDATION_RULES)),
        )
        .merge(voucher_routes().with_state(db.clone()))
        .layer(middleware::from_fn(require_credentials))
}

/// `/v1/{path}/` (list, create) and `/v1/{path}/{id}` (get, update and
/// optionally delete).
fn crud_routes(resource: &'static Resource, deletable: bool) -> Router<Scoped> {
    let collection = format!("/v1/{}/", resource.path);
    let item = format!("/v1/{}/{{id}}", resource.path);
    let mut item_methods = get(get_record).put(update_record);
    if deletable {
        item_methods = item_methods.delete(delete_record);
    }
    Router::new()
        .route(&collection, get(list_records).post(create_record))
        .route(&item, item_methods)
}

fn voucher_routes() -> Router<Db> {
    Router::new()
        .route("/v1/vouchers/", get(list_vouchers).post(create_voucher_without_code))
        .route("/v1/vouchers/publish", post(publish))
        .route(
            "/v1/vouchers/{code}",
            get(get_voucher).post(create_voucher).put(update_voucher),
        )
        .route("/v1/vouchers/{code}/enable", post(enable_voucher))
        .route("/v1/vouchers/{code}/disable", post(disable_voucher))
        .route(
            "/v1/vouchers/{code}/sessions/{session_key}",
            delete(release_session),
        )
        .route(
            "/v1/vouchers/{code}/redemption",
            get(voucher_redemptions).post(redeem),
        )
        .route("/v1/vouchers/{code}/validate", post(validate_voucher))
        .route("/v1/redemptions/", get(list_redemptions).post(redeem_stackable))
        .route("/v1/redemptions/{id}/rollback", post(rollback))
        .route("/v1/validations/", post(validate_stackable))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_credentials(headers: HeaderMap, request: Request, next: Next) -> Response {
    let present = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| !v.is_empty())
    };
    if !present("x-app-id") || !present("x-app-token") {
        tracing::warn!(uri = %request.uri(), "rejecting request without credentials");
        return ApiError::new(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Unauthorized",
            "Missing X-App-Id or X-App-Token header",
        )
        .into_response();
    }
    next.run(request).await
}

// --- helpers ---

fn new_id(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4().simple())
}

fn object_body(body: Value) -> ApiResult<Map<String, Value>> {
    match body {
        Value::Object(object) => Ok(object),
        _ => Err(ApiError::bad_request(
            "invalid_payload",
            "Invalid payload",
            "Request body must be a JSON object",
        )),
    }
}

/// Overwrite top-level fields; identifiers are immutable.
fn apply_patch(record: &mut Value, patch: Map<String, Value>, immutable: &str) {
    if let Value::Object(target) = record {
        for (key, value) in patch {
            if key != immutable {
                target.insert(key, value);
            }
        }
    }
}

fn list_envelope(data_ref: &str, records: Vec<Value>, query: &ListQuery) -> Value {
    let total = records.len();
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);
    let page_items: Vec<Value> = records
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();
    json!({
        "object": "list",
        "data_ref": data_ref,
        (data_ref): page_items,
        "total": total,
    })
}

// --- generic CRUD ---

async fn list_records(
    State(scoped): State<Scoped>,
    Query(query): Query<ListQuery>,
) -> Json<Value> {
    let db = scoped.db.read().await;
    let records: Vec<Value> = db
        .get(scoped.resource.path)
        .map(|c| c.values().cloned().collect())
        .unwrap_or_default();
    Json(list_envelope(scoped.resource.data_ref, records, &query))
}

async fn create_record(
    State(scoped): State<Scoped>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let resource = scoped.resource;
    let mut record = object_body(body)?;
    let id = new_id(resource.id_prefix);
    record.insert("id".to_string(), json!(id));
    record.insert("object".to_string(), json!(resource.object));
    if resource.path == ORDERS.path {
        record
            .entry("status".to_string())
            .or_insert_with(|| json!("CREATED"));
    }
    let record = Value::Object(record);
    scoped
        .db
        .write()
        .await
        .entry(resource.path)
        .or_default()
        .insert(id, record.clone());
    Ok(Json(record))
}

async fn get_record(
    State(scoped): State<Scoped>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let db = scoped.db.read().await;
    db.get(scoped.resource.path)
        .and_then(|c| c.get(&id))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(scoped.resource.resource_type, &id))
}

async fn update_record(
    State(scoped): State<Scoped>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let patch = object_body(body)?;
    let mut db = scoped.db.write().await;
    let record = db
        .get_mut(scoped.resource.path)
        .and_then(|c| c.get_mut(&id))
        .ok_or_else(|| ApiError::not_found(scoped.resource.resource_type, &id))?;
    apply_patch(record, patch, "id");
    Ok(Json(record.clone()))
}

async fn delete_record(
    State(scoped): State<Scoped>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut db = scoped.db.write().await;
    db.get_mut(scoped.resource.path)
        .and_then(|c| c.remove(&id))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiError::not_found(scoped.resource.resource_type, &id))
}

async fn assign_rule(
    State(scoped): State<Scoped>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let body = object_body(body)?;
    let mut db = scoped.db.write().await;
    if !db.get(VALIDATION_RULES.path).is_some_and(|c| c.contains_key(&id)) {
        return Err(ApiError::not_found(VALIDATION_RULES.resource_type, &id));
    }
    let code = body
        .get("voucher")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ApiError::bad_request(
                "missing_assignee",
                "Invalid payload",
                "Assignment requires a voucher",
            )
        })?;
    if !db.get(VOUCHERS).is_some_and(|c| c.contains_key(code)) {
        return Err(ApiError::not_found("voucher", code));
    }
    let assignment = json!({
        "id": new_id("asgm_"),
        "object": "validation_rules_assignment",
        "rule_id": id,
        "related_object_id": code,
        "related_object_type": "voucher",
    });
    let assignment_id = assignment["id"].as_str().unwrap_or_default().to_string();
    db.entry(ASSIGNMENTS)
        .or_default()
        .insert(assignment_id, assignment.clone());
    Ok((StatusCode::CREATED, Json(assignment)))
}

// --- vouchers ---

fn find_voucher<'a>(
    db: &'a HashMap<&'static str, BTreeMap<String, Value>>,
    code: &str,
) -> ApiResult<&'a Value> {
    db.get(VOUCHERS)
        .and_then(|c| c.get(code))
        .ok_or_else(|| ApiError::not_found("voucher", code))
}

fn find_voucher_mut<'a>(
    db: &'a mut HashMap<&'static str, BTreeMap<String, Value>>,
    code: &str,
) -> ApiResult<&'a mut Value> {
    db.get_mut(VOUCHERS)
        .and_then(|c| c.get_mut(code))
        .ok_or_else(|| ApiError::not_found("voucher", code))
}

async fn list_vouchers(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Value> {
    let db = db.read().await;
    let records: Vec<Value> = db
        .get(VOUCHERS)
        .map(|c| c.values().cloned().collect())
        .unwrap_or_default();
    Json(list_envelope(VOUCHERS, records, &query))
}

async fn create_voucher_without_code(
    State(db): State<Db>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    insert_voucher(&db, None, body).await
}

async fn create_voucher(
    State(db): State<Db>,
    Path(code): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    insert_voucher(&db, Some(code), body).await
}

async fn insert_voucher(db: &Db, code: Option<String>, body: Value) -> ApiResult<Json<Value>> {
    let mut voucher = object_body(body)?;
    let code = code
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let mut db = db.write().await;
    let vouchers = db.entry(VOUCHERS).or_default();
    if vouchers.contains_key(&code) {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "duplicate_found",
            "Duplicate resource key",
            format!("Duplicated voucher exists with id {code}"),
        ));
    }
    voucher.insert("id".to_string(), json!(new_id("v_")));
    voucher.insert("code".to_string(), json!(code));
    voucher.insert("object".to_string(), json!("voucher"));
    voucher.entry("active".to_string()).or_insert(json!(true));
    voucher.insert(
        "redemption".to_string(),
        json!({ "object": "list", "quantity": null, "redeemed_quantity": 0 }),
    );
    let voucher = Value::Object(voucher);
    vouchers.insert(code, voucher.clone());
    Ok(Json(voucher))
}

async fn get_voucher(State(db): State<Db>, Path(code): Path<String>) -> ApiResult<Json<Value>> {
    let db = db.read().await;
    find_voucher(&db, &code).cloned().map(Json)
}

async fn update_voucher(
    State(db): State<Db>,
    Path(code): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let patch = object_body(body)?;
    let mut db = db.write().await;
    let voucher = find_voucher_mut(&mut db, &code)?;
    apply_patch(voucher, patch, "code");
    Ok(Json(voucher.clone()))
}

async fn enable_voucher(State(db): State<Db>, Path(code): Path<String>) -> ApiResult<Json<Value>> {
    set_active(&db, &code, true).await
}

async fn disable_voucher(State(db): State<Db>, Path(code): Path<String>) -> ApiResult<Json<Value>> {
    set_active(&db, &code, false).await
}

async fn set_active(db: &Db, code: &str, active: bool) -> ApiResult<Json<Value>> {
    let mut db = db.write().await;
    let voucher = find_voucher_mut(&mut db, code)?;
    voucher["active"] = json!(active);
    Ok(Json(voucher.clone()))
}

async fn release_session(
    State(db): State<Db>,
    Path((code, _session_key)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let db = db.read().await;
    find_voucher(&db, &code)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn voucher_redemptions(
    State(db): State<Db>,
    Path(code): Path<String>,
) -> ApiResult<Json<Value>> {
    let db = db.read().await;
    let voucher = find_voucher(&db, &code)?;
    let entries: Vec<Value> = db
        .get(REDEMPTIONS)
        .map(|c| {
            c.values()
                .filter(|r| r["voucher"]["code"] == json!(code))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Ok(Json(json!({
        "object": "list",
        "data_ref": "redemption_entries",
        "quantity": voucher["redemption"]["quantity"],
        "redeemed_quantity": voucher["redemption"]["redeemed_quantity"],
        "total": entries.len(),
        "redemption_entries": entries,
    })))
}

/// Redeem one voucher, recording the redemption. Returns the record.
fn redeem_one(
    db: &mut HashMap<&'static str, BTreeMap<String, Value>>,
    code: &str,
    context: &Map<String, Value>,
    tracking_id: Option<String>,
) -> ApiResult<Value> {
    let voucher = find_voucher_mut(db, code)?;
    if voucher["active"] == json!(false) {
        return Err(ApiError::bad_request(
            "voucher_disabled",
            "voucher is disabled",
            format!("Voucher {code} is disabled"),
        ));
    }
    let redeemed = voucher["redemption"]["redeemed_quantity"].as_u64().unwrap_or(0) + 1;
    voucher["redemption"]["redeemed_quantity"] = json!(redeemed);
    let voucher = voucher.clone();

    let mut redemption = json!({
        "id": new_id("r_"),
        "object": "redemption",
        "result": "SUCCESS",
        "status": "SUCCEEDED",
        "tracking_id": tracking_id.unwrap_or_else(|| new_id("track_")),
        "voucher": voucher,
    });
    for key in ["customer", "order", "metadata"] {
        if let Some(value) = context.get(key) {
            redemption[key] = value.clone();
        }
    }
    let id = redemption["id"].as_str().unwrap_or_default().to_string();
    db.entry(REDEMPTIONS).or_default().insert(id, redemption.clone());
    Ok(redemption)
}

async fn redeem(
    State(db): State<Db>,
    Path(code): Path<String>,
    Query(query): Query<RedeemQuery>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let context = object_body(body)?;
    let mut db = db.write().await;
    redeem_one(&mut db, &code, &context, query.tracking_id).map(Json)
}

fn redeemable_codes(body: &Map<String, Value>) -> ApiResult<Vec<String>> {
    let redeemables = body
        .get("redeemables")
        .and_then(Value::as_array)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| {
            ApiError::bad_request(
                "missing_redeemables",
                "Invalid payload",
                "redeemables must be a non-empty array",
            )
        })?;
    redeemables
        .iter()
        .map(|r| {
            r.get("id").and_then(Value::as_str).map(str::to_string).ok_or_else(|| {
                ApiError::bad_request("invalid_redeemable", "Invalid payload", "redeemable needs an id")
            })
        })
        .collect()
}

async fn redeem_stackable(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult<Json<Value>> {
    let body = object_body(body)?;
    let codes = redeemable_codes(&body)?;
    let mut db = db.write().await;
    for code in &codes {
        find_voucher(&db, code)?;
    }
    let mut redemptions = Vec::with_capacity(codes.len());
    for code in &codes {
        redemptions.push(redeem_one(&mut db, code, &body, None)?);
    }
    Ok(Json(json!({
        "parent_redemption": {
            "id": new_id("r_"),
            "object": "redemption",
            "result": "SUCCESS",
            "redemptions": redemptions.iter().map(|r| r["id"].clone()).collect::<Vec<_>>(),
        },
        "redemptions": redemptions,
    })))
}

async fn list_redemptions(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Value> {
    let db = db.read().await;
    let records: Vec<Value> = db
        .get(REDEMPTIONS)
        .map(|c| c.values().cloned().collect())
        .unwrap_or_default();
    Json(list_envelope("redemptions", records, &query))
}

async fn rollback(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(query): Query<RollbackQuery>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let context = object_body(body)?;
    let mut db = db.write().await;
    let redemption = db
        .get_mut(REDEMPTIONS)
        .and_then(|c| c.get_mut(&id))
        .ok_or_else(|| ApiError::not_found("redemption", &id))?;
    if redemption["status"] == json!("ROLLED_BACK") {
        return Err(ApiError::bad_request(
            "already_rolled_back",
            "Redemption was already rolled back",
            format!("Redemption {id} has already been rolled back"),
        ));
    }
    redemption["status"] = json!("ROLLED_BACK");
    let code = redemption["voucher"]["code"].as_str().unwrap_or_default().to_string();

    if let Ok(voucher) = find_voucher_mut(&mut db, &code) {
        let redeemed = voucher["redemption"]["redeemed_quantity"].as_u64().unwrap_or(1);
        voucher["redemption"]["redeemed_quantity"] = json!(redeemed.saturating_sub(1));
    }

    let mut record = json!({
        "id": new_id("rr_"),
        "object": "redemption_rollback",
        "result": "SUCCESS",
        "redemption": id,
        "reason": query.reason,
        "voucher": { "code": code },
    });
    for key in ["customer", "metadata"] {
        if let Some(value) = context.get(key) {
            record[key] = value.clone();
        }
    }
    let record_id = record["id"].as_str().unwrap_or_default().to_string();
    db.entry(ROLLBACKS).or_default().insert(record_id, record.clone());
    Ok(Json(record))
}

// --- validations & distributions ---

async fn validate_voucher(
    State(db): State<Db>,
    Path(code): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    object_body(body)?;
    let db = db.read().await;
    let voucher = find_voucher(&db, &code)?;
    let valid = voucher["active"] != json!(false);
    let mut result = json!({
        "valid": valid,
        "code": code,
        "tracking_id": new_id("track_"),
    });
    if !valid {
        result["reason"] = json!("voucher is disabled");
    }
    Ok(Json(result))
}

async fn validate_stackable(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult<Json<Value>> {
    let body = object_body(body)?;
    let codes = redeemable_codes(&body)?;
    let db = db.read().await;
    let redeemables: Vec<Value> = codes
        .iter()
        .map(|code| {
            let status = match find_voucher(&db, code) {
                Ok(voucher) if voucher["active"] != json!(false) => "APPLICABLE",
                _ => "INAPPLICABLE",
            };
            json!({ "object": "voucher", "id": code, "status": status })
        })
        .collect();
    let valid = redeemables.iter().all(|r| r["status"] == json!("APPLICABLE"));
    Ok(Json(json!({ "valid": valid, "redeemables": redeemables })))
}

async fn publish(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult<Json<Value>> {
    let body = object_body(body)?;
    let code = body.get("voucher").and_then(Value::as_str).ok_or_else(|| {
        ApiError::bad_request(
            "missing_voucher",
            "Invalid payload",
            "Publication requires a voucher",
        )
    })?;
    let db = db.read().await;
    let voucher = find_voucher(&db, code)?;
    Ok(Json(json!({
        "id": new_id("pub_"),
        "object": "publication",
        "result": "SUCCESS",
        "customer": body.get("customer").cloned().unwrap_or(Value::Null),
        "voucher": voucher,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error_shape() {
        let err = ApiError::not_found("voucher", "-");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.body["code"], 404);
        assert_eq!(err.body["message"], "Resource not found");
        assert_eq!(err.body["details"], "Cannot find voucher with id -");
        assert_eq!(err.body["resource_type"], "voucher");
    }

    #[test]
    fn list_envelope_pages() {
        let records: Vec<Value> = (0..5).map(|i| json!({ "id": i })).collect();
        let query = ListQuery {
            limit: Some(2),
            page: Some(2),
        };
        let envelope = list_envelope("customers", records, &query);
        assert_eq!(envelope["data_ref"], "customers");
        assert_eq!(envelope["total"], 5);
        assert_eq!(envelope["customers"], json!([{ "id": 2 }, { "id": 3 }]));
    }

    #[test]
    fn list_envelope_past_the_end_is_empty() {
        let query = ListQuery {
            limit: Some(1),
            page: Some(9),
        };
        let envelope = list_envelope("data", vec![json!({})], &query);
        assert_eq!(envelope["data"], json!([]));
    }

    #[test]
    fn list_envelope_huge_page_is_empty() {
        let query = ListQuery {
            limit: Some(100),
            page: Some(usize::MAX),
        };
        let envelope = list_envelope("customers", vec![json!({ "id": 1 })], &query);
        assert_eq!(envelope["customers"], json!([]));
        assert_eq!(envelope["total"], 1);
    }

    #[test]
    fn patch_keeps_identifier() {
        let mut record = json!({ "id": "cust_1", "name": "John", "email": "john@email.com" });
        let patch = object_body(json!({ "id": "other", "name": "Jane" })).unwrap();
        apply_patch(&mut record, patch, "id");
        assert_eq!(record["id"], "cust_1");
        assert_eq!(record["name"], "Jane");
        assert_eq!(record["email"], "john@email.com");
    }

    #[test]
    fn object_body_rejects_arrays() {
        assert!(object_body(json!([1])).is_err());
    }
}
