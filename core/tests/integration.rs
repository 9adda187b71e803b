//! End-to-end tests against the mock API server.
//!
//! # Design
//! Each test starts the mock server on a random port and talks to it over real
//! HTTP through the default `ureq` transport, covering the request pipeline
//! (URL composition, headers, encoding, decoding) and both strictness modes.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use voucherify_core::{
    ApiResponse, Client, ClientConfig, RequestOptions, UreqTransport, VoucherifyError,
};

/// Start the mock server on a random port and return its address.
fn spawn_server() -> SocketAddr {
    let std_listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::new("c70a6f00-app", "3266b9f8-secret").with_api_endpoint(format!("http://{addr}"))
}

fn strict_client(addr: SocketAddr) -> Client {
    Client::new(config(addr).with_strict(true))
}

fn lenient_client(addr: SocketAddr) -> Client {
    Client::new(config(addr))
}

fn id_of(resp: &ApiResponse) -> String {
    resp.get_str("id").expect("response has an id").to_string()
}

#[test]
fn customer_crud_lifecycle() {
    let client = strict_client(spawn_server());
    let customers = client.customers();

    // Step 1: create.
    let payload = json!({
        "name": "John Doe",
        "email": "john@email.com",
        "description": "Sample description of customer",
        "metadata": { "lang": "en" },
    });
    let created = customers.create(&payload).unwrap();
    assert_eq!(created.get("email"), payload.get("email"));
    assert_eq!(created.get("name"), payload.get("name"));
    assert_eq!(created.get("metadata"), payload.get("metadata"));
    let id = id_of(&created);

    // Step 2: retrieve.
    let fetched = customers.get(&id).unwrap();
    assert_eq!(fetched.get("email"), created.get("email"));
    assert_eq!(fetched.get("name"), created.get("name"));

    // Step 3: partial update changes only the given field.
    let updated = customers
        .update(&json!({ "id": id, "description": "changed description for customer" }))
        .unwrap();
    assert_eq!(updated.get_str("description"), Some("changed description for customer"));
    assert_eq!(updated.get("email"), created.get("email"));
    assert_eq!(updated.get("name"), created.get("name"));

    // Step 4: delete returns an empty, non-JSON body.
    let deleted = customers.delete(&id).unwrap();
    assert_eq!(deleted, ApiResponse::Text(String::new()));

    // Step 5: strict get after delete raises.
    let err = customers.get(&id).unwrap_err();
    assert!(matches!(err, VoucherifyError::Remote { status: 404, .. }));
    assert_eq!(err.code(), Some(404));
    assert_eq!(err.message(), "Resource not found");

    // Step 6: the per-call override returns the error body instead.
    let resp = customers
        .with_options(RequestOptions::new().strict(false))
        .get(&id)
        .unwrap();
    assert_eq!(resp.get("code"), Some(&json!(404)));

    // Step 7: list with paging.
    customers.create(&json!({ "name": "A" })).unwrap();
    customers.create(&json!({ "name": "B" })).unwrap();
    let list = customers.list(&json!({ "limit": 1, "page": 1 })).unwrap();
    assert_eq!(list.get_str("data_ref"), Some("customers"));
    let items = list.get("customers").and_then(Value::as_array).unwrap();
    assert!(items.len() <= 1);
}

#[test]
fn lenient_client_returns_error_body_for_missing_resource() {
    let client = lenient_client(spawn_server());
    let resp = client.customers().get("cust_does_not_exist").unwrap();
    assert_eq!(resp.get("code"), Some(&json!(404)));
    assert_eq!(resp.get_str("message"), Some("Resource not found"));
    assert_eq!(resp.get_str("resource_type"), Some("customer"));
}

#[test]
fn per_call_strict_override_on_lenient_client() {
    let client = lenient_client(spawn_server());
    let err = client
        .products()
        .with_options(RequestOptions::new().strict(true))
        .get("prod_missing")
        .unwrap_err();
    assert_eq!(err.code(), Some(404));
}

#[test]
fn order_lifecycle() {
    let client = lenient_client(spawn_server());
    let orders = client.orders();

    let created = orders
        .create(&json!({
            "customer": { "source_id": "track_+EUcXP8W", "name": "Alice Morgan" },
            "amount": 2000,
            "items": [{ "product_id": "prod_083e98e0aa861107bb", "quantity": 1 }],
        }))
        .unwrap();
    let id = id_of(&created);

    let fetched = orders.get(&id).unwrap();
    assert_eq!(fetched.get_str("status"), Some("CREATED"));
    assert_eq!(fetched.get("amount"), Some(&json!(2000)));

    let updated = orders.update(&json!({ "id": id, "status": "CANCELED" })).unwrap();
    assert_eq!(updated.get_str("status"), Some("CANCELED"));
    assert_eq!(updated.get("amount"), Some(&json!(2000)));

    let list = orders.list(&json!({ "limit": 1, "page": 1 })).unwrap();
    assert_eq!(list.get_str("data_ref"), Some("orders"));
    assert!(list.get("orders").unwrap().is_array());
}

#[test]
fn product_lifecycle() {
    let client = strict_client(spawn_server());
    let products = client.products();

    let created = products
        .create(&json!({ "name": "Shoes", "price": 2000, "attributes": ["size"] }))
        .unwrap();
    let id = id_of(&created);

    let updated = products.update(&json!({ "id": id, "price": 1500 })).unwrap();
    assert_eq!(updated.get("price"), Some(&json!(1500)));
    assert_eq!(updated.get_str("name"), Some("Shoes"));

    let list = products.list(&json!({ "limit": 1, "page": 1 })).unwrap();
    assert_eq!(list.get_str("data_ref"), Some("products"));
    assert_eq!(list.get("products").and_then(Value::as_array).map(Vec::len), Some(1));
}

#[test]
fn validation_rule_lifecycle_and_failed_assignment() {
    let client = lenient_client(spawn_server());
    let rules = client.validation_rules();

    let payload = json!({
        "name": "Redeemable Once for new Customers test",
        "rules": { "1": { "name": "customer.segment" }, "logic": "1" },
    });
    let created = rules.create(&payload).unwrap();
    assert_eq!(created.get("name"), payload.get("name"));
    assert_eq!(created.get("rules").and_then(|r| r.get("logic")), Some(&json!("1")));
    let id = id_of(&created);

    let updated = rules
        .update(&json!({ "id": id, "name": "Redeemable Once for new Customers test (2)" }))
        .unwrap();
    assert_eq!(updated.get_str("name"), Some("Redeemable Once for new Customers test (2)"));

    let list = rules.list(&json!({ "limit": 1, "page": 1 })).unwrap();
    assert_eq!(list.get_str("data_ref"), Some("data"));
    let data = list.get("data").and_then(Value::as_array).unwrap();
    assert_eq!(data[0]["object"], "validation_rules");

    // Non-strict: the 404 body comes back with the related resource details.
    let assignment = rules.assign(&id, &json!({ "voucher": "-" })).unwrap();
    assert_eq!(assignment.get_str("message"), Some("Resource not found"));
    assert_eq!(assignment.get_str("details"), Some("Cannot find voucher with id -"));
    assert_eq!(assignment.get_str("resource_type"), Some("voucher"));
}

#[test]
fn voucher_codes_with_reserved_characters_round_trip() {
    let client = strict_client(spawn_server());
    let vouchers = client.vouchers();

    for code in ["SUMMER/24", "50%#OFF", "two words?"] {
        let created = vouchers
            .create(&json!({ "code": code, "type": "DISCOUNT_VOUCHER" }))
            .unwrap();
        assert_eq!(created.get_str("code"), Some(code));

        let fetched = vouchers.get(code).unwrap();
        assert_eq!(fetched.get_str("code"), Some(code));

        let disabled = vouchers.disable(code).unwrap();
        assert_eq!(disabled.get("active"), Some(&json!(false)));
        let enabled = vouchers.enable(code).unwrap();
        assert_eq!(enabled.get("active"), Some(&json!(true)));
    }
}

#[test]
fn voucher_update_and_session_release() {
    let client = strict_client(spawn_server());
    let vouchers = client.vouchers();

    let created = vouchers.create(&json!({ "type": "GIFT_VOUCHER" })).unwrap();
    let code = created.get_str("code").unwrap().to_string();

    let updated = vouchers
        .update(&json!({ "code": code, "metadata": { "tier": "gold" } }))
        .unwrap();
    assert_eq!(updated.get("metadata"), Some(&json!({ "tier": "gold" })));
    assert_eq!(updated.get_str("type"), Some("GIFT_VOUCHER"));

    let released = vouchers.release_validation_session(&code, "ssn_1").unwrap();
    assert_eq!(released.as_text(), Some(""));

    let list = vouchers.list(&json!({ "limit": 10 })).unwrap();
    assert_eq!(list.get("total"), Some(&json!(1)));
}

#[test]
fn redemption_flow() {
    let client = strict_client(spawn_server());
    client.vouchers().create(&json!({ "code": "PROMO/1" })).unwrap();

    let validation = client
        .validations()
        .validate_voucher("PROMO/1", &json!({ "order": { "amount": 1000 } }))
        .unwrap();
    assert_eq!(validation.get("valid"), Some(&json!(true)));

    let redemption = client
        .redemptions()
        .redeem_with_context(
            &json!({ "voucher": "PROMO/1", "customer": { "source_id": "alice" } }),
            Some("track_alice"),
        )
        .unwrap();
    assert_eq!(redemption.get_str("result"), Some("SUCCESS"));
    assert_eq!(redemption.get_str("tracking_id"), Some("track_alice"));
    assert_eq!(redemption.get("customer"), Some(&json!({ "source_id": "alice" })));
    let redemption_id = id_of(&redemption);

    let entries = client.redemptions().get_for_voucher("PROMO/1").unwrap();
    assert_eq!(entries.get("redeemed_quantity"), Some(&json!(1)));

    let rollback = client
        .redemptions()
        .rollback(&redemption_id, Some("wrong order"), None)
        .unwrap();
    assert_eq!(rollback.get_str("reason"), Some("wrong order"));

    // A second rollback is rejected by the server.
    let err = client
        .redemptions()
        .rollback(&redemption_id, None, None)
        .unwrap_err();
    assert_eq!(err.code(), Some(400));

    let list = client.redemptions().list(&json!({ "limit": 5 })).unwrap();
    assert_eq!(list.get_str("data_ref"), Some("redemptions"));
}

#[test]
fn stackable_calls_and_publication() {
    let client = strict_client(spawn_server());
    client.vouchers().create(&json!({ "code": "A" })).unwrap();
    client.vouchers().create(&json!({ "code": "B" })).unwrap();
    client.vouchers().disable("B").unwrap();

    let params = json!({ "redeemables": [{ "object": "voucher", "id": "A" }, { "object": "voucher", "id": "B" }] });
    let validation = client.validations().validate_stackable(&params).unwrap();
    assert_eq!(validation.get("valid"), Some(&json!(false)));

    let only_a = json!({ "redeemables": [{ "object": "voucher", "id": "A" }] });
    let redeemed = client.redemptions().redeem_stackable(&only_a).unwrap();
    assert_eq!(redeemed.get("redemptions").and_then(Value::as_array).map(Vec::len), Some(1));

    let publication = client
        .distributions()
        .publish(&json!({ "voucher": "A", "customer": { "source_id": "bob" } }))
        .unwrap();
    assert_eq!(publication.get_str("object"), Some("publication"));
    assert_eq!(
        publication.get("voucher").and_then(|v| v.get("code")),
        Some(&json!("A"))
    );
}

#[test]
fn redeeming_a_disabled_voucher_surfaces_api_error() {
    let client = lenient_client(spawn_server());
    client.vouchers().create(&json!({ "code": "OFF" })).unwrap();
    client.vouchers().disable("OFF").unwrap();

    let resp = client.redemptions().redeem("OFF", None).unwrap();
    assert_eq!(resp.get("code"), Some(&json!(400)));
    assert_eq!(resp.get_str("key"), Some("voucher_disabled"));
}

#[test]
fn missing_credentials_are_rejected() {
    let addr = spawn_server();
    let client = Client::new(
        ClientConfig::new("", "")
            .with_api_endpoint(format!("http://{addr}"))
            .with_strict(true),
    );
    let err = client.customers().list(&json!({})).unwrap_err();
    assert_eq!(err.code(), Some(401));
    assert_eq!(err.message(), "Unauthorized");
}

#[test]
fn connection_refused_is_a_transport_failure() {
    // Bind then drop to get a port nobody listens on.
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

    let strict = strict_client(addr);
    let err = strict.customers().get("cust_1").unwrap_err();
    assert!(matches!(err, VoucherifyError::Transport(_)));
    assert_eq!(err.code(), None);
    assert!(!err.message().is_empty());

    let lenient = lenient_client(addr);
    let resp = lenient.customers().get("cust_1").unwrap();
    let message = resp.get_str("message").unwrap();
    assert!(!message.is_empty());
    assert!(resp.get("code").is_none());
}

#[test]
fn per_call_timeout_bounds_the_call() {
    // Accepts connections but never answers.
    let silent = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = silent.local_addr().unwrap();
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in silent.incoming().flatten() {
            held.push(stream);
        }
    });

    let client = strict_client(addr);
    let started = Instant::now();
    let err = client
        .orders()
        .with_options(RequestOptions::new().timeout(Duration::from_millis(300)))
        .list(&json!({}))
        .unwrap_err();
    assert!(matches!(err, VoucherifyError::Transport(_)));
    assert!(started.elapsed() < Duration::from_secs(10));
}

/// Answer a single request with a canned response, then close.
fn serve_once(status_line: &'static str, body: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        // Requests in these tests carry no body: headers end at the blank line.
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        let head = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(body.as_bytes());
    });
    addr
}

fn large_json(extra: &str) -> String {
    let filler = "a".repeat(11 * 1024 * 1024);
    format!(r#"{{{extra}"data":"{filler}"}}"#)
}

#[test]
fn large_success_body_is_decoded() {
    let addr = serve_once("200 OK", large_json(""));

    let resp = strict_client(addr).customers().list(&json!({})).unwrap();
    let data = resp.get_str("data").expect("decoded json body");
    assert_eq!(data.len(), 11 * 1024 * 1024);
}

#[test]
fn large_error_body_keeps_the_status() {
    let addr = serve_once(
        "500 Internal Server Error",
        large_json(r#""code":500,"message":"Too much","#),
    );

    let err = strict_client(addr).customers().list(&json!({})).unwrap_err();
    assert!(matches!(err, VoucherifyError::Remote { status: 500, .. }));
    assert_eq!(err.code(), Some(500));
    assert_eq!(err.message(), "Too much");
}

#[test]
fn configured_body_limit_is_a_transport_failure() {
    let addr = serve_once("200 OK", r#"{"data":"more than sixteen bytes"}"#.to_string());

    let client = Client::with_transport(
        config(addr).with_strict(true),
        UreqTransport::new().with_body_limit(16),
    );
    let err = client.customers().list(&json!({})).unwrap_err();
    assert!(matches!(err, VoucherifyError::Transport(_)));
}

#[test]
fn one_client_serves_concurrent_threads() {
    let client = strict_client(spawn_server());
    std::thread::scope(|scope| {
        for i in 0..4 {
            let client = &client;
            scope.spawn(move || {
                let created = client
                    .customers()
                    .create(&json!({ "name": format!("customer {i}") }))
                    .unwrap();
                let fetched = client.customers().get(&id_of(&created)).unwrap();
                assert_eq!(fetched.get("name"), created.get("name"));
            });
        }
    });
    let list = client.customers().list(&json!({ "limit": 100 })).unwrap();
    assert_eq!(list.get("total"), Some(&json!(4)));
}
