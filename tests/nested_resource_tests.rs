//! Integration tests for nested resource operations.
//!
//! These tests run the full pipeline (validation, dispatch through
//! `HttpClient`, hydration) against a wiremock server.

use safepay_api::clients::{ApiError, HttpClient, API_VERSION_HEADER, SECRET_KEY_HEADER};
use safepay_api::rest::resources::{
    CardCreateParams, CardListParams, CardUpdateParams, Customer, Payment, RefundCreateParams,
    RefundUpdateParams,
};
use safepay_api::rest::{Collection, NestedResource, SafepayObject};
use safepay_api::{
    ApiBase, ApiVersion, RequestOptions, RequestSettings, ResourceError, SafepayConfig, SecretKey,
    ValidationError,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server.
fn create_client(server: &MockServer) -> HttpClient {
    let config = SafepayConfig::builder()
        .secret_key(SecretKey::new("sec_test_key").unwrap())
        .api_base(ApiBase::new(server.uri()).unwrap())
        .build()
        .unwrap();
    HttpClient::new(&config).unwrap()
}

fn card_json(token: &str) -> serde_json::Value {
    json!({
        "data": {
            "token": token,
            "customer": "cus_1",
            "kind": "CARD",
            "last_four": "4242",
            "is_default": false
        },
        "status": {"errors": [], "message": "success"}
    })
}

// ============================================================================
// Customer cards
// ============================================================================

#[tokio::test]
async fn test_retrieve_card_sends_get_to_member_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/cus_1/cards/card_9"))
        .and(header(SECRET_KEY_HEADER, "sec_test_key"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "req-abc")
                .set_body_json(card_json("card_9")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let card = Customer::retrieve_card(&client, "cus_1", "card_9", None)
        .await
        .unwrap();

    assert_eq!(card.token, "card_9");
    assert_eq!(card.last_four.as_deref(), Some("4242"));
    assert_eq!(card.request_id(), Some("req-abc"));
    assert_eq!(card.last_response().code, 200);
    assert_eq!(card.last_response().body, card_json("card_9"));
}

#[tokio::test]
async fn test_all_cards_sends_get_to_collection_url_with_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/cus_1/cards"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "data": [{"token": "card_1"}, {"token": "card_2"}],
                "count": 2
            },
            "status": {"errors": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let params = CardListParams {
        limit: Some(10),
        ..Default::default()
    };
    let cards = Customer::all_cards(&client, "cus_1", Some(&params), None)
        .await
        .unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards.total(), 2);
    assert_eq!(cards[0].token, "card_1");
}

#[tokio::test]
async fn test_create_card_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/customers/cus_1/cards"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"token": "tok_abc"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(card_json("card_new")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let params = CardCreateParams {
        token: "tok_abc".to_string(),
        is_default: None,
    };
    let card = Customer::create_card(&client, "cus_1", &params, None)
        .await
        .unwrap();

    assert_eq!(card.token, "card_new");
    assert_eq!(card.last_response().code, 201);
}

#[tokio::test]
async fn test_update_card_posts_to_member_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/customers/cus_1/cards/card_9"))
        .and(body_json(json!({"is_default": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("card_9")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let params = CardUpdateParams {
        is_default: Some(true),
        ..Default::default()
    };
    let card = Customer::update_card(&client, "cus_1", "card_9", &params, None)
        .await
        .unwrap();

    assert_eq!(card.token, "card_9");
}

#[tokio::test]
async fn test_delete_card_sends_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/customers/cus_1/cards/card_9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "status": {"errors": [], "message": "success"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let deleted = Customer::delete_card(&client, "cus_1", "card_9", None)
        .await
        .unwrap();

    assert!(deleted.deleted);
}

#[tokio::test]
async fn test_empty_delete_body_counts_as_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/customers/cus_1/cards/card_9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let deleted = Customer::delete_card(&client, "cus_1", "card_9", None)
        .await
        .unwrap();

    assert!(deleted.deleted);
    assert_eq!(deleted.id, None);
}

// ============================================================================
// Payment refunds
// ============================================================================

#[tokio::test]
async fn test_refund_lifecycle() {
    let server = MockServer::start().await;
    let refund = json!({
        "data": {"token": "ref_2", "payment": "pay_1", "amount": 5000, "currency": "PKR"},
        "status": {"errors": []}
    });

    Mock::given(method("POST"))
        .and(path("/payments/pay_1/refunds"))
        .and(body_json(json!({"amount": 5000})))
        .respond_with(ResponseTemplate::new(201).set_body_json(refund.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/pay_1/refunds/ref_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refund.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments/pay_1/refunds/ref_2"))
        .and(body_json(json!({"reason": "duplicate"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(refund))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/pay_1/refunds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"token": "ref_1"},
            {"token": "ref_2"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);

    let created = Payment::create_refund(
        &client,
        "pay_1",
        &RefundCreateParams {
            amount: Some(5000),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();
    assert_eq!(created.token, "ref_2");

    let fetched = Payment::retrieve_refund(&client, "pay_1", "ref_2", None)
        .await
        .unwrap();
    assert_eq!(fetched.amount, Some(5000));

    let updated = Payment::update_refund(
        &client,
        "pay_1",
        "ref_2",
        &RefundUpdateParams {
            reason: Some("duplicate".to_string()),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();
    assert_eq!(updated.currency.as_deref(), Some("PKR"));

    let all = Payment::all_refunds(&client, "pay_1", None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all.count, None);
}

// ============================================================================
// Generic operations
// ============================================================================

#[tokio::test]
async fn test_generic_operations_hydrate_untyped_objects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/cus_1/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"token": "card_1", "object": "payment_method"}]
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let cards = Customer::all_nested_resources::<Collection<SafepayObject>, _>(
        &client, "cus_1", "/cards", None, None,
    )
    .await
    .unwrap();

    assert_eq!(cards[0].object(), Some("payment_method"));
}

#[tokio::test]
async fn test_identifiers_are_percent_encoded_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/cus%201/cards/card%2F9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("card/9")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let card = Customer::retrieve_card(&client, "cus 1", "card/9", None)
        .await
        .unwrap();

    assert_eq!(card.token, "card/9");
}

#[tokio::test]
async fn test_invalid_params_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = Customer::create_nested_resource::<SafepayObject, _>(
        &client,
        "cus_1",
        "/cards",
        Some(&json!(["tok_abc"])),
        None,
    )
    .await;

    assert!(matches!(
        result,
        Err(ResourceError::Validation(ValidationError::NotAMapping { found: "array" }))
    ));
}

// ============================================================================
// Request options
// ============================================================================

#[tokio::test]
async fn test_bare_key_option_replaces_secret_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/cus_1/cards/card_9"))
        .and(header(SECRET_KEY_HEADER, "sec_other_merchant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("card_9")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let options = RequestOptions::ApiKey(SecretKey::new("sec_other_merchant").unwrap());
    let card = Customer::retrieve_card(&client, "cus_1", "card_9", Some(&options))
        .await
        .unwrap();

    assert_eq!(
        card.options().api_key,
        Some(SecretKey::new("sec_other_merchant").unwrap())
    );
}

#[tokio::test]
async fn test_secret_header_override_in_other_case_sends_one_secret() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/cus_1/cards/card_9"))
        .and(header(SECRET_KEY_HEADER, "sec_other"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("card_9")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(header(SECRET_KEY_HEADER, "sec_test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("card_9")))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let options = RequestOptions::Settings(
        RequestSettings::new().header("x-sfpy-merchant-secret", "sec_other"),
    );
    Customer::retrieve_card(&client, "cus_1", "card_9", Some(&options))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let secrets: Vec<_> = requests[0]
        .headers
        .iter()
        .filter(|(name, _)| name.as_str().eq_ignore_ascii_case(SECRET_KEY_HEADER))
        .flat_map(|(_, values)| values.iter().map(ToString::to_string))
        .collect();
    assert_eq!(secrets, vec!["sec_other".to_string()]);
}

#[tokio::test]
async fn test_settings_option_applies_version_headers_and_base() {
    let default_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/pay_1/refunds"))
        .and(header(API_VERSION_HEADER, "v2"))
        .and(header("X-Trace-Id", "trace-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&other_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&default_server)
        .await;

    let client = create_client(&default_server);
    let options = RequestOptions::Settings(
        RequestSettings::new()
            .api_version(ApiVersion::new("v2").unwrap())
            .api_base(ApiBase::new(other_server.uri()).unwrap())
            .header("X-Trace-Id", "trace-1"),
    );

    let refunds = Payment::all_refunds(&client, "pay_1", Some(&options))
        .await
        .unwrap();
    assert!(refunds.is_empty());
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_not_found_is_returned_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/cus_1/cards/card_missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("X-Request-Id", "req-404")
                .set_body_json(json!({
                    "data": null,
                    "status": {"errors": ["card not found"], "message": "error"}
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = Customer::retrieve_card(&client, "cus_1", "card_missing", None).await;

    match result {
        Err(ResourceError::Api(ApiError::NotFound(e))) => {
            assert_eq!(e.code, 404);
            assert_eq!(e.request_id.as_deref(), Some("req-404"));
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments/pay_1/refunds"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result =
        Payment::create_refund(&client, "pay_1", &RefundCreateParams::default(), None).await;

    match result {
        Err(ResourceError::Api(ApiError::Response(e))) => {
            assert_eq!(e.code, 500);
            assert!(e.message.contains("upstream exploded"));
        }
        other => panic!("Expected Response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": {"errors": ["invalid merchant secret"], "message": "error"}
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = Payment::all_refunds(&client, "pay_1", None).await;

    assert!(matches!(
        result,
        Err(ResourceError::Api(ApiError::Authentication(_)))
    ));
}

#[tokio::test]
async fn test_non_json_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = Customer::retrieve_card(&client, "cus_1", "card_9", None).await;

    assert!(matches!(
        result,
        Err(ResourceError::Api(ApiError::MalformedResponse { code: 200, .. }))
    ));
}

#[tokio::test]
async fn test_body_of_wrong_shape_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [1, 2]})))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = Customer::retrieve_card(&client, "cus_1", "card_9", None).await;

    match result {
        Err(ResourceError::Api(ApiError::MalformedResponse { message, .. })) => {
            assert!(message.contains("payment_method"));
        }
        other => panic!("Expected MalformedResponse, got {other:?}"),
    }
}
