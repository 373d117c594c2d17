#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assetdesk_api::types::{
    Address, AssetKind, AssetRequest, AssetType, CustomerRequest, InfrastructureFilter,
    InfrastructureType, NetworkDeviceSpecs, SiteRequest,
};
use assetdesk_api::{ApiClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_customers() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": "c1",
            "name": "Acme",
            "contact_email": "a@acme.com",
            "contact_phone": "555-0100"
        },
        {
            "id": "c2",
            "name": "Globex",
            "contact_email": "ops@globex.com",
            "contact_phone": "555-0199",
            "address": {
                "street_address": "1 Main St",
                "city": "Springfield",
                "postal_code": "12345",
                "country": "US"
            }
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let customers = client.list_customers().await.unwrap();

    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].name, "Acme");
    assert!(customers[0].address.is_none());
    assert_eq!(
        customers[1].address.as_ref().map(|a| a.city.as_str()),
        Some("Springfield")
    );
}

#[tokio::test]
async fn test_create_customer_omits_missing_address() {
    let (server, client) = setup().await;

    let request = CustomerRequest {
        name: "Acme".into(),
        contact_email: "a@acme.com".into(),
        contact_phone: "555-0100".into(),
        address: None,
    };

    Mock::given(method("POST"))
        .and(path("/customers"))
        .and(body_json(json!({
            "name": "Acme",
            "contact_email": "a@acme.com",
            "contact_phone": "555-0100"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "name": "Acme",
            "contact_email": "a@acme.com",
            "contact_phone": "555-0100"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_customer(&request).await.unwrap();
    assert_eq!(created.id, "c1");
}

#[tokio::test]
async fn test_list_sites_for_customer() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/sites"))
        .and(query_param("customer_id", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "s1",
                "name": "Acme - Main Site",
                "customer_id": "c1",
                "is_primary": true,
                "added": "2024-03-01T10:00:00.123456"
            }
        ])))
        .mount(&server)
        .await;

    let sites = client.list_sites_for_customer("c1").await.unwrap();

    assert_eq!(sites.len(), 1);
    assert!(sites[0].is_primary);
    assert_eq!(sites[0].name, "Acme - Main Site");
}

#[tokio::test]
async fn test_update_site_sends_full_record() {
    let (server, client) = setup().await;

    let address = Address {
        street_address: "1 Main St".into(),
        city: "London".into(),
        postal_code: "EC1".into(),
        country: "UK".into(),
    };
    let request = SiteRequest {
        name: "HQ".into(),
        customer_id: "c1".into(),
        address: Some(address),
        is_primary: false,
        notes: None,
    };

    Mock::given(method("PUT"))
        .and(path("/sites/s1"))
        .and(body_json(json!({
            "name": "HQ",
            "customer_id": "c1",
            "address": {
                "street_address": "1 Main St",
                "city": "London",
                "postal_code": "EC1",
                "country": "UK"
            },
            "is_primary": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "s1",
            "name": "Acme - HQ",
            "customer_id": "c1",
            "is_primary": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let site = client.update_site("s1", &request).await.unwrap();
    assert_eq!(site.name, "Acme - HQ");
}

#[tokio::test]
async fn test_list_assets_by_type() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/assets"))
        .and(query_param("asset_type", "firewall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "a9",
                "hostname": "edge-fw",
                "ip_address": "10.0.0.1",
                "asset_type": "firewall",
                "customer_id": "c1",
                "site_id": "s1",
                "specs": { "manufacturer": "Fortinet", "model": "60F" }
            }
        ])))
        .mount(&server)
        .await;

    let assets = client.list_assets_by_type(AssetType::Firewall).await.unwrap();

    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].asset_type(), AssetType::Firewall);
    assert_eq!(assets[0].kind.site_id(), Some("s1"));
}

#[tokio::test]
async fn test_create_switch_payload_is_tagged() {
    let (server, client) = setup().await;

    let request = AssetRequest {
        hostname: "core-sw".into(),
        ip_address: "10.0.0.2".into(),
        customer_id: "c1".into(),
        notes: None,
        kind: AssetKind::Switch {
            site_id: "s1".into(),
            specs: NetworkDeviceSpecs {
                manufacturer: "Cisco".into(),
                model: "C9300".into(),
            },
        },
    };

    Mock::given(method("POST"))
        .and(path("/assets"))
        .and(body_json(json!({
            "hostname": "core-sw",
            "ip_address": "10.0.0.2",
            "customer_id": "c1",
            "asset_type": "switch",
            "site_id": "s1",
            "specs": { "manufacturer": "Cisco", "model": "C9300" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a2",
            "hostname": "core-sw",
            "ip_address": "10.0.0.2",
            "asset_type": "switch",
            "customer_id": "c1",
            "site_id": "s1",
            "specs": { "manufacturer": "Cisco", "model": "C9300" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_asset(&request).await.unwrap();
    assert_eq!(created.id, "a2");
}

#[tokio::test]
async fn test_list_infrastructure_with_location_type() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/infrastructure"))
        .and(query_param("location_type", "azure"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "i1",
                "name": "prod-sub",
                "type": "azure",
                "customer_id": "c1",
                "description": "Production",
                "config": {
                    "subscription_id": "sub-1",
                    "resource_group": "rg-prod",
                    "region": "westeurope"
                },
                "is_active": false
            }
        ])))
        .mount(&server)
        .await;

    let filter = InfrastructureFilter::location_type(InfrastructureType::Azure);
    let infra = client.list_infrastructure(&filter).await.unwrap();

    assert_eq!(infra.len(), 1);
    assert_eq!(infra[0].infrastructure_type(), InfrastructureType::Azure);
    assert!(!infra[0].is_active);
}

#[tokio::test]
async fn test_list_hosted_vms() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/infrastructure/i1/vms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "v1",
                "hostname": "prod-web-01",
                "ip_address": "10.1.0.10",
                "asset_type": "vm",
                "customer_id": "c1",
                "specs": {
                    "cpu_cores": 2,
                    "ram_gb": 4,
                    "os": "Debian",
                    "os_version": "12",
                    "infrastructure_location_id": "i1"
                }
            }
        ])))
        .mount(&server)
        .await;

    let vms = client.list_hosted_vms("i1").await.unwrap();

    assert_eq!(vms.len(), 1);
    assert_eq!(vms[0].hostname, "prod-web-01");
}

#[tokio::test]
async fn test_delete_returns_acknowledgement() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/assets/a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Asset deleted successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ack = client.delete_asset("a1").await.unwrap();
    assert_eq!(ack.message, "Asset deleted successfully");
}

// ── Error-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_error_404_detail() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/customers/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Customer not found" })),
        )
        .mount(&server)
        .await;

    let err = client.get_customer("missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(
        matches!(err, Error::Api { status: 404, ref message } if message == "Customer not found"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_error_422_validation() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/sites"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "loc": ["body", "customer_id"], "msg": "field required", "type": "missing" }
            ]
        })))
        .mount(&server)
        .await;

    let request = SiteRequest {
        name: "HQ".into(),
        customer_id: String::new(),
        address: None,
        is_primary: false,
        notes: None,
    };
    let err = client.create_site(&request).await.unwrap_err();

    assert!(
        matches!(err, Error::Api { status: 422, ref message } if message == "customer_id: field required"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_error_500_plain_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/sites"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client.list_sites().await.unwrap_err();

    assert!(err.is_transient());
    assert!(
        matches!(err, Error::Api { status: 500, ref message } if message == "Internal Server Error"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client.list_assets().await.unwrap_err();

    assert!(
        matches!(err, Error::Deserialization { ref body, .. } if body == "{not json"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;
    let transport = TransportConfig::default().with_timeout(Duration::from_secs(1));
    let client = ApiClient::new(&server.uri(), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client.list_customers().await.unwrap_err();

    assert!(
        matches!(err, Error::Timeout { timeout_secs: 1 }),
        "unexpected error: {err:?}"
    );
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_base_path_prefix_is_kept() {
    let server = MockServer::start().await;
    let client =
        ApiClient::from_reqwest(&format!("{}/api/v1", server.uri()), reqwest::Client::new())
            .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let customers = client.list_customers().await.unwrap();

    assert!(customers.is_empty());
}
