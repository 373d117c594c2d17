#![allow(clippy::unwrap_used)]
// Integration tests for `Inventory` against a wiremock backend: the
// customer → site → host → VM scenario, the hosted-VM delete guard, and
// fail-fast view loading.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assetdesk_core::draft::split_site_name;
use assetdesk_core::{
    AddressDraft, Command, CommandResult, CoreError, CustomerDraft, Draft, InfraFlavor,
    InfrastructureDraft, InfrastructureType, Inventory, RecordKind, ServiceConfig, SiteDraft,
    VmDraft,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Inventory) {
    let server = MockServer::start().await;
    let config = ServiceConfig::new(Url::parse(&server.uri()).unwrap());
    let inventory = Inventory::new(config).unwrap();
    (server, inventory)
}

fn acme_json() -> serde_json::Value {
    json!({
        "id": "c1",
        "name": "Acme",
        "contact_email": "a@acme.com",
        "contact_phone": "555-0100"
    })
}

fn site_json() -> serde_json::Value {
    json!({
        "id": "s1",
        "name": "Acme - HQ",
        "customer_id": "c1",
        "address": {
            "street_address": "1 Main St",
            "city": "Springfield",
            "postal_code": "12345",
            "country": "US"
        },
        "is_primary": false,
        "added": "2024-03-01T09:00:00"
    })
}

fn host_json() -> serde_json::Value {
    json!({
        "id": "i1",
        "name": "esx-01",
        "type": "host",
        "customer_id": "c1",
        "site_id": "s1",
        "is_active": true,
        "details": {
            "capacity": { "cpu_cores": 32, "memory_gb": 128, "storage_gb": 2000 }
        }
    })
}

fn vm_json() -> serde_json::Value {
    json!({
        "id": "a1",
        "hostname": "prod-web-01",
        "ip_address": "10.0.0.5",
        "asset_type": "vm",
        "customer_id": "c1",
        "specs": {
            "cpu_cores": 4,
            "ram_gb": 16,
            "os": "Ubuntu",
            "os_version": "22.04",
            "infrastructure_location_id": "i1"
        },
        "added": "2024-03-01T10:00:00"
    })
}

async fn mount_get(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Scenario ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_customer_site_host_vm_scenario() {
    let (server, inventory) = setup().await;

    // Customer with no address sub-fields: no address object is sent.
    Mock::given(method("POST"))
        .and(path("/customers"))
        .and(body_json(json!({
            "name": "Acme",
            "contact_email": "a@acme.com",
            "contact_phone": "555-0100"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(acme_json()))
        .expect(1)
        .mount(&server)
        .await;

    let customer = CustomerDraft {
        name: "Acme".into(),
        contact_email: "a@acme.com".into(),
        contact_phone: "555-0100".into(),
        address: AddressDraft::default(),
    };
    let CommandResult::Customer(acme) = inventory
        .execute(Command::CreateCustomer(customer.to_request().unwrap()))
        .await
        .unwrap()
    else {
        panic!("expected a customer");
    };
    assert!(acme.address.is_none());

    // Site: the backend prefixes the customer name.
    Mock::given(method("POST"))
        .and(path("/sites"))
        .and(body_json(json!({
            "name": "HQ",
            "customer_id": "c1",
            "address": {
                "street_address": "1 Main St",
                "city": "Springfield",
                "postal_code": "12345",
                "country": "US"
            },
            "is_primary": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(site_json()))
        .expect(1)
        .mount(&server)
        .await;

    let site = SiteDraft {
        customer_id: acme.id.clone(),
        name: "HQ".into(),
        address: AddressDraft {
            street_address: "1 Main St".into(),
            city: "Springfield".into(),
            postal_code: "12345".into(),
            country: "US".into(),
        },
        ..SiteDraft::default()
    };
    let CommandResult::Site(hq) = inventory
        .execute(Command::CreateSite(site.to_request().unwrap()))
        .await
        .unwrap()
    else {
        panic!("expected a site");
    };
    assert_eq!(hq.name, "Acme - HQ");
    assert_eq!(split_site_name(&hq.name, Some(&acme.name)), "HQ");
    assert_eq!(SiteDraft::from_site(&hq, Some(&acme.name)).name, "HQ");

    // Physical host at that site.
    let host = InfrastructureDraft {
        name: "esx-01".into(),
        kind: Some(InfrastructureType::Host),
        customer_id: acme.id.clone(),
        site_id: hq.id.clone(),
        cpu_cores: "32".into(),
        memory_gb: "128".into(),
        storage_gb: "2000".into(),
        ..InfrastructureDraft::default()
    };
    let host_request = host.to_request().unwrap();
    insta::assert_json_snapshot!(host_request, @r#"
    {
      "name": "esx-01",
      "customer_id": "c1",
      "site_id": "s1",
      "is_active": true,
      "type": "host",
      "details": {
        "capacity": {
          "cpu_cores": 32,
          "memory_gb": 128,
          "storage_gb": 2000
        }
      }
    }
    "#);

    Mock::given(method("POST"))
        .and(path("/infrastructure"))
        .respond_with(ResponseTemplate::new(200).set_body_json(host_json()))
        .expect(1)
        .mount(&server)
        .await;

    let CommandResult::Infrastructure(esx) = inventory
        .execute(Command::CreateInfrastructure(host_request))
        .await
        .unwrap()
    else {
        panic!("expected infrastructure");
    };
    assert_eq!(esx.infrastructure_type(), InfrastructureType::Host);

    // VM hosted on it.
    Mock::given(method("POST"))
        .and(path("/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vm_json()))
        .expect(1)
        .mount(&server)
        .await;

    let vm = VmDraft {
        hostname: "prod-web-01".into(),
        ip_address: "10.0.0.5".into(),
        customer_id: acme.id.clone(),
        infrastructure_location_id: esx.id.clone(),
        cpu_cores: "4".into(),
        ram_gb: "16".into(),
        os: "Ubuntu".into(),
        os_version: "22.04".into(),
        ..VmDraft::default()
    };
    let CommandResult::Asset(web) = inventory
        .execute(Command::CreateAsset(vm.to_request().unwrap()))
        .await
        .unwrap()
    else {
        panic!("expected an asset");
    };

    // Infrastructure view lists the VM under its host.
    mount_get(&server, "/infrastructure", json!([host_json()])).await;
    mount_get(&server, "/customers", json!([acme_json()])).await;
    mount_get(&server, "/sites", json!([site_json()])).await;
    mount_get(&server, "/infrastructure/i1/vms", json!([vm_json()])).await;

    let data = inventory.load_infrastructure().await.unwrap();
    let hosted = &data.hosted_vms["i1"];
    assert_eq!(hosted.len(), 1);
    assert_eq!(hosted[0].hostname, web.hostname);

    // Deleting the host is refused before any DELETE is sent.
    Mock::given(method("DELETE"))
        .and(path("/infrastructure/i1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(0)
        .mount(&server)
        .await;

    let err = inventory
        .execute(Command::DeleteInfrastructure { id: esx.id.clone() })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::InUse { dependents: 1, .. }));
}

// ── Delete guard ────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_empty_infrastructure_succeeds() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/infrastructure/i1/vms", json!([])).await;

    Mock::given(method("DELETE"))
        .and(path("/infrastructure/i1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Infrastructure deleted successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = inventory
        .execute(Command::DeleteInfrastructure { id: "i1".into() })
        .await
        .unwrap();
    assert!(matches!(
        result,
        CommandResult::Deleted { kind: RecordKind::Infrastructure, ref id } if id == "i1"
    ));
}

// ── Loading ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_view_load_fails_fast() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/sites", json!([site_json()])).await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "database down" })),
        )
        .mount(&server)
        .await;

    let err = inventory.load_sites().await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
    assert_eq!(err.to_string(), "API error: database down");
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_infrastructure_deleted_mid_load_hosts_nothing() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/customers", json!([acme_json()])).await;
    mount_get(&server, "/sites", json!([site_json()])).await;
    mount_get(
        &server,
        "/infrastructure",
        json!([
            host_json(),
            {
                "id": "i2",
                "name": "prod-account",
                "type": "aws",
                "customer_id": "c1",
                "config": { "region": "us-east-1", "vpc_id": "vpc-123" }
            }
        ]),
    )
    .await;
    mount_get(&server, "/infrastructure/i1/vms", json!([vm_json()])).await;
    Mock::given(method("GET"))
        .and(path("/infrastructure/i2/vms"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "detail": "Infrastructure not found" })),
        )
        .mount(&server)
        .await;

    let data = inventory.load_infrastructure().await.unwrap();
    assert_eq!(data.infrastructure.len(), 2);
    assert_eq!(data.hosted_vms["i1"].len(), 1);
    assert!(data.hosted_vms["i2"].is_empty());
}

#[tokio::test]
async fn test_hosted_vm_server_error_still_fails_the_load() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/customers", json!([acme_json()])).await;
    mount_get(&server, "/sites", json!([site_json()])).await;
    mount_get(&server, "/infrastructure", json!([host_json()])).await;
    Mock::given(method("GET"))
        .and(path("/infrastructure/i1/vms"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = inventory.load_infrastructure().await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: Some(502), .. }));
}

#[tokio::test]
async fn test_dashboard_counts_and_activity() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/customers", json!([acme_json()])).await;
    mount_get(&server, "/sites", json!([site_json()])).await;

    Mock::given(method("GET"))
        .and(path("/assets"))
        .and(query_param("asset_type", "vm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([vm_json()])))
        .mount(&server)
        .await;
    for kind in ["switch", "firewall"] {
        Mock::given(method("GET"))
            .and(path("/assets"))
            .and(query_param("asset_type", kind))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
    }

    let data = inventory.load_dashboard().await.unwrap();
    assert_eq!(data.stats.customers, 1);
    assert_eq!(data.stats.sites, 1);
    assert_eq!(data.stats.vms, 1);
    assert_eq!(data.stats.switches + data.stats.firewalls, 0);

    let names: Vec<_> = data.recent.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["prod-web-01", "Acme - HQ"]);
}

#[tokio::test]
async fn test_typed_view_keeps_only_its_type() {
    let (server, inventory) = setup().await;
    mount_get(&server, "/customers", json!([acme_json()])).await;

    Mock::given(method("GET"))
        .and(path("/infrastructure"))
        .and(query_param("location_type", "aws"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "i2",
                "name": "prod-account",
                "type": "aws",
                "customer_id": "c1",
                "config": { "region": "us-east-1", "vpc_id": "vpc-123" }
            },
            host_json()
        ])))
        .mount(&server)
        .await;

    let data = inventory
        .load_typed_infrastructure(InfraFlavor::Aws)
        .await
        .unwrap();
    assert_eq!(data.infrastructure.len(), 1);
    assert_eq!(data.infrastructure[0].name, "prod-account");
    assert!(data.infrastructure[0].is_active);
    assert!(data.sites.is_empty());
}
