// Wire types for the inventory backend.
//
// Field names match the JSON the backend emits (snake_case). Records that
// carry a type-varying attribute bag are modelled as internally tagged
// enums flattened into the owning struct, so a payload can only ever carry
// the fields that belong to its discriminant.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

fn default_true() -> bool {
    true
}

// ── Shared ───────────────────────────────────────────────────────────

/// Postal address attached to customers and sites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// Acknowledgement body returned by delete endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub message: String,
}

// ── Customers ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Create / full-update body for `/customers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRequest {
    pub name: String,
    pub contact_email: String,
    pub contact_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    /// Stored as `"{customer name} - {site name}"`.
    pub name: String,
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// Create / full-update body for `/sites`. `name` is the bare site name;
/// the backend prefixes the customer name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteRequest {
    pub name: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub is_primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ── Assets ───────────────────────────────────────────────────────────

/// Discriminant values accepted by the `asset_type` query filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter,
    Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssetType {
    Vm,
    Switch,
    Firewall,
    Host,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmSpecs {
    pub cpu_cores: u32,
    pub ram_gb: u32,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub os_version: String,
    pub infrastructure_location_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDeviceSpecs {
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSpecs {
    #[serde(default)]
    pub manufacturer: String,
    pub cpu_cores: u32,
    pub ram_gb: u32,
}

/// Type-specific part of an asset, tagged by `asset_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "asset_type", rename_all = "snake_case")]
pub enum AssetKind {
    Vm {
        specs: VmSpecs,
    },
    Switch {
        site_id: String,
        specs: NetworkDeviceSpecs,
    },
    Firewall {
        site_id: String,
        specs: NetworkDeviceSpecs,
    },
    Host {
        site_id: String,
        specs: HostSpecs,
    },
}

impl AssetKind {
    pub fn asset_type(&self) -> AssetType {
        match self {
            Self::Vm { .. } => AssetType::Vm,
            Self::Switch { .. } => AssetType::Switch,
            Self::Firewall { .. } => AssetType::Firewall,
            Self::Host { .. } => AssetType::Host,
        }
    }

    /// Physical site for hardware assets. VMs are placed by infrastructure instead.
    pub fn site_id(&self) -> Option<&str> {
        match self {
            Self::Vm { .. } => None,
            Self::Switch { site_id, .. }
            | Self::Firewall { site_id, .. }
            | Self::Host { site_id, .. } => Some(site_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub hostname: String,
    #[serde(default)]
    pub ip_address: String,
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(flatten)]
    pub kind: AssetKind,
}

impl Asset {
    pub fn asset_type(&self) -> AssetType {
        self.kind.asset_type()
    }

    pub fn vm_specs(&self) -> Option<&VmSpecs> {
        match &self.kind {
            AssetKind::Vm { specs } => Some(specs),
            _ => None,
        }
    }
}

/// Create / full-update body for `/assets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRequest {
    pub hostname: String,
    pub ip_address: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub kind: AssetKind,
}

// ── Infrastructure ───────────────────────────────────────────────────

/// Cloud vendor for generic `cloud` infrastructure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString, EnumIter,
    Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CloudProvider {
    #[default]
    Aws,
    Azure,
    Gcp,
    Other,
}

/// Discriminant values of [`InfrastructureKind`], also used by the
/// `location_type` query filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter,
    Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InfrastructureType {
    Host,
    Datacenter,
    Cloud,
    Aws,
    Azure,
    OnPremise,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub cpu_cores: u32,
    pub memory_gb: u32,
    pub storage_gb: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDetails {
    pub capacity: Capacity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDetails {
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsConfig {
    pub region: String,
    pub vpc_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureConfig {
    pub subscription_id: String,
    pub resource_group: String,
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatacenterConfig {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnPremiseConfig {
    pub location: String,
}

/// Type-specific part of an infrastructure location, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InfrastructureKind {
    Host {
        details: HostDetails,
    },
    Datacenter {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<LocationDetails>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        config: Option<DatacenterConfig>,
    },
    Cloud {
        cloud_provider: CloudProvider,
        #[serde(default)]
        details: LocationDetails,
    },
    Aws {
        config: AwsConfig,
    },
    Azure {
        config: AzureConfig,
    },
    OnPremise {
        config: OnPremiseConfig,
    },
}

impl InfrastructureKind {
    pub fn infrastructure_type(&self) -> InfrastructureType {
        match self {
            Self::Host { .. } => InfrastructureType::Host,
            Self::Datacenter { .. } => InfrastructureType::Datacenter,
            Self::Cloud { .. } => InfrastructureType::Cloud,
            Self::Aws { .. } => InfrastructureType::Aws,
            Self::Azure { .. } => InfrastructureType::Azure,
            Self::OnPremise { .. } => InfrastructureType::OnPremise,
        }
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self, Self::Cloud { .. } | Self::Aws { .. } | Self::Azure { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infrastructure {
    pub id: String,
    pub name: String,
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(flatten)]
    pub kind: InfrastructureKind,
}

impl Infrastructure {
    pub fn infrastructure_type(&self) -> InfrastructureType {
        self.kind.infrastructure_type()
    }
}

/// Create / full-update body for `/infrastructure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfrastructureRequest {
    pub name: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(flatten)]
    pub kind: InfrastructureKind,
}

/// Optional query filters for `GET /infrastructure`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfrastructureFilter {
    pub customer_id: Option<String>,
    pub site_id: Option<String>,
    pub location_type: Option<InfrastructureType>,
}

impl InfrastructureFilter {
    pub fn customer(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            ..Self::default()
        }
    }

    pub fn site(site_id: impl Into<String>) -> Self {
        Self {
            site_id: Some(site_id.into()),
            ..Self::default()
        }
    }

    pub fn location_type(location_type: InfrastructureType) -> Self {
        Self {
            location_type: Some(location_type),
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref id) = self.customer_id {
            params.push(("customer_id", id.clone()));
        }
        if let Some(ref id) = self.site_id {
            params.push(("site_id", id.clone()));
        }
        if let Some(kind) = self.location_type {
            params.push(("location_type", kind.to_string()));
        }
        params
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn vm_asset_deserializes_into_vm_variant() {
        let asset: Asset = serde_json::from_value(json!({
            "id": "a1",
            "hostname": "prod-web-01",
            "ip_address": "10.0.0.5",
            "asset_type": "vm",
            "customer_id": "c1",
            "site_id": null,
            "notes": null,
            "specs": {
                "cpu_cores": 4,
                "ram_gb": 16,
                "os": "Ubuntu",
                "os_version": "22.04",
                "infrastructure_location_id": "i1"
            },
            "added": "2024-03-01T10:00:00",
            "modified": null
        }))
        .unwrap();

        assert_eq!(asset.asset_type(), AssetType::Vm);
        let specs = asset.vm_specs().unwrap();
        assert_eq!(specs.cpu_cores, 4);
        assert_eq!(specs.infrastructure_location_id, "i1");
        assert_eq!(asset.added.as_deref(), Some("2024-03-01T10:00:00"));
        assert_eq!(asset.kind.site_id(), None);
    }

    #[test]
    fn switch_asset_keeps_site() {
        let asset: Asset = serde_json::from_value(json!({
            "id": "a2",
            "hostname": "core-sw",
            "ip_address": "10.0.0.2",
            "asset_type": "switch",
            "customer_id": "c1",
            "site_id": "s1",
            "specs": { "manufacturer": "Cisco", "model": "C9300" }
        }))
        .unwrap();

        assert_eq!(asset.kind.site_id(), Some("s1"));
        assert_eq!(asset.asset_type().to_string(), "switch");
    }

    #[test]
    fn unknown_asset_type_is_rejected() {
        let result = serde_json::from_value::<Asset>(json!({
            "id": "a3",
            "hostname": "x",
            "ip_address": "",
            "asset_type": "router",
            "customer_id": "c1",
            "specs": {}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn non_cloud_request_never_carries_provider() {
        let req = InfrastructureRequest {
            name: "Rack A".into(),
            customer_id: "c1".into(),
            site_id: Some("s1".into()),
            description: None,
            is_active: true,
            kind: InfrastructureKind::Host {
                details: HostDetails {
                    capacity: Capacity {
                        cpu_cores: 32,
                        memory_gb: 128,
                        storage_gb: 2000,
                    },
                    specifications: None,
                    notes: None,
                },
            },
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["type"], "host");
        assert!(value.get("cloud_provider").is_none());
        assert_eq!(value["details"]["capacity"]["memory_gb"], 128);
    }

    #[test]
    fn infrastructure_defaults_to_active() {
        let infra: Infrastructure = serde_json::from_value(json!({
            "id": "i1",
            "name": "prod-vpc",
            "type": "aws",
            "customer_id": "c1",
            "config": { "region": "eu-west-1", "vpc_id": "vpc-123" }
        }))
        .unwrap();

        assert!(infra.is_active);
        assert_eq!(infra.infrastructure_type(), InfrastructureType::Aws);
        assert!(infra.kind.is_cloud());
    }

    #[test]
    fn filter_params_are_emitted_in_order() {
        let filter = InfrastructureFilter {
            customer_id: Some("c1".into()),
            site_id: None,
            location_type: Some(InfrastructureType::OnPremise),
        };
        assert_eq!(
            filter.to_params(),
            vec![
                ("customer_id", "c1".to_owned()),
                ("location_type", "on_premise".to_owned()),
            ]
        );
    }
}
