// Static reference data: infrastructure type and cloud provider catalogs.
// Served locally, never fetched.

use crate::model::{CloudProvider, InfrastructureType};

/// Catalog entry describing a selectable infrastructure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfrastructureTypeInfo {
    pub id: InfrastructureType,
    pub name: &'static str,
    pub description: &'static str,
}

/// Types offered by the generic infrastructure form.
pub const INFRASTRUCTURE_TYPES: [InfrastructureTypeInfo; 3] = [
    InfrastructureTypeInfo {
        id: InfrastructureType::Host,
        name: "Physical Host",
        description: "Physical server hosting VMs",
    },
    InfrastructureTypeInfo {
        id: InfrastructureType::Datacenter,
        name: "Data Center",
        description: "On-premise data center",
    },
    InfrastructureTypeInfo {
        id: InfrastructureType::Cloud,
        name: "Cloud Provider",
        description: "Cloud service provider (AWS, Azure, etc.)",
    },
];

/// Cloud providers in display order.
pub const CLOUD_PROVIDERS: [CloudProvider; 4] = [
    CloudProvider::Aws,
    CloudProvider::Azure,
    CloudProvider::Gcp,
    CloudProvider::Other,
];

/// Display name for a provider.
pub fn cloud_provider_name(provider: CloudProvider) -> &'static str {
    match provider {
        CloudProvider::Aws => "Amazon Web Services",
        CloudProvider::Azure => "Microsoft Azure",
        CloudProvider::Gcp => "Google Cloud Platform",
        CloudProvider::Other => "Other Cloud Provider",
    }
}

/// Display name for any infrastructure type, including the typed subviews
/// that are not part of the generic catalog.
pub fn infrastructure_type_name(kind: InfrastructureType) -> &'static str {
    if let Some(info) = INFRASTRUCTURE_TYPES.iter().find(|info| info.id == kind) {
        return info.name;
    }
    match kind {
        InfrastructureType::Aws => "AWS",
        InfrastructureType::Azure => "Azure",
        InfrastructureType::OnPremise => "On-Premise",
        InfrastructureType::Host | InfrastructureType::Datacenter | InfrastructureType::Cloud => {
            "Unknown"
        }
    }
}
