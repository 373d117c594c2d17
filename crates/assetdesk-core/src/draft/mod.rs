//! Editable form state for every record type.
//!
//! A draft holds raw user input as strings (numbers included, so a half-typed
//! value never loses keystrokes) and turns it into a request body only when
//! [`Draft::to_request`] succeeds. Required-field and numeric checks live
//! here so the terminal front-end and tests share one set of rules.

mod asset;
mod customer;
mod infrastructure;
mod site;
mod typed;

pub use asset::{NetworkDeviceDraft, VmDraft};
pub use customer::{AddressDraft, CustomerDraft};
pub use infrastructure::InfrastructureDraft;
pub use site::{SITE_NAME_PLACEHOLDER, SiteDraft, compose_site_name, split_site_name};
pub use typed::TypedInfrastructureDraft;

use crate::error::CoreError;
use crate::model::Record;

/// Form state that can be seeded from a record and submitted as a request.
pub trait Draft: Clone {
    type Record: Record;
    type Request;

    /// Pre-fill every field from an existing record.
    fn from_record(record: &Self::Record) -> Self;

    /// Assemble the request body, or explain the first invalid field.
    fn to_request(&self) -> Result<Self::Request, CoreError>;

    fn validate(&self) -> Result<(), CoreError> {
        self.to_request().map(|_| ())
    }
}

// ── Field helpers ────────────────────────────────────────────────────

/// Trimmed value, or a `"{label} is required"` error.
pub(crate) fn required(value: &str, label: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{label} is required")));
    }
    Ok(trimmed.to_owned())
}

/// Trimmed value, `None` when blank.
pub(crate) fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Whole number no smaller than `min`.
pub(crate) fn whole_number(value: &str, label: &str, min: u32) -> Result<u32, CoreError> {
    let raw = required(value, label)?;
    let parsed: u32 = raw
        .parse()
        .map_err(|_| CoreError::validation(format!("{label} must be a whole number")))?;
    if parsed < min {
        return Err(CoreError::validation(format!("{label} must be at least {min}")));
    }
    Ok(parsed)
}

/// One record of every infrastructure shape the backend stores.
#[cfg(test)]
pub(crate) fn infrastructure_samples() -> Vec<crate::model::Infrastructure> {
    use crate::model::{
        AwsConfig, AzureConfig, Capacity, CloudProvider, DatacenterConfig, HostDetails,
        Infrastructure, InfrastructureKind, LocationDetails, OnPremiseConfig,
    };

    let record = |name: &str, site_id: Option<&str>, kind| Infrastructure {
        id: format!("id-{name}"),
        name: name.into(),
        customer_id: "c1".into(),
        site_id: site_id.map(Into::into),
        description: Some(format!("{name} description")),
        is_active: true,
        kind,
    };
    let frankfurt = LocationDetails {
        location: "Frankfurt".into(),
        specifications: Some("Tier III".into()),
        notes: Some("cage 4".into()),
    };
    vec![
        record(
            "esx-01",
            Some("s1"),
            InfrastructureKind::Host {
                details: HostDetails {
                    capacity: Capacity {
                        cpu_cores: 32,
                        memory_gb: 128,
                        storage_gb: 2000,
                    },
                    specifications: Some("Dell R750".into()),
                    notes: None,
                },
            },
        ),
        record(
            "fra-dc",
            Some("s1"),
            InfrastructureKind::Datacenter {
                details: Some(frankfurt.clone()),
                config: None,
            },
        ),
        record(
            "main-dc",
            None,
            InfrastructureKind::Datacenter {
                details: None,
                config: Some(DatacenterConfig {
                    name: "main-dc".into(),
                }),
            },
        ),
        record(
            "ams-dc",
            Some("s2"),
            InfrastructureKind::Datacenter {
                details: Some(frankfurt),
                config: Some(DatacenterConfig {
                    name: "ams-dc".into(),
                }),
            },
        ),
        record(
            "gcp-main",
            None,
            InfrastructureKind::Cloud {
                cloud_provider: CloudProvider::Gcp,
                details: LocationDetails {
                    location: "europe-west1".into(),
                    specifications: None,
                    notes: Some("shared project".into()),
                },
            },
        ),
        record(
            "prod-vpc",
            None,
            InfrastructureKind::Aws {
                config: AwsConfig {
                    region: "us-east-1".into(),
                    vpc_id: "vpc-1".into(),
                },
            },
        ),
        record(
            "tenant",
            None,
            InfrastructureKind::Azure {
                config: AzureConfig {
                    subscription_id: "sub-1".into(),
                    resource_group: "rg-prod".into(),
                    region: "westeurope".into(),
                },
            },
        ),
        record(
            "closet",
            Some("s1"),
            InfrastructureKind::OnPremise {
                config: OnPremiseConfig {
                    location: "Basement".into(),
                },
            },
        ),
    ]
}
