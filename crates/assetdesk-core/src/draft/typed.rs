use super::{Draft, optional, required};
use crate::error::CoreError;
use crate::model::{
    AwsConfig, AzureConfig, DatacenterConfig, InfraFlavor, Infrastructure, InfrastructureKind,
    InfrastructureRequest, OnPremiseConfig,
};

/// Form for one of the typed infrastructure subviews.
///
/// Fields outside the flavor's config are kept but ignored when building
/// the request. An edited record keeps its site and whatever its kind holds
/// beyond the flavor's config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedInfrastructureDraft {
    pub flavor: InfraFlavor,
    pub name: String,
    pub customer_id: String,
    /// On-premise only.
    pub site_id: String,
    pub description: String,
    pub is_active: bool,
    /// AWS and Azure.
    pub region: String,
    pub vpc_id: String,
    pub subscription_id: String,
    pub resource_group: String,
    /// On-premise physical location.
    pub location: String,
    /// Kind of the record being edited.
    pub carried: Option<InfrastructureKind>,
}

impl TypedInfrastructureDraft {
    pub fn new(flavor: InfraFlavor) -> Self {
        Self {
            flavor,
            name: String::new(),
            customer_id: String::new(),
            site_id: String::new(),
            description: String::new(),
            is_active: true,
            region: String::new(),
            vpc_id: String::new(),
            subscription_id: String::new(),
            resource_group: String::new(),
            location: String::new(),
            carried: None,
        }
    }

    pub fn needs_site(&self) -> bool {
        self.flavor == InfraFlavor::OnPremise
    }
}

impl Draft for TypedInfrastructureDraft {
    type Record = Infrastructure;
    type Request = InfrastructureRequest;

    fn from_record(infra: &Infrastructure) -> Self {
        let flavor = match infra.kind {
            InfrastructureKind::Aws { .. } | InfrastructureKind::Cloud { .. } => InfraFlavor::Aws,
            InfrastructureKind::Azure { .. } => InfraFlavor::Azure,
            InfrastructureKind::OnPremise { .. } => InfraFlavor::OnPremise,
            InfrastructureKind::Datacenter { .. } | InfrastructureKind::Host { .. } => {
                InfraFlavor::Datacenter
            }
        };
        let mut draft = Self {
            name: infra.name.clone(),
            customer_id: infra.customer_id.clone(),
            site_id: infra.site_id.clone().unwrap_or_default(),
            description: infra.description.clone().unwrap_or_default(),
            is_active: infra.is_active,
            carried: Some(infra.kind.clone()),
            ..Self::new(flavor)
        };
        match &infra.kind {
            InfrastructureKind::Aws { config } => {
                draft.region.clone_from(&config.region);
                draft.vpc_id.clone_from(&config.vpc_id);
            }
            InfrastructureKind::Azure { config } => {
                draft.subscription_id.clone_from(&config.subscription_id);
                draft.resource_group.clone_from(&config.resource_group);
                draft.region.clone_from(&config.region);
            }
            InfrastructureKind::OnPremise { config } => {
                draft.location.clone_from(&config.location);
            }
            InfrastructureKind::Datacenter { .. }
            | InfrastructureKind::Host { .. }
            | InfrastructureKind::Cloud { .. } => {}
        }
        draft
    }

    fn to_request(&self) -> Result<InfrastructureRequest, CoreError> {
        let name = required(&self.name, "Name")?;
        let customer_id = required(&self.customer_id, "Customer")?;
        let site_id = optional(&self.site_id);
        let kind = match (&self.carried, self.flavor) {
            // No typed form shows hosts or generic cloud entries.
            (Some(kind @ (InfrastructureKind::Host { .. } | InfrastructureKind::Cloud { .. })), _) => {
                kind.clone()
            }
            (_, InfraFlavor::Aws) => InfrastructureKind::Aws {
                config: AwsConfig {
                    region: required(&self.region, "Region")?,
                    vpc_id: required(&self.vpc_id, "VPC ID")?,
                },
            },
            (_, InfraFlavor::Azure) => InfrastructureKind::Azure {
                config: AzureConfig {
                    subscription_id: required(&self.subscription_id, "Subscription ID")?,
                    resource_group: required(&self.resource_group, "Resource Group")?,
                    region: required(&self.region, "Region")?,
                },
            },
            // Config mirrors the record name. Location details are kept as
            // stored.
            (
                Some(InfrastructureKind::Datacenter { details, config }),
                InfraFlavor::Datacenter,
            ) => InfrastructureKind::Datacenter {
                details: details.clone(),
                config: config.as_ref().map(|_| DatacenterConfig { name: name.clone() }),
            },
            (_, InfraFlavor::Datacenter) => InfrastructureKind::Datacenter {
                details: None,
                config: Some(DatacenterConfig { name: name.clone() }),
            },
            (_, InfraFlavor::OnPremise) => {
                if self.site_id.trim().is_empty() {
                    return Err(CoreError::validation(
                        "Site is required for on-premise infrastructure",
                    ));
                }
                InfrastructureKind::OnPremise {
                    config: OnPremiseConfig {
                        location: required(&self.location, "Location")?,
                    },
                }
            }
        };
        Ok(InfrastructureRequest {
            name,
            customer_id,
            site_id,
            description: optional(&self.description),
            is_active: self.is_active,
            kind,
        })
    }
}
