use super::{Draft, optional, required, whole_number};
use crate::error::CoreError;
use crate::model::{
    AwsConfig, AzureConfig, Capacity, CloudProvider, DatacenterConfig, HostDetails,
    Infrastructure, InfrastructureKind, InfrastructureRequest, InfrastructureType,
    LocationDetails, OnPremiseConfig,
};

/// Generic infrastructure form: host, datacenter or cloud.
///
/// Every type's fields stay editable while the user switches between types,
/// but only the selected type's fields reach the request. Records of the
/// typed flavors are shown through their closest generic type and keep
/// their stored kind as long as that type is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfrastructureDraft {
    pub name: String,
    pub kind: Option<InfrastructureType>,
    pub customer_id: String,
    pub site_id: String,
    pub description: String,
    pub is_active: bool,
    // host
    pub cpu_cores: String,
    pub memory_gb: String,
    pub storage_gb: String,
    // cloud
    pub cloud_provider: Option<CloudProvider>,
    /// Region for cloud, physical location for datacenters.
    pub location: String,
    pub specifications: String,
    pub notes: String,
    /// Kind of the record being edited, for the parts the form cannot show.
    pub carried: Option<InfrastructureKind>,
}

impl Default for InfrastructureDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: None,
            customer_id: String::new(),
            site_id: String::new(),
            description: String::new(),
            is_active: true,
            cpu_cores: String::new(),
            memory_gb: String::new(),
            storage_gb: String::new(),
            cloud_provider: None,
            location: String::new(),
            specifications: String::new(),
            notes: String::new(),
            carried: None,
        }
    }
}

impl InfrastructureDraft {
    /// Cloud records have no physical site, and neither do datacenters
    /// created from their own view.
    pub fn needs_site(&self) -> bool {
        match self.kind {
            Some(InfrastructureType::Cloud) => false,
            Some(InfrastructureType::Datacenter) => {
                !matches!(self.carried_datacenter(), Some((None, _)))
            }
            _ => true,
        }
    }

    fn carried_datacenter(&self) -> Option<(Option<&LocationDetails>, Option<&DatacenterConfig>)> {
        match &self.carried {
            Some(InfrastructureKind::Datacenter { details, config }) => {
                Some((details.as_ref(), config.as_ref()))
            }
            _ => None,
        }
    }

    /// The stored AWS, Azure or on-premise kind with the edited location
    /// written back, while the form still shows the type it maps onto.
    fn typed_kind(&self) -> Result<Option<InfrastructureKind>, CoreError> {
        let kind = match (&self.carried, self.kind, self.cloud_provider) {
            (
                Some(InfrastructureKind::Aws { config }),
                Some(InfrastructureType::Cloud),
                Some(CloudProvider::Aws),
            ) => InfrastructureKind::Aws {
                config: AwsConfig {
                    region: required(&self.location, "Location")?,
                    ..config.clone()
                },
            },
            (
                Some(InfrastructureKind::Azure { config }),
                Some(InfrastructureType::Cloud),
                Some(CloudProvider::Azure),
            ) => InfrastructureKind::Azure {
                config: AzureConfig {
                    region: required(&self.location, "Location")?,
                    ..config.clone()
                },
            },
            (
                Some(InfrastructureKind::OnPremise { .. }),
                Some(InfrastructureType::Datacenter),
                _,
            ) => InfrastructureKind::OnPremise {
                config: OnPremiseConfig {
                    location: required(&self.location, "Location")?,
                },
            },
            _ => return Ok(None),
        };
        Ok(Some(kind))
    }

    fn datacenter_request(&self) -> Result<InfrastructureKind, CoreError> {
        let specifications = optional(&self.specifications);
        let notes = optional(&self.notes);
        // Config mirrors the record name.
        let (had_details, config) = match self.carried_datacenter() {
            Some((details, config)) => (
                details.is_some(),
                config.map(|_| DatacenterConfig {
                    name: self.name.trim().to_owned(),
                }),
            ),
            None => (true, None),
        };
        let blank = self.location.trim().is_empty() && specifications.is_none() && notes.is_none();
        let details = if blank && !had_details {
            None
        } else {
            Some(LocationDetails {
                location: required(&self.location, "Location")?,
                specifications,
                notes,
            })
        };
        Ok(InfrastructureKind::Datacenter { details, config })
    }

    fn kind_request(&self) -> Result<InfrastructureKind, CoreError> {
        if let Some(kind) = self.typed_kind()? {
            return Ok(kind);
        }
        let specifications = optional(&self.specifications);
        let notes = optional(&self.notes);
        match self.kind {
            Some(InfrastructureType::Host) => Ok(InfrastructureKind::Host {
                details: HostDetails {
                    capacity: Capacity {
                        cpu_cores: whole_number(&self.cpu_cores, "CPU Cores", 1)?,
                        memory_gb: whole_number(&self.memory_gb, "Memory (GB)", 1)?,
                        storage_gb: whole_number(&self.storage_gb, "Storage (GB)", 1)?,
                    },
                    specifications,
                    notes,
                },
            }),
            Some(InfrastructureType::Datacenter) => self.datacenter_request(),
            Some(InfrastructureType::Cloud) => Ok(InfrastructureKind::Cloud {
                cloud_provider: self
                    .cloud_provider
                    .ok_or_else(|| CoreError::validation("Cloud Provider is required"))?,
                details: LocationDetails {
                    location: self.location.trim().to_owned(),
                    specifications,
                    notes,
                },
            }),
            Some(other) => Err(CoreError::validation(format!(
                "{other} records are created from their own view"
            ))),
            None => Err(CoreError::validation("Type is required")),
        }
    }
}

impl Draft for InfrastructureDraft {
    type Record = Infrastructure;
    type Request = InfrastructureRequest;

    /// Typed records are shown through their closest generic type:
    /// AWS and Azure as cloud, on-premise as a datacenter location.
    fn from_record(infra: &Infrastructure) -> Self {
        let mut draft = Self {
            name: infra.name.clone(),
            customer_id: infra.customer_id.clone(),
            site_id: infra.site_id.clone().unwrap_or_default(),
            description: infra.description.clone().unwrap_or_default(),
            is_active: infra.is_active,
            carried: Some(infra.kind.clone()),
            ..Self::default()
        };
        match &infra.kind {
            InfrastructureKind::Host { details } => {
                draft.kind = Some(InfrastructureType::Host);
                draft.cpu_cores = details.capacity.cpu_cores.to_string();
                draft.memory_gb = details.capacity.memory_gb.to_string();
                draft.storage_gb = details.capacity.storage_gb.to_string();
                draft.specifications = details.specifications.clone().unwrap_or_default();
                draft.notes = details.notes.clone().unwrap_or_default();
            }
            InfrastructureKind::Datacenter { details, .. } => {
                draft.kind = Some(InfrastructureType::Datacenter);
                if let Some(details) = details {
                    draft.location.clone_from(&details.location);
                    draft.specifications = details.specifications.clone().unwrap_or_default();
                    draft.notes = details.notes.clone().unwrap_or_default();
                }
            }
            InfrastructureKind::Cloud {
                cloud_provider,
                details,
            } => {
                draft.kind = Some(InfrastructureType::Cloud);
                draft.cloud_provider = Some(*cloud_provider);
                draft.location.clone_from(&details.location);
                draft.specifications = details.specifications.clone().unwrap_or_default();
                draft.notes = details.notes.clone().unwrap_or_default();
            }
            InfrastructureKind::Aws { config } => {
                draft.kind = Some(InfrastructureType::Cloud);
                draft.cloud_provider = Some(CloudProvider::Aws);
                draft.location.clone_from(&config.region);
            }
            InfrastructureKind::Azure { config } => {
                draft.kind = Some(InfrastructureType::Cloud);
                draft.cloud_provider = Some(CloudProvider::Azure);
                draft.location.clone_from(&config.region);
            }
            InfrastructureKind::OnPremise { config } => {
                draft.kind = Some(InfrastructureType::Datacenter);
                draft.location.clone_from(&config.location);
            }
        }
        draft
    }

    fn to_request(&self) -> Result<InfrastructureRequest, CoreError> {
        let name = required(&self.name, "Name")?;
        let customer_id = required(&self.customer_id, "Customer")?;
        let kind = self.kind_request()?;
        let site_id = if self.kind == Some(InfrastructureType::Cloud) {
            None
        } else if self.needs_site() {
            Some(required(&self.site_id, "Site")?)
        } else {
            optional(&self.site_id)
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
