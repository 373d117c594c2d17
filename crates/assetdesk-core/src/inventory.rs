// ── Inventory facade ──
//
// One loader per view. Each issues its reads in parallel and fails fast:
// the first error aborts the whole load, so a view never renders partial
// data. Nothing is cached between loads. A hosted-VM listing for a record
// deleted mid-load counts as empty.

use std::collections::HashMap;
use std::sync::Arc;

use assetdesk_api::{ApiClient, TransportConfig};
use futures_util::future::try_join_all;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandResult};
use crate::config::ServiceConfig;
use crate::dashboard::{ActivityItem, DashboardStats, recent_activity};
use crate::error::CoreError;
use crate::model::{
    Asset, AssetType, Customer, DeviceKind, InfraFlavor, Infrastructure, InfrastructureFilter,
    RecordKind, Site,
};

/// Entries shown in the dashboard's activity feed.
const RECENT_ACTIVITY_LIMIT: usize = 5;

// ── View data ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recent: Vec<ActivityItem>,
}

#[derive(Debug, Clone, Default)]
pub struct CustomersData {
    pub customers: Vec<Customer>,
}

#[derive(Debug, Clone, Default)]
pub struct SitesData {
    pub sites: Vec<Site>,
    pub customers: Vec<Customer>,
}

#[derive(Debug, Clone, Default)]
pub struct VmsData {
    pub vms: Vec<Asset>,
    pub customers: Vec<Customer>,
    pub infrastructure: Vec<Infrastructure>,
}

#[derive(Debug, Clone, Default)]
pub struct NetworkDevicesData {
    pub devices: Vec<Asset>,
    pub customers: Vec<Customer>,
    pub sites: Vec<Site>,
}

#[derive(Debug, Clone, Default)]
pub struct InfrastructureData {
    pub infrastructure: Vec<Infrastructure>,
    pub customers: Vec<Customer>,
    pub sites: Vec<Site>,
    /// Hosted VMs keyed by infrastructure id.
    pub hosted_vms: HashMap<String, Vec<Asset>>,
}

#[derive(Debug, Clone, Default)]
pub struct TypedInfrastructureData {
    pub infrastructure: Vec<Infrastructure>,
    pub customers: Vec<Customer>,
    /// Only loaded for the on-premise view.
    pub sites: Vec<Site>,
}

// ── Facade ───────────────────────────────────────────────────────────

/// Cheaply cloneable handle to the inventory backend.
#[derive(Clone)]
pub struct Inventory {
    inner: Arc<InventoryInner>,
}

struct InventoryInner {
    client: ApiClient,
    config: ServiceConfig,
}

impl Inventory {
    pub fn new(config: ServiceConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = ApiClient::new(config.base_url.as_str(), &transport)?;
        Ok(Self {
            inner: Arc::new(InventoryInner { client, config }),
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    // ── Loaders ──────────────────────────────────────────────────────

    pub async fn load_dashboard(&self) -> Result<DashboardData, CoreError> {
        info!(view = "dashboard", "loading view");
        let api = self.client();
        let (customers, sites, vms, switches, firewalls) = tokio::try_join!(
            api.list_customers(),
            api.list_sites(),
            api.list_assets_by_type(AssetType::Vm),
            api.list_assets_by_type(AssetType::Switch),
            api.list_assets_by_type(AssetType::Firewall),
        )?;

        let stats = DashboardStats::new(&customers, &sites, &vms, &switches, &firewalls);
        let recent = recent_activity(
            &sites,
            vms.iter().chain(&switches).chain(&firewalls),
            RECENT_ACTIVITY_LIMIT,
        );
        Ok(DashboardData { stats, recent })
    }

    pub async fn load_customers(&self) -> Result<CustomersData, CoreError> {
        info!(view = "customers", "loading view");
        let customers = self.client().list_customers().await?;
        Ok(CustomersData { customers })
    }

    pub async fn load_sites(&self) -> Result<SitesData, CoreError> {
        info!(view = "sites", "loading view");
        let api = self.client();
        let (sites, customers) = tokio::try_join!(api.list_sites(), api.list_customers())?;
        Ok(SitesData { sites, customers })
    }

    pub async fn load_virtual_machines(&self) -> Result<VmsData, CoreError> {
        info!(view = "vms", "loading view");
        let api = self.client();
        let all = InfrastructureFilter::default();
        let (vms, customers, infrastructure) = tokio::try_join!(
            api.list_assets_by_type(AssetType::Vm),
            api.list_customers(),
            api.list_infrastructure(&all),
        )?;
        Ok(VmsData {
            vms,
            customers,
            infrastructure,
        })
    }

    pub async fn load_network_devices(
        &self,
        kind: DeviceKind,
    ) -> Result<NetworkDevicesData, CoreError> {
        info!(view = kind.singular(), "loading view");
        let api = self.client();
        let (devices, customers, sites) = tokio::try_join!(
            api.list_assets_by_type(kind.asset_type()),
            api.list_customers(),
            api.list_sites(),
        )?;
        Ok(NetworkDevicesData {
            devices,
            customers,
            sites,
        })
    }

    /// All infrastructure plus, for each record, the VMs it hosts.
    pub async fn load_infrastructure(&self) -> Result<InfrastructureData, CoreError> {
        info!(view = "infrastructure", "loading view");
        let api = self.client();
        let all = InfrastructureFilter::default();
        let (infrastructure, customers, sites) = tokio::try_join!(
            api.list_infrastructure(&all),
            api.list_customers(),
            api.list_sites(),
        )?;

        let hosted = try_join_all(infrastructure.iter().map(|infra| async move {
            let vms = match api.list_hosted_vms(&infra.id).await {
                Ok(vms) => vms,
                // Deleted after the listing above.
                Err(ref e) if e.is_not_found() => {
                    debug!(id = %infra.id, "infrastructure gone (404), treating as hosting no VMs");
                    Vec::new()
                }
                Err(e) => return Err(e),
            };
            Ok::<_, assetdesk_api::Error>((infra.id.clone(), vms))
        }))
        .await?;
        debug!(records = hosted.len(), "hosted VM lists loaded");

        Ok(InfrastructureData {
            infrastructure,
            customers,
            sites,
            hosted_vms: hosted.into_iter().collect(),
        })
    }

    pub async fn load_typed_infrastructure(
        &self,
        flavor: InfraFlavor,
    ) -> Result<TypedInfrastructureData, CoreError> {
        info!(view = flavor.short(), "loading view");
        let api = self.client();
        let filter = InfrastructureFilter::location_type(flavor.infrastructure_type());

        let (infrastructure, customers, sites) = if flavor == InfraFlavor::OnPremise {
            tokio::try_join!(
                api.list_infrastructure(&filter),
                api.list_customers(),
                api.list_sites(),
            )?
        } else {
            let (infrastructure, customers) =
                tokio::try_join!(api.list_infrastructure(&filter), api.list_customers())?;
            (infrastructure, customers, Vec::new())
        };

        // The backend filter is advisory; keep only records of this type.
        let infrastructure = infrastructure
            .into_iter()
            .filter(|infra| flavor.matches(infra))
            .collect();

        Ok(TypedInfrastructureData {
            infrastructure,
            customers,
            sites,
        })
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Run one mutation and return the record the backend echoed back.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        let kind = cmd.kind();
        let verb = cmd.verb();
        let result = self.route(cmd).await;
        match &result {
            Ok(_) => info!(%kind, verb, "command succeeded"),
            Err(e) => warn!(%kind, verb, error = %e, "command failed"),
        }
        result
    }

    async fn route(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        let api = self.client();
        match cmd {
            // ── Customers ────────────────────────────────────────────
            Command::CreateCustomer(req) => {
                Ok(CommandResult::Customer(api.create_customer(&req).await?))
            }
            Command::UpdateCustomer { id, request } => Ok(CommandResult::Customer(
                api.update_customer(&id, &request).await?,
            )),
            Command::DeleteCustomer { id } => {
                api.delete_customer(&id).await?;
                Ok(deleted(RecordKind::Customer, id))
            }

            // ── Sites ────────────────────────────────────────────────
            Command::CreateSite(req) => Ok(CommandResult::Site(api.create_site(&req).await?)),
            Command::UpdateSite { id, request } => {
                Ok(CommandResult::Site(api.update_site(&id, &request).await?))
            }
            Command::DeleteSite { id } => {
                api.delete_site(&id).await?;
                Ok(deleted(RecordKind::Site, id))
            }

            // ── Assets ───────────────────────────────────────────────
            Command::CreateAsset(req) => Ok(CommandResult::Asset(api.create_asset(&req).await?)),
            Command::UpdateAsset { id, request } => {
                Ok(CommandResult::Asset(api.update_asset(&id, &request).await?))
            }
            Command::DeleteAsset { id } => {
                api.delete_asset(&id).await?;
                Ok(deleted(RecordKind::Asset, id))
            }

            // ── Infrastructure ───────────────────────────────────────
            Command::CreateInfrastructure(req) => Ok(CommandResult::Infrastructure(
                api.create_infrastructure(&req).await?,
            )),
            Command::UpdateInfrastructure { id, request } => Ok(CommandResult::Infrastructure(
                api.update_infrastructure(&id, &request).await?,
            )),
            Command::DeleteInfrastructure { id } => {
                let hosted = api.list_hosted_vms(&id).await?;
                if !hosted.is_empty() {
                    return Err(CoreError::InUse {
                        entity_type: RecordKind::Infrastructure.to_string(),
                        identifier: id,
                        dependents: hosted.len(),
                    });
                }
                api.delete_infrastructure(&id).await?;
                Ok(deleted(RecordKind::Infrastructure, id))
            }
        }
    }
}

fn deleted(kind: RecordKind, id: String) -> CommandResult {
    CommandResult::Deleted { kind, id }
}
