// ── Mutation commands ──
//
// Every write the front-end can perform. Reads go through the view loaders
// on `Inventory` instead.

use crate::model::{
    Asset, AssetRequest, Customer, CustomerRequest, Infrastructure, InfrastructureRequest,
    RecordKind, Site, SiteRequest,
};

#[derive(Debug, Clone)]
pub enum Command {
    // ── Customers ────────────────────────────────────────────────────
    CreateCustomer(CustomerRequest),
    UpdateCustomer { id: String, request: CustomerRequest },
    DeleteCustomer { id: String },

    // ── Sites ────────────────────────────────────────────────────────
    CreateSite(SiteRequest),
    UpdateSite { id: String, request: SiteRequest },
    DeleteSite { id: String },

    // ── Assets ───────────────────────────────────────────────────────
    CreateAsset(AssetRequest),
    UpdateAsset { id: String, request: AssetRequest },
    DeleteAsset { id: String },

    // ── Infrastructure ───────────────────────────────────────────────
    CreateInfrastructure(InfrastructureRequest),
    UpdateInfrastructure {
        id: String,
        request: InfrastructureRequest,
    },
    /// Refused while any VM is still hosted on the record.
    DeleteInfrastructure { id: String },
}

impl Command {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::CreateCustomer(_) | Self::UpdateCustomer { .. } | Self::DeleteCustomer { .. } => {
                RecordKind::Customer
            }
            Self::CreateSite(_) | Self::UpdateSite { .. } | Self::DeleteSite { .. } => {
                RecordKind::Site
            }
            Self::CreateAsset(_) | Self::UpdateAsset { .. } | Self::DeleteAsset { .. } => {
                RecordKind::Asset
            }
            Self::CreateInfrastructure(_)
            | Self::UpdateInfrastructure { .. }
            | Self::DeleteInfrastructure { .. } => RecordKind::Infrastructure,
        }
    }

    /// Past-tense verb for notifications ("Customer created").
    pub fn verb(&self) -> &'static str {
        match self {
            Self::CreateCustomer(_)
            | Self::CreateSite(_)
            | Self::CreateAsset(_)
            | Self::CreateInfrastructure(_) => "created",
            Self::UpdateCustomer { .. }
            | Self::UpdateSite { .. }
            | Self::UpdateAsset { .. }
            | Self::UpdateInfrastructure { .. } => "updated",
            Self::DeleteCustomer { .. }
            | Self::DeleteSite { .. }
            | Self::DeleteAsset { .. }
            | Self::DeleteInfrastructure { .. } => "deleted",
        }
    }
}

/// The record echoed back by a successful command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    Customer(Customer),
    Site(Site),
    Asset(Asset),
    Infrastructure(Infrastructure),
    Deleted { kind: RecordKind, id: String },
}
