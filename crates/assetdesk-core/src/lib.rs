//! Domain layer between `assetdesk-api` and the terminal front-end.
//!
//! - **[`Inventory`]**: cloneable facade with one parallel, fail-fast loader
//!   per view and a single [`Inventory::execute`] entry point for mutations.
//!   Deleting infrastructure that still hosts VMs is refused before the
//!   delete request is sent.
//!
//! - **Drafts** ([`draft`]): raw form input per record type with required
//!   field checks and request assembly, including address stripping and the
//!   `"{customer} - {site}"` naming convention.
//!
//! - **View helpers**: [`RecordSet`] for local per-view state,
//!   [`NameIndex`] for cross-collection name lookups, [`SearchQuery`] for
//!   client-side filtering, [`select`] for customer-dependent options, and
//!   [`DetailModal`] for the view/edit/delete overlay state.
//!
//! - **Reference data** ([`catalog`]) and dashboard aggregation
//!   ([`dashboard`]), computed locally without extra requests.

pub mod catalog;
pub mod collection;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod inventory;
pub mod lookup;
pub mod modal;
pub mod model;
pub mod search;
pub mod select;

// ── Primary re-exports ──────────────────────────────────────────────
pub use collection::RecordSet;
pub use command::{Command, CommandResult};
pub use config::ServiceConfig;
pub use draft::{
    AddressDraft, CustomerDraft, Draft, InfrastructureDraft, NetworkDeviceDraft, SiteDraft,
    TypedInfrastructureDraft, VmDraft,
};
pub use error::CoreError;
pub use inventory::{
    CustomersData, DashboardData, InfrastructureData, Inventory, NetworkDevicesData, SitesData,
    TypedInfrastructureData, VmsData,
};
pub use lookup::NameIndex;
pub use modal::{DetailModal, ModalMode};
pub use search::SearchQuery;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Address, Asset, AssetKind, AssetRequest, AssetType, AwsConfig, AzureConfig, Capacity,
    CloudProvider, Customer, CustomerRequest, DatacenterConfig, DeviceKind, HostDetails,
    HostSpecs, InfraFlavor, Infrastructure, InfrastructureFilter, InfrastructureKind,
    InfrastructureRequest, InfrastructureType, LocationDetails, NetworkDeviceSpecs,
    OnPremiseConfig, Record, RecordKind, Site, SiteRequest, VmSpecs,
};
