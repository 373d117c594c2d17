//! Domain model.
//!
//! The backend's wire types are already the canonical records, so they are
//! re-exported as-is. This module adds the identity trait used by local
//! collections and the small enums that parameterise shared screens.

use std::fmt;

use strum::{Display, EnumIter};

pub use assetdesk_api::types::{
    Address, Asset, AssetKind, AssetRequest, AssetType, AwsConfig, AzureConfig, Capacity,
    CloudProvider, Customer, CustomerRequest, DatacenterConfig, HostDetails, HostSpecs,
    Infrastructure, InfrastructureFilter, InfrastructureKind, InfrastructureRequest,
    InfrastructureType, LocationDetails, NetworkDeviceSpecs, OnPremiseConfig, Site, SiteRequest,
    VmSpecs,
};

// ── Identity ─────────────────────────────────────────────────────────

/// A record with a server-assigned string id.
pub trait Record: Clone + fmt::Debug {
    const KIND: RecordKind;

    fn id(&self) -> &str;

    /// Human label used in notifications and confirm prompts.
    fn label(&self) -> &str;
}

impl Record for Customer {
    const KIND: RecordKind = RecordKind::Customer;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Record for Site {
    const KIND: RecordKind = RecordKind::Site;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Record for Asset {
    const KIND: RecordKind = RecordKind::Asset;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.hostname
    }
}

impl Record for Infrastructure {
    const KIND: RecordKind = RecordKind::Infrastructure;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// The four resource collections exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RecordKind {
    Customer,
    Site,
    Asset,
    Infrastructure,
}

// ── Screen parameters ────────────────────────────────────────────────

/// Network device subtype shown by the shared device screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum DeviceKind {
    Switch,
    Firewall,
}

impl DeviceKind {
    pub fn asset_type(self) -> AssetType {
        match self {
            Self::Switch => AssetType::Switch,
            Self::Firewall => AssetType::Firewall,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Switch => "Network Switches",
            Self::Firewall => "Firewalls",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Self::Switch => "Switch",
            Self::Firewall => "Firewall",
        }
    }

    /// Whether an asset belongs on this screen.
    pub fn matches(self, asset: &Asset) -> bool {
        asset.asset_type() == self.asset_type()
    }
}

/// Typed infrastructure subview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum InfraFlavor {
    Azure,
    Aws,
    Datacenter,
    OnPremise,
}

impl InfraFlavor {
    pub fn infrastructure_type(self) -> InfrastructureType {
        match self {
            Self::Azure => InfrastructureType::Azure,
            Self::Aws => InfrastructureType::Aws,
            Self::Datacenter => InfrastructureType::Datacenter,
            Self::OnPremise => InfrastructureType::OnPremise,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Azure => "Azure Infrastructure",
            Self::Aws => "AWS Infrastructure",
            Self::Datacenter => "Datacenter Infrastructure",
            Self::OnPremise => "On-Premise Infrastructure",
        }
    }

    /// Short name used in prompts ("Delete this AWS infrastructure?").
    pub fn short(self) -> &'static str {
        match self {
            Self::Azure => "Azure",
            Self::Aws => "AWS",
            Self::Datacenter => "datacenter",
            Self::OnPremise => "on-premise",
        }
    }

    pub fn matches(self, infra: &Infrastructure) -> bool {
        infra.infrastructure_type() == self.infrastructure_type()
    }
}

impl fmt::Display for InfraFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}
