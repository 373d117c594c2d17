use super::{Draft, optional, required, whole_number};
use crate::error::CoreError;
use crate::model::{Asset, AssetKind, AssetRequest, DeviceKind, NetworkDeviceSpecs, VmSpecs};

// ── Virtual machines ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmDraft {
    pub hostname: String,
    pub ip_address: String,
    pub customer_id: String,
    /// Hosting infrastructure, narrowed to the selected customer's records.
    pub infrastructure_location_id: String,
    pub cpu_cores: String,
    pub ram_gb: String,
    pub os: String,
    pub os_version: String,
    pub notes: String,
    pub vm_id: Option<String>,
}

impl Default for VmDraft {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            ip_address: String::new(),
            customer_id: String::new(),
            infrastructure_location_id: String::new(),
            cpu_cores: "1".into(),
            ram_gb: "1".into(),
            os: String::new(),
            os_version: String::new(),
            notes: String::new(),
            vm_id: None,
        }
    }
}

impl Draft for VmDraft {
    type Record = Asset;
    type Request = AssetRequest;

    fn from_record(asset: &Asset) -> Self {
        let specs = asset.vm_specs().cloned().unwrap_or_default();
        Self {
            hostname: asset.hostname.clone(),
            ip_address: asset.ip_address.clone(),
            customer_id: asset.customer_id.clone(),
            infrastructure_location_id: specs.infrastructure_location_id,
            cpu_cores: specs.cpu_cores.to_string(),
            ram_gb: specs.ram_gb.to_string(),
            os: specs.os,
            os_version: specs.os_version,
            notes: asset.notes.clone().unwrap_or_default(),
            vm_id: specs.vm_id,
        }
    }

    fn to_request(&self) -> Result<AssetRequest, CoreError> {
        let hostname = required(&self.hostname, "Hostname")?;
        let ip_address = required(&self.ip_address, "IP Address")?;
        let customer_id = required(&self.customer_id, "Customer")?;
        let specs = VmSpecs {
            infrastructure_location_id: required(
                &self.infrastructure_location_id,
                "Infrastructure",
            )?,
            cpu_cores: whole_number(&self.cpu_cores, "CPU Cores", 1)?,
            ram_gb: whole_number(&self.ram_gb, "RAM (GB)", 1)?,
            os: required(&self.os, "Operating System")?,
            os_version: required(&self.os_version, "OS Version")?,
            vm_id: self.vm_id.clone(),
        };
        Ok(AssetRequest {
            hostname,
            ip_address,
            customer_id,
            notes: optional(&self.notes),
            kind: AssetKind::Vm { specs },
        })
    }
}

// ── Network devices ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDeviceDraft {
    pub kind: DeviceKind,
    pub hostname: String,
    pub ip_address: String,
    pub customer_id: String,
    pub site_id: String,
    pub manufacturer: String,
    pub model: String,
    pub notes: String,
}

impl NetworkDeviceDraft {
    pub fn new(kind: DeviceKind) -> Self {
        Self {
            kind,
            hostname: String::new(),
            ip_address: String::new(),
            customer_id: String::new(),
            site_id: String::new(),
            manufacturer: String::new(),
            model: String::new(),
            notes: String::new(),
        }
    }
}

impl Draft for NetworkDeviceDraft {
    type Record = Asset;
    type Request = AssetRequest;

    fn from_record(asset: &Asset) -> Self {
        let (kind, site_id, specs) = match &asset.kind {
            AssetKind::Firewall { site_id, specs } => {
                (DeviceKind::Firewall, site_id.clone(), specs.clone())
            }
            AssetKind::Switch { site_id, specs } => {
                (DeviceKind::Switch, site_id.clone(), specs.clone())
            }
            AssetKind::Vm { .. } | AssetKind::Host { .. } => (
                DeviceKind::Switch,
                asset.kind.site_id().unwrap_or_default().to_owned(),
                NetworkDeviceSpecs::default(),
            ),
        };
        Self {
            kind,
            hostname: asset.hostname.clone(),
            ip_address: asset.ip_address.clone(),
            customer_id: asset.customer_id.clone(),
            site_id,
            manufacturer: specs.manufacturer,
            model: specs.model,
            notes: asset.notes.clone().unwrap_or_default(),
        }
    }

    fn to_request(&self) -> Result<AssetRequest, CoreError> {
        let hostname = required(&self.hostname, "Hostname")?;
        let ip_address = required(&self.ip_address, "IP Address")?;
        let customer_id = required(&self.customer_id, "Customer")?;
        let site_id = required(&self.site_id, "Site")?;
        let specs = NetworkDeviceSpecs {
            manufacturer: required(&self.manufacturer, "Manufacturer")?,
            model: required(&self.model, "Model")?,
        };
        let kind = match self.kind {
            DeviceKind::Switch => AssetKind::Switch { site_id, specs },
            DeviceKind::Firewall => AssetKind::Firewall { site_id, specs },
        };
        Ok(AssetRequest {
            hostname,
            ip_address,
            customer_id,
            notes: optional(&self.notes),
            kind,
        })
    }
}
