// Client-side search: case-insensitive substring match over the fields each
// view displays. Recomputed on every keystroke against the loaded records.

use crate::lookup::NameIndex;
use crate::model::{Asset, Customer, Infrastructure, Site};

/// A lowercased search needle. An empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// True if any field contains the needle.
    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        self.is_empty()
            || fields
                .into_iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }

    // ── Per-view field sets ──────────────────────────────────────────

    pub fn customer(&self, customer: &Customer) -> bool {
        self.matches_any([
            customer.name.as_str(),
            customer.contact_email.as_str(),
            customer.contact_phone.as_str(),
        ])
    }

    pub fn site(&self, site: &Site, names: &NameIndex) -> bool {
        self.matches_any([site.name.as_str(), names.customer_name(&site.customer_id)])
    }

    /// Hostname, IP, OS, OS version, customer, hosting location, notes.
    pub fn virtual_machine(&self, vm: &Asset, names: &NameIndex) -> bool {
        let (os, os_version, location) = vm.vm_specs().map_or(("", "", ""), |specs| {
            (
                specs.os.as_str(),
                specs.os_version.as_str(),
                names.infrastructure_name(&specs.infrastructure_location_id),
            )
        });
        self.matches_any([
            vm.hostname.as_str(),
            vm.ip_address.as_str(),
            os,
            os_version,
            names.customer_name(&vm.customer_id),
            location,
            vm.notes.as_deref().unwrap_or_default(),
        ])
    }

    pub fn network_device(&self, device: &Asset) -> bool {
        self.matches_any([device.hostname.as_str(), device.ip_address.as_str()])
    }

    pub fn infrastructure(&self, infra: &Infrastructure, names: &NameIndex) -> bool {
        self.matches_any([infra.name.as_str(), names.customer_name(&infra.customer_id)])
    }

    /// On-premise rows also match on their site.
    pub fn on_premise(&self, infra: &Infrastructure, names: &NameIndex) -> bool {
        let site = infra.site_id.as_deref().map_or("", |id| names.site_name(id));
        self.matches_any([
            infra.name.as_str(),
            names.customer_name(&infra.customer_id),
            site,
        ])
    }
}

/// Indices of the records that pass `keep`, in their original order.
pub fn filter_indices<'a, T: 'a>(
    records: impl IntoIterator<Item = &'a T>,
    mut keep: impl FnMut(&T) -> bool,
) -> Vec<usize> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| keep(record).then_some(i))
        .collect()
}
