use super::{AddressDraft, Draft, optional, required};
use crate::error::CoreError;
use crate::model::{Site, SiteRequest};

const SEPARATOR: &str = " - ";

/// Shown in the name preview before anything is typed.
pub const SITE_NAME_PLACEHOLDER: &str = "[Site Name]";

/// Stored display name for a site: `"{customer} - {name}"`.
pub fn compose_site_name(customer: &str, name: &str) -> String {
    let name = name.trim();
    let name = if name.is_empty() {
        SITE_NAME_PLACEHOLDER
    } else {
        name
    };
    format!("{customer}{SEPARATOR}{name}")
}

/// Recover the entered site name from a stored one.
///
/// Strips the owning customer's prefix when known, otherwise everything up to
/// the first separator. Names without a separator come back unchanged.
pub fn split_site_name<'a>(full: &'a str, customer: Option<&str>) -> &'a str {
    if let Some(rest) = customer.and_then(|c| full.strip_prefix(c)?.strip_prefix(SEPARATOR)) {
        return rest;
    }
    full.split_once(SEPARATOR).map_or(full, |(_, rest)| rest)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteDraft {
    pub customer_id: String,
    /// Bare name; the backend adds the customer prefix.
    pub name: String,
    pub address: AddressDraft,
    pub is_primary: bool,
    pub notes: String,
}

impl SiteDraft {
    /// Edit pre-fill that knows the owning customer's name.
    pub fn from_site(site: &Site, customer_name: Option<&str>) -> Self {
        Self {
            customer_id: site.customer_id.clone(),
            name: split_site_name(&site.name, customer_name).to_owned(),
            address: AddressDraft::from_address(site.address.as_ref()),
            is_primary: site.is_primary,
            notes: site.notes.clone().unwrap_or_default(),
        }
    }
}

impl Draft for SiteDraft {
    type Record = Site;
    type Request = SiteRequest;

    fn from_record(site: &Site) -> Self {
        Self::from_site(site, None)
    }

    fn to_request(&self) -> Result<SiteRequest, CoreError> {
        let customer_id = required(&self.customer_id, "Customer")?;
        Ok(SiteRequest {
            name: required(&self.name, "Site Name")?,
            customer_id,
            address: self.address.to_address(),
            is_primary: self.is_primary,
            notes: optional(&self.notes),
        })
    }
}
