// Id → display-name resolution across collections.

use std::collections::HashMap;

use crate::model::{Customer, Infrastructure, Site};

pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";
pub const UNKNOWN_SITE: &str = "Unknown Site";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Name lookups built from whichever cross-referenced collections a view loaded.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    customers: HashMap<String, String>,
    sites: HashMap<String, String>,
    infrastructure: HashMap<String, String>,
}

impl NameIndex {
    pub fn new<'a>(
        customers: impl IntoIterator<Item = &'a Customer>,
        sites: impl IntoIterator<Item = &'a Site>,
        infrastructure: impl IntoIterator<Item = &'a Infrastructure>,
    ) -> Self {
        Self {
            customers: customers
                .into_iter()
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect(),
            sites: sites
                .into_iter()
                .map(|s| (s.id.clone(), s.name.clone()))
                .collect(),
            infrastructure: infrastructure
                .into_iter()
                .map(|i| (i.id.clone(), i.name.clone()))
                .collect(),
        }
    }

    pub fn customer_name(&self, id: &str) -> &str {
        self.customers.get(id).map_or(UNKNOWN_CUSTOMER, String::as_str)
    }

    pub fn site_name(&self, id: &str) -> &str {
        self.sites.get(id).map_or(UNKNOWN_SITE, String::as_str)
    }

    pub fn infrastructure_name(&self, id: &str) -> &str {
        self.infrastructure
            .get(id)
            .map_or(UNKNOWN_LOCATION, String::as_str)
    }

    /// Raw customer name, `None` when the id is not loaded.
    pub fn find_customer(&self, id: &str) -> Option<&str> {
        self.customers.get(id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_fall_back() {
        let customers = [Customer {
            id: "c1".into(),
            name: "Acme".into(),
            contact_email: String::new(),
            contact_phone: String::new(),
            address: None,
        }];
        let index = NameIndex::new(&customers, std::iter::empty(), std::iter::empty());

        assert_eq!(index.customer_name("c1"), "Acme");
        assert_eq!(index.customer_name("c9"), UNKNOWN_CUSTOMER);
        assert_eq!(index.site_name("s1"), UNKNOWN_SITE);
        assert_eq!(index.infrastructure_name("i1"), UNKNOWN_LOCATION);
        assert_eq!(index.find_customer("c9"), None);
    }
}
