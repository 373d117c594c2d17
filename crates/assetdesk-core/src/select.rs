//! Dependent-select derivations.
//!
//! A form's site (or hosting location) options are always derived from the
//! currently selected customer. These are pure functions so a form can call
//! them on every customer change *and* whenever a prerequisite collection
//! arrives after the dependent field already holds a value.

use crate::model::{Infrastructure, Site};

/// One entry of a select field: the submitted value and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Sites owned by `customer_id`, in their loaded order.
pub fn sites_for<'a>(
    customer_id: &str,
    sites: impl IntoIterator<Item = &'a Site>,
) -> Vec<&'a Site> {
    if customer_id.is_empty() {
        return Vec::new();
    }
    sites
        .into_iter()
        .filter(|site| site.customer_id == customer_id)
        .collect()
}

/// Infrastructure owned by `customer_id`.
pub fn infrastructure_for<'a>(
    customer_id: &str,
    infrastructure: impl IntoIterator<Item = &'a Infrastructure>,
) -> Vec<&'a Infrastructure> {
    if customer_id.is_empty() {
        return Vec::new();
    }
    infrastructure
        .into_iter()
        .filter(|infra| infra.customer_id == customer_id)
        .collect()
}

pub fn site_options<'a>(
    customer_id: &str,
    sites: impl IntoIterator<Item = &'a Site>,
) -> Vec<SelectOption> {
    sites_for(customer_id, sites)
        .into_iter()
        .map(|site| SelectOption::new(&site.id, &site.name))
        .collect()
}

pub fn infrastructure_options<'a>(
    customer_id: &str,
    infrastructure: impl IntoIterator<Item = &'a Infrastructure>,
) -> Vec<SelectOption> {
    infrastructure_for(customer_id, infrastructure)
        .into_iter()
        .map(|infra| SelectOption::new(&infra.id, &infra.name))
        .collect()
}

/// Keep `selected` only if it is one of `options`; otherwise clear it.
pub fn reconcile_selection(selected: &str, options: &[SelectOption]) -> String {
    if options.iter().any(|option| option.value == selected) {
        selected.to_owned()
    } else {
        String::new()
    }
}
