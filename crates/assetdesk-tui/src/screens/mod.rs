//! Screen implementations. Each screen is a top-level Component.

pub mod customers;
pub mod dashboard;
pub mod infrastructure;
pub mod list;
pub mod network_devices;
pub mod sites;
pub mod typed_infra;
pub mod vms;

use assetdesk_core::select::SelectOption;
use assetdesk_core::{Address, AddressDraft, Customer};

use crate::component::Component;
use crate::screen::ScreenId;
use crate::widgets::form::{Field, Form};

use self::list::ListScreen;

/// One component per view, in [`ScreenId::ALL`] order.
pub fn create_screens() -> Vec<Box<dyn Component>> {
    ScreenId::ALL.into_iter().map(create_screen).collect()
}

fn create_screen(id: ScreenId) -> Box<dyn Component> {
    if let Some(kind) = id.device_kind() {
        return Box::new(ListScreen::new(
            id,
            network_devices::NetworkDevices::new(kind),
        ));
    }
    if let Some(flavor) = id.flavor() {
        return Box::new(ListScreen::new(id, typed_infra::TypedInfra::new(flavor)));
    }
    match id {
        ScreenId::Customers => Box::new(ListScreen::new(id, customers::Customers)),
        ScreenId::Sites => Box::new(ListScreen::new(id, sites::Sites::default())),
        ScreenId::VirtualMachines => Box::new(ListScreen::new(id, vms::Vms::default())),
        ScreenId::Infrastructure => Box::new(ListScreen::new(
            id,
            infrastructure::AllInfrastructure::default(),
        )),
        _ => Box::new(dashboard::DashboardScreen::new()),
    }
}

// ── Shared form pieces ────────────────────────────────────────────────

pub(crate) fn customer_options(customers: &[Customer]) -> Vec<SelectOption> {
    customers
        .iter()
        .map(|customer| SelectOption::new(&customer.id, &customer.name))
        .collect()
}

pub(crate) fn address_fields(address: &AddressDraft) -> [Field; 4] {
    [
        Field::text("street_address", "Street Address").with_value(&address.street_address),
        Field::text("city", "City").with_value(&address.city),
        Field::text("postal_code", "Postal Code").with_value(&address.postal_code),
        Field::text("country", "Country").with_value(&address.country),
    ]
}

pub(crate) fn read_address(form: &Form) -> AddressDraft {
    AddressDraft {
        street_address: form.value("street_address").to_owned(),
        city: form.value("city").to_owned(),
        postal_code: form.value("postal_code").to_owned(),
        country: form.value("country").to_owned(),
    }
}

/// `"street, postal city, country"` with blank parts dropped.
pub(crate) fn format_address(address: Option<&Address>) -> String {
    let Some(address) = address else {
        return String::new();
    };
    let locality = [address.postal_code.trim(), address.city.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    [address.street_address.trim(), locality.as_str(), address.country.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn one_screen_per_view() {
        let ids: Vec<ScreenId> = create_screens().iter().map(|screen| screen.id()).collect();
        assert_eq!(ids, ScreenId::ALL.to_vec());
    }

    #[test]
    fn address_skips_blank_parts() {
        let address = Address {
            street_address: "1 Main St".into(),
            city: "Springfield".into(),
            postal_code: String::new(),
            country: "US".into(),
        };
        assert_eq!(format_address(Some(&address)), "1 Main St, Springfield, US");
        assert_eq!(format_address(None), "");
    }
}
