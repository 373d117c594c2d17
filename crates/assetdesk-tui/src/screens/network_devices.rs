//! Switches and firewalls. One resource serves both; [`DeviceKind`] picks
//! the asset type, titles and command variant.

use ratatui::layout::Constraint;
use ratatui::text::Line;
use ratatui::widgets::Cell;

use assetdesk_core::select::site_options;
use assetdesk_core::{
    Asset, AssetKind, AssetRequest, Command, CommandResult, Customer, DeviceKind, NameIndex,
    NetworkDeviceDraft, NetworkDeviceSpecs, Record, SearchQuery, Site,
};

use super::customer_options;
use super::list::Resource;
use crate::action::ViewData;
use crate::widgets::form::{Field, Form};
use crate::widgets::panel::{detail_row, or_dash, section};

pub struct NetworkDevices {
    kind: DeviceKind,
    customers: Vec<Customer>,
    sites: Vec<Site>,
    names: NameIndex,
}

impl NetworkDevices {
    pub fn new(kind: DeviceKind) -> Self {
        Self {
            kind,
            customers: Vec::new(),
            sites: Vec::new(),
            names: NameIndex::default(),
        }
    }

    fn site_name(&self, device: &Asset) -> String {
        device
            .kind
            .site_id()
            .map_or_else(String::new, |id| self.names.site_name(id).to_owned())
    }
}

fn specs(device: &Asset) -> Option<&NetworkDeviceSpecs> {
    match &device.kind {
        AssetKind::Switch { specs, .. } | AssetKind::Firewall { specs, .. } => Some(specs),
        AssetKind::Vm { .. } | AssetKind::Host { .. } => None,
    }
}

impl Resource for NetworkDevices {
    type Draft = NetworkDeviceDraft;

    fn title(&self) -> &'static str {
        self.kind.title()
    }

    fn noun(&self) -> &'static str {
        self.kind.singular()
    }

    fn ingest(&mut self, data: ViewData) -> Option<Vec<Asset>> {
        let ViewData::NetworkDevices(data) = data else {
            return None;
        };
        self.names = NameIndex::new(&data.customers, &data.sites, std::iter::empty());
        self.customers = data.customers;
        self.sites = data.sites;
        let kind = self.kind;
        Some(
            data.devices
                .into_iter()
                .filter(|device| kind.matches(device))
                .collect(),
        )
    }

    fn matches(&self, query: &SearchQuery, device: &Asset) -> bool {
        query.network_device(device)
    }

    fn columns(&self) -> Vec<(&'static str, Constraint)> {
        vec![
            ("Hostname", Constraint::Fill(2)),
            ("IP Address", Constraint::Length(16)),
            ("Customer", Constraint::Fill(2)),
            ("Site", Constraint::Fill(2)),
            ("Manufacturer", Constraint::Fill(1)),
            ("Model", Constraint::Fill(1)),
        ]
    }

    fn row(&self, device: &Asset) -> Vec<Cell<'static>> {
        let specs = specs(device);
        vec![
            Cell::from(device.ip_address.clone()),
            Cell::from(self.names.customer_name(&device.customer_id).to_owned()),
            Cell::from(self.site_name(device)),
            Cell::from(specs.map(|s| s.manufacturer.clone()).unwrap_or_default()),
            Cell::from(specs.map(|s| s.model.clone()).unwrap_or_default()),
        ]
    }

    fn detail(&self, device: &Asset) -> Vec<Line<'static>> {
        let specs = specs(device);
        let mut lines = Vec::new();
        lines.extend(section(self.kind.singular()));
        lines.push(detail_row("IP Address", device.ip_address.clone()));
        lines.push(detail_row(
            "Customer",
            self.names.customer_name(&device.customer_id),
        ));
        lines.push(detail_row("Site", self.site_name(device)));
        lines.push(detail_row(
            "Manufacturer",
            or_dash(specs.map(|s| s.manufacturer.as_str())),
        ));
        lines.push(detail_row("Model", or_dash(specs.map(|s| s.model.as_str()))));
        lines.push(detail_row("Notes", or_dash(device.notes.as_deref())));
        lines
    }

    fn blank(&self) -> NetworkDeviceDraft {
        NetworkDeviceDraft::new(self.kind)
    }

    fn form(&self, title: String, draft: &NetworkDeviceDraft) -> Form {
        Form::new(
            title,
            vec![
                Field::text("hostname", "Hostname")
                    .required()
                    .with_value(&draft.hostname),
                Field::text("ip_address", "IP Address")
                    .required()
                    .with_value(&draft.ip_address),
                Field::select("customer_id", "Customer", customer_options(&self.customers))
                    .required()
                    .with_value(&draft.customer_id),
                Field::select(
                    "site_id",
                    "Site",
                    site_options(&draft.customer_id, &self.sites),
                )
                .required()
                .with_value(&draft.site_id),
                Field::text("manufacturer", "Manufacturer")
                    .required()
                    .with_value(&draft.manufacturer),
                Field::text("model", "Model")
                    .required()
                    .with_value(&draft.model),
                Field::text("notes", "Notes").with_value(&draft.notes),
            ],
        )
    }

    fn read(&self, form: &Form, _base: &NetworkDeviceDraft) -> NetworkDeviceDraft {
        NetworkDeviceDraft {
            kind: self.kind,
            hostname: form.value("hostname").to_owned(),
            ip_address: form.value("ip_address").to_owned(),
            customer_id: form.value("customer_id").to_owned(),
            site_id: form.value("site_id").to_owned(),
            manufacturer: form.value("manufacturer").to_owned(),
            model: form.value("model").to_owned(),
            notes: form.value("notes").to_owned(),
        }
    }

    /// Site options follow the selected customer.
    fn sync(&self, form: &mut Form) {
        form.set_options("customer_id", customer_options(&self.customers));
        let options = site_options(form.value("customer_id"), &self.sites);
        form.set_options("site_id", options);
    }

    fn create(&self, request: AssetRequest) -> Command {
        Command::CreateAsset(request)
    }

    fn update(&self, id: String, request: AssetRequest) -> Command {
        Command::UpdateAsset { id, request }
    }

    fn delete(&self, device: &Asset) -> Command {
        Command::DeleteAsset {
            id: device.id().to_owned(),
        }
    }

    fn delete_prompt(&self) -> String {
        format!("Delete this {}?", self.kind.singular().to_lowercase())
    }

    fn take(&self, result: CommandResult) -> Option<Asset> {
        match result {
            CommandResult::Asset(asset) if self.kind.matches(&asset) => Some(asset),
            _ => None,
        }
    }
}
