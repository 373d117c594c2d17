//! All infrastructure locations, whatever their type, with the VMs each
//! one hosts. New records are hosts, datacenters or generic cloud entries;
//! the typed subviews have their own screens.

use std::collections::HashMap;

use ratatui::layout::Constraint;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Cell;

use assetdesk_core::catalog::{
    CLOUD_PROVIDERS, INFRASTRUCTURE_TYPES, cloud_provider_name, infrastructure_type_name,
};
use assetdesk_core::select::{SelectOption, site_options};
use assetdesk_core::{
    Asset, Command, CommandResult, Customer, Infrastructure, InfrastructureDraft,
    InfrastructureKind, InfrastructureRequest, InfrastructureType, NameIndex, Record,
    SearchQuery, Site,
};

use super::customer_options;
use super::list::Resource;
use crate::action::ViewData;
use crate::theme;
use crate::widgets::form::{Field, Form};
use crate::widgets::panel::{detail_row, detail_row_styled, or_dash, section};

const HOST_FIELDS: [&str; 3] = ["cpu_cores", "memory_gb", "storage_gb"];

#[derive(Default)]
pub struct AllInfrastructure {
    customers: Vec<Customer>,
    sites: Vec<Site>,
    hosted_vms: HashMap<String, Vec<Asset>>,
    names: NameIndex,
}

fn type_options() -> Vec<SelectOption> {
    INFRASTRUCTURE_TYPES
        .iter()
        .map(|info| SelectOption::new(info.id.to_string(), info.name))
        .collect()
}

fn provider_options() -> Vec<SelectOption> {
    CLOUD_PROVIDERS
        .iter()
        .map(|&provider| SelectOption::new(provider.to_string(), cloud_provider_name(provider)))
        .collect()
}

/// Capacity for hosts, the location or region for everything else.
fn capacity(infra: &Infrastructure) -> String {
    match &infra.kind {
        InfrastructureKind::Host { details } => format!(
            "{} CPU, {}GB RAM, {}GB Storage",
            details.capacity.cpu_cores, details.capacity.memory_gb, details.capacity.storage_gb
        ),
        InfrastructureKind::Datacenter { details, config } => details
            .as_ref()
            .map(|d| d.location.clone())
            .or_else(|| config.as_ref().map(|c| c.name.clone()))
            .unwrap_or_default(),
        InfrastructureKind::Cloud {
            cloud_provider,
            details,
        } => {
            let provider = cloud_provider_name(*cloud_provider);
            if details.location.is_empty() {
                provider.to_owned()
            } else {
                format!("{provider} ({})", details.location)
            }
        }
        InfrastructureKind::Aws { config } => config.region.clone(),
        InfrastructureKind::Azure { config } => config.region.clone(),
        InfrastructureKind::OnPremise { config } => config.location.clone(),
    }
}

impl AllInfrastructure {
    fn hosted(&self, infra: &Infrastructure) -> &[Asset] {
        self.hosted_vms
            .get(&infra.id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn hosted_summary(&self, infra: &Infrastructure) -> String {
        let hosted = self.hosted(infra);
        if hosted.is_empty() {
            return "No VMs".into();
        }
        hosted
            .iter()
            .map(|vm| vm.hostname.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn site_name(&self, infra: &Infrastructure) -> String {
        infra
            .site_id
            .as_deref()
            .map_or_else(String::new, |id| self.names.site_name(id).to_owned())
    }
}

impl Resource for AllInfrastructure {
    type Draft = InfrastructureDraft;

    fn title(&self) -> &'static str {
        "Infrastructure"
    }

    fn noun(&self) -> &'static str {
        "Infrastructure"
    }

    fn ingest(&mut self, data: ViewData) -> Option<Vec<Infrastructure>> {
        let ViewData::Infrastructure(data) = data else {
            return None;
        };
        self.names = NameIndex::new(&data.customers, &data.sites, &data.infrastructure);
        self.customers = data.customers;
        self.sites = data.sites;
        self.hosted_vms = data.hosted_vms;
        Some(data.infrastructure)
    }

    fn matches(&self, query: &SearchQuery, infra: &Infrastructure) -> bool {
        query.infrastructure(infra, &self.names)
    }

    fn columns(&self) -> Vec<(&'static str, Constraint)> {
        vec![
            ("Name", Constraint::Fill(2)),
            ("Type", Constraint::Length(15)),
            ("Customer", Constraint::Fill(2)),
            ("Site", Constraint::Fill(2)),
            ("Capacity", Constraint::Fill(3)),
            ("Hosted VMs", Constraint::Fill(2)),
        ]
    }

    fn row(&self, infra: &Infrastructure) -> Vec<Cell<'static>> {
        let hosted_style = if self.hosted(infra).is_empty() {
            theme::muted()
        } else {
            Style::default()
        };
        vec![
            Cell::from(infrastructure_type_name(infra.infrastructure_type())),
            Cell::from(self.names.customer_name(&infra.customer_id).to_owned()),
            Cell::from(self.site_name(infra)),
            Cell::from(capacity(infra)),
            Cell::from(self.hosted_summary(infra)).style(hosted_style),
        ]
    }

    fn detail(&self, infra: &Infrastructure) -> Vec<Line<'static>> {
        let site = self.site_name(infra);
        let mut lines = Vec::new();
        lines.extend(section("Location"));
        lines.push(detail_row(
            "Type",
            infrastructure_type_name(infra.infrastructure_type()),
        ));
        lines.push(detail_row(
            "Customer",
            self.names.customer_name(&infra.customer_id),
        ));
        lines.push(detail_row("Site", or_dash(Some(site.as_str()))));
        lines.push(detail_row_styled(
            "Status",
            if infra.is_active { "Active" } else { "Inactive" },
            theme::active_flag(infra.is_active),
        ));
        lines.push(detail_row("Description", or_dash(infra.description.as_deref())));
        lines.push(detail_row("Capacity", capacity(infra)));
        lines.push(Line::from(""));
        lines.extend(section("Hosted VMs"));
        lines.push(detail_row("VMs", self.hosted_summary(infra)));
        lines
    }

    fn blank(&self) -> InfrastructureDraft {
        InfrastructureDraft::default()
    }

    fn form(&self, title: String, draft: &InfrastructureDraft) -> Form {
        let kind = draft.kind.map(|kind| kind.to_string()).unwrap_or_default();
        let provider = draft
            .cloud_provider
            .map(|provider| provider.to_string())
            .unwrap_or_default();
        Form::new(
            title,
            vec![
                Field::text("name", "Name").required().with_value(&draft.name),
                Field::select("kind", "Type", type_options())
                    .required()
                    .with_value(kind),
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
                Field::number("cpu_cores", "CPU Cores")
                    .required()
                    .with_value(&draft.cpu_cores),
                Field::number("memory_gb", "Memory (GB)")
                    .required()
                    .with_value(&draft.memory_gb),
                Field::number("storage_gb", "Storage (GB)")
                    .required()
                    .with_value(&draft.storage_gb),
                Field::select("cloud_provider", "Cloud Provider", provider_options())
                    .required()
                    .with_value(provider),
                Field::text("location", "Location").with_value(&draft.location),
                Field::text("description", "Description").with_value(&draft.description),
                Field::text("specifications", "Specifications")
                    .with_value(&draft.specifications),
                Field::text("notes", "Notes").with_value(&draft.notes),
                Field::toggle("is_active", "Active").with_checked(draft.is_active),
            ],
        )
    }

    fn read(&self, form: &Form, base: &InfrastructureDraft) -> InfrastructureDraft {
        InfrastructureDraft {
            name: form.value("name").to_owned(),
            kind: form.value("kind").parse().ok(),
            customer_id: form.value("customer_id").to_owned(),
            site_id: form.value("site_id").to_owned(),
            description: form.value("description").to_owned(),
            is_active: form.checked("is_active"),
            cpu_cores: form.value("cpu_cores").to_owned(),
            memory_gb: form.value("memory_gb").to_owned(),
            storage_gb: form.value("storage_gb").to_owned(),
            cloud_provider: form.value("cloud_provider").parse().ok(),
            location: form.value("location").to_owned(),
            specifications: form.value("specifications").to_owned(),
            notes: form.value("notes").to_owned(),
            carried: base.carried.clone(),
        }
    }

    /// Show only the selected type's fields and narrow sites to the customer.
    fn sync(&self, form: &mut Form) {
        form.set_options("customer_id", customer_options(&self.customers));
        let sites = site_options(form.value("customer_id"), &self.sites);
        form.set_options("site_id", sites);

        let kind: Option<InfrastructureType> = form.value("kind").parse().ok();
        let is_host = kind == Some(InfrastructureType::Host);
        let is_cloud = kind == Some(InfrastructureType::Cloud);
        for key in HOST_FIELDS {
            form.set_hidden(key, !is_host);
        }
        form.set_hidden("cloud_provider", !is_cloud);
        form.set_hidden("location", kind.is_none() || is_host);
        form.set_hidden("site_id", is_cloud);

        let description = INFRASTRUCTURE_TYPES
            .iter()
            .find(|info| Some(info.id) == kind)
            .map(|info| info.description.to_owned());
        form.set_note(description);
    }

    fn create(&self, request: InfrastructureRequest) -> Command {
        Command::CreateInfrastructure(request)
    }

    fn update(&self, id: String, request: InfrastructureRequest) -> Command {
        Command::UpdateInfrastructure { id, request }
    }

    fn delete(&self, infra: &Infrastructure) -> Command {
        Command::DeleteInfrastructure {
            id: infra.id().to_owned(),
        }
    }

    fn delete_blocked(&self, infra: &Infrastructure) -> Option<String> {
        match self.hosted(infra).len() {
            0 => None,
            1 => Some("1 VM is hosted here. Migrate it before deleting.".into()),
            n => Some(format!("{n} VMs are hosted here. Migrate them before deleting.")),
        }
    }

    fn delete_prompt(&self) -> String {
        "Delete this infrastructure? Any VMs hosted here will need to be migrated first.".into()
    }

    fn take(&self, result: CommandResult) -> Option<Infrastructure> {
        match result {
            CommandResult::Infrastructure(infra) => Some(infra),
            _ => None,
        }
    }
}
