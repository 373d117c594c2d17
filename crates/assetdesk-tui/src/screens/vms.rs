//! Virtual machines, placed on a customer's infrastructure.

use ratatui::layout::Constraint;
use ratatui::text::Line;
use ratatui::widgets::Cell;

use assetdesk_core::select::infrastructure_options;
use assetdesk_core::{
    Asset, AssetRequest, Command, CommandResult, Customer, Infrastructure, NameIndex, Record,
    SearchQuery, VmDraft,
};

use super::customer_options;
use super::list::Resource;
use crate::action::ViewData;
use crate::widgets::form::{Field, Form};
use crate::widgets::panel::{detail_row, or_dash, section};

#[derive(Default)]
pub struct Vms {
    customers: Vec<Customer>,
    infrastructure: Vec<Infrastructure>,
    names: NameIndex,
}

fn resources(vm: &Asset) -> String {
    vm.vm_specs().map_or_else(String::new, |specs| {
        format!("{} CPU / {}GB RAM", specs.cpu_cores, specs.ram_gb)
    })
}

fn operating_system(vm: &Asset) -> String {
    vm.vm_specs().map_or_else(String::new, |specs| {
        format!("{} {}", specs.os, specs.os_version).trim().to_owned()
    })
}

impl Vms {
    fn location(&self, vm: &Asset) -> String {
        vm.vm_specs().map_or_else(String::new, |specs| {
            self.names
                .infrastructure_name(&specs.infrastructure_location_id)
                .to_owned()
        })
    }
}

impl Resource for Vms {
    type Draft = VmDraft;

    fn title(&self) -> &'static str {
        "Virtual Machines"
    }

    fn noun(&self) -> &'static str {
        "VM"
    }

    fn ingest(&mut self, data: ViewData) -> Option<Vec<Asset>> {
        let ViewData::VirtualMachines(data) = data else {
            return None;
        };
        self.names = NameIndex::new(&data.customers, std::iter::empty(), &data.infrastructure);
        self.customers = data.customers;
        self.infrastructure = data.infrastructure;
        Some(data.vms)
    }

    fn matches(&self, query: &SearchQuery, vm: &Asset) -> bool {
        query.virtual_machine(vm, &self.names)
    }

    fn columns(&self) -> Vec<(&'static str, Constraint)> {
        vec![
            ("Hostname", Constraint::Fill(2)),
            ("IP Address", Constraint::Length(16)),
            ("Customer", Constraint::Fill(2)),
            ("Location", Constraint::Fill(2)),
            ("Resources", Constraint::Length(20)),
            ("OS", Constraint::Fill(2)),
        ]
    }

    fn row(&self, vm: &Asset) -> Vec<Cell<'static>> {
        vec![
            Cell::from(vm.ip_address.clone()),
            Cell::from(self.names.customer_name(&vm.customer_id).to_owned()),
            Cell::from(self.location(vm)),
            Cell::from(resources(vm)),
            Cell::from(operating_system(vm)),
        ]
    }

    fn detail(&self, vm: &Asset) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        lines.extend(section("Placement"));
        lines.push(detail_row("IP Address", vm.ip_address.clone()));
        lines.push(detail_row(
            "Customer",
            self.names.customer_name(&vm.customer_id),
        ));
        lines.push(detail_row("Infrastructure", self.location(vm)));
        lines.push(Line::from(""));
        lines.extend(section("Resources"));
        lines.push(detail_row("Compute", resources(vm)));
        lines.push(detail_row("OS", operating_system(vm)));
        if let Some(vm_id) = vm.vm_specs().and_then(|specs| specs.vm_id.as_deref()) {
            lines.push(detail_row("VM ID", vm_id));
        }
        lines.push(detail_row("Notes", or_dash(vm.notes.as_deref())));
        lines
    }

    fn blank(&self) -> VmDraft {
        VmDraft::default()
    }

    fn form(&self, title: String, draft: &VmDraft) -> Form {
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
                    "infrastructure_location_id",
                    "Infrastructure",
                    infrastructure_options(&draft.customer_id, &self.infrastructure),
                )
                .required()
                .with_value(&draft.infrastructure_location_id),
                Field::number("cpu_cores", "CPU Cores")
                    .required()
                    .with_value(&draft.cpu_cores),
                Field::number("ram_gb", "RAM (GB)")
                    .required()
                    .with_value(&draft.ram_gb),
                Field::text("os", "Operating System")
                    .required()
                    .with_value(&draft.os),
                Field::text("os_version", "OS Version")
                    .required()
                    .with_value(&draft.os_version),
                Field::text("notes", "Notes").with_value(&draft.notes),
            ],
        )
    }

    fn read(&self, form: &Form, base: &VmDraft) -> VmDraft {
        let mut draft = base.clone();
        draft.hostname = form.value("hostname").to_owned();
        draft.ip_address = form.value("ip_address").to_owned();
        draft.customer_id = form.value("customer_id").to_owned();
        draft.infrastructure_location_id = form.value("infrastructure_location_id").to_owned();
        draft.cpu_cores = form.value("cpu_cores").to_owned();
        draft.ram_gb = form.value("ram_gb").to_owned();
        draft.os = form.value("os").to_owned();
        draft.os_version = form.value("os_version").to_owned();
        draft.notes = form.value("notes").to_owned();
        draft
    }

    /// Hosting options follow the selected customer.
    fn sync(&self, form: &mut Form) {
        form.set_options("customer_id", customer_options(&self.customers));
        let options = infrastructure_options(form.value("customer_id"), &self.infrastructure);
        form.set_options("infrastructure_location_id", options);
    }

    fn create(&self, request: AssetRequest) -> Command {
        Command::CreateAsset(request)
    }

    fn update(&self, id: String, request: AssetRequest) -> Command {
        Command::UpdateAsset { id, request }
    }

    fn delete(&self, vm: &Asset) -> Command {
        Command::DeleteAsset {
            id: vm.id().to_owned(),
        }
    }

    fn delete_prompt(&self) -> String {
        "Delete this VM?".into()
    }

    fn take(&self, result: CommandResult) -> Option<Asset> {
        match result {
            CommandResult::Asset(asset) if asset.vm_specs().is_some() => Some(asset),
            _ => None,
        }
    }
}
