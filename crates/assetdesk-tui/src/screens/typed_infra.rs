//! AWS, Azure, datacenter and on-premise subviews. Each shows only its own
//! record type and edits that type's config block.

use ratatui::layout::Constraint;
use ratatui::text::Line;
use ratatui::widgets::Cell;

use assetdesk_core::select::site_options;
use assetdesk_core::{
    Command, CommandResult, Customer, InfraFlavor, Infrastructure, InfrastructureKind,
    InfrastructureRequest, NameIndex, Record, SearchQuery, Site, TypedInfrastructureDraft,
};

use super::customer_options;
use super::list::Resource;
use crate::action::ViewData;
use crate::theme;
use crate::widgets::form::{Field, Form};
use crate::widgets::panel::{detail_row, detail_row_styled, or_dash, section};

pub struct TypedInfra {
    flavor: InfraFlavor,
    customers: Vec<Customer>,
    sites: Vec<Site>,
    names: NameIndex,
}

impl TypedInfra {
    pub fn new(flavor: InfraFlavor) -> Self {
        Self {
            flavor,
            customers: Vec::new(),
            sites: Vec::new(),
            names: NameIndex::default(),
        }
    }

    /// Type-specific `(label, value)` pairs, in column order.
    fn config_fields(&self, infra: &Infrastructure) -> Vec<(&'static str, String)> {
        match &infra.kind {
            InfrastructureKind::Aws { config } => vec![
                ("Region", config.region.clone()),
                ("VPC ID", config.vpc_id.clone()),
            ],
            InfrastructureKind::Azure { config } => vec![
                ("Region", config.region.clone()),
                ("Subscription", config.subscription_id.clone()),
                ("Resource Group", config.resource_group.clone()),
            ],
            InfrastructureKind::OnPremise { config } => {
                let site = infra
                    .site_id
                    .as_deref()
                    .map_or_else(String::new, |id| self.names.site_name(id).to_owned());
                vec![("Site", site), ("Location", config.location.clone())]
            }
            InfrastructureKind::Datacenter { .. }
            | InfrastructureKind::Host { .. }
            | InfrastructureKind::Cloud { .. } => vec![(
                "Description",
                infra.description.clone().unwrap_or_default(),
            )],
        }
    }
}

fn status(active: bool) -> Cell<'static> {
    Cell::from(if active { "Active" } else { "Inactive" }).style(theme::active_flag(active))
}

impl Resource for TypedInfra {
    type Draft = TypedInfrastructureDraft;

    fn title(&self) -> &'static str {
        self.flavor.title()
    }

    fn noun(&self) -> &'static str {
        match self.flavor {
            InfraFlavor::Azure => "Azure Infrastructure",
            InfraFlavor::Aws => "AWS Infrastructure",
            InfraFlavor::Datacenter => "Datacenter",
            InfraFlavor::OnPremise => "On-Premise Infrastructure",
        }
    }

    fn ingest(&mut self, data: ViewData) -> Option<Vec<Infrastructure>> {
        let ViewData::TypedInfrastructure(data) = data else {
            return None;
        };
        self.names = NameIndex::new(&data.customers, &data.sites, std::iter::empty());
        self.customers = data.customers;
        self.sites = data.sites;
        let flavor = self.flavor;
        Some(
            data.infrastructure
                .into_iter()
                .filter(|infra| flavor.matches(infra))
                .collect(),
        )
    }

    fn matches(&self, query: &SearchQuery, infra: &Infrastructure) -> bool {
        if self.flavor == InfraFlavor::OnPremise {
            query.on_premise(infra, &self.names)
        } else {
            query.infrastructure(infra, &self.names)
        }
    }

    fn columns(&self) -> Vec<(&'static str, Constraint)> {
        let mut columns = vec![("Name", Constraint::Fill(2)), ("Customer", Constraint::Fill(2))];
        match self.flavor {
            InfraFlavor::Aws => columns.extend([
                ("Region", Constraint::Length(14)),
                ("VPC ID", Constraint::Fill(2)),
            ]),
            InfraFlavor::Azure => columns.extend([
                ("Region", Constraint::Length(14)),
                ("Subscription", Constraint::Fill(2)),
                ("Resource Group", Constraint::Fill(2)),
            ]),
            InfraFlavor::OnPremise => columns.extend([
                ("Site", Constraint::Fill(2)),
                ("Location", Constraint::Fill(2)),
            ]),
            InfraFlavor::Datacenter => columns.push(("Description", Constraint::Fill(3))),
        }
        columns.push(("Status", Constraint::Length(10)));
        columns
    }

    fn row(&self, infra: &Infrastructure) -> Vec<Cell<'static>> {
        let mut cells = vec![Cell::from(
            self.names.customer_name(&infra.customer_id).to_owned(),
        )];
        cells.extend(
            self.config_fields(infra)
                .into_iter()
                .map(|(_, value)| Cell::from(value)),
        );
        cells.push(status(infra.is_active));
        cells
    }

    fn detail(&self, infra: &Infrastructure) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        lines.extend(section(self.flavor.title()));
        lines.push(detail_row(
            "Customer",
            self.names.customer_name(&infra.customer_id),
        ));
        for (label, value) in self.config_fields(infra) {
            lines.push(detail_row(label, or_dash(Some(value.as_str()))));
        }
        if self.flavor != InfraFlavor::Datacenter {
            lines.push(detail_row("Description", or_dash(infra.description.as_deref())));
        }
        lines.push(detail_row_styled(
            "Status",
            if infra.is_active { "Active" } else { "Inactive" },
            theme::active_flag(infra.is_active),
        ));
        lines
    }

    fn blank(&self) -> TypedInfrastructureDraft {
        TypedInfrastructureDraft::new(self.flavor)
    }

    fn form(&self, title: String, draft: &TypedInfrastructureDraft) -> Form {
        let aws = self.flavor == InfraFlavor::Aws;
        let azure = self.flavor == InfraFlavor::Azure;
        let on_premise = self.flavor == InfraFlavor::OnPremise;
        Form::new(
            title,
            vec![
                Field::text("name", "Name").required().with_value(&draft.name),
                Field::select("customer_id", "Customer", customer_options(&self.customers))
                    .required()
                    .with_value(&draft.customer_id),
                Field::select(
                    "site_id",
                    "Site",
                    site_options(&draft.customer_id, &self.sites),
                )
                .required()
                .with_value(&draft.site_id)
                .hidden(!on_premise),
                Field::text("subscription_id", "Subscription ID")
                    .required()
                    .with_value(&draft.subscription_id)
                    .hidden(!azure),
                Field::text("resource_group", "Resource Group")
                    .required()
                    .with_value(&draft.resource_group)
                    .hidden(!azure),
                Field::text("region", "Region")
                    .required()
                    .with_value(&draft.region)
                    .hidden(!(aws || azure)),
                Field::text("vpc_id", "VPC ID")
                    .required()
                    .with_value(&draft.vpc_id)
                    .hidden(!aws),
                Field::text("location", "Location")
                    .required()
                    .with_value(&draft.location)
                    .hidden(!on_premise),
                Field::text("description", "Description").with_value(&draft.description),
                Field::toggle("is_active", "Active").with_checked(draft.is_active),
            ],
        )
    }

    /// Only on-premise forms show the site; other flavors keep the stored one.
    fn read(&self, form: &Form, base: &TypedInfrastructureDraft) -> TypedInfrastructureDraft {
        let site_id = if self.flavor == InfraFlavor::OnPremise {
            form.value("site_id").to_owned()
        } else {
            base.site_id.clone()
        };
        TypedInfrastructureDraft {
            flavor: self.flavor,
            name: form.value("name").to_owned(),
            customer_id: form.value("customer_id").to_owned(),
            site_id,
            description: form.value("description").to_owned(),
            is_active: form.checked("is_active"),
            region: form.value("region").to_owned(),
            vpc_id: form.value("vpc_id").to_owned(),
            subscription_id: form.value("subscription_id").to_owned(),
            resource_group: form.value("resource_group").to_owned(),
            location: form.value("location").to_owned(),
            carried: base.carried.clone(),
        }
    }

    fn sync(&self, form: &mut Form) {
        form.set_options("customer_id", customer_options(&self.customers));
        if self.flavor == InfraFlavor::OnPremise {
            let sites = site_options(form.value("customer_id"), &self.sites);
            form.set_options("site_id", sites);
        }
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

    fn delete_prompt(&self) -> String {
        format!("Delete this {} infrastructure?", self.flavor.short())
    }

    fn take(&self, result: CommandResult) -> Option<Infrastructure> {
        match result {
            CommandResult::Infrastructure(infra) if self.flavor.matches(&infra) => Some(infra),
            _ => None,
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use assetdesk_core::{AwsConfig, LocationDetails, OnPremiseConfig, TypedInfrastructureData};

    use super::*;
    use crate::action::Action;
    use crate::component::Component;
    use crate::screen::ScreenId;
    use crate::screens::list::ListScreen;
    use crate::screens::list::test_support::{key, load, type_text};

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.into(),
            name: name.into(),
            contact_email: String::new(),
            contact_phone: String::new(),
            address: None,
        }
    }

    fn site(id: &str, name: &str, customer_id: &str) -> Site {
        Site {
            id: id.into(),
            name: name.into(),
            customer_id: customer_id.into(),
            address: None,
            is_primary: false,
            notes: None,
            added: None,
            modified: None,
        }
    }

    fn aws(id: &str, name: &str, region: &str) -> Infrastructure {
        Infrastructure {
            id: id.into(),
            name: name.into(),
            customer_id: "c1".into(),
            site_id: None,
            description: None,
            is_active: true,
            kind: InfrastructureKind::Aws {
                config: AwsConfig {
                    region: region.into(),
                    vpc_id: format!("vpc-{id}"),
                },
            },
        }
    }

    fn on_premise(id: &str, name: &str, site_id: &str) -> Infrastructure {
        Infrastructure {
            id: id.into(),
            name: name.into(),
            customer_id: "c1".into(),
            site_id: Some(site_id.into()),
            description: None,
            is_active: false,
            kind: InfrastructureKind::OnPremise {
                config: OnPremiseConfig {
                    location: "Basement".into(),
                },
            },
        }
    }

    fn customers() -> Vec<Customer> {
        vec![customer("c1", "Acme")]
    }

    #[test]
    fn aws_rows_show_region_vpc_and_status() {
        let mut screen = ListScreen::new(ScreenId::Aws, TypedInfra::new(InfraFlavor::Aws));
        load(
            &mut screen,
            ViewData::TypedInfrastructure(TypedInfrastructureData {
                infrastructure: vec![
                    aws("i1", "prod", "us-east-1"),
                    on_premise("i2", "closet", "s1"),
                ],
                customers: customers(),
                sites: Vec::new(),
            }),
        );
        // Records of other types never reach the table.
        assert_eq!(screen.visible_labels(), ["prod"]);

        let resource = screen.resource();
        let headers: Vec<&str> = resource.columns().into_iter().map(|(h, _)| h).collect();
        assert_eq!(headers, ["Name", "Customer", "Region", "VPC ID", "Status"]);
        assert_eq!(resource.row(&aws("i1", "prod", "us-east-1")).len(), 4);
        assert_eq!(resource.delete_prompt(), "Delete this AWS infrastructure?");
    }

    #[test]
    fn on_premise_search_matches_site() {
        let mut screen = ListScreen::new(
            ScreenId::OnPremise,
            TypedInfra::new(InfraFlavor::OnPremise),
        );
        load(
            &mut screen,
            ViewData::TypedInfrastructure(TypedInfrastructureData {
                infrastructure: vec![
                    on_premise("i1", "closet", "s1"),
                    on_premise("i2", "rack", "s2"),
                ],
                customers: customers(),
                sites: vec![
                    site("s1", "Acme - HQ", "c1"),
                    site("s2", "Acme - Warehouse", "c1"),
                ],
            }),
        );
        screen.update(&Action::SearchInput("warehouse".into())).unwrap();
        assert_eq!(screen.visible_labels(), ["rack"]);
        assert_eq!(
            screen.resource().delete_prompt(),
            "Delete this on-premise infrastructure?"
        );
    }

    #[test]
    fn aws_form_hides_other_config_fields() {
        let mut screen = ListScreen::new(ScreenId::Aws, TypedInfra::new(InfraFlavor::Aws));
        load(
            &mut screen,
            ViewData::TypedInfrastructure(TypedInfrastructureData {
                infrastructure: Vec::new(),
                customers: customers(),
                sites: Vec::new(),
            }),
        );
        key(&mut screen, KeyCode::Char('n'));
        let form = screen.form().unwrap();
        assert_eq!(form.title(), "Add AWS Infrastructure");
        assert!(form.is_hidden("site_id"));
        assert!(form.is_hidden("subscription_id"));
        assert!(!form.is_hidden("vpc_id"));

        type_text(&mut screen, "prod");
        key(&mut screen, KeyCode::Tab);
        key(&mut screen, KeyCode::Right);
        key(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "us-east-1");
        key(&mut screen, KeyCode::Enter);
        assert_eq!(screen.form().unwrap().error(), Some("VPC ID is required"));
    }

    #[test]
    fn datacenter_edit_keeps_location_details_and_site() {
        let details = LocationDetails {
            location: "Frankfurt".into(),
            specifications: Some("Tier III".into()),
            notes: None,
        };
        let record = Infrastructure {
            id: "i7".into(),
            name: "fra-dc".into(),
            customer_id: "c1".into(),
            site_id: Some("s1".into()),
            description: None,
            is_active: true,
            kind: InfrastructureKind::Datacenter {
                details: Some(details.clone()),
                config: None,
            },
        };
        let mut screen = ListScreen::new(
            ScreenId::Datacenter,
            TypedInfra::new(InfraFlavor::Datacenter),
        );
        load(
            &mut screen,
            ViewData::TypedInfrastructure(TypedInfrastructureData {
                infrastructure: vec![record],
                customers: customers(),
                sites: vec![site("s1", "Acme - HQ", "c1")],
            }),
        );
        key(&mut screen, KeyCode::Char('e'));
        let Some(Action::Execute { command, .. }) = key(&mut screen, KeyCode::Enter) else {
            panic!("expected an execute action");
        };
        let Command::UpdateInfrastructure { id, request } = command else {
            panic!("expected an update command");
        };
        assert_eq!(id, "i7");
        assert_eq!(request.site_id.as_deref(), Some("s1"));
        assert_eq!(
            request.kind,
            InfrastructureKind::Datacenter {
                details: Some(details),
                config: None,
            }
        );
    }
}
