//! Customer sites. Stored names carry the customer prefix; forms edit the
//! bare name and preview the composed one.

use ratatui::layout::Constraint;
use ratatui::text::Line;
use ratatui::widgets::Cell;

use assetdesk_core::draft::compose_site_name;
use assetdesk_core::{
    Command, CommandResult, Customer, NameIndex, Record, SearchQuery, Site, SiteDraft,
    SiteRequest,
};

use super::list::Resource;
use super::{address_fields, customer_options, format_address, read_address};
use crate::action::ViewData;
use crate::theme;
use crate::widgets::form::{Field, Form};
use crate::widgets::panel::{detail_row, detail_row_styled, or_dash, section};

#[derive(Default)]
pub struct Sites {
    customers: Vec<Customer>,
    names: NameIndex,
}

impl Resource for Sites {
    type Draft = SiteDraft;

    fn title(&self) -> &'static str {
        "Sites"
    }

    fn noun(&self) -> &'static str {
        "Site"
    }

    fn ingest(&mut self, data: ViewData) -> Option<Vec<Site>> {
        let ViewData::Sites(data) = data else {
            return None;
        };
        self.names = NameIndex::new(&data.customers, &data.sites, std::iter::empty());
        self.customers = data.customers;
        Some(data.sites)
    }

    fn matches(&self, query: &SearchQuery, site: &Site) -> bool {
        query.site(site, &self.names)
    }

    fn columns(&self) -> Vec<(&'static str, Constraint)> {
        vec![
            ("Name", Constraint::Fill(3)),
            ("Customer", Constraint::Fill(2)),
            ("Address", Constraint::Fill(3)),
            ("Primary", Constraint::Length(9)),
        ]
    }

    fn row(&self, site: &Site) -> Vec<Cell<'static>> {
        let primary = if site.is_primary {
            Cell::from("★ Yes").style(theme::active_flag(true))
        } else {
            Cell::from("")
        };
        vec![
            Cell::from(self.names.customer_name(&site.customer_id).to_owned()),
            Cell::from(format_address(site.address.as_ref())),
            primary,
        ]
    }

    fn detail(&self, site: &Site) -> Vec<Line<'static>> {
        let address = format_address(site.address.as_ref());
        let mut lines = Vec::new();
        lines.extend(section("Site"));
        lines.push(detail_row(
            "Customer",
            self.names.customer_name(&site.customer_id),
        ));
        lines.push(detail_row_styled(
            "Primary",
            if site.is_primary { "Yes" } else { "No" },
            theme::active_flag(site.is_primary),
        ));
        lines.push(detail_row("Address", or_dash(Some(address.as_str()))));
        lines.push(detail_row("Notes", or_dash(site.notes.as_deref())));
        lines
    }

    fn blank(&self) -> SiteDraft {
        SiteDraft::default()
    }

    fn edit_draft(&self, site: &Site) -> SiteDraft {
        SiteDraft::from_site(site, self.names.find_customer(&site.customer_id))
    }

    fn form(&self, title: String, draft: &SiteDraft) -> Form {
        let mut fields = vec![
            Field::select("customer_id", "Customer", customer_options(&self.customers))
                .required()
                .with_value(&draft.customer_id),
            Field::text("name", "Site Name").required().with_value(&draft.name),
        ];
        fields.extend(address_fields(&draft.address));
        fields.push(Field::toggle("is_primary", "Primary Site").with_checked(draft.is_primary));
        fields.push(Field::text("notes", "Notes").with_value(&draft.notes));
        Form::new(title, fields)
    }

    fn read(&self, form: &Form, _base: &SiteDraft) -> SiteDraft {
        SiteDraft {
            customer_id: form.value("customer_id").to_owned(),
            name: form.value("name").to_owned(),
            address: read_address(form),
            is_primary: form.checked("is_primary"),
            notes: form.value("notes").to_owned(),
        }
    }

    /// Refresh the customer list and the stored-name preview.
    fn sync(&self, form: &mut Form) {
        form.set_options("customer_id", customer_options(&self.customers));
        let preview = self
            .names
            .find_customer(form.value("customer_id"))
            .map(|customer| {
                format!(
                    "Saved as: {}",
                    compose_site_name(customer, form.value("name"))
                )
            });
        form.set_note(preview);
    }

    fn create(&self, request: SiteRequest) -> Command {
        Command::CreateSite(request)
    }

    fn update(&self, id: String, request: SiteRequest) -> Command {
        Command::UpdateSite { id, request }
    }

    fn delete(&self, site: &Site) -> Command {
        Command::DeleteSite {
            id: site.id().to_owned(),
        }
    }

    fn delete_prompt(&self) -> String {
        "Delete this site?".into()
    }

    fn take(&self, result: CommandResult) -> Option<Site> {
        match result {
            CommandResult::Site(site) => Some(site),
            _ => None,
        }
    }
}
