//! Customers: name, contact details and an optional postal address.

use ratatui::layout::Constraint;
use ratatui::text::Line;
use ratatui::widgets::Cell;

use assetdesk_core::{
    Command, CommandResult, Customer, CustomerDraft, CustomerRequest, Record, SearchQuery,
};

use super::list::Resource;
use super::{address_fields, format_address, read_address};
use crate::action::ViewData;
use crate::widgets::form::{Field, Form};
use crate::widgets::panel::{detail_row, or_dash, section};

pub struct Customers;

impl Resource for Customers {
    type Draft = CustomerDraft;

    fn title(&self) -> &'static str {
        "Customers"
    }

    fn noun(&self) -> &'static str {
        "Customer"
    }

    fn ingest(&mut self, data: ViewData) -> Option<Vec<Customer>> {
        match data {
            ViewData::Customers(data) => Some(data.customers),
            _ => None,
        }
    }

    fn matches(&self, query: &SearchQuery, customer: &Customer) -> bool {
        query.customer(customer)
    }

    fn columns(&self) -> Vec<(&'static str, Constraint)> {
        vec![
            ("Name", Constraint::Fill(2)),
            ("Email", Constraint::Fill(2)),
            ("Phone", Constraint::Length(16)),
            ("Address", Constraint::Fill(3)),
        ]
    }

    fn row(&self, customer: &Customer) -> Vec<Cell<'static>> {
        vec![
            Cell::from(customer.contact_email.clone()),
            Cell::from(customer.contact_phone.clone()),
            Cell::from(format_address(customer.address.as_ref())),
        ]
    }

    fn detail(&self, customer: &Customer) -> Vec<Line<'static>> {
        let address = format_address(customer.address.as_ref());
        let mut lines = Vec::new();
        lines.extend(section("Contact"));
        lines.push(detail_row("Email", customer.contact_email.clone()));
        lines.push(detail_row("Phone", customer.contact_phone.clone()));
        lines.push(Line::from(""));
        lines.extend(section("Address"));
        lines.push(detail_row("Address", or_dash(Some(address.as_str()))));
        lines
    }

    fn blank(&self) -> CustomerDraft {
        CustomerDraft::default()
    }

    fn form(&self, title: String, draft: &CustomerDraft) -> Form {
        let mut fields = vec![
            Field::text("name", "Name").required().with_value(&draft.name),
            Field::text("contact_email", "Contact Email")
                .required()
                .with_value(&draft.contact_email),
            Field::text("contact_phone", "Contact Phone")
                .required()
                .with_value(&draft.contact_phone),
        ];
        fields.extend(address_fields(&draft.address));
        Form::new(title, fields)
    }

    fn read(&self, form: &Form, _base: &CustomerDraft) -> CustomerDraft {
        CustomerDraft {
            name: form.value("name").to_owned(),
            contact_email: form.value("contact_email").to_owned(),
            contact_phone: form.value("contact_phone").to_owned(),
            address: read_address(form),
        }
    }

    fn create(&self, request: CustomerRequest) -> Command {
        Command::CreateCustomer(request)
    }

    fn update(&self, id: String, request: CustomerRequest) -> Command {
        Command::UpdateCustomer { id, request }
    }

    fn delete(&self, customer: &Customer) -> Command {
        Command::DeleteCustomer {
            id: customer.id().to_owned(),
        }
    }

    fn delete_prompt(&self) -> String {
        "Delete this customer?".into()
    }

    fn take(&self, result: CommandResult) -> Option<Customer> {
        match result {
            CommandResult::Customer(customer) => Some(customer),
            _ => None,
        }
    }
}
