use super::{Draft, required};
use crate::error::CoreError;
use crate::model::{Address, Customer, CustomerRequest};

/// The four address sub-fields as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressDraft {
    pub street_address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl AddressDraft {
    pub fn from_address(address: Option<&Address>) -> Self {
        address.map_or_else(Self::default, |a| Self {
            street_address: a.street_address.clone(),
            city: a.city.clone(),
            postal_code: a.postal_code.clone(),
            country: a.country.clone(),
        })
    }

    pub fn is_blank(&self) -> bool {
        [
            &self.street_address,
            &self.city,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }

    /// `None` when every sub-field is blank. Otherwise all four are sent,
    /// unfilled ones as empty strings.
    pub fn to_address(&self) -> Option<Address> {
        if self.is_blank() {
            return None;
        }
        Some(Address {
            street_address: self.street_address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            postal_code: self.postal_code.trim().to_owned(),
            country: self.country.trim().to_owned(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: AddressDraft,
}

impl Draft for CustomerDraft {
    type Record = Customer;
    type Request = CustomerRequest;

    fn from_record(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            contact_email: customer.contact_email.clone(),
            contact_phone: customer.contact_phone.clone(),
            address: AddressDraft::from_address(customer.address.as_ref()),
        }
    }

    fn to_request(&self) -> Result<CustomerRequest, CoreError> {
        Ok(CustomerRequest {
            name: required(&self.name, "Name")?,
            contact_email: required(&self.contact_email, "Contact Email")?,
            contact_phone: required(&self.contact_phone, "Contact Phone")?,
            address: self.address.to_address(),
        })
    }
}
