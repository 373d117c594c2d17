// Customer endpoints: `/customers`.

use crate::types::{Customer, CustomerRequest, DeleteResponse};
use crate::{ApiClient, Error};

impl ApiClient {
    pub async fn list_customers(&self) -> Result<Vec<Customer>, Error> {
        self.get("customers").await
    }

    pub async fn get_customer(&self, id: &str) -> Result<Customer, Error> {
        self.get(&format!("customers/{id}")).await
    }

    /// Create a customer. The backend also creates its `"{name} - Main Site"`.
    pub async fn create_customer(&self, body: &CustomerRequest) -> Result<Customer, Error> {
        self.post("customers", body).await
    }

    pub async fn update_customer(
        &self,
        id: &str,
        body: &CustomerRequest,
    ) -> Result<Customer, Error> {
        self.put(&format!("customers/{id}"), body).await
    }

    pub async fn delete_customer(&self, id: &str) -> Result<DeleteResponse, Error> {
        self.delete(&format!("customers/{id}")).await
    }
}
