// Infrastructure endpoints: `/infrastructure` and the hosted-VM listing.

use crate::types::{
    Asset, DeleteResponse, Infrastructure, InfrastructureFilter, InfrastructureRequest,
};
use crate::{ApiClient, Error};

impl ApiClient {
    /// List infrastructure, narrowed by any filters that are set.
    pub async fn list_infrastructure(
        &self,
        filter: &InfrastructureFilter,
    ) -> Result<Vec<Infrastructure>, Error> {
        let params = filter.to_params();
        if params.is_empty() {
            self.get("infrastructure").await
        } else {
            self.get_with_params("infrastructure", &params).await
        }
    }

    pub async fn create_infrastructure(
        &self,
        body: &InfrastructureRequest,
    ) -> Result<Infrastructure, Error> {
        self.post("infrastructure", body).await
    }

    pub async fn update_infrastructure(
        &self,
        id: &str,
        body: &InfrastructureRequest,
    ) -> Result<Infrastructure, Error> {
        self.put(&format!("infrastructure/{id}"), body).await
    }

    pub async fn delete_infrastructure(&self, id: &str) -> Result<DeleteResponse, Error> {
        self.delete(&format!("infrastructure/{id}")).await
    }

    /// VMs whose `infrastructure_location_id` points at this record.
    pub async fn list_hosted_vms(&self, id: &str) -> Result<Vec<Asset>, Error> {
        self.get(&format!("infrastructure/{id}/vms")).await
    }
}
