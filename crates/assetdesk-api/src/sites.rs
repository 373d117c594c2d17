// Site endpoints: `/sites`.

use crate::types::{DeleteResponse, Site, SiteRequest};
use crate::{ApiClient, Error};

impl ApiClient {
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        self.get("sites").await
    }

    /// Sites owned by one customer (`?customer_id=`).
    pub async fn list_sites_for_customer(&self, customer_id: &str) -> Result<Vec<Site>, Error> {
        self.get_with_params("sites", &[("customer_id", customer_id.to_owned())])
            .await
    }

    pub async fn create_site(&self, body: &SiteRequest) -> Result<Site, Error> {
        self.post("sites", body).await
    }

    pub async fn update_site(&self, id: &str, body: &SiteRequest) -> Result<Site, Error> {
        self.put(&format!("sites/{id}"), body).await
    }

    pub async fn delete_site(&self, id: &str) -> Result<DeleteResponse, Error> {
        self.delete(&format!("sites/{id}")).await
    }
}
