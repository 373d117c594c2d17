// Asset endpoints: `/assets`.

use crate::types::{Asset, AssetRequest, AssetType, DeleteResponse};
use crate::{ApiClient, Error};

impl ApiClient {
    pub async fn list_assets(&self) -> Result<Vec<Asset>, Error> {
        self.get("assets").await
    }

    /// Assets of one discriminant (`?asset_type=`).
    pub async fn list_assets_by_type(&self, asset_type: AssetType) -> Result<Vec<Asset>, Error> {
        self.get_with_params("assets", &[("asset_type", asset_type.to_string())])
            .await
    }

    pub async fn get_asset(&self, id: &str) -> Result<Asset, Error> {
        self.get(&format!("assets/{id}")).await
    }

    /// Hardware assets placed at one site.
    pub async fn list_assets_for_site(&self, site_id: &str) -> Result<Vec<Asset>, Error> {
        self.get(&format!("assets/site/{site_id}")).await
    }

    pub async fn create_asset(&self, body: &AssetRequest) -> Result<Asset, Error> {
        self.post("assets", body).await
    }

    pub async fn update_asset(&self, id: &str, body: &AssetRequest) -> Result<Asset, Error> {
        self.put(&format!("assets/{id}"), body).await
    }

    pub async fn delete_asset(&self, id: &str) -> Result<DeleteResponse, Error> {
        self.delete(&format!("assets/{id}")).await
    }
}
