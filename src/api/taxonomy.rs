use tracing::info;

use crate::client::{ClientError, HttpGateway};
use crate::models::{TaxonomyEntry, TaxonomyInput, TaxonomyKind};

/// CRUD over either `/api/resource-types` or `/api/resource-platforms`.
pub struct TaxonomyApi<'a> {
    gateway: &'a HttpGateway,
    kind: TaxonomyKind,
}

impl<'a> TaxonomyApi<'a> {
    pub fn new(gateway: &'a HttpGateway, kind: TaxonomyKind) -> Self {
        TaxonomyApi { gateway, kind }
    }

    pub fn kind(&self) -> TaxonomyKind {
        self.kind
    }

    pub async fn list(&self) -> Result<Vec<TaxonomyEntry>, ClientError> {
        self.gateway.get(self.kind.path()).await
    }

    pub async fn create(&self, name: &str) -> Result<TaxonomyEntry, ClientError> {
        self.gateway
            .post(self.kind.path(), &TaxonomyInput { name })
            .await
    }

    pub async fn rename(&self, id: i64, name: &str) -> Result<TaxonomyEntry, ClientError> {
        self.gateway
            .put(&self.kind.item_path(id), &TaxonomyInput { name })
            .await
    }

    /// The backend refuses to delete an entry that resources still use.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.gateway.delete(&self.kind.item_path(id)).await?;
        info!(
            event_name = "taxonomy.deleted",
            event_domain = "taxonomy",
            kind = self.kind.label(),
            id,
            "entry deleted"
        );
        Ok(())
    }
}
