//! DNS zone operations

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::error::Result;
use crate::model::DnsZone;
use crate::ops::{created_reference, item_path, read_item, result_list, save_comment};
use crate::traits::{Filter, ObjectOperations, QueryParams, Transport};

const COLLECTION: &str = "DNSZones";
const OBJ_TYPE: &str = "DNSZone";

/// DNS zone family
#[derive(Clone)]
pub struct DnsZones {
    transport: Arc<dyn Transport>,
}

impl DnsZones {
    /// Create the family on top of a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// The single zone called `name` on `authority`
    pub async fn find_by_name(&self, name: &str, authority: &str) -> Result<DnsZone> {
        let mut filter = Filter::new();
        filter.insert("name".to_string(), name.to_string());
        filter.insert("authority".to_string(), authority.to_string());
        self.find_one(&filter).await
    }
}

#[async_trait]
impl ObjectOperations for DnsZones {
    type Object = DnsZone;

    fn kind(&self) -> &'static str {
        "DNS zones"
    }

    async fn create(&self, zone: &DnsZone) -> Result<String> {
        let body = json!({
            "dnsZone": zone,
            "saveComment": save_comment("created"),
        });

        let response = self.transport.post(COLLECTION, &body).await?;
        let reference = created_reference(&response)?;
        tracing::info!("Created DNS zone {} as {}", zone.name, reference);
        Ok(reference)
    }

    async fn read(&self, reference: &str) -> Result<Option<DnsZone>> {
        read_item(
            self.transport.as_ref(),
            &item_path(COLLECTION, reference),
            "dnsZone",
        )
        .await
    }

    async fn update(&self, zone: &DnsZone, reference: &str) -> Result<()> {
        let body = json!({
            "ref": reference,
            "objType": COLLECTION,
            "saveComment": save_comment("updated"),
            "properties": zone,
        });

        self.transport
            .put(&item_path(COLLECTION, reference), &body)
            .await
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        self.transport
            .delete(&item_path(COLLECTION, reference), Some(OBJ_TYPE))
            .await?;
        tracing::info!("Deleted DNS zone {}", reference);
        Ok(())
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<DnsZone>> {
        let response = self
            .transport
            .get(COLLECTION, &QueryParams::new(), filter)
            .await?;
        result_list(response, "dnsZones")
    }
}
