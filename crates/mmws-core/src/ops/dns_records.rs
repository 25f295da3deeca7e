//! DNS record operations
//!
//! Besides the common capability surface, records can be adopted by import
//! key (`server:view:fqdn:type`), see [`DnsRecords::import`].

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::DnsRecord;
use crate::ops::{created_reference, item_path, read_item, result_list, save_comment};
use crate::reference::{ImportKey, TargetRef, is_import_key};
use crate::traits::{Filter, ObjectOperations, QueryParams, Transport, expect_single};

const COLLECTION: &str = "DNSRecords";
const OBJ_TYPE: &str = "DNSRecord";

/// DNS record family
#[derive(Clone)]
pub struct DnsRecords {
    transport: Arc<dyn Transport>,
}

impl DnsRecords {
    /// Create the family on top of a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Records of one zone matching `filter`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /DNSZones/<server>:<view>:<zone>/DNSRecords?filter=name=www&type=A
    /// ```
    pub async fn find_in_zone(&self, target: &TargetRef, filter: &Filter) -> Result<Vec<DnsRecord>> {
        let path = format!("DNSZones/{target}/{COLLECTION}");
        let response = self
            .transport
            .get(&path, &QueryParams::new(), filter)
            .await?;
        result_list(response, "dnsRecords")
    }

    /// Adopt an existing record
    ///
    /// `key` is either an import key (`server:view:fqdn:type`), resolved by
    /// searching the zone for exactly one record with that name and type, or
    /// a plain reference, which is read directly.
    ///
    /// # Returns
    ///
    /// - `Err(Error::Format)` for a malformed import key
    /// - `Err(Error::NoMatch)` / `Err(Error::AmbiguousMatch)` unless exactly
    ///   one record is found
    pub async fn import(&self, key: &str) -> Result<DnsRecord> {
        if !is_import_key(key) {
            return self
                .read(key)
                .await?
                .ok_or_else(|| Error::no_match(self.kind()));
        }

        let key = ImportKey::decode(key)?;
        tracing::debug!(
            "Importing {} record {} from {}",
            key.record_type,
            key.fqdn(),
            key.target()
        );

        let mut filter = Filter::new();
        filter.insert("name".to_string(), key.name.clone());
        filter.insert("type".to_string(), key.record_type.clone());

        let found = self.find_in_zone(&key.target(), &filter).await?;
        expect_single(found, self.kind())
    }
}

#[async_trait]
impl ObjectOperations for DnsRecords {
    type Object = DnsRecord;

    fn kind(&self) -> &'static str {
        "DNS records"
    }

    /// # API Call
    ///
    /// ```http
    /// POST /DNSRecords
    /// {
    ///   "dnsRecords": [{ "dnsZoneRef": "<server>:<view>:<zone>", ... }],
    ///   "saveComment": "created by mmctl",
    ///   "forceOverrideOfNamingConflictCheck": false
    /// }
    /// ```
    async fn create(&self, record: &DnsRecord) -> Result<String> {
        let body = json!({
            "dnsRecords": [record],
            "saveComment": save_comment("created"),
            "forceOverrideOfNamingConflictCheck": false,
        });

        let response = self.transport.post(COLLECTION, &body).await?;
        let reference = created_reference(&response)?;

        tracing::info!(
            "Created {} record {} in {} as {}",
            record.record_type,
            record.name(),
            record.dns_zone_ref,
            reference
        );
        Ok(reference)
    }

    async fn read(&self, reference: &str) -> Result<Option<DnsRecord>> {
        read_item(
            self.transport.as_ref(),
            &item_path(COLLECTION, reference),
            "dnsRecord",
        )
        .await
    }

    /// Only the properties block is sent; type and zone are fixed at create.
    async fn update(&self, record: &DnsRecord, reference: &str) -> Result<()> {
        let body = json!({
            "ref": reference,
            "objType": COLLECTION,
            "saveComment": save_comment("updated"),
            "properties": record.properties,
        });

        self.transport
            .put(&item_path(COLLECTION, reference), &body)
            .await
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        self.transport
            .delete(&item_path(COLLECTION, reference), Some(OBJ_TYPE))
            .await?;
        tracing::info!("Deleted DNS record {}", reference);
        Ok(())
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<DnsRecord>> {
        let response = self
            .transport
            .get(COLLECTION, &QueryParams::new(), filter)
            .await?;
        result_list(response, "dnsRecords")
    }
}
