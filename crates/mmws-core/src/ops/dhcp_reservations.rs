//! DHCP reservation operations
//!
//! Reservations are created under their owner (`<ownerRef>/DHCPReservations`)
//! and read back by name or reference.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::DhcpReservation;
use crate::ops::{created_reference, item_path, read_item, result_list, save_comment};
use crate::traits::{Filter, ObjectOperations, QueryParams, Transport};

const COLLECTION: &str = "DHCPReservations";
const OBJ_TYPE: &str = "DHCPReservation";

/// DHCP reservation family
#[derive(Clone)]
pub struct DhcpReservations {
    transport: Arc<dyn Transport>,
}

impl DhcpReservations {
    /// Create the family on top of a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ObjectOperations for DhcpReservations {
    type Object = DhcpReservation;

    fn kind(&self) -> &'static str {
        "DHCP reservations"
    }

    async fn create(&self, reservation: &DhcpReservation) -> Result<String> {
        if reservation.owner_ref.is_empty() {
            return Err(Error::format(format!(
                "DHCP reservation {} has no owner reference",
                reservation.name
            )));
        }

        let body = json!({
            "dhcpReservation": reservation,
            "saveComment": save_comment("created"),
        });

        let path = format!("{}/{COLLECTION}", reservation.owner_ref);
        let response = self.transport.post(&path, &body).await?;
        let reference = created_reference(&response)?;
        tracing::info!(
            "Created DHCP reservation {} under {} as {}",
            reservation.name,
            reservation.owner_ref,
            reference
        );
        Ok(reference)
    }

    async fn read(&self, reference: &str) -> Result<Option<DhcpReservation>> {
        read_item(
            self.transport.as_ref(),
            &item_path(COLLECTION, reference),
            "dhcpReservation",
        )
        .await
    }

    async fn update(&self, reservation: &DhcpReservation, reference: &str) -> Result<()> {
        let body = json!({
            "ref": reference,
            "objType": COLLECTION,
            "saveComment": save_comment("updated"),
            "properties": reservation,
        });

        self.transport
            .put(&item_path(COLLECTION, reference), &body)
            .await
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        self.transport
            .delete(&item_path(COLLECTION, reference), Some(OBJ_TYPE))
            .await?;
        tracing::info!("Deleted DHCP reservation {}", reference);
        Ok(())
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<DhcpReservation>> {
        let response = self
            .transport
            .get(COLLECTION, &QueryParams::new(), filter)
            .await?;
        result_list(response, "dhcpReservations")
    }
}
