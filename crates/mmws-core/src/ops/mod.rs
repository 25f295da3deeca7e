//! Object operations per family
//!
//! Each family wraps an `Arc<dyn Transport>` and implements
//! [`ObjectOperations`](crate::traits::ObjectOperations):
//!
//! | Family | Collection | Read envelope | Find envelope |
//! |--------|------------|---------------|---------------|
//! | [`DnsRecords`] | `DNSRecords` | `result.dnsRecord` | `result.dnsRecords` |
//! | [`DnsZones`] | `DNSZones` | `result.dnsZone` | `result.dnsZones` |
//! | [`DhcpReservations`] | `DHCPReservations` | `result.dhcpReservation` | `result.dhcpReservations` |

pub mod dhcp_reservations;
pub mod dns_records;
pub mod dns_zones;

pub use dhcp_reservations::DhcpReservations;
pub use dns_records::DnsRecords;
pub use dns_zones::DnsZones;

use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

use crate::config::SAVE_COMMENT_TAG;
use crate::error::{Error, Result};
use crate::traits::{Filter, QueryParams, Transport};

/// Path of an item: server references (`DNSZones/12`) are used as-is,
/// bare ids and names are placed under `collection`
pub(crate) fn item_path(collection: &str, reference: &str) -> String {
    if reference.contains('/') {
        reference.to_string()
    } else {
        format!("{collection}/{reference}")
    }
}

/// Audit comment for a write, e.g. "created by mmctl"
pub(crate) fn save_comment(action: &str) -> String {
    format!("{action} by {SAVE_COMMENT_TAG}")
}

/// Deserialize `result.<field>` of a success envelope
pub(crate) fn result_field<T: DeserializeOwned>(mut response: Value, field: &str) -> Result<T> {
    match response
        .get_mut("result")
        .and_then(|result| result.get_mut(field))
        .map(Value::take)
    {
        Some(value) if !value.is_null() => Ok(serde_json::from_value(value)?),
        _ => Err(serde_json::Error::custom(format!("response is missing result.{field}")).into()),
    }
}

/// Deserialize the list at `result.<field>`; a missing list is empty
pub(crate) fn result_list<T: DeserializeOwned>(mut response: Value, field: &str) -> Result<Vec<T>> {
    match response
        .get_mut("result")
        .and_then(|result| result.get_mut(field))
        .map(Value::take)
    {
        Some(value) if !value.is_null() => Ok(serde_json::from_value(value)?),
        _ => Ok(Vec::new()),
    }
}

/// Reference assigned by a create call
///
/// Accepts `result.ref` and, for bulk endpoints, the first of `result.objRefs`.
/// A bulk create that assigned nothing reports why in `result.errors`; those
/// messages come back as [`Error::Rejected`].
pub(crate) fn created_reference(response: &Value) -> Result<String> {
    let result = response.get("result");

    let reference = result
        .and_then(|r| r.get("ref"))
        .and_then(Value::as_str)
        .or_else(|| {
            result
                .and_then(|r| r.get("objRefs"))
                .and_then(Value::as_array)
                .and_then(|refs| refs.first())
                .and_then(Value::as_str)
        });

    if let Some(reference) = reference {
        return Ok(reference.to_string());
    }

    let messages: Vec<&str> = result
        .and_then(|r| r.get("errors"))
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str).or_else(|| e.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if messages.is_empty() {
        Err(serde_json::Error::custom("response carries no object reference").into())
    } else {
        Err(Error::rejected(messages.join("; ")))
    }
}

/// GET an item and map the server's not-found code to `None`
pub(crate) async fn read_item<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
    field: &str,
) -> Result<Option<T>> {
    match transport
        .get(path, &QueryParams::new(), &Filter::new())
        .await
    {
        Ok(response) => result_field(response, field).map(Some),
        Err(e) if e.is_not_found() => {
            tracing::debug!("{} no longer exists", path);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
