//! DHCP reservation
//!
//! Reservations live under an owner (DHCP server, scope or group) whose
//! reference is kept in `owner_ref`. Several fields only apply to one kind
//! of DHCP server; they come back empty for the others.

use serde::{Deserialize, Serialize};

/// DHCP reservation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DhcpReservation {
    /// Server-assigned reference
    #[serde(rename = "ref", skip_serializing_if = "String::is_empty")]
    pub reference: String,

    /// Reservation name
    pub name: String,

    /// `DHCP`, `BOOTP` or `BOTH`
    #[serde(rename = "type")]
    pub reservation_type: String,

    /// Description (MS DHCP only)
    pub description: String,

    /// Client identifier, usually a MAC address
    pub client_identifier: String,

    /// `HardwareAddress` or `ClientIdentifier`
    pub reservation_method: String,

    /// Reserved IP addresses
    pub addresses: Vec<String>,

    /// Dynamic DNS host name (ISC DHCP only)
    pub ddns_host_name: String,

    /// `filename` option (ISC DHCP only)
    pub filename: String,

    /// `server-name` option (ISC DHCP only)
    pub server_name: String,

    /// `next-server` option (ISC DHCP only)
    pub next_server: String,

    /// Reference of the owning DHCP server, scope or group
    pub owner_ref: String,
}
