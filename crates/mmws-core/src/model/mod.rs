//! Domain objects managed through the API
//!
//! - [`DnsRecord`]: a record inside a zone, scoped by a target reference
//! - [`DnsZone`]: an authoritative zone on a DNS server
//! - [`DhcpReservation`]: a reservation owned by a DHCP server, scope or group
//!
//! Field names follow the server's camelCase JSON; the server-assigned
//! reference is exposed as `reference` (wire name `ref`).

pub mod dhcp_reservation;
pub mod dns_record;
pub mod dns_zone;

pub use dhcp_reservation::DhcpReservation;
pub use dns_record::{DnsProperties, DnsRecord, DnsRecordType};
pub use dns_zone::DnsZone;
