// # mmws-core
//
// Core library for talking to a Micetro server over its REST API.
//
// ## Architecture Overview
//
// - **Transport**: Trait for authenticated HTTP access to `/mmws/api`
//   (implemented by `mmws-client`)
// - **classify**: Turns a failed HTTP exchange into a `RequestError`
// - **reference**: Codec for composite references (`server:view:zone` and
//   `server:view:fqdn:type`)
// - **ObjectOperations**: Create/read/update/delete/find per object family
// - **ops**: DNS records, DNS zones and DHCP reservations on top of a Transport
//
// ## Design Principles
//
// 1. **Transport-agnostic**: Object operations only see the `Transport` trait
// 2. **Absent is not an error**: Reads map the server's not-found code to `None`
// 3. **Exactly one**: Single-object lookups fail on zero and on several matches
// 4. **Library-First**: The `mmctl` binary is a thin shell over this crate

pub mod classify;
pub mod config;
pub mod error;
pub mod log_sanitizer;
pub mod model;
pub mod ops;
pub mod reference;
pub mod traits;

// Re-export core types for convenience
pub use config::{ConnectionConfig, RetryPolicy};
pub use error::{Error, RequestError, Result};
pub use model::{DhcpReservation, DnsProperties, DnsRecord, DnsRecordType, DnsZone};
pub use ops::{DhcpReservations, DnsRecords, DnsZones};
pub use reference::{ImportKey, TargetRef};
pub use traits::{Filter, ObjectOperations, QueryParams, Transport};
