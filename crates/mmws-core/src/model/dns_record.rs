// # DNS Record
//
// A record as the server stores it:
//
// ```json
// {
//   "ref": "DNSRecords/1024",
//   "dnsZoneRef": "DNSZones/12",
//   "type": "A",
//   "name": "www",
//   "ttl": "3600",
//   "data": "192.0.2.10",
//   "comment": "",
//   "aging": 0,
//   "enabled": true
// }
// ```
//
// On create, `dnsZoneRef` carries a target reference (`server:view:zone`)
// instead of a server-assigned zone reference. Updates send only the
// properties block (`DnsProperties`), never the type or zone.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::reference::TargetRef;

/// DNS record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Server-assigned reference (empty before create)
    #[serde(rename = "ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,

    /// Zone reference, or a target reference on create
    #[serde(default)]
    pub dns_zone_ref: String,

    /// Record type
    #[serde(rename = "type", default)]
    pub record_type: DnsRecordType,

    /// Mutable properties
    #[serde(flatten)]
    pub properties: DnsProperties,
}

impl DnsRecord {
    /// Create a record to be placed in the zone described by `target`
    pub fn new(
        target: &TargetRef,
        name: impl Into<String>,
        record_type: DnsRecordType,
        data: impl Into<String>,
    ) -> Self {
        Self {
            reference: String::new(),
            dns_zone_ref: target.to_string(),
            record_type,
            properties: DnsProperties {
                name: name.into(),
                data: data.into(),
                ..DnsProperties::default()
            },
        }
    }

    /// Set the time-to-live in seconds
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.properties.ttl = ttl.to_string();
        self
    }

    /// Set the comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.properties.comment = comment.into();
        self
    }

    /// Enable or disable the record
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.properties.enabled = enabled;
        self
    }

    /// Record name
    pub fn name(&self) -> &str {
        &self.properties.name
    }
}

/// Properties of a record that can change after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsProperties {
    /// Name relative to the zone
    #[serde(default)]
    pub name: String,

    /// Time-to-live in seconds as a decimal string; empty means server default
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "string_or_number"
    )]
    pub ttl: String,

    /// Record data
    #[serde(default)]
    pub data: String,

    /// Free-text comment
    #[serde(default)]
    pub comment: String,

    /// Aging timestamp in hours since 1601-01-01 UTC; 0 means static
    #[serde(default, skip_serializing_if = "is_zero")]
    pub aging: u32,

    /// Whether the record is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for DnsProperties {
    fn default() -> Self {
        Self {
            name: String::new(),
            ttl: String::new(),
            data: String::new(),
            comment: String::new(),
            aging: 0,
            enabled: default_enabled(),
        }
    }
}

impl DnsProperties {
    /// Time-to-live in seconds, if set
    pub fn ttl_secs(&self) -> Option<u32> {
        self.ttl.parse().ok()
    }

    /// Aging timestamp as a point in time, `None` for static records
    pub fn aging_time(&self) -> Option<DateTime<Utc>> {
        if self.aging == 0 {
            return None;
        }
        aging_epoch()?.checked_add_signed(TimeDelta::hours(i64::from(self.aging)))
    }

    /// Set the aging timestamp from a point in time (whole hours)
    ///
    /// Times before the aging epoch clear the timestamp.
    pub fn set_aging_time(&mut self, at: DateTime<Utc>) {
        self.aging = aging_epoch()
            .map(|epoch| (at - epoch).num_hours())
            .and_then(|hours| u32::try_from(hours).ok())
            .unwrap_or(0);
    }
}

/// Start of the aging clock, 1601-01-01T00:00:00Z
fn aging_epoch() -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(1601, 1, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
}

fn default_enabled() -> bool {
    true
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

// The server sends TTLs as strings, older versions as numbers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}

/// DNS record type
///
/// The named variants are the types records can be created with; parsing
/// user input ([`FromStr`]) accepts only those. Records read back from the
/// server may carry any other type, which is kept verbatim in
/// [`DnsRecordType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DnsRecordType {
    #[default]
    A,
    Aaaa,
    Cname,
    Dname,
    Dlv,
    Dnskey,
    Ds,
    Hinfo,
    Loc,
    Mx,
    Naptr,
    Ns,
    Nsec3param,
    Ptr,
    Rp,
    Soa,
    Spf,
    Srv,
    Sshfp,
    Tlsa,
    Txt,
    /// A type reported by the server outside the list above, e.g. `CAA`
    Other(String),
}

impl DnsRecordType {
    /// All types records can be created with
    pub const ALL: [DnsRecordType; 21] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Dname,
        Self::Dlv,
        Self::Dnskey,
        Self::Ds,
        Self::Hinfo,
        Self::Loc,
        Self::Mx,
        Self::Naptr,
        Self::Ns,
        Self::Nsec3param,
        Self::Ptr,
        Self::Rp,
        Self::Soa,
        Self::Spf,
        Self::Srv,
        Self::Sshfp,
        Self::Tlsa,
        Self::Txt,
    ];

    /// Wire name, e.g. `AAAA`
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Dname => "DNAME",
            Self::Dlv => "DLV",
            Self::Dnskey => "DNSKEY",
            Self::Ds => "DS",
            Self::Hinfo => "HINFO",
            Self::Loc => "LOC",
            Self::Mx => "MX",
            Self::Naptr => "NAPTR",
            Self::Ns => "NS",
            Self::Nsec3param => "NSEC3PARAM",
            Self::Ptr => "PTR",
            Self::Rp => "RP",
            Self::Soa => "SOA",
            Self::Spf => "SPF",
            Self::Srv => "SRV",
            Self::Sshfp => "SSHFP",
            Self::Tlsa => "TLSA",
            Self::Txt => "TXT",
            Self::Other(name) => name,
        }
    }

    /// Whether records of this type can be created
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Map a wire name to a type, keeping unknown names as [`Self::Other`]
    fn from_wire(name: &str) -> Self {
        Self::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .cloned()
            .unwrap_or_else(|| Self::Other(name.to_string()))
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DnsRecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match Self::from_wire(s) {
            Self::Other(_) => Err(Error::format(format!("Unsupported DNS record type: {s}"))),
            known => Ok(known),
        }
    }
}

impl Serialize for DnsRecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DnsRecordType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&name))
    }
}
