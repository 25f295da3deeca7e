//! DNS zone as returned by `GET DNSZones`

use serde::{Deserialize, Serialize};

/// DNS zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DnsZone {
    /// Server-assigned reference
    #[serde(rename = "ref", skip_serializing_if = "String::is_empty")]
    pub reference: String,

    /// Zone FQDN
    pub name: String,

    /// Whether the zone accepts dynamic updates
    pub dynamic: bool,

    /// Whether the zone is Active Directory integrated
    pub ad_integrated: bool,

    /// Reference of the view holding the zone
    pub dns_view_ref: String,

    /// References of all views holding the zone
    pub dns_view_refs: Vec<String>,

    /// Authoritative server
    pub authority: String,

    /// Zone type, e.g. `Master`
    #[serde(rename = "type")]
    pub zone_type: String,

    /// Whether the zone is DNSSEC signed
    pub dnssec_signed: bool,

    /// Key-signing key IDs
    #[serde(rename = "kskIDs")]
    pub ksk_ids: String,

    /// Zone-signing key IDs
    #[serde(rename = "zskIDs")]
    pub zsk_ids: String,

    /// Creation timestamp as reported by the server
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created: String,

    /// Last modification timestamp as reported by the server
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_modified: String,

    /// Display name
    pub display_name: String,
}

impl DnsZone {
    /// Create a zone to be placed on `authority`
    pub fn new(name: impl Into<String>, authority: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authority: authority.into(),
            ..Self::default()
        }
    }
}
