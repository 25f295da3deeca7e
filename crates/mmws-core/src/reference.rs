//! Composite references for scoped objects
//!
//! DNS records are addressed by human-readable coordinates joined with
//! [`DELIMITER`]:
//!
//! - *target* form `server:view:zone` tells the server where a new record
//!   goes (it is sent as the record's `dnsZoneRef`);
//! - *import* form `server:view:fqdn:type` lets a caller adopt an existing
//!   record.
//!
//! The view may be empty; it is kept as an empty segment so the arity of a
//! reference never changes. Nothing here checks that the object exists.

use std::fmt;

use crate::error::{Error, Result};

/// Segment delimiter
pub const DELIMITER: char = ':';

/// Number of segments in a target reference
const TARGET_SEGMENTS: usize = 3;

/// Number of segments in an import key
const IMPORT_SEGMENTS: usize = 4;

/// Join server, view and zone into a target reference
///
/// ```
/// use mmws_core::reference::encode_target;
///
/// assert_eq!(
///     encode_target("dns1.example.com.", "", "example.com."),
///     "dns1.example.com.::example.com."
/// );
/// ```
pub fn encode_target(server: &str, view: &str, zone: &str) -> String {
    format!("{server}{DELIMITER}{view}{DELIMITER}{zone}")
}

/// Shorthand for [`TargetRef::decode`]
pub fn decode_target(s: &str) -> Result<TargetRef> {
    TargetRef::decode(s)
}

/// Split a name such as `www.example.com.` at its first `.`
///
/// Returns `None` when there is no `.`.
pub fn split_fqdn(fqdn: &str) -> Option<(&str, &str)> {
    fqdn.split_once('.')
}

/// Location of a zone on a specific server and view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetRef {
    /// DNS server FQDN
    pub server: String,
    /// View name, possibly empty
    pub view: String,
    /// Zone FQDN
    pub zone: String,
}

impl TargetRef {
    /// Create a target reference
    pub fn new(server: impl Into<String>, view: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            view: view.into(),
            zone: zone.into(),
        }
    }

    /// Parse a `server:view:zone` string
    pub fn decode(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(DELIMITER).collect();
        if parts.len() != TARGET_SEGMENTS {
            return Err(Error::format(format!(
                "{s}: expected server{DELIMITER}view{DELIMITER}zone, got {} segment(s)",
                parts.len()
            )));
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_target(&self.server, &self.view, &self.zone))
    }
}

/// Human-readable coordinates of an existing DNS record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportKey {
    /// DNS server FQDN
    pub server: String,
    /// View name, possibly empty
    pub view: String,
    /// Record name relative to `zone`
    pub name: String,
    /// Zone FQDN (everything after the first `.` of the record FQDN)
    pub zone: String,
    /// Record type, e.g. `A`
    pub record_type: String,
}

impl ImportKey {
    /// Parse a `server:view:fqdn:type` string
    ///
    /// ```
    /// use mmws_core::reference::ImportKey;
    ///
    /// let key = ImportKey::decode("dns1.example.com.::www.example.com.:A").unwrap();
    /// assert_eq!(key.name, "www");
    /// assert_eq!(key.zone, "example.com.");
    /// assert_eq!(key.view, "");
    /// ```
    pub fn decode(key: &str) -> Result<Self> {
        let parts: Vec<&str> = key.split(DELIMITER).collect();
        if parts.len() != IMPORT_SEGMENTS {
            return Err(Error::format(format!(
                "{key}: expected server{DELIMITER}view{DELIMITER}fqdn{DELIMITER}type, got {} segment(s)",
                parts.len()
            )));
        }

        let (name, zone) = split_fqdn(parts[2])
            .ok_or_else(|| Error::format(format!("Could not parse FQDN {}", parts[2])))?;

        Ok(Self {
            server: parts[0].to_string(),
            view: parts[1].to_string(),
            name: name.to_string(),
            zone: zone.to_string(),
            record_type: parts[3].to_string(),
        })
    }

    /// Record FQDN, `name.zone`
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.name, self.zone)
    }

    /// Target reference of the zone holding the record
    pub fn target(&self) -> TargetRef {
        TargetRef::new(&self.server, &self.view, &self.zone)
    }
}

impl fmt::Display for ImportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            self.server,
            self.view,
            self.fqdn(),
            self.record_type
        )
    }
}

/// Whether a string looks like an import key rather than a server reference
pub fn is_import_key(s: &str) -> bool {
    s.split(DELIMITER).count() == IMPORT_SEGMENTS
}

/// Shorthand for [`ImportKey::decode`]
pub fn decode_import_key(key: &str) -> Result<ImportKey> {
    ImportKey::decode(key)
}
