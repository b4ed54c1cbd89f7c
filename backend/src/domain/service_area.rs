//! Named localities the business serves.
//!
//! Service areas drive the `/service-area/{slug}` landing pages and act as the
//! fallback target when a hostname has no explicit mapping.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slugify;

/// Identifier of a service area record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceAreaId(Uuid);

impl ServiceAreaId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its hyphenated string form.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(Self)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ServiceAreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named service area.
///
/// ## Invariants
/// - At most one record in the directory should set `is_main_address`. The
///   directory does not enforce this; writers are responsible for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceArea {
    /// Record identifier.
    pub id: ServiceAreaId,
    /// Place name, e.g. "Collingwood".
    pub name: String,
    /// Marks the organisation's primary address; never matched by hostname.
    pub is_main_address: bool,
    /// Optional postal address used by map previews.
    pub address: Option<String>,
}

impl ServiceArea {
    /// Landing page path for this area, `/service-area/{slug}`.
    pub fn landing_path(&self) -> String {
        format!("/service-area/{}", slugify(&self.name))
    }

    /// Whether the name contains `fragment`, ignoring case.
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(&fragment.to_lowercase())
    }
}
