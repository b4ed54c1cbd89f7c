//! Explicit hostname-to-path redirect rules maintained by site operators.
//!
//! A [`DomainMapping`] says "when the site is loaded from `domain`, send the
//! visitor to `redirect_to`". Mappings may point at a service area for display
//! purposes; that link never influences resolution.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ServiceAreaId;

/// Validation failures raised while building a [`DomainMappingDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainMappingValidationError {
    /// The domain was missing or blank.
    #[error("domain must not be empty")]
    EmptyDomain,
    /// The domain carried a scheme, path, or whitespace.
    #[error("domain must be a bare hostname such as example.com")]
    InvalidDomain,
    /// The redirect path was missing or blank.
    #[error("redirect path must not be empty")]
    EmptyRedirect,
    /// The redirect path did not start with `/`.
    #[error("redirect path must start with '/'")]
    RelativeRedirect,
    /// The service area reference was not a UUID.
    #[error("service area id must be a valid UUID")]
    InvalidServiceAreaId,
}

impl DomainMappingValidationError {
    /// Name of the form field the failure belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyDomain | Self::InvalidDomain => "domain",
            Self::EmptyRedirect | Self::RelativeRedirect => "redirectTo",
            Self::InvalidServiceAreaId => "serviceAreaId",
        }
    }

    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyDomain | Self::EmptyRedirect => "missing_field",
            Self::InvalidDomain => "invalid_domain",
            Self::RelativeRedirect => "relative_path",
            Self::InvalidServiceAreaId => "invalid_uuid",
        }
    }
}

/// Store-assigned identifier of a domain mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainMappingId(Uuid);

impl DomainMappingId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DomainMappingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Bare hostname a mapping applies to, e.g. `collingwoodplumbing.com`.
///
/// Surrounding whitespace is trimmed. Case is preserved because lookups are
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Validate and construct a [`DomainName`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainMappingValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainMappingValidationError::EmptyDomain);
        }
        if trimmed.contains("://")
            || trimmed.contains('/')
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(DomainMappingValidationError::InvalidDomain);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DomainName {
    type Error = DomainMappingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Internal site path a visitor is sent to. Always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RedirectPath(String);

impl RedirectPath {
    /// Validate and construct a [`RedirectPath`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainMappingValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainMappingValidationError::EmptyRedirect);
        }
        if !trimmed.starts_with('/') {
            return Err(DomainMappingValidationError::RelativeRedirect);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RedirectPath {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RedirectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RedirectPath> for String {
    fn from(value: RedirectPath) -> Self {
        value.0
    }
}

impl TryFrom<String> for RedirectPath {
    type Error = DomainMappingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted hostname redirect rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMapping {
    /// Store-assigned identifier.
    pub id: DomainMappingId,
    /// Hostname the rule applies to.
    pub domain: DomainName,
    /// Path the visitor is redirected to.
    pub redirect_to: RedirectPath,
    /// Optional display link to a service area.
    pub service_area_id: Option<ServiceAreaId>,
    /// Creation timestamp; earlier records win when domains collide.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated create/update payload for a domain mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMappingDraft {
    /// Hostname the rule applies to.
    pub domain: DomainName,
    /// Path the visitor is redirected to.
    pub redirect_to: RedirectPath,
    /// Optional display link to a service area.
    pub service_area_id: Option<ServiceAreaId>,
}

impl DomainMappingDraft {
    /// Build a draft from raw form values.
    ///
    /// An empty or blank `service_area_id` is treated as "no service area".
    ///
    /// # Examples
    /// ```
    /// use site_backend::domain::DomainMappingDraft;
    ///
    /// let draft = DomainMappingDraft::parse("test.com", "/service-area/test", Some(""))
    ///     .expect("valid draft");
    /// assert!(draft.service_area_id.is_none());
    /// ```
    pub fn parse(
        domain: &str,
        redirect_to: &str,
        service_area_id: Option<&str>,
    ) -> Result<Self, DomainMappingValidationError> {
        let domain = DomainName::new(domain)?;
        let redirect_to = RedirectPath::new(redirect_to)?;
        let service_area_id = match service_area_id.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                ServiceAreaId::parse(raw)
                    .map_err(|_| DomainMappingValidationError::InvalidServiceAreaId)?,
            ),
        };
        Ok(Self {
            domain,
            redirect_to,
            service_area_id,
        })
    }
}
