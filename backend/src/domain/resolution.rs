//! Hostname resolution: the two-phase decision behind vanity domains.
//!
//! A page load arrives on some hostname. The resolver first looks for an
//! explicit [`DomainMapping`] with exactly that domain. Failing that, it
//! strips marketing noise from the hostname (`plumbing`, `plumber`, TLDs,
//! `www.`) and searches the service areas for a name containing what is left.
//!
//! This module holds the pure pieces: value types, the bypass policy, the
//! per-load guard, candidate derivation and [`resolve`] over in-memory slices.
//! [`crate::domain::DomainResolutionService`] runs the same algorithm against
//! the store ports.

use std::cmp::Ordering;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use regex::Regex;

use super::{DomainMapping, ServiceArea};

/// Hostnames that never resolve, matched ignoring ASCII case.
pub const DEFAULT_BYPASS_HOSTS: &[&str] = &["localhost"];

/// Substrings identifying hosting-platform preview deployments.
pub const DEFAULT_PREVIEW_SUBSTRINGS: &[&str] = &["lovable.app"];

/// How a target was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// An operator-maintained domain mapping matched exactly.
    Explicit,
    /// A service area name matched the hostname's candidate fragment.
    Heuristic,
}

impl TargetKind {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Heuristic => "heuristic",
        }
    }
}

/// Navigation decision for a page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTarget {
    /// Which phase produced the target.
    pub kind: TargetKind,
    /// Internal path beginning with `/`.
    pub path: String,
}

impl ResolutionTarget {
    /// Target taken from an explicit mapping.
    pub fn explicit(mapping: &DomainMapping) -> Self {
        Self {
            kind: TargetKind::Explicit,
            path: mapping.redirect_to.as_ref().to_owned(),
        }
    }

    /// Target pointing at a service area's landing page.
    pub fn heuristic(area: &ServiceArea) -> Self {
        Self {
            kind: TargetKind::Heuristic,
            path: area.landing_path(),
        }
    }
}

/// Hostnames for which resolution is skipped entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BypassPolicy {
    bypass_hosts: Vec<String>,
    preview_substrings: Vec<String>,
}

impl BypassPolicy {
    /// Build a policy from exact hosts and preview substrings.
    ///
    /// Blank entries are dropped so a stray comma in configuration cannot
    /// turn into a substring that matches every host.
    pub fn new<H, P>(bypass_hosts: H, preview_substrings: P) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        fn normalise<I>(items: I) -> Vec<String>
        where
            I: IntoIterator,
            I::Item: AsRef<str>,
        {
            items
                .into_iter()
                .map(|item| item.as_ref().trim().to_ascii_lowercase())
                .filter(|item| !item.is_empty())
                .collect()
        }

        Self {
            bypass_hosts: normalise(bypass_hosts),
            preview_substrings: normalise(preview_substrings),
        }
    }

    /// Whether `hostname` must not be resolved.
    ///
    /// # Examples
    /// ```
    /// use site_backend::domain::BypassPolicy;
    ///
    /// let policy = BypassPolicy::default();
    /// assert!(policy.is_bypassed("localhost"));
    /// assert!(policy.is_bypassed("my-site.lovable.app"));
    /// assert!(!policy.is_bypassed("collingwoodplumbing.com"));
    /// ```
    pub fn is_bypassed(&self, hostname: &str) -> bool {
        let lowered = hostname.to_ascii_lowercase();
        self.bypass_hosts.iter().any(|host| *host == lowered)
            || self
                .preview_substrings
                .iter()
                .any(|fragment| lowered.contains(fragment.as_str()))
    }
}

impl Default for BypassPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BYPASS_HOSTS, DEFAULT_PREVIEW_SUBSTRINGS)
    }
}

/// Single-fire flag owned by the caller for one page load.
///
/// The resolver refuses to work once the guard is spent and claims it when
/// it hands out a target, so a load redirects at most once. The claim happens
/// after the lookups finish; if another evaluation claimed it meanwhile, the
/// late result is discarded.
#[derive(Debug, Default)]
pub struct ResolutionGuard {
    spent: AtomicBool,
}

impl ResolutionGuard {
    /// Fresh guard for a new page load.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a redirect has already been issued for this load.
    pub fn is_spent(&self) -> bool {
        self.spent.load(AtomicOrdering::Acquire)
    }

    /// Mark the load as redirected. Returns `false` if it already was.
    pub fn claim(&self) -> bool {
        self.spent
            .compare_exchange(false, true, AtomicOrdering::AcqRel, AtomicOrdering::Acquire)
            .is_ok()
    }
}

static LEADING_WWW_RE: OnceLock<Regex> = OnceLock::new();
static MARKETING_NOISE_RE: OnceLock<Regex> = OnceLock::new();

fn leading_www_regex() -> &'static Regex {
    LEADING_WWW_RE.get_or_init(|| {
        Regex::new(r"(?i)^www\.")
            .unwrap_or_else(|error| panic!("www regex failed to compile: {error}"))
    })
}

fn marketing_noise_regex() -> &'static Regex {
    MARKETING_NOISE_RE.get_or_init(|| {
        Regex::new(r"(?i)plumbing|plumber|\.com|\.ca")
            .unwrap_or_else(|error| panic!("marketing noise regex failed to compile: {error}"))
    })
}

/// Derive the service-area fragment hidden in a vanity hostname.
///
/// A leading `www.` goes first, then `plumbing`, `plumber`, `.com` and `.ca`
/// wherever they appear (ignoring case), then every remaining dot. Returns
/// `None` when nothing but whitespace is left.
///
/// # Examples
/// ```
/// use site_backend::domain::derive_area_candidate;
///
/// assert_eq!(
///     derive_area_candidate("collingwoodplumbing.com").as_deref(),
///     Some("collingwood")
/// );
/// assert_eq!(
///     derive_area_candidate("www.owensoundplumber.ca").as_deref(),
///     Some("owensound")
/// );
/// assert_eq!(derive_area_candidate("plumbing.com"), None);
/// ```
pub fn derive_area_candidate(hostname: &str) -> Option<String> {
    let without_www = leading_www_regex().replace(hostname, "");
    let without_noise = marketing_noise_regex().replace_all(&without_www, "");
    let candidate = without_noise.replace('.', "");
    let candidate = candidate.trim();
    (!candidate.is_empty()).then(|| candidate.to_owned())
}

/// Order in which duplicate mappings for one domain are considered.
pub(crate) fn mapping_precedence(a: &DomainMapping, b: &DomainMapping) -> Ordering {
    a.created_at
        .cmp(&b.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Order in which matching service areas are considered.
///
/// Longer names are more specific and win; ties fall back to the name and
/// then the id so the choice never depends on storage order.
pub(crate) fn area_precedence(a: &ServiceArea, b: &ServiceArea) -> Ordering {
    b.name
        .chars()
        .count()
        .cmp(&a.name.chars().count())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Pick the service area a candidate fragment resolves to.
pub(crate) fn best_area_match<'a, I>(
    areas: I,
    candidate: &str,
    exclude_main_address: bool,
) -> Option<&'a ServiceArea>
where
    I: IntoIterator<Item = &'a ServiceArea>,
{
    areas
        .into_iter()
        .filter(|area| !(exclude_main_address && area.is_main_address))
        .filter(|area| area.name_contains(candidate))
        .min_by(|a, b| area_precedence(a, b))
}

/// Resolve `hostname` against in-memory mappings and areas.
///
/// Returns `None` when the host is bypassed, the guard is already spent, or
/// neither phase matches. A returned target has claimed `guard`.
pub fn resolve(
    hostname: &str,
    mappings: &[DomainMapping],
    areas: &[ServiceArea],
    policy: &BypassPolicy,
    guard: &ResolutionGuard,
) -> Option<ResolutionTarget> {
    if guard.is_spent() || policy.is_bypassed(hostname) {
        return None;
    }

    let explicit = mappings
        .iter()
        .filter(|mapping| mapping.domain.as_ref() == hostname)
        .min_by(|a, b| mapping_precedence(a, b))
        .map(ResolutionTarget::explicit);

    let target = explicit.or_else(|| {
        let candidate = derive_area_candidate(hostname)?;
        best_area_match(areas, &candidate, true).map(ResolutionTarget::heuristic)
    })?;

    guard.claim().then_some(target)
}
