//! Slug derivation for service-area landing page paths.
//!
//! Slugs lowercase the area name and replace each space with a hyphen. No
//! other characters are touched, so `"Owen Sound"` becomes `"owen-sound"` and
//! `"Saint-Jean"` becomes `"saint-jean"`.

/// Derive the URL slug for a service-area name.
///
/// # Examples
/// ```
/// use site_backend::domain::slugify;
///
/// assert_eq!(slugify("Collingwood"), "collingwood");
/// assert_eq!(slugify("Owen Sound"), "owen-sound");
/// ```
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
