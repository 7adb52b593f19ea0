//! URL slug derivation.
//!
//! Sets and events may be saved without an explicit slug, in which case one
//! is derived from the name/title: lowercase ASCII alphanumerics, runs of
//! everything else collapsed to single hyphens. Non-ASCII titles (common
//! here) keep their characters untouched so Japanese slugs stay readable;
//! only ASCII letters are case-folded.

/// Derive a URL slug from a display name.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.trim().chars() {
        let keep = if c.is_ascii() {
            c.is_ascii_alphanumeric()
        } else {
            !c.is_whitespace()
        };

        if keep {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
