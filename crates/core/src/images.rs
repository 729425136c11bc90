//! Display-image placeholders and path normalization.
//!
//! Entities store the image path exactly as uploaded (or not at all).
//! Normalization happens when building display models: blank values fall
//! back to a per-entity placeholder, and legacy Windows-style separators
//! are rewritten to forward slashes so the frontend can serve them as-is.

// ---------------------------------------------------------------------------
// Placeholder paths
// ---------------------------------------------------------------------------

/// Shown for clients without an uploaded logo.
pub const PLACEHOLDER_CLIENT: &str = "/img/placeholders/client.png";

/// Shown for members without an avatar.
pub const PLACEHOLDER_MEMBER: &str = "/img/placeholders/member.png";

/// Shown for projects without a cover image.
pub const PLACEHOLDER_PROJECT: &str = "/img/placeholders/project.png";

/// Shown for notifications without an attached image.
pub const PLACEHOLDER_NOTIFICATION: &str = "/img/placeholders/notification.png";

/// Bundled avatars assigned round-robin-by-chance to members created
/// without an upload.
pub const DEFAULT_AVATARS: &[&str] = &[
    "/img/avatars/avatar-1.png",
    "/img/avatars/avatar-2.png",
    "/img/avatars/avatar-3.png",
    "/img/avatars/avatar-4.png",
    "/img/avatars/avatar-5.png",
    "/img/avatars/avatar-6.png",
    "/img/avatars/avatar-7.png",
    "/img/avatars/avatar-8.png",
];

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Resolve the image path shown for an entity.
///
/// `None`, empty, and whitespace-only values resolve to `placeholder`.
/// Backslash separators are rewritten to `/`.
///
/// # Examples
///
/// ```
/// use atelier_core::images::{normalize_image_path, PLACEHOLDER_CLIENT};
///
/// assert_eq!(normalize_image_path(None, PLACEHOLDER_CLIENT), PLACEHOLDER_CLIENT);
/// assert_eq!(normalize_image_path(Some("  "), PLACEHOLDER_CLIENT), PLACEHOLDER_CLIENT);
/// assert_eq!(
///     normalize_image_path(Some(r"uploads\clients\a.png"), PLACEHOLDER_CLIENT),
///     "uploads/clients/a.png"
/// );
/// ```
pub fn normalize_image_path(path: Option<&str>, placeholder: &str) -> String {
    match path {
        Some(p) if !p.trim().is_empty() => p.trim().replace('\\', "/"),
        _ => placeholder.to_string(),
    }
}

/// Collapse an optional text field: trims, and empty becomes `None`.
///
/// Used by the mappers so optional columns never store whitespace-only
/// values.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
