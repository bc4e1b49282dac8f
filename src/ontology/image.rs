//! Image path collaborator interface and main-image sentinel helpers
//!
//! Image decode and resize live outside this crate. The serializer only
//! needs two things from that subsystem: a way to rewrite an image property
//! value into its download path, and a test for the main-image sentinel
//! prefix that must be stripped before rewriting.

use crate::error::{GnossError, GnossResult};

/// Prefix marking a resource's main image value
pub const MAIN_IMAGE_PREFIX: &str = "[IMGPrincipal]";

/// Collaborator that turns image property values into served paths.
/// Implemented by the excluded image subsystem.
pub trait ImagePathRewriter {
    /// Build the served path for an image file of a resource
    fn rewrite_image_path(&self, resource_id: &str, filename: &str) -> String;

    /// Whether a property value starts with a sentinel prefix that must be
    /// stripped before [`rewrite_image_path`](Self::rewrite_image_path)
    fn is_image_root_prefix(&self, value: &str) -> bool;
}

/// Build a main-image sentinel value: `[IMGPrincipal][{size},]{image_id}{ext}`.
/// The extension must start with a dot.
pub fn main_image_value(size: u32, image_id: &str, extension: &str) -> GnossResult<String> {
    if !extension.starts_with('.') || extension.len() < 2 {
        return Err(GnossError::InvalidTransformation(format!(
            "invalid image extension `{}`",
            extension
        )));
    }
    Ok(format!(
        "{}[{},]{}{}",
        MAIN_IMAGE_PREFIX, size, image_id, extension
    ))
}

/// Strip a bracketed sentinel prefix from an image value, leaving the
/// filename part. Values without brackets are returned unchanged.
pub fn strip_image_prefix(value: &str) -> &str {
    match value.rfind(']') {
        Some(pos) => &value[pos + 1..],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_image_value() {
        let value = main_image_value(240, "img-7", ".jpg").unwrap();
        assert_eq!(value, "[IMGPrincipal][240,]img-7.jpg");
    }

    #[test]
    fn test_invalid_extension() {
        let err = main_image_value(240, "img-7", "jpg").unwrap_err();
        assert!(matches!(err, GnossError::InvalidTransformation(_)));
        assert!(main_image_value(240, "img-7", ".").is_err());
    }

    #[test]
    fn test_strip_image_prefix() {
        assert_eq!(strip_image_prefix("[IMGPrincipal][240,]img-7.jpg"), "img-7.jpg");
        assert_eq!(strip_image_prefix("plain.jpg"), "plain.jpg");
    }
}
