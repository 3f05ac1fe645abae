//! Local filename handling for saved images.
//!
//! Sanitizes the configured download filename for the local filesystem and
//! picks a free name when the target directory already holds one.

mod sanitize;
mod unique;

pub use sanitize::sanitize_filename;
pub use unique::unique_filename_among;

/// Filename used when the configured one sanitizes to nothing usable.
const DEFAULT_FILENAME: &str = "meme_image.png";

/// Derives a safe filename for saving a download from a suggested name.
///
/// The result is sanitized (no `/`, NUL, or control chars; no leading/trailing
/// dots or spaces); reserved names like "." or ".." fall back to the default.
///
/// # Examples
///
/// - `derive_filename("meme_image.png")` → `"meme_image.png"`
/// - `derive_filename("../../etc/passwd")` → `"etc_passwd"`
pub fn derive_filename(suggested: &str) -> String {
    let sanitized = sanitize_filename(suggested);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}
