//! Embedded stylesheet assets.
//!
//! The widget's default stylesheet is embedded in the binary at compile
//! time using rust-embed, so an embedding can serve or inject it without
//! shipping a separate file.

use rust_embed::Embed;
use rust_embed::EmbeddedFile;

/// Embedded default stylesheet for the deck and its pagination bar.
///
/// # Example
///
/// ```
/// use pagedeck_core::assets::StyleAssets;
///
/// let css = StyleAssets::get_stylesheet();
/// assert!(!css.data.is_empty());
/// ```
#[derive(Embed)]
#[folder = "assets/"]
#[include = "pagedeck.css"]
pub struct StyleAssets;

impl StyleAssets {
    /// Returns the embedded default stylesheet.
    ///
    /// # Panics
    ///
    /// Panics if the stylesheet is missing from the embedded assets, which
    /// cannot happen in a properly built binary.
    pub fn get_stylesheet() -> EmbeddedFile {
        Self::get("pagedeck.css").expect("default stylesheet not found in embedded assets")
    }
}
