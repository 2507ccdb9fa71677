//! Shared state handed to every event handler.

use crate::dom::Document;
use crate::style::Profile;

/// The host-side state a view needs while handling an event: the document
/// tree it manipulates and the rendering engine's style-support profile.
pub struct Context {
    pub document: Document,
    pub profile: Profile,
}

impl Context {
    pub fn new(document: Document, profile: Profile) -> Context {
        Context { document, profile }
    }
}
