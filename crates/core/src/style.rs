//! Style application with vendor-prefix probing.
//!
//! Whether a style property needs a vendor prefix is a capability of the
//! host rendering engine, so it is modeled as a query against a [`Profile`]
//! value instead of being probed inline at every call site. The deck is
//! handed a profile at construction; a headless test harness substitutes one
//! that supports whatever property set the test needs.

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dom::{Document, NodeId};

/// Vendor prefixes probed by [`stylize`], in probe order.
pub const VENDOR_PREFIXES: [&str; 4] = ["webkit", "moz", "ms", "o"];

/// Style-property support of the host rendering engine.
///
/// The default profile models a current engine: every unprefixed property is
/// supported and the vendor-prefixed aliases are not.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    supported: Option<FxHashSet<String>>,
}

impl Profile {
    /// An engine that supports every unprefixed property.
    pub fn complete() -> Profile {
        Profile { supported: None }
    }

    /// An engine that supports exactly the given property names.
    ///
    /// Prefixed names are spelled out in full, e.g. `-webkit-transform`.
    pub fn with_support<'a, I: IntoIterator<Item = &'a str>>(properties: I) -> Profile {
        Profile {
            supported: Some(
                properties
                    .into_iter()
                    .map(|property| property.to_string())
                    .collect(),
            ),
        }
    }

    pub fn supports(&self, property: &str) -> bool {
        match self.supported {
            None => !property.starts_with('-'),
            Some(ref set) => set.contains(property),
        }
    }
}

/// Writes `value` for `property` on `node`, honoring vendor prefixes.
///
/// Every supported prefixed form of the property is written; when none is
/// supported the unprefixed property is written unconditionally. Returns the
/// last vendor prefix that matched, if any.
pub fn stylize(
    doc: &mut Document,
    node: NodeId,
    property: &str,
    value: &str,
    profile: &Profile,
) -> Option<&'static str> {
    let mut vendor = None;

    for prefix in VENDOR_PREFIXES {
        let prefixed = format!("-{}-{}", prefix, property);
        if profile.supports(&prefixed) {
            doc.set_style(node, &prefixed, value);
            vendor = Some(prefix);
        }
    }

    if vendor.is_none() {
        doc.set_style(node, property, value);
    }

    vendor
}

/// Easing curve applied to the page transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingFunction {
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    Linear,
}

impl TimingFunction {
    pub fn as_str(self) -> &'static str {
        match self {
            TimingFunction::Ease => "ease",
            TimingFunction::EaseIn => "ease-in",
            TimingFunction::EaseOut => "ease-out",
            TimingFunction::EaseInOut => "ease-in-out",
            TimingFunction::Linear => "linear",
        }
    }
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_profile_writes_unprefixed() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        let profile = Profile::complete();

        let vendor = stylize(&mut doc, node, "transform", "translate3d(0,-100%,0)", &profile);

        assert_eq!(vendor, None);
        assert_eq!(doc.style(node, "transform"), Some("translate3d(0,-100%,0)"));
        assert_eq!(doc.style(node, "-webkit-transform"), None);
    }

    #[test]
    fn prefixed_only_profile_writes_prefixed_form() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        let profile = Profile::with_support(["-webkit-transform"]);

        let vendor = stylize(&mut doc, node, "transform", "translate3d(0,0,0)", &profile);

        assert_eq!(vendor, Some("webkit"));
        assert_eq!(doc.style(node, "-webkit-transform"), Some("translate3d(0,0,0)"));
        assert_eq!(doc.style(node, "transform"), None);
    }

    #[test]
    fn multiple_prefixes_all_written_last_reported() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        let profile = Profile::with_support(["-webkit-transform", "-moz-transform"]);

        let vendor = stylize(&mut doc, node, "transform", "none", &profile);

        assert_eq!(vendor, Some("moz"));
        assert_eq!(doc.style(node, "-webkit-transform"), Some("none"));
        assert_eq!(doc.style(node, "-moz-transform"), Some("none"));
        assert_eq!(doc.style(node, "transform"), None);
    }

    #[test]
    fn unsupported_property_falls_back_to_unprefixed() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        let profile = Profile::with_support(["-webkit-transform"]);

        let vendor = stylize(&mut doc, node, "transition-duration", "800ms", &profile);

        assert_eq!(vendor, None);
        assert_eq!(doc.style(node, "transition-duration"), Some("800ms"));
    }

    #[test]
    fn timing_function_serializes_as_css_keyword() {
        assert_eq!(TimingFunction::EaseInOut.as_str(), "ease-in-out");

        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            timing: TimingFunction,
        }

        let serialized = toml::to_string(&Wrapper {
            timing: TimingFunction::EaseIn,
        })
        .unwrap();
        assert!(serialized.contains("\"ease-in\""));

        let wrapper: Wrapper = toml::from_str("timing = \"ease-out\"").unwrap();
        assert_eq!(wrapper.timing, TimingFunction::EaseOut);
    }
}
