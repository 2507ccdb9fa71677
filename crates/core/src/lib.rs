//! Pagedeck turns a container element's direct children into full-viewport
//! pages with animated navigation: mouse wheel, touch swipe, arrow keys, and
//! a marker bar.
//!
//! The crate is host-agnostic: the page is an in-memory [`dom::Document`],
//! style-property support is a [`style::Profile`] capability query, and raw
//! input arrives as [`input::DeviceEvent`]s. A host embedding binds those
//! three seams to its real environment; the bundled emulator binds them to a
//! scripted headless one.
//!
//! ```
//! use std::sync::mpsc;
//! use pagedeck_core::context::Context;
//! use pagedeck_core::dom::Document;
//! use pagedeck_core::settings::Settings;
//! use pagedeck_core::style::Profile;
//! use pagedeck_core::view::deck::PageDeck;
//!
//! let mut doc = Document::new();
//! let container = doc.create_element("div");
//! let body = doc.body();
//! doc.append_child(body, container);
//! for _ in 0..3 {
//!     let section = doc.create_element("section");
//!     doc.append_child(container, section);
//! }
//!
//! let mut context = Context::new(doc, Profile::complete());
//! let (hub, _events) = mpsc::channel();
//! let mut deck = PageDeck::new(container, Settings::default(), &hub, &mut context).unwrap();
//!
//! deck.move_to(2, &hub, &mut context);
//! assert_eq!(deck.current_index(), 2);
//! ```

#[macro_use]
pub mod geom;

pub mod assets;
pub mod context;
pub mod dom;
pub mod gesture;
pub mod helpers;
pub mod input;
pub mod logging;
pub mod notifier;
pub mod settings;
pub mod style;
#[cfg(feature = "otel")]
pub mod telemetry;
pub mod view;
