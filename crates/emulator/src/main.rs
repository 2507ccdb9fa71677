//! Headless host for the deck.
//!
//! Mounts the widget on an in-memory document and drives it with a scripted
//! input sequence: wheel scrolls (one of them inside the debounce window,
//! one below the threshold), arrow keys, a touch swipe, and a marker tap.
//! Transition timers come back through the hub and are routed into the deck
//! like any other event, so the log shows the full move/end lifecycle.

use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Error;
use pagedeck_core::context::Context;
use pagedeck_core::dom::{Document, NodeId};
use pagedeck_core::geom::Point;
use pagedeck_core::helpers;
use pagedeck_core::input::{ButtonStatus, DeviceEvent, FingerStatus, KeyCode};
use pagedeck_core::logging;
use pagedeck_core::notifier::Lifecycle;
use pagedeck_core::settings::Settings;
use pagedeck_core::style::Profile;
use pagedeck_core::view::deck::PageDeck;
use pagedeck_core::view::{Bus, Event, View};

const SETTINGS_PATH: &str = "Settings.toml";

const PAGE_TITLES: [&str; 5] = ["Welcome", "Features", "Gallery", "Pricing", "Contact"];

fn load_settings() -> Settings {
    if Path::new(SETTINGS_PATH).exists() {
        match helpers::load_toml::<Settings, _>(SETTINGS_PATH) {
            Ok(settings) => return settings,
            Err(e) => eprintln!("failed to load {}: {:#}; using defaults", SETTINGS_PATH, e),
        }
    }

    Settings {
        duration: 200,
        debounce_interval: 100,
        ..Settings::default()
    }
}

fn build_document() -> (Document, NodeId) {
    let mut doc = Document::new();
    let container = doc.create_element("div");
    let body = doc.body();
    doc.append_child(body, container);

    for title in PAGE_TITLES {
        let section = doc.create_element("section");
        doc.set_attribute(section, "title", title);
        doc.append_child(container, section);
    }

    if let Some(fragment) = std::env::args().nth(1) {
        doc.set_fragment(fragment.trim_start_matches('#'));
    }

    (doc, container)
}

/// Routes everything queued on the hub back into the deck.
fn drain_events(
    deck: &mut PageDeck,
    events: &mpsc::Receiver<Event>,
    hub: &mpsc::Sender<Event>,
    bus: &mut Bus,
    context: &mut Context,
    idle: Duration,
) {
    while let Ok(evt) = events.recv_timeout(idle) {
        deck.handle_event(&evt, hub, bus, context);
    }
}

fn main() -> Result<(), Error> {
    let mut settings = load_settings();
    settings.logging.enabled = true;
    logging::init_logging(&settings.logging)?;

    let (doc, container) = build_document();
    let mut context = Context::new(doc, Profile::complete());

    let (hub, events) = mpsc::channel();
    let mut deck = PageDeck::new(container, settings, &hub, &mut context)?;

    deck.on(Lifecycle::Move, |index| {
        tracing::info!(index, "transition started");
    });
    deck.on(Lifecycle::End, |index| {
        tracing::info!(index, "transition finished");
    });

    tracing::info!(pages = deck.page_count(), start = deck.current_index(), "deck mounted");

    let settle = Duration::from_millis(
        deck.settings().duration + deck.settings().debounce_interval + 50,
    );

    let script: Vec<(&str, Vec<DeviceEvent>)> = vec![
        ("wheel down", vec![DeviceEvent::Wheel { delta: -120 }]),
        ("wheel inside debounce window", vec![DeviceEvent::Wheel { delta: -120 }]),
        ("wheel below threshold", vec![DeviceEvent::Wheel { delta: -40 }]),
        (
            "arrow keys",
            vec![
                DeviceEvent::Key {
                    code: KeyCode::ArrowDown,
                    status: ButtonStatus::Pressed,
                },
                DeviceEvent::Key {
                    code: KeyCode::ArrowUp,
                    status: ButtonStatus::Pressed,
                },
            ],
        ),
        (
            "upward swipe",
            vec![
                DeviceEvent::Finger {
                    id: 1,
                    status: FingerStatus::Down,
                    position: Point::new(360, 600),
                },
                DeviceEvent::Finger {
                    id: 1,
                    status: FingerStatus::Motion,
                    position: Point::new(360, 520),
                },
                DeviceEvent::Finger {
                    id: 1,
                    status: FingerStatus::Up,
                    position: Point::new(360, 520),
                },
            ],
        ),
        (
            "marker tap",
            vec![DeviceEvent::Tap {
                target: deck.pages()[4].marker.expect("pagination is enabled"),
            }],
        ),
    ];

    let mut bus = Bus::new();

    for (label, devices) in script {
        tracing::info!(label, "feeding input");

        for device in devices {
            deck.handle_event(&Event::Device(device), &hub, &mut bus, &mut context);
            drain_events(&mut deck, &events, &hub, &mut bus, &mut context, Duration::from_millis(5));
        }

        tracing::info!(current = deck.current_index(), "deck state");

        if label != "wheel down" {
            thread::sleep(settle);
        }
    }

    // Let the trailing transition timers fire before shutting down.
    drain_events(&mut deck, &events, &hub, &mut bus, &mut context, settle);

    tracing::info!(current = deck.current_index(), "script finished");
    logging::shutdown_logging();

    Ok(())
}
