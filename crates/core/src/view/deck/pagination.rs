//! Marker navigation bar.
//!
//! One anchor marker per page, appended to the document body so the bar
//! floats over the page stack. The marker for the current page carries the
//! `active` class. Tapping a marker bubbles an absolute navigation request
//! up to the deck; the deck decides what to do with it.

use crate::context::Context;
use crate::dom::{Document, NodeId};
use crate::gesture::GestureEvent;
use crate::view::{Bus, Event, Hub, Id, View, ViewId, ID_FEEDER};

pub struct Pagination {
    id: Id,
    children: Vec<Box<dyn View>>,
    element: NodeId,
    markers: Vec<NodeId>,
    active: usize,
}

impl Pagination {
    /// Builds the marker bar for the given page elements and appends it to
    /// the document body.
    ///
    /// A page carrying a non-empty `title` attribute donates it as the
    /// marker's caption; the attribute is cleared in the process.
    pub fn new(page_elements: &[NodeId], active: usize, doc: &mut Document) -> Pagination {
        let element = doc.create_element("div");
        doc.add_class(element, "pagedeck-pagination");

        let markers = Self::build_markers(page_elements, element, doc);
        doc.add_class(markers[active], "active");

        let body = doc.body();
        doc.append_child(body, element);

        Pagination {
            id: ID_FEEDER.next(),
            children: Vec::new(),
            element,
            markers,
            active,
        }
    }

    fn build_markers(page_elements: &[NodeId], bar: NodeId, doc: &mut Document) -> Vec<NodeId> {
        page_elements
            .iter()
            .enumerate()
            .map(|(index, &page)| {
                let marker = doc.create_element("a");
                doc.set_attribute(marker, "href", &format!("#{}", index));
                doc.set_attribute(marker, "id", &format!("pagedeck-marker-{}", index));

                let title = doc
                    .attribute(page, "title")
                    .filter(|title| !title.is_empty())
                    .map(str::to_string);

                if let Some(title) = title {
                    let caption = doc.create_element("span");
                    doc.add_class(caption, "pagedeck-caption");
                    let text = doc.create_text(title);
                    doc.append_child(caption, text);
                    doc.append_child(marker, caption);
                    doc.remove_attribute(page, "title");
                }

                doc.append_child(bar, marker);
                marker
            })
            .collect()
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn markers(&self) -> &[NodeId] {
        &self.markers
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Moves the `active` class from the current marker to `index`.
    pub fn set_active(&mut self, index: usize, doc: &mut Document) {
        doc.remove_class(self.markers[self.active], "active");
        doc.add_class(self.markers[index], "active");
        self.active = index;
    }

    fn marker_index(&self, target: NodeId) -> Option<usize> {
        self.markers.iter().position(|&marker| marker == target)
    }
}

impl View for Pagination {
    fn handle_event(
        &mut self,
        evt: &Event,
        _hub: &Hub,
        bus: &mut Bus,
        _context: &mut Context,
    ) -> bool {
        match *evt {
            Event::Gesture(GestureEvent::Tap(target)) => {
                if let Some(index) = self.marker_index(target) {
                    bus.push_back(Event::GoTo(index as i32));
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn children(&self) -> &Vec<Box<dyn View>> {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Box<dyn View>> {
        &mut self.children
    }

    fn id(&self) -> Id {
        self.id
    }

    fn view_id(&self) -> Option<ViewId> {
        Some(ViewId::Pagination)
    }
}
