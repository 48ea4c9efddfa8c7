//! Notifications for the presentation layer
//!
//! The engine records a `PageEvent` for every state change while an
//! operation runs and only hands them to observers once the operation and its
//! constraint pass have completed. Observers never receive an engine handle,
//! so they cannot call back into it mid-operation.

use crate::model::{ContentHandle, PageId};

/// A state change the renderer should reflect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Created(PageId),
    VisibilityChanged { id: PageId, visible: bool },
    Raised { id: PageId, previous: Option<PageId> },
    ContentChanged { id: PageId, content: Option<ContentHandle> },
    Removed(PageId),
}

/// Hooks the presentation layer implements to pack, unpack and restyle tabs
///
/// All methods default to doing nothing.
pub trait PageObserver {
    fn on_page_created(&mut self, _id: PageId) {}

    fn on_page_visibility_changed(&mut self, _id: PageId, _visible: bool) {}

    /// `previous` is the page that was lowered, if any
    fn on_page_raised(&mut self, _id: PageId, _previous: Option<PageId>) {}

    fn on_page_content_changed(&mut self, _id: PageId, _content: Option<ContentHandle>) {}

    fn on_page_removed(&mut self, _id: PageId) {}

    /// Dispatch an event to the matching hook
    fn on_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Created(id) => self.on_page_created(id),
            PageEvent::VisibilityChanged { id, visible } => {
                self.on_page_visibility_changed(id, visible)
            }
            PageEvent::Raised { id, previous } => self.on_page_raised(id, previous),
            PageEvent::ContentChanged { id, content } => self.on_page_content_changed(id, content),
            PageEvent::Removed(id) => self.on_page_removed(id),
        }
    }
}

/// Observer that keeps every event it receives
///
/// Handy for tests and for hosts that prefer polling over callbacks.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<PageEvent>,
}

impl PageObserver for EventLog {
    fn on_event(&mut self, event: PageEvent) {
        self.events.push(event);
    }
}

impl<T: PageObserver + ?Sized> PageObserver for std::rc::Rc<std::cell::RefCell<T>> {
    fn on_event(&mut self, event: PageEvent) {
        self.borrow_mut().on_event(event);
    }
}
