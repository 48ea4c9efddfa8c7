//! Update function for the Elm-style architecture
//!
//! Applies a [`Msg`] to a [`Notebook`]. In debug builds each message is
//! wrapped in a span and the visibility change it caused is logged.

use crate::error::Result;
use crate::messages::Msg;
use crate::model::PageId;
use crate::panel::PanelGroupMapper;

#[cfg(debug_assertions)]
use crate::tracing::VisibilitySnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

/// A notebook whose panels are identified by name
pub type Notebook = PanelGroupMapper<String>;

/// What a message produced besides the state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// A page was created
    Added(PageId),
    /// A toggle settled on this state
    Toggled(bool),
    /// Pinned pages a bulk hide left visible
    KeptPinned(Vec<PageId>),
    /// Number of pages removed
    Removed(usize),
    /// Whether a constraint pass changed anything
    Constrained(bool),
}

/// Main update function
#[inline]
pub fn update(notebook: &mut Notebook, msg: Msg) -> Result<Outcome> {
    #[cfg(debug_assertions)]
    {
        update_traced(notebook, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(notebook, msg)
    }
}

#[cfg(debug_assertions)]
fn update_traced(notebook: &mut Notebook, msg: Msg) -> Result<Outcome> {
    let span = span!(Level::DEBUG, "update", msg = msg.name());
    let _guard = span.enter();

    let before = VisibilitySnapshot::from_engine(notebook.engine());
    let result = update_inner(notebook, msg);
    let after = VisibilitySnapshot::from_engine(notebook.engine());

    if let Some(diff) = before.diff(&after) {
        debug!("{}", diff);
    }
    if let Err(e) = &result {
        debug!("rejected: {}", e);
    }
    result
}

fn update_inner(notebook: &mut Notebook, msg: Msg) -> Result<Outcome> {
    match msg {
        Msg::AddPage {
            title,
            tag,
            panel,
            balloon_help,
            icon,
        } => {
            let id = match panel {
                Some(panel) => notebook.add_page(&panel, title, balloon_help, icon),
                None => {
                    let engine = notebook.engine_mut();
                    let id = engine.add_page(title, tag);
                    engine.set_page_balloon_help(id, balloon_help)?;
                    engine.set_page_icon(id, icon)?;
                    id
                }
            };
            Ok(Outcome::Added(id))
        }
        Msg::RemovePage { page } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.remove_page(id).map(|()| Outcome::Removed(1))
        }
        Msg::RaisePage { page } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.raise_page(id).map(|()| Outcome::Done)
        }
        Msg::ShowPage { page } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.show_page(id).map(|()| Outcome::Done)
        }
        Msg::HidePage { page } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.hide_page(id).map(|()| Outcome::Done)
        }
        Msg::PinPage { page } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.pin_page(id).map(|()| Outcome::Done)
        }
        Msg::UnpinPage { page } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.unpin_page(id).map(|()| Outcome::Done)
        }
        Msg::TogglePagePinned { page } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.toggle_page_pinned(id).map(Outcome::Toggled)
        }
        Msg::TogglePageVisibility { page } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.toggle_page_visibility(id).map(Outcome::Toggled)
        }

        Msg::SetPageTag { page, tag } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.set_page_tag(id, tag).map(|()| Outcome::Done)
        }
        Msg::SetPageTitle { page, title } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.set_page_title(id, title).map(|()| Outcome::Done)
        }
        Msg::SetPageEnabled { page, enabled } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.set_page_enabled(id, enabled).map(|()| Outcome::Done)
        }
        Msg::SetPageContent { page, content } => {
            let engine = notebook.engine_mut();
            let id = page.resolve(engine)?;
            engine.set_page_content(id, content).map(|()| Outcome::Done)
        }

        Msg::ShowPagesMatchingTag { tag } => {
            notebook.engine_mut().show_pages_matching_tag(tag);
            Ok(Outcome::Done)
        }
        Msg::HidePagesMatchingTag { tag } => Ok(Outcome::KeptPinned(
            notebook.engine_mut().hide_pages_matching_tag(tag),
        )),
        Msg::ShowPagesNotMatchingTag { tag } => {
            notebook.engine_mut().show_pages_not_matching_tag(tag);
            Ok(Outcome::Done)
        }
        Msg::HidePagesNotMatchingTag { tag } => Ok(Outcome::KeptPinned(
            notebook.engine_mut().hide_pages_not_matching_tag(tag),
        )),
        Msg::RemovePagesMatchingTag { tag } => Ok(Outcome::Removed(
            notebook.engine_mut().remove_pages_matching_tag(tag),
        )),
        Msg::RaiseFirstPageMatchingTag { tag } => {
            notebook.engine_mut().raise_first_page_matching_tag(tag);
            Ok(Outcome::Done)
        }
        Msg::HideAllPages => Ok(Outcome::KeptPinned(notebook.engine_mut().hide_all_pages())),
        Msg::RemoveAllPages => {
            let count = notebook.engine().number_of_pages();
            notebook.engine_mut().remove_all_pages();
            Ok(Outcome::Removed(count))
        }

        Msg::SetShowOnlyPagesWithSameTag { enabled } => {
            notebook
                .engine_mut()
                .set_show_only_pages_with_same_tag(enabled);
            Ok(Outcome::Done)
        }
        Msg::SetShowAllPagesWithSameTag { enabled } => {
            notebook.engine_mut().set_show_all_pages_with_same_tag(enabled);
            Ok(Outcome::Done)
        }
        Msg::SetShowOnlyMostRecentPages { enabled, bound } => notebook
            .engine_mut()
            .set_show_only_most_recent_pages(enabled, bound)
            .map(|()| Outcome::Done),
        Msg::Constrain => Ok(Outcome::Constrained(
            notebook.engine_mut().constrain_visible_pages(),
        )),

        Msg::ShowPanel { panel } => notebook.show_panel(&panel).map(|()| Outcome::Done),
        Msg::RaisePanel { panel } => notebook.raise_panel(&panel).map(|()| Outcome::Done),
        Msg::HidePanel { panel } => notebook.hide_panel(&panel).map(Outcome::KeptPinned),
        Msg::RemovePanel { panel } => notebook.remove_panel(&panel).map(Outcome::Removed),
    }
}
