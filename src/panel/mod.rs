//! Panel grouping - projects application panels onto tagged page groups
//!
//! A panel is an application-level feature group (a settings section, a tool
//! module). The mapper gives each panel a tag and translates panel-level
//! show/hide/raise/remove into tag-scoped engine operations.

mod mapper;

pub use mapper::PanelGroupMapper;
