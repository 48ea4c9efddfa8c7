//! Serializable state dump for diagnostics and the replay tool

use serde::Serialize;

use crate::config::NotebookConfig;
use crate::engine::TabEngine;
use crate::model::Tag;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotebookSnapshot {
    pub policies: NotebookConfig,
    pub raised: Option<u64>,
    pub page_count: usize,
    pub visible_count: usize,
    /// Visible pages, unpinned first then pinned
    pub visible_order: Vec<u64>,
    /// Most recent first
    pub most_recent: Vec<u64>,
    pub pages: Vec<PageSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub id: u64,
    pub title: String,
    pub tag: Tag,
    pub visible: bool,
    pub pinned: bool,
    pub raised: bool,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<u64>,
}

impl NotebookSnapshot {
    pub fn capture(engine: &TabEngine) -> Self {
        let visible_order = (0..)
            .map_while(|index| engine.visible_page_id(index))
            .map(|id| id.0)
            .collect();

        Self {
            policies: engine.config().clone(),
            raised: engine.raised_page_id().map(|id| id.0),
            page_count: engine.number_of_pages(),
            visible_count: engine.number_of_visible_pages(),
            visible_order,
            most_recent: engine.most_recent_pages().iter().map(|id| id.0).collect(),
            pages: engine
                .pages()
                .map(|page| PageSnapshot {
                    id: page.id.0,
                    title: page.title.clone(),
                    tag: page.tag,
                    visible: page.visible,
                    pinned: page.pinned,
                    raised: engine.is_page_raised(page.id),
                    enabled: page.enabled,
                    content: page.content.map(|c| c.0),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text table, one page per line
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} pages, {} visible, raised {}\n",
            self.page_count,
            self.visible_count,
            self.raised
                .map_or_else(|| "none".to_string(), |id| format!("#{}", id))
        ));
        out.push_str("  id  tag  flags  title\n");
        for page in &self.pages {
            let flags = format!(
                "{}{}{}",
                if page.raised { 'R' } else { '-' },
                if page.visible { 'V' } else { '-' },
                if page.pinned { 'P' } else { '-' },
            );
            out.push_str(&format!(
                "{:>4} {:>4}  {}    {}\n",
                page.id, page.tag, flags, page.title
            ));
        }
        let recent: Vec<String> = self.most_recent.iter().map(|id| format!("#{}", id)).collect();
        out.push_str(&format!("most recent: {}\n", recent.join(" ")));
        out
    }
}
