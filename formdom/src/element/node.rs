use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::Display;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Owned description of an element subtree.
///
/// Elements are plain values built with chained setters and materialised
/// into a [`Document`](crate::Document) with `Document::mount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,

    // Presentation
    pub class: Option<String>,
    pub display: Display,

    // Content
    pub content: Content,

    // Custom attributes (rendered as `data-*`)
    pub data: HashMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: "div".to_string(),
            class: None,
            display: Display::Block,
            content: Content::None,
            data: HashMap::new(),
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn form() -> Self {
        Self::new("form")
    }

    pub fn input() -> Self {
        Self::new("input")
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new("label").text(text)
    }

    // Builder methods

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn html(mut self, markup: impl Into<String>) -> Self {
        self.content = Content::Html(markup.into());
        self
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn hidden(self) -> Self {
        self.display(Display::None)
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Append a child. Replaces any text content.
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            self = self.child(child);
        }
        self
    }
}
