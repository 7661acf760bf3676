#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    None,
    /// Plain text, escaped when serialized.
    Text(String),
    /// Raw markup, emitted verbatim when serialized.
    Html(String),
    Children(Vec<super::Element>),
}

impl Content {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Text of the node as a user would read it. Markup is returned as-is.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Html(s) => Some(s),
            _ => None,
        }
    }
}
