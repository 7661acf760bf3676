/// Whether a node takes part in rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    None,
}

impl Display {
    pub fn is_visible(self) -> bool {
        self == Self::Block
    }

    /// Inline style fragment, `None` when the default applies.
    pub fn as_style(self) -> Option<&'static str> {
        match self {
            Self::Block => None,
            Self::None => Some("display: none"),
        }
    }
}
