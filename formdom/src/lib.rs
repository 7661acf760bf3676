pub mod document;
pub mod element;
pub mod error;
pub mod html;
pub mod types;

pub use document::{Document, NodeId};
pub use element::{find_element, Content, Element};
pub use error::DomError;
pub use html::escape;
pub use types::*;
