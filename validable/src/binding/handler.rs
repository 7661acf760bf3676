use formdom::{Display, Document, DomError, NodeId};

use crate::error::BindError;
use crate::reactive::{Observable, ReadSignal};
use crate::validation::Validable;

/// A value that can be bound to an element.
pub trait Bindable: Send + Sync {
    /// The error message to render, if the value carries one.
    fn error_message(&self) -> Option<ReadSignal<Option<String>>> {
        None
    }
}

impl<T: Clone + Send + Sync + 'static> Bindable for Validable<T> {
    fn error_message(&self) -> Option<ReadSignal<Option<String>>> {
        Some(self.error_message_signal().clone().into())
    }
}

/// Plain values have nothing to render; binding them is a no-op.
impl<T: Clone + Send + Sync + 'static> Bindable for Observable<T> {}

/// Installs behaviour on an element of a document.
pub trait BindingHandler: Send + Sync {
    fn init(&self, document: &Document, element: NodeId, value: &dyn Bindable)
    -> Result<(), BindError>;
}

/// How the error message is written into the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelContent {
    /// As text, escaped on output.
    #[default]
    Text,
    /// As raw markup. Only for trusted message sources.
    RawHtml,
}

/// The `validate` binding.
///
/// On init it requires the element to have a parent, inserts a hidden
/// `<label class="error">` as its next sibling and subscribes to the bound
/// value's error message: a non-empty message shows the label with that
/// text, an empty one hides it. The subscription is released when the
/// element is removed from the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateHandler {
    pub content: LabelContent,
    /// Render the current message right away instead of waiting for the
    /// next change.
    pub render_initial: bool,
}

impl ValidateHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: LabelContent) -> Self {
        self.content = content;
        self
    }

    pub fn render_initial(mut self, render_initial: bool) -> Self {
        self.render_initial = render_initial;
        self
    }
}

fn render(
    document: &Document,
    label: NodeId,
    content: LabelContent,
    message: Option<&str>,
) -> Result<(), DomError> {
    match message {
        Some(message) if !message.is_empty() => {
            document.set_display(label, Display::Block)?;
            match content {
                LabelContent::Text => document.set_text(label, message),
                LabelContent::RawHtml => document.set_html(label, message),
            }
        }
        _ => document.set_display(label, Display::None),
    }
}

impl BindingHandler for ValidateHandler {
    fn init(
        &self,
        document: &Document,
        element: NodeId,
        value: &dyn Bindable,
    ) -> Result<(), BindError> {
        if document.parent(element).is_none() {
            return Err(BindError::Detached(element));
        }

        let label = document.create_element("label");
        document.set_class(label, "error")?;
        document.set_display(label, Display::None)?;
        document.insert_after(element, label)?;

        let Some(error_message) = value.error_message() else {
            log::debug!("[binding] {element} has no error message, label stays hidden");
            return Ok(());
        };

        if self.render_initial {
            render(document, label, self.content, error_message.peek().as_deref())?;
        }

        let content = self.content;
        let target = document.clone();
        let subscription = error_message.subscribe(move |message: &Option<String>| {
            if let Err(err) = render(&target, label, content, message.as_deref()) {
                log::warn!("[binding] failed to update error label {label}: {err}");
            }
        });

        document.on_dispose(element, move || {
            subscription.dispose();
            log::debug!("[binding] released error label subscription for {element}");
        })?;

        log::debug!("[binding] validate bound to {element}, label {label}");
        Ok(())
    }
}
