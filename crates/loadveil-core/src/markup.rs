//! Declarative element trees.
//!
//! The controller never writes markup strings. It describes the overlay as an
//! [`ElementSpec`] tree and lets the host surface build it, so the message is
//! always inserted as text and never parsed as HTML.

use crate::config::OverlayConfig;

/// Description of an element and its nested content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementSpec {
    /// Tag name, e.g. `div`.
    pub tag: String,
    /// Element id.
    pub id: Option<String>,
    /// Space-separated class list.
    pub class: Option<String>,
    /// Additional attributes in insertion order.
    pub attributes: Vec<(String, String)>,
    /// Text content, set before children are appended.
    pub text: Option<String>,
    /// Child elements.
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    /// Create an empty element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the element id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the class list. Empty class lists are dropped.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.class = (!class.trim().is_empty()).then_some(class);
        self
    }

    /// Add an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Depth-first search for the first element carrying `attribute`,
    /// including `self`.
    pub fn find_marked(&self, attribute: &str) -> Option<&Self> {
        if self.attribute(attribute).is_some() {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_marked(attribute))
    }
}

/// Build the overlay tree for `message`.
///
/// The root carries the reserved id and a `role="status"` live region so
/// assistive technology announces message changes. The spinner is hidden
/// from assistive technology.
pub fn overlay_tree(config: &OverlayConfig, message: &str) -> ElementSpec {
    let classes = &config.classes;

    let spinner = ElementSpec::new("div")
        .class(&classes.spinner)
        .attr("aria-hidden", "true")
        .child(ElementSpec::new("div").class(&classes.spinner_track))
        .child(ElementSpec::new("div").class(&classes.spinner_arc));

    let text = ElementSpec::new("div")
        .class(&classes.message)
        .attr(&config.message_marker, "")
        .text(message);

    ElementSpec::new("div")
        .id(&config.element_id)
        .class(&classes.overlay)
        .attr("role", "status")
        .attr("aria-live", "polite")
        .attr("aria-busy", "true")
        .child(
            ElementSpec::new("div")
                .class(&classes.panel)
                .child(spinner)
                .child(text),
        )
}
