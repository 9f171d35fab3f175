//! Browser DOM host surface.

use loadveil_core::{ElementSpec, Error, Result, Surface};
use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

/// Host surface drawing on a `web_sys::Document`.
///
/// Overlays are attached to `document.body`.
#[derive(Debug, Clone)]
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    /// Wrap an existing document.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    /// Use the document of the global window.
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| Error::SurfaceUnavailable("no global window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::SurfaceUnavailable("window has no document".to_string()))?;
        Ok(Self::new(document))
    }

    /// The wrapped document.
    pub const fn document(&self) -> &Document {
        &self.document
    }
}

fn js_error(operation: &str, err: JsValue) -> Error {
    Error::Surface(format!("{operation} failed: {err:?}"))
}

impl Surface for DomSurface {
    type Element = Element;

    fn build(&self, spec: &ElementSpec) -> Result<Element> {
        let element = self
            .document
            .create_element(&spec.tag)
            .map_err(|e| js_error("createElement", e))?;

        if let Some(id) = &spec.id {
            element.set_id(id);
        }
        if let Some(class) = &spec.class {
            element.set_class_name(class);
        }
        for (name, value) in &spec.attributes {
            element
                .set_attribute(name, value)
                .map_err(|e| js_error("setAttribute", e))?;
        }
        // textContent, never innerHTML: messages are displayed verbatim.
        if let Some(text) = &spec.text {
            element.set_text_content(Some(text.as_str()));
        }
        for child in &spec.children {
            let child = self.build(child)?;
            element
                .append_child(&child)
                .map_err(|e| js_error("appendChild", e))?;
        }

        Ok(element)
    }

    fn append_to_root(&self, element: &Element) -> Result<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| Error::SurfaceUnavailable("document has no body".to_string()))?;
        body.append_child(element)
            .map_err(|e| js_error("appendChild", e))?;
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn find_marked(&self, within: &Element, marker: &str) -> Option<Element> {
        if within.has_attribute(marker) {
            return Some(within.clone());
        }
        match within.query_selector(&format!("[{marker}]")) {
            Ok(found) => found,
            Err(err) => {
                warn!(%marker, error = ?err, "Message marker is not a valid selector");
                None
            }
        }
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }
}
