//! Host surface abstraction.
//!
//! The surface is the page the overlay is drawn on. The controller only needs
//! to build an element tree, attach it to the root, find elements by id or by
//! marker attribute, replace text and detach elements.

use std::fmt::Debug;

use crate::error::Result;
use crate::markup::ElementSpec;

/// Operations the overlay controller needs from its host.
/// This trait allows for mocking in tests.
#[cfg_attr(test, mockall::automock(type Element = u32;))]
pub trait Surface {
    /// Handle to an element owned by the surface.
    type Element: Clone + PartialEq + Debug;

    /// Build an element tree from `spec` without attaching it.
    fn build(&self, spec: &ElementSpec) -> Result<Self::Element>;

    /// Attach `element` as the last child of the surface root.
    fn append_to_root(&self, element: &Self::Element) -> Result<()>;

    /// Find the first attached element with the given id.
    fn find_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Find the first element in the subtree of `within` (inclusive) that
    /// carries the `marker` attribute.
    fn find_marked(&self, within: &Self::Element, marker: &str) -> Option<Self::Element>;

    /// Replace the text content of `element`, dropping its children.
    fn set_text(&self, element: &Self::Element, text: &str);

    /// Detach `element` from the surface. Detached elements are ignored.
    fn remove(&self, element: &Self::Element);
}
