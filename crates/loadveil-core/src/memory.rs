//! In-memory host surface.
//!
//! A minimal document tree with a single root (the "body"). Nodes live in a
//! slab and are addressed by [`NodeId`]. Removing an element frees its whole
//! subtree and the slots are reused by later builds; each reuse bumps the
//! slot generation, so handles to removed nodes resolve to nothing instead of
//! aliasing a newer node. Unknown or stale handles are ignored by every
//! operation.

use std::cell::RefCell;

use crate::error::Result;
use crate::markup::ElementSpec;
use crate::surface::Surface;

/// Handle to a node of a [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

const ROOT: NodeId = NodeId {
    index: 0,
    generation: 0,
};

#[derive(Debug, Default)]
struct Node {
    tag: String,
    id: Option<String>,
    class: Option<String>,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug)]
struct Tree {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl Tree {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index: self.slots.len() - 1,
                generation: 0,
            }
        }
    }

    fn insert(&mut self, spec: &ElementSpec, parent: Option<NodeId>) -> NodeId {
        let id = self.alloc(Node {
            tag: spec.tag.clone(),
            id: spec.id.clone(),
            class: spec.class.clone(),
            attributes: spec.attributes.clone(),
            text: spec.text.clone(),
            children: Vec::new(),
            parent,
        });
        for child in &spec.children {
            let child_id = self.insert(child, Some(id));
            if let Some(node) = self.node_mut(id) {
                node.children.push(child_id);
            }
        }
        id
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node_mut(id).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|child| *child != id);
        }
    }

    /// Release `id` and all of its descendants. The caller detaches first.
    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if current == ROOT {
                continue;
            }
            let Some(node) = self
                .slots
                .get_mut(current.index)
                .filter(|slot| slot.generation == current.generation)
                .and_then(|slot| slot.node.take())
            else {
                continue;
            };
            stack.extend(node.children);
            self.free.push(current.index);
        }
    }

    /// Pre-order traversal of the subtree rooted at `start`.
    fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                order.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    fn text_content(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let Some(text) = &node.text {
            out.push_str(text);
        }
        for child in &node.children {
            self.text_content(*child, out);
        }
    }

    fn live_nodes(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

/// Host surface backed by an in-memory tree.
#[derive(Debug)]
pub struct MemorySurface {
    tree: RefCell<Tree>,
}

impl MemorySurface {
    /// Create a surface holding only an empty root.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            tag: "body".to_string(),
            ..Node::default()
        };
        Self {
            tree: RefCell::new(Tree {
                slots: vec![Slot {
                    generation: 0,
                    node: Some(root),
                }],
                free: Vec::new(),
            }),
        }
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        ROOT
    }

    /// Direct children of the root, in order.
    pub fn root_children(&self) -> Vec<NodeId> {
        self.tree
            .borrow()
            .node(ROOT)
            .map(|root| root.children.clone())
            .unwrap_or_default()
    }

    /// Number of live nodes, root included, attached or not.
    pub fn node_count(&self) -> usize {
        self.tree.borrow().live_nodes()
    }

    /// Number of attached elements with the given id.
    pub fn count_by_id(&self, id: &str) -> usize {
        let tree = self.tree.borrow();
        tree.descendants(ROOT)
            .into_iter()
            .filter(|node| tree.node(*node).and_then(|n| n.id.as_deref()) == Some(id))
            .count()
    }

    /// Concatenated text of `node` and its descendants. Empty for unknown
    /// nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree.borrow().text_content(node, &mut out);
        out
    }

    /// Tag name of `node`.
    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.tree.borrow().node(node).map(|n| n.tag.clone())
    }

    /// Class list of `node`.
    pub fn class_name(&self, node: NodeId) -> Option<String> {
        self.tree.borrow().node(node).and_then(|n| n.class.clone())
    }

    /// Attribute value of `node`.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree.borrow().node(node).and_then(|n| {
            n.attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        })
    }

    /// Whether `node` is live and reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let tree = self.tree.borrow();
        let mut current = node;
        loop {
            if current == ROOT {
                return true;
            }
            match tree.node(current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MemorySurface {
    type Element = NodeId;

    fn build(&self, spec: &ElementSpec) -> Result<NodeId> {
        Ok(self.tree.borrow_mut().insert(spec, None))
    }

    fn append_to_root(&self, element: &NodeId) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        if *element == ROOT || tree.node(*element).is_none() {
            return Ok(());
        }
        tree.detach(*element);
        if let Some(node) = tree.node_mut(*element) {
            node.parent = Some(ROOT);
        }
        if let Some(root) = tree.node_mut(ROOT) {
            root.children.push(*element);
        }
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        // Like getElementById, the empty id never matches.
        if id.is_empty() {
            return None;
        }
        let tree = self.tree.borrow();
        tree.descendants(ROOT)
            .into_iter()
            .find(|node| tree.node(*node).and_then(|n| n.id.as_deref()) == Some(id))
    }

    fn find_marked(&self, within: &NodeId, marker: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(*within).into_iter().find(|node| {
            tree.node(*node)
                .is_some_and(|n| n.attributes.iter().any(|(key, _)| key == marker))
        })
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(node) = tree.node_mut(*element) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        node.text = Some(text.to_string());
        for child in children {
            if let Some(child_node) = tree.node_mut(child) {
                child_node.parent = None;
            }
            tree.free_subtree(child);
        }
    }

    fn remove(&self, element: &NodeId) {
        if *element == ROOT {
            return;
        }
        let mut tree = self.tree.borrow_mut();
        tree.detach(*element);
        tree.free_subtree(*element);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> ElementSpec {
        ElementSpec::new("div")
            .id("outer")
            .class("box")
            .child(ElementSpec::new("span").text("Hello, "))
            .child(
                ElementSpec::new("span")
                    .attr("data-marker", "")
                    .text("world"),
            )
    }

    #[test]
    fn test_new_surface_is_empty() {
        let surface = MemorySurface::new();
        assert!(surface.root_children().is_empty());
        assert_eq!(surface.tag(surface.root()).as_deref(), Some("body"));
        assert_eq!(surface.node_count(), 1);
    }

    #[test]
    fn test_built_element_is_detached_until_appended() {
        let surface = MemorySurface::new();
        let node = surface.build(&sample()).unwrap();
        assert!(!surface.is_attached(node));
        assert!(surface.find_by_id("outer").is_none());

        surface.append_to_root(&node).unwrap();
        assert!(surface.is_attached(node));
        assert_eq!(surface.find_by_id("outer"), Some(node));
        assert_eq!(surface.root_children(), vec![node]);
    }

    #[test]
    fn test_append_keeps_order() {
        let surface = MemorySurface::new();
        let first = surface.build(&ElementSpec::new("main")).unwrap();
        let second = surface.build(&sample()).unwrap();
        surface.append_to_root(&first).unwrap();
        surface.append_to_root(&second).unwrap();
        assert_eq!(surface.root_children(), vec![first, second]);
    }

    #[test]
    fn test_text_content_and_attributes() {
        let surface = MemorySurface::new();
        let node = surface.build(&sample()).unwrap();
        assert_eq!(surface.text_content(node), "Hello, world");
        assert_eq!(surface.class_name(node).as_deref(), Some("box"));
        assert!(surface.attribute(node, "data-marker").is_none());
    }

    #[test]
    fn test_find_marked_within_subtree() {
        let surface = MemorySurface::new();
        let node = surface.build(&sample()).unwrap();
        let marked = surface.find_marked(&node, "data-marker").unwrap();
        assert_eq!(surface.text_content(marked), "world");
        assert_eq!(surface.attribute(marked, "data-marker").as_deref(), Some(""));

        let other = surface.build(&ElementSpec::new("p")).unwrap();
        assert!(surface.find_marked(&other, "data-marker").is_none());
    }

    #[test]
    fn test_set_text_replaces_and_frees_children() {
        let surface = MemorySurface::new();
        let node = surface.build(&sample()).unwrap();
        assert_eq!(surface.node_count(), 4);

        surface.set_text(&node, "replaced");
        assert_eq!(surface.text_content(node), "replaced");
        assert!(surface.find_marked(&node, "data-marker").is_none());
        assert_eq!(surface.node_count(), 2);
    }

    #[test]
    fn test_remove_detaches_and_frees() {
        let surface = MemorySurface::new();
        let node = surface.build(&sample()).unwrap();
        surface.append_to_root(&node).unwrap();
        surface.remove(&node);
        assert!(!surface.is_attached(node));
        assert_eq!(surface.count_by_id("outer"), 0);
        assert_eq!(surface.node_count(), 1);

        // Removing twice is harmless.
        surface.remove(&node);
        assert!(surface.root_children().is_empty());
        assert_eq!(surface.node_count(), 1);
    }

    #[test]
    fn test_freed_slots_are_reused_without_aliasing() {
        let surface = MemorySurface::new();
        let old = surface.build(&sample()).unwrap();
        surface.append_to_root(&old).unwrap();
        surface.remove(&old);

        let new = surface.build(&sample()).unwrap();
        surface.append_to_root(&new).unwrap();

        assert_ne!(old, new);
        assert_eq!(surface.node_count(), 4);
        assert!(!surface.is_attached(old));
        assert!(surface.is_attached(new));
        assert_eq!(surface.text_content(old), "");
        assert!(surface.tag(old).is_none());
    }

    #[test]
    fn test_node_count_bounded_over_build_remove_cycles() {
        let surface = MemorySurface::new();
        for _ in 0..500 {
            let node = surface.build(&sample()).unwrap();
            surface.append_to_root(&node).unwrap();
            surface.remove(&node);
        }
        assert_eq!(surface.node_count(), 1);
    }

    #[test]
    fn test_foreign_handles_are_ignored() {
        let big = MemorySurface::new();
        let foreign = (0..10)
            .map(|_| big.build(&sample()).unwrap())
            .collect::<Vec<_>>()
            .pop()
            .unwrap();

        let small = MemorySurface::new();
        assert_eq!(small.text_content(foreign), "");
        assert!(small.attribute(foreign, "data-marker").is_none());
        assert!(small.class_name(foreign).is_none());
        assert!(small.tag(foreign).is_none());
        assert!(!small.is_attached(foreign));
        assert!(small.find_marked(&foreign, "data-marker").is_none());
        small.set_text(&foreign, "ignored");
        small.append_to_root(&foreign).unwrap();
        small.remove(&foreign);
        assert!(small.root_children().is_empty());
        assert_eq!(small.node_count(), 1);
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let surface = MemorySurface::new();
        surface.remove(&surface.root());
        assert!(surface.is_attached(surface.root()));
    }

    #[test]
    fn test_empty_id_never_matches() {
        let surface = MemorySurface::new();
        let node = surface.build(&ElementSpec::new("div").id("")).unwrap();
        surface.append_to_root(&node).unwrap();
        assert!(surface.find_by_id("").is_none());
    }

    #[test]
    fn test_count_by_id_counts_duplicates() {
        let surface = MemorySurface::new();
        for _ in 0..3 {
            let node = surface.build(&sample()).unwrap();
            surface.append_to_root(&node).unwrap();
        }
        assert_eq!(surface.count_by_id("outer"), 3);
    }
}
