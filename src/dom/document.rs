//! Document arena - node storage, tree edits, attributes, and dispatch.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::DomError;
use super::events::{Event, EventCallback, ListenerId};

/// Tags that ignore `click` while carrying the `disabled` attribute.
const DISABLEABLE_TAGS: &[&str] = &["button", "input", "select", "textarea"];

// =============================================================================
// Node ID
// =============================================================================

/// Generational handle to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

// =============================================================================
// Node Data
// =============================================================================

/// Element payload: tag plus ordered attributes, classes and inline styles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub classes: Vec<String>,
    pub styles: Vec<(String, String)>,
}

/// What a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The single document root.
    Document,
    Element(Element),
    Text(String),
    /// Trusted markup, emitted verbatim by the renderer.
    ///
    /// This is an injection boundary: whoever builds a markup node is
    /// responsible for sanitizing externally sourced strings first.
    Markup(String),
}

struct Listener {
    id: ListenerId,
    event: String,
    callback: EventCallback,
}

struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<Listener>,
}

struct Slot {
    generation: u32,
    node: Option<NodeData>,
}

// =============================================================================
// Document
// =============================================================================

/// The node tree plus its listener tables and loaded stylesheets.
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    next_listener: u64,
    stylesheet_base: String,
    loaded_styles: BTreeSet<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.node_count())
            .field("loaded_styles", &self.loaded_styles)
            .finish()
    }
}

impl Document {
    /// Create an empty document with `head` and `body`.
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId { index: 0, generation: 0 },
            head: NodeId { index: 0, generation: 0 },
            body: NodeId { index: 0, generation: 0 },
            next_listener: 0,
            stylesheet_base: crate::config::DEFAULT_STYLESHEET_BASE.to_string(),
            loaded_styles: BTreeSet::new(),
        };
        doc.root = doc.alloc(NodeKind::Document);
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        let (root, head, body) = (doc.root, doc.head, doc.body);
        doc.link(root, head);
        doc.link(root, body);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let data = NodeData {
            kind,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(data);
            NodeId { index, generation: slot.generation }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot { generation: 0, node: Some(data) });
            NodeId { index, generation: 0 }
        }
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index as usize) {
            if slot.generation == id.generation && slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
            }
        }
    }

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn data_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(DomError::StaleNode(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        match &mut self.data_mut(id)?.kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    /// Attach without checks. Only used while building the skeleton.
    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Ok(data) = self.data_mut(child) {
            data.parent = Some(parent);
        }
        if let Ok(data) = self.data_mut(parent) {
            data.children.push(child);
        }
    }

    /// Does the node still exist?
    pub fn contains(&self, id: NodeId) -> bool {
        self.data(id).is_some()
    }

    // =========================================================================
    // Creation
    // =========================================================================

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        }))
    }

    /// Element with classes and optional text child in one call.
    pub fn create(&mut self, tag: &str, class: &str, text: Option<&str>) -> NodeId {
        let id = self.create_element(tag);
        if let Ok(element) = self.element_mut(id) {
            push_classes(element, class);
        }
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            let text = self.create_text(text);
            self.link(id, text);
        }
        id
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    /// Create a trusted markup node. See [`NodeKind::Markup`].
    pub fn create_markup(&mut self, html: &str) -> NodeId {
        self.alloc(NodeKind::Markup(html.to_string()))
    }

    // =========================================================================
    // Tree Structure
    // =========================================================================

    /// Append `child` as the last child of `parent`, moving it if attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if !self.contains(child) {
            return Err(DomError::StaleNode(child));
        }
        match self.data(parent).map(|data| &data.kind) {
            None => return Err(DomError::StaleNode(parent)),
            Some(NodeKind::Element(_)) | Some(NodeKind::Document) => {}
            Some(_) => return Err(DomError::NotAnElement(parent)),
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        self.detach(child);
        self.link(parent, child);
        Ok(())
    }

    /// Remove the node from its parent. Returns false if it had none.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if let Ok(data) = self.data_mut(parent) {
            data.children.retain(|&child| child != id);
        }
        if let Ok(data) = self.data_mut(id) {
            data.parent = None;
        }
        true
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).and_then(|data| data.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.data(id).map(|data| data.children.as_slice()).unwrap_or(&[])
    }

    /// All descendants in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Is `ancestor` a strict ancestor of `node`?
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Is the node reachable from the document root?
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == self.root || self.is_ancestor(self.root, id)
    }

    /// Node count of the subtree rooted at `id` (0 for a freed node).
    pub fn subtree_size(&self, id: NodeId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        1 + self.descendants(id).len()
    }

    /// Free the subtree rooted at `id`.
    ///
    /// Descendants for which `keep` returns true are detached instead of
    /// freed and survive as parentless roots (with their own subtrees).
    /// Returns the number of freed nodes.
    pub fn remove_subtree(&mut self, id: NodeId, keep: impl Fn(NodeId) -> bool) -> usize {
        if !self.contains(id) || id == self.root {
            return 0;
        }
        self.detach(id);
        let mut freed = 0;
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            let children = self.children(node).to_vec();
            for child in children {
                if keep(child) {
                    self.detach(child);
                } else {
                    stack.push(child);
                }
            }
            self.release(node);
            freed += 1;
        }
        freed
    }

    /// Free every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) -> usize {
        let children = self.children(id).to_vec();
        children
            .into_iter()
            .map(|child| self.remove_subtree(child, |_| false))
            .sum()
    }

    // =========================================================================
    // Node Content
    // =========================================================================

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.data(id).map(|data| &data.kind)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id)? {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.tag.as_str())
    }

    /// Concatenated text of the subtree (markup contributes its raw source).
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let nodes = std::iter::once(id).chain(self.descendants(id));
        for node in nodes {
            match self.kind(node) {
                Some(NodeKind::Text(text)) | Some(NodeKind::Markup(text)) => out.push_str(text),
                _ => {}
            }
        }
        out
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        self.element_mut(id)?;
        self.clear_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.link(id, node);
        }
        Ok(())
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Set an attribute. `class` replaces the class list.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        if name == "class" {
            element.classes.clear();
            push_classes(element, value);
            return Ok(());
        }
        match element.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => element.attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    /// Set or clear a boolean attribute such as `disabled` or `checked`.
    pub fn set_flag(&mut self, id: NodeId, name: &str, on: bool) -> Result<(), DomError> {
        if on {
            self.set_attribute(id, name, "")
        } else {
            self.element_mut(id)?;
            self.remove_attribute(id, name);
            Ok(())
        }
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        let Ok(element) = self.element_mut(id) else {
            return false;
        };
        let before = element.attributes.len();
        element.attributes.retain(|(key, _)| key != name);
        element.attributes.len() != before
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Add one or more whitespace-separated classes (duplicates skipped).
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        push_classes(self.element_mut(id)?, class);
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        let Ok(element) = self.element_mut(id) else {
            return false;
        };
        let before = element.classes.len();
        element.classes.retain(|existing| existing != class);
        element.classes.len() != before
    }

    /// Flip a class. Returns whether the class is now present.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> Result<bool, DomError> {
        let element = self.element_mut(id)?;
        if let Some(pos) = element.classes.iter().position(|existing| existing == class) {
            element.classes.remove(pos);
            Ok(false)
        } else {
            element.classes.push(class.to_string());
            Ok(true)
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|element| element.classes.iter().any(|existing| existing == class))
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        self.element(id).map(|element| element.classes.as_slice()).unwrap_or(&[])
    }

    // =========================================================================
    // Inline Styles
    // =========================================================================

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        match element.styles.iter_mut().find(|(key, _)| key == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => element.styles.push((property.to_string(), value.to_string())),
        }
        Ok(())
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id)?
            .styles
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.as_str())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Descendants of `id` matching `predicate`, in document order.
    pub fn find_all(&self, id: NodeId, predicate: impl Fn(&Self, NodeId) -> bool) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&node| predicate(self, node))
            .collect()
    }

    /// First descendant of `id` matching `predicate`.
    pub fn find_first(&self, id: NodeId, predicate: impl Fn(&Self, NodeId) -> bool) -> Option<NodeId> {
        self.descendants(id).into_iter().find(|&node| predicate(self, node))
    }

    pub fn find_by_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.find_first(id, |doc, node| doc.tag(node) == Some(tag))
    }

    pub fn find_by_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.find_first(id, |doc, node| doc.has_class(node, class))
    }

    pub fn find_all_by_class(&self, id: NodeId, class: &str) -> Vec<NodeId> {
        self.find_all(id, |doc, node| doc.has_class(node, class))
    }

    /// Descendants carrying attribute `name`.
    pub fn find_all_with_attribute(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.find_all(id, |doc, node| doc.has_attribute(node, name))
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn add_listener(
        &mut self,
        id: NodeId,
        event: &str,
        callback: EventCallback,
    ) -> Result<ListenerId, DomError> {
        let listener_id = ListenerId(self.next_listener);
        let data = self.data_mut(id)?;
        data.listeners.push(Listener {
            id: listener_id,
            event: event.to_string(),
            callback,
        });
        self.next_listener += 1;
        Ok(listener_id)
    }

    pub fn remove_listener(&mut self, id: NodeId, listener: ListenerId) -> bool {
        let Ok(data) = self.data_mut(id) else {
            return false;
        };
        let before = data.listeners.len();
        data.listeners.retain(|existing| existing.id != listener);
        data.listeners.len() != before
    }

    /// Listeners attached directly to `id`.
    pub fn listener_count(&self, id: NodeId) -> usize {
        self.data(id).map(|data| data.listeners.len()).unwrap_or(0)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Dispatch a bubbling event with no payload.
    pub fn dispatch(&mut self, target: NodeId, name: &str) -> Event {
        self.dispatch_event(Event::new(name, target))
    }

    /// Run listeners on the target, then on each ancestor while the event
    /// bubbles and propagation has not been stopped.
    ///
    /// Listeners are snapshotted per node before they run, so a listener
    /// may add or remove listeners (or nodes) freely.
    pub fn dispatch_event(&mut self, mut event: Event) -> Event {
        let target = event.target;
        if event.name == "click" && self.is_disabled_control(target) {
            return event;
        }

        let mut path = vec![target];
        if event.bubbles {
            let mut current = self.parent(target);
            while let Some(node) = current {
                path.push(node);
                current = self.parent(node);
            }
        }

        for node in path {
            let callbacks: Vec<EventCallback> = match self.data(node) {
                Some(data) => data
                    .listeners
                    .iter()
                    .filter(|listener| listener.event == event.name)
                    .map(|listener| listener.callback.clone())
                    .collect(),
                None => continue,
            };
            event.current_target = node;
            for callback in callbacks {
                event.record_invocation();
                callback(self, &mut event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        event
    }

    fn is_disabled_control(&self, id: NodeId) -> bool {
        self.tag(id).is_some_and(|tag| DISABLEABLE_TAGS.contains(&tag))
            && self.has_attribute(id, "disabled")
    }

    // =========================================================================
    // Stylesheets
    // =========================================================================

    /// Base path used for component stylesheet links.
    pub fn set_stylesheet_base(&mut self, base: &str) {
        self.stylesheet_base = base.trim_end_matches('/').to_string();
    }

    /// Link the stylesheet for a component type into `head` once.
    ///
    /// Returns true when the link was added by this call.
    pub fn ensure_stylesheet(&mut self, component_type: &str) -> bool {
        if self.loaded_styles.contains(component_type) {
            return false;
        }
        let link = self.create_element("link");
        let href = format!("{}/{}.css", self.stylesheet_base, component_type);
        if let Ok(element) = self.element_mut(link) {
            element.attributes.push(("rel".into(), "stylesheet".into()));
            element.attributes.push(("href".into(), href));
            element
                .attributes
                .push(("data-component-styles".into(), component_type.to_string()));
        }
        let head = self.head;
        self.link(head, link);
        self.loaded_styles.insert(component_type.to_string());
        true
    }

    pub fn has_stylesheet(&self, component_type: &str) -> bool {
        self.loaded_styles.contains(component_type)
    }
}

fn push_classes(element: &mut Element, classes: &str) {
    for class in classes.split_whitespace() {
        if !element.classes.iter().any(|existing| existing == class) {
            element.classes.push(class.to_string());
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
