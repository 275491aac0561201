//! Arena-backed DOM used by tests and the headless preview.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use portfolio_core::Rect;
use portfolio_events::{EventKind, ListenerRegistry, Subscription, UiEvent};

use crate::dom::{EventHandler, RenderTarget};
use crate::memory::selector::{Compound, Selector};

/// Handle to a node of a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "input", "meta", "link"];

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
enum Content {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    content: Content,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Rect,
}

impl NodeData {
    fn element(&self) -> Option<&Element> {
        match &self.content {
            Content::Element(el) => Some(el),
            Content::Text(_) => None,
        }
    }

    fn element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.content {
            Content::Element(el) => Some(el),
            Content::Text(_) => None,
        }
    }
}

/// In-memory document.
///
/// - Single-threaded (`RefCell` interior)
/// - `<template>` content is not visible to document queries
/// - Events do not bubble: [`MemoryDom::dispatch`] reaches the target's own
///   listeners only
/// - Layout is whatever the caller sets with [`MemoryDom::set_rect`]
#[derive(Debug)]
pub struct MemoryDom {
    nodes: RefCell<Vec<NodeData>>,
    root: NodeId,
    title: RefCell<String>,
    listeners: RefCell<HashMap<(NodeId, EventKind), ListenerRegistry<UiEvent>>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty document whose root is a `<body>` element.
    pub fn new() -> Self {
        let body = NodeData {
            content: Content::Element(Element {
                tag: "body".to_string(),
                ..Element::default()
            }),
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
        };
        Self {
            nodes: RefCell::new(vec![body]),
            root: NodeId(0),
            title: RefCell::new(String::new()),
            listeners: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_title(title: &str) -> Self {
        let dom = Self::new();
        dom.set_title(title);
        dom
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create `<tag class="classes">` and append it to `parent`.
    pub fn add(&self, parent: NodeId, tag: &str, classes: &str) -> NodeId {
        let node = self.new_element(tag);
        for class in classes.split_whitespace() {
            self.add_class(&node, class);
        }
        self.append_child(&parent, &node);
        node
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow()[node.0].element().map(|el| el.tag.clone())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        self.nodes.borrow_mut()[node.0].rect = rect;
    }

    /// Deliver `event` to the listeners registered on `node` for its kind.
    ///
    /// Returns the event so callers can inspect `default_prevented`.
    pub fn dispatch(&self, node: NodeId, event: UiEvent) -> UiEvent {
        let registry = self.listeners.borrow().get(&(node, event.kind())).cloned();
        if let Some(registry) = registry {
            registry.emit(&event);
        }
        event
    }

    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .get(&(node, kind))
            .map_or(0, ListenerRegistry::len)
    }

    /// Serialize `node` and its subtree as HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        write_html(&nodes, node, &mut out);
        out
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        collect_descendants(&nodes, scope, &mut out);
        out
    }

    fn select(&self, scope: NodeId, selector: &str, first_only: bool) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            tracing::warn!(selector, "unsupported selector");
            return Vec::new();
        };

        let candidates = self.descendants(scope);
        let nodes = self.nodes.borrow();
        let mut found = Vec::new();
        for id in candidates {
            if matches_selector(&nodes, id, &selector) {
                found.push(id);
                if first_only {
                    break;
                }
            }
        }
        found
    }

    fn with_element<R>(&self, node: &NodeId, f: impl FnOnce(&Element) -> R) -> Option<R> {
        self.nodes.borrow()[node.0].element().map(f)
    }

    fn with_element_mut(&self, node: &NodeId, f: impl FnOnce(&mut Element)) {
        if let Some(el) = self.nodes.borrow_mut()[node.0].element_mut() {
            f(el);
        }
    }

    fn new_element(&self, tag: &str) -> NodeId {
        self.push_node(Content::Element(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        }))
    }

    fn push_node(&self, content: Content) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(NodeData {
            content,
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
        });
        id
    }
}

impl RenderTarget for MemoryDom {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.select(self.root, selector, true).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.root, selector, false)
    }

    fn query_in(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        self.select(*scope, selector, true).into_iter().next()
    }

    fn query_all_in(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        self.select(*scope, selector, false)
    }

    fn matches(&self, node: &NodeId, selector: &str) -> bool {
        match Selector::parse(selector) {
            Some(selector) => matches_selector(&self.nodes.borrow(), *node, &selector),
            None => false,
        }
    }

    fn instantiate_template(&self, template: &NodeId) -> Vec<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        let roots: Vec<NodeId> = nodes[template.0]
            .children
            .iter()
            .copied()
            .filter(|c| nodes[c.0].element().is_some())
            .collect();
        roots
            .into_iter()
            .map(|root| clone_subtree(&mut nodes, root, None))
            .collect()
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.new_element(tag))
    }

    fn text(&self, node: &NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        collect_text(&nodes, *node, &mut out);
        out
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        let is_text = {
            let mut nodes = self.nodes.borrow_mut();
            match &mut nodes[node.0].content {
                Content::Text(existing) => {
                    *existing = text.to_string();
                    true
                }
                Content::Element(_) => false,
            }
        };
        if !is_text {
            self.clear_children(node);
            self.append_text(node, text);
        }
    }

    fn append_text(&self, parent: &NodeId, text: &str) {
        let child = self.push_node(Content::Text(text.to_string()));
        self.append_child(parent, &child);
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.with_element(node, |el| match name {
            "class" => (!el.classes.is_empty()).then(|| el.classes.join(" ")),
            "style" => (!el.styles.is_empty()).then(|| render_styles(&el.styles)),
            _ => el.attributes.get(name).cloned(),
        })
        .flatten()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.with_element_mut(node, |el| match name {
            "class" => {
                el.classes.clear();
                for class in value.split_whitespace() {
                    if !el.classes.iter().any(|c| c == class) {
                        el.classes.push(class.to_string());
                    }
                }
            }
            "style" => {
                el.styles = value
                    .split(';')
                    .filter_map(|decl| decl.split_once(':'))
                    .map(|(p, v)| (p.trim().to_string(), v.trim().to_string()))
                    .filter(|(p, v)| !p.is_empty() && !v.is_empty())
                    .collect();
            }
            _ => {
                el.attributes.insert(name.to_string(), value.to_string());
            }
        });
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.with_element(node, |el| el.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.with_element_mut(node, |el| {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.with_element_mut(node, |el| el.classes.retain(|c| c != class));
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.with_element(node, |el| {
            el.styles
                .iter()
                .find(|(p, _)| p == property)
                .map(|(_, v)| v.clone())
        })
        .flatten()
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_element_mut(node, |el| {
            if value.is_empty() {
                el.styles.retain(|(p, _)| p != property);
            } else if let Some(slot) = el.styles.iter_mut().find(|(p, _)| p == property) {
                slot.1 = value.to_string();
            } else {
                el.styles.push((property.to_string(), value.to_string()));
            }
        });
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(old) = nodes[child.0].parent {
            nodes[old.0].children.retain(|c| c != child);
        }
        nodes[child.0].parent = Some(*parent);
        nodes[parent.0].children.push(*child);
    }

    fn clear_children(&self, node: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let children = std::mem::take(&mut nodes[node.0].children);
        for child in children {
            nodes[child.0].parent = None;
        }
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        nodes[node.0]
            .children
            .iter()
            .copied()
            .filter(|c| nodes[c.0].element().is_some())
            .collect()
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        self.nodes.borrow()[node.0].rect
    }

    fn title(&self) -> String {
        self.title.borrow().clone()
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    fn listen(&self, node: &NodeId, kind: EventKind, handler: EventHandler) -> Subscription {
        let registry = self
            .listeners
            .borrow_mut()
            .entry((*node, kind))
            .or_default()
            .clone();
        registry.subscribe(handler)
    }
}

fn collect_descendants(nodes: &[NodeData], scope: NodeId, out: &mut Vec<NodeId>) {
    for &child in &nodes[scope.0].children {
        if nodes[child.0].element().is_none() {
            continue;
        }
        out.push(child);
        if nodes[child.0].element().is_some_and(|el| el.tag == "template") {
            continue;
        }
        collect_descendants(nodes, child, out);
    }
}

fn collect_text(nodes: &[NodeData], node: NodeId, out: &mut String) {
    match &nodes[node.0].content {
        Content::Text(text) => out.push_str(text),
        Content::Element(_) => {
            for &child in &nodes[node.0].children {
                collect_text(nodes, child, out);
            }
        }
    }
}

fn clone_subtree(nodes: &mut Vec<NodeData>, source: NodeId, parent: Option<NodeId>) -> NodeId {
    let data = nodes[source.0].clone();
    let id = NodeId(nodes.len());
    nodes.push(NodeData {
        content: data.content,
        parent,
        children: Vec::new(),
        rect: data.rect,
    });
    for child in data.children {
        let copy = clone_subtree(nodes, child, Some(id));
        nodes[id.0].children.push(copy);
    }
    id
}

fn compound_matches(nodes: &[NodeData], node: NodeId, compound: &Compound) -> bool {
    let Some(el) = nodes[node.0].element() else {
        return false;
    };
    if compound.tag.as_ref().is_some_and(|tag| *tag != el.tag) {
        return false;
    }
    if let Some(id) = &compound.id {
        if el.attributes.get("id") != Some(id) {
            return false;
        }
    }
    if !compound
        .classes
        .iter()
        .all(|class| el.classes.iter().any(|c| c == class))
    {
        return false;
    }
    compound.attributes.iter().all(|(name, value)| {
        let actual = match name.as_str() {
            "class" => (!el.classes.is_empty()).then(|| el.classes.join(" ")),
            _ => el.attributes.get(name).cloned(),
        };
        match (actual, value) {
            (Some(actual), Some(expected)) => actual == *expected,
            (Some(_), None) => true,
            (None, _) => false,
        }
    })
}

/// Right-to-left descendant matching.
fn matches_selector(nodes: &[NodeData], node: NodeId, selector: &Selector) -> bool {
    let Some((last, mut remaining)) = selector.parts.split_last() else {
        return false;
    };
    if !compound_matches(nodes, node, last) {
        return false;
    }

    let mut current = nodes[node.0].parent;
    while let Some((wanted, before)) = remaining.split_last() {
        loop {
            let Some(ancestor) = current else {
                return false;
            };
            current = nodes[ancestor.0].parent;
            if compound_matches(nodes, ancestor, wanted) {
                break;
            }
        }
        remaining = before;
    }
    true
}

fn render_styles(styles: &[(String, String)]) -> String {
    styles
        .iter()
        .map(|(p, v)| format!("{p}: {v};"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_html(nodes: &[NodeData], node: NodeId, out: &mut String) {
    let data = &nodes[node.0];
    let el = match &data.content {
        Content::Text(text) => {
            out.push_str(&escape(text, false));
            return;
        }
        Content::Element(el) => el,
    };

    out.push('<');
    out.push_str(&el.tag);
    if let Some(id) = el.attributes.get("id") {
        out.push_str(&format!(" id=\"{}\"", escape(id, true)));
    }
    if !el.classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape(&el.classes.join(" "), true)));
    }
    for (name, value) in el.attributes.iter().filter(|(n, _)| n.as_str() != "id") {
        out.push_str(&format!(" {}=\"{}\"", name, escape(value, true)));
    }
    if !el.styles.is_empty() {
        out.push_str(&format!(" style=\"{}\"", escape(&render_styles(&el.styles), true)));
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag.as_str()) {
        return;
    }
    for &child in &data.children {
        write_html(nodes, child, out);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}
