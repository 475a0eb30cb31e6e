// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! [`DocumentPort`] over the live DOM.

use a11y_widget::document::{DocumentError, DocumentPort, ElementId, ElementSpec, Parent};
use std::collections::HashMap;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Node, Window};

/// The host page, with handles to every element the widget created.
///
/// The document root the widget styles is `<body>`.
pub struct WebDocument {
    window: Window,
    document: Document,
    root: HtmlElement,
    elements: HashMap<ElementId, Element>,
}

impl WebDocument {
    /// Bind to the current window's document.
    pub fn from_window() -> Result<Self, DocumentError> {
        let window = web_sys::window().ok_or(DocumentError::MissingRoot)?;
        let document = window.document().ok_or(DocumentError::MissingRoot)?;
        let root = document.body().ok_or(DocumentError::MissingRoot)?;
        Ok(Self {
            window,
            document,
            root,
            elements: HashMap::new(),
        })
    }

    /// The underlying DOM document (event listeners attach here).
    pub fn dom(&self) -> &Document {
        &self.document
    }

    /// Whether `target` lies inside the panel or the toggle.
    pub fn inside_widget(&self, target: &Node) -> bool {
        [ElementId::Panel, ElementId::Toggle]
            .into_iter()
            .filter_map(|id| self.elements.get(&id))
            .any(|el| el.contains(Some(target)))
    }

    fn parent(&self, parent: Parent) -> Result<Node, DocumentError> {
        match parent {
            Parent::Body | Parent::BodyStart => Ok(Node::from(self.root.clone())),
            Parent::Element(id) => self
                .elements
                .get(&id)
                .map(|el| Node::from(el.clone()))
                .ok_or(DocumentError::MissingParent(id)),
        }
    }

    fn build(&self, spec: &ElementSpec) -> Result<Element, JsValue> {
        let el = match spec.tag.namespace() {
            Some(ns) => self.document.create_element_ns(Some(ns), spec.tag.name())?,
            None => self.document.create_element(spec.tag.name())?,
        };
        el.set_id(&spec.id.dom_id());
        for class in &spec.classes {
            el.class_list().add_1(class)?;
        }
        for (name, value) in &spec.attributes {
            el.set_attribute(name, value)?;
        }
        if let Some(text) = &spec.text {
            el.set_text_content(Some(text));
        }
        Ok(el)
    }

    fn html(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements.get(&id).and_then(|el| el.dyn_ref::<HtmlElement>())
    }
}

fn host(err: &JsValue) -> DocumentError {
    DocumentError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn report(what: &str, id: ElementId, result: Result<(), JsValue>) {
    if let Err(err) = result {
        debug!(?id, ?err, "{what} failed");
    }
}

impl DocumentPort for WebDocument {
    fn mount(&mut self, spec: &ElementSpec) -> Result<(), DocumentError> {
        let parent = self.parent(spec.parent)?;
        let el = self.build(spec).map_err(|e| host(&e))?;
        let inserted = match spec.parent {
            Parent::BodyStart => parent.insert_before(&el, parent.first_child().as_ref()),
            Parent::Body | Parent::Element(_) => parent.append_child(&el),
        };
        inserted.map_err(|e| host(&e))?;
        if let Some(stale) = self.elements.insert(spec.id, el) {
            stale.remove();
        }
        Ok(())
    }

    fn remove(&mut self, id: ElementId) {
        if let Some(el) = self.elements.remove(&id) {
            el.remove();
        }
    }

    fn set_root_class(&mut self, class: &str, on: bool) {
        let result = self.root.class_list().toggle_with_force(class, on).map(drop);
        if let Err(err) = result {
            debug!(class, ?err, "root class update failed");
        }
    }

    fn set_root_style(&mut self, property: &str, value: &str) {
        if let Err(err) = self.root.style().set_property(property, value) {
            debug!(property, ?err, "root style update failed");
        }
    }

    fn set_class(&mut self, id: ElementId, class: &str, on: bool) {
        if let Some(el) = self.elements.get(&id) {
            report("class", id, el.class_list().toggle_with_force(class, on).map(drop));
        }
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(el) = self.elements.get(&id) {
            report("attribute", id, el.set_attribute(name, value));
        }
    }

    fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(el) = self.html(id) {
            report("style", id, el.style().set_property(property, value));
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(el) = self.elements.get(&id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_value(&mut self, id: ElementId, value: &str) {
        if let Some(input) = self
            .elements
            .get(&id)
            .and_then(|el| el.dyn_ref::<HtmlInputElement>())
        {
            input.set_value(value);
        }
    }

    fn focus(&mut self, id: ElementId) {
        if let Some(el) = self.html(id) {
            report("focus", id, el.focus());
        }
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }
}
