// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Document port: the only way the widget touches the host page.
//!
//! The runtime never holds host nodes. It names elements by [`ElementId`],
//! asks the port to create them from an [`ElementSpec`], and afterwards only
//! flips classes, attributes, styles, text and focus on them. Browser hosts
//! implement the port over the DOM; [`MemoryDocument`] implements it in memory.

use a11y_app_core::prefs::{Feature, Section, Slider};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Every element the widget creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    /// "Skip to Main Content" link at the very start of the body.
    SkipLink,
    /// Floating button that opens the panel.
    Toggle,
    /// Pictogram inside the toggle.
    ToggleIcon,
    /// Outline of the toggle pictogram.
    ToggleIconPath,
    /// Settings dialog.
    Panel,
    /// Panel header row.
    PanelHeader,
    /// Panel heading.
    PanelTitle,
    /// Close control in the header.
    CloseButton,
    /// Scrollable panel body.
    PanelContent,
    /// Container of one panel section.
    Section(Section),
    /// Heading of one panel section.
    SectionTitle(Section),
    /// Button grid of one panel section.
    FeatureGrid(Section),
    /// Row holding one slider.
    SliderRow(Slider),
    /// Static caption of a slider.
    SliderCaption(Slider),
    /// Current-level label of a slider.
    SliderLabel(Slider),
    /// The range input itself.
    SliderInput(Slider),
    /// One feature control.
    FeatureButton(Feature),
    /// Pictogram inside a feature control.
    FeatureIcon(Feature),
    /// Outline of a feature pictogram.
    FeatureIconPath(Feature),
    /// Visible name of a feature control.
    FeatureLabel(Feature),
    /// "Reset All Settings".
    ResetButton,
    /// Credit line under the panel content.
    PanelFooter,
    /// Footer text.
    FooterNote,
    /// Footer link.
    FooterLink,
    /// Reading guide line overlay.
    GuideLine,
    /// Reading mask panel above the band.
    MaskTop,
    /// Reading mask panel below the band.
    MaskBottom,
}

impl ElementId {
    /// DOM `id` attribute for the element.
    pub fn dom_id(self) -> String {
        fn slider_slug(s: Slider) -> &'static str {
            match s {
                Slider::TextSize => "text-size",
                Slider::LineHeight => "line-height",
            }
        }
        match self {
            ElementId::SkipLink => "ada-skip-link".into(),
            ElementId::Toggle => "ada-accessibility-toggle".into(),
            ElementId::ToggleIcon => "ada-toggle-icon".into(),
            ElementId::ToggleIconPath => "ada-toggle-icon-path".into(),
            ElementId::Panel => "ada-accessibility-panel".into(),
            ElementId::PanelHeader => "ada-panel-header".into(),
            ElementId::PanelTitle => "ada-panel-title".into(),
            ElementId::CloseButton => "ada-close-btn".into(),
            ElementId::PanelContent => "ada-panel-content".into(),
            ElementId::Section(s) => format!("ada-section-{}", s.slug()),
            ElementId::SectionTitle(s) => format!("ada-section-{}-title", s.slug()),
            ElementId::FeatureGrid(s) => format!("ada-section-{}-grid", s.slug()),
            ElementId::SliderRow(s) => format!("ada-{}-control", slider_slug(s)),
            ElementId::SliderCaption(s) => format!("ada-{}-caption", slider_slug(s)),
            ElementId::SliderLabel(s) => format!("ada-{}-label", slider_slug(s)),
            ElementId::SliderInput(s) => format!("ada-{}", slider_slug(s)),
            ElementId::FeatureButton(f) => format!("ada-feature-{}", f.wire_name()),
            ElementId::FeatureIcon(f) => format!("ada-feature-{}-icon", f.wire_name()),
            ElementId::FeatureIconPath(f) => format!("ada-feature-{}-icon-path", f.wire_name()),
            ElementId::FeatureLabel(f) => format!("ada-feature-{}-label", f.wire_name()),
            ElementId::ResetButton => "ada-reset-all".into(),
            ElementId::PanelFooter => "ada-panel-footer".into(),
            ElementId::FooterNote => "ada-panel-footer-note".into(),
            ElementId::FooterLink => "ada-panel-footer-link".into(),
            ElementId::GuideLine => "ada-reading-guide-line".into(),
            ElementId::MaskTop => "ada-reading-mask-top".into(),
            ElementId::MaskBottom => "ada-reading-mask-bottom".into(),
        }
    }
}

/// Namespace of the SVG element kinds.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Element kinds the widget creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `<div>`
    Div,
    /// `<span>`
    Span,
    /// `<button>`
    Button,
    /// `<a>`
    Anchor,
    /// `<input>`
    Input,
    /// `<h2>`
    Heading2,
    /// `<h3>`
    Heading3,
    /// `<p>`
    Paragraph,
    /// `<svg>`
    Svg,
    /// `<path>` inside an `<svg>`
    SvgPath,
}

impl Tag {
    /// HTML tag name.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Button => "button",
            Tag::Anchor => "a",
            Tag::Input => "input",
            Tag::Heading2 => "h2",
            Tag::Heading3 => "h3",
            Tag::Paragraph => "p",
            Tag::Svg => "svg",
            Tag::SvgPath => "path",
        }
    }

    /// Namespace to create the element in; `None` for plain HTML.
    pub fn namespace(self) -> Option<&'static str> {
        match self {
            Tag::Svg | Tag::SvgPath => Some(SVG_NAMESPACE),
            _ => None,
        }
    }
}

/// Where a new element is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    /// Appended to the document body.
    Body,
    /// Inserted before the body's first child.
    BodyStart,
    /// Appended to a previously mounted element.
    Element(ElementId),
}

/// Description of one element to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    /// Identity of the element.
    pub id: ElementId,
    /// Element kind.
    pub tag: Tag,
    /// Insertion point.
    pub parent: Parent,
    /// Initial classes.
    pub classes: Vec<&'static str>,
    /// Initial attributes (besides `id`).
    pub attributes: Vec<(&'static str, String)>,
    /// Initial text content.
    pub text: Option<String>,
}

impl ElementSpec {
    /// Bare element under `parent`.
    pub fn new(id: ElementId, tag: Tag, parent: Parent) -> Self {
        Self {
            id,
            tag,
            parent,
            classes: Vec::new(),
            attributes: Vec::new(),
            text: None,
        }
    }

    /// Add a class.
    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    /// Add an attribute.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Set text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Failures while creating widget elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The host page has no body to attach to.
    #[error("document has no body")]
    MissingRoot,
    /// The parent element was never mounted.
    #[error("parent element {0:?} is not mounted")]
    MissingParent(ElementId),
    /// The host refused the operation.
    #[error("host error: {0}")]
    Host(String),
}

/// Host document as seen by the widget.
///
/// Only `mount` can fail. The mutators are best-effort: an id that was never
/// mounted (or whose mount failed) is silently ignored.
pub trait DocumentPort {
    /// Create the element described by `spec`.
    fn mount(&mut self, spec: &ElementSpec) -> Result<(), DocumentError>;
    /// Detach a previously mounted element.
    fn remove(&mut self, id: ElementId);
    /// Add or remove a class on the document root.
    fn set_root_class(&mut self, class: &str, on: bool);
    /// Set an inline style property (custom properties included) on the document root.
    fn set_root_style(&mut self, property: &str, value: &str);
    /// Add or remove a class on an element.
    fn set_class(&mut self, id: ElementId, class: &str, on: bool);
    /// Set an attribute on an element.
    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str);
    /// Set an inline style property on an element.
    fn set_style(&mut self, id: ElementId, property: &str, value: &str);
    /// Replace an element's text content.
    fn set_text(&mut self, id: ElementId, text: &str);
    /// Set the current value of an input element.
    fn set_value(&mut self, id: ElementId, value: &str);
    /// Move keyboard focus to an element.
    fn focus(&mut self, id: ElementId);
    /// Height of the visible viewport in CSS pixels.
    fn viewport_height(&self) -> f64;
}

/// State of one element in a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryElement {
    /// Spec the element was created from.
    pub spec: ElementSpec,
    /// Current classes.
    pub classes: BTreeSet<String>,
    /// Current attributes.
    pub attributes: BTreeMap<String, String>,
    /// Current inline styles.
    pub styles: BTreeMap<String, String>,
    /// Current text content.
    pub text: Option<String>,
    /// Current input value.
    pub value: Option<String>,
}

/// In-memory document for headless hosts and tests.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    elements: BTreeMap<ElementId, MemoryElement>,
    mount_order: Vec<ElementId>,
    root_classes: BTreeSet<String>,
    root_styles: BTreeMap<String, String>,
    focused: Option<ElementId>,
    viewport_height: f64,
    refused: BTreeSet<ElementId>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new(800.0)
    }
}

impl MemoryDocument {
    /// Empty document with the given viewport height.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            elements: BTreeMap::new(),
            mount_order: Vec::new(),
            root_classes: BTreeSet::new(),
            root_styles: BTreeMap::new(),
            focused: None,
            viewport_height,
            refused: BTreeSet::new(),
        }
    }

    /// Make every future `mount` of `id` fail, as a hostile host page would.
    pub fn refuse_mount(&mut self, id: ElementId) {
        self.refused.insert(id);
    }

    /// Change the viewport height.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Element state, if mounted.
    pub fn element(&self, id: ElementId) -> Option<&MemoryElement> {
        self.elements.get(&id)
    }

    /// Whether `id` is mounted.
    pub fn is_mounted(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Mounted ids in creation order.
    pub fn mount_order(&self) -> &[ElementId] {
        &self.mount_order
    }

    /// Classes currently on the document root.
    pub fn root_classes(&self) -> &BTreeSet<String> {
        &self.root_classes
    }

    /// Whether the document root carries `class`.
    pub fn has_root_class(&self, class: &str) -> bool {
        self.root_classes.contains(class)
    }

    /// Inline style on the document root.
    pub fn root_style(&self, property: &str) -> Option<&str> {
        self.root_styles.get(property).map(String::as_str)
    }

    /// Whether element `id` carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(&id)
            .is_some_and(|e| e.classes.contains(class))
    }

    /// Attribute value on element `id`.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(&id)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    /// Inline style on element `id`.
    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.elements
            .get(&id)
            .and_then(|e| e.styles.get(property))
            .map(String::as_str)
    }

    /// Text content of element `id`.
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).and_then(|e| e.text.as_deref())
    }

    /// Current value of input `id`.
    pub fn value(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).and_then(|e| e.value.as_deref())
    }

    /// Element holding keyboard focus.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }
}

impl DocumentPort for MemoryDocument {
    fn mount(&mut self, spec: &ElementSpec) -> Result<(), DocumentError> {
        if self.refused.contains(&spec.id) {
            return Err(DocumentError::Host(format!(
                "refused to create #{}",
                spec.id.dom_id()
            )));
        }
        if let Parent::Element(parent) = spec.parent {
            if !self.elements.contains_key(&parent) {
                return Err(DocumentError::MissingParent(parent));
            }
        }
        let value = spec
            .attributes
            .iter()
            .find(|(name, _)| *name == "value")
            .map(|(_, v)| v.clone());
        let element = MemoryElement {
            spec: spec.clone(),
            classes: spec.classes.iter().map(|c| (*c).to_owned()).collect(),
            attributes: spec
                .attributes
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
            styles: BTreeMap::new(),
            text: spec.text.clone(),
            value,
        };
        if self.elements.insert(spec.id, element).is_none() {
            self.mount_order.push(spec.id);
        }
        Ok(())
    }

    fn remove(&mut self, id: ElementId) {
        if self.elements.remove(&id).is_some() {
            self.mount_order.retain(|m| *m != id);
            if self.focused == Some(id) {
                self.focused = None;
            }
        }
    }

    fn set_root_class(&mut self, class: &str, on: bool) {
        if on {
            self.root_classes.insert(class.to_owned());
        } else {
            self.root_classes.remove(class);
        }
    }

    fn set_root_style(&mut self, property: &str, value: &str) {
        self.root_styles
            .insert(property.to_owned(), value.to_owned());
    }

    fn set_class(&mut self, id: ElementId, class: &str, on: bool) {
        if let Some(e) = self.elements.get_mut(&id) {
            if on {
                e.classes.insert(class.to_owned());
            } else {
                e.classes.remove(class);
            }
        }
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(e) = self.elements.get_mut(&id) {
            e.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(e) = self.elements.get_mut(&id) {
            e.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(e) = self.elements.get_mut(&id) {
            e.text = Some(text.to_owned());
        }
    }

    fn set_value(&mut self, id: ElementId, value: &str) {
        if let Some(e) = self.elements.get_mut(&id) {
            e.value = Some(value.to_owned());
        }
    }

    fn focus(&mut self, id: ElementId) {
        if self.elements.contains_key(&id) {
            self.focused = Some(id);
        }
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}
