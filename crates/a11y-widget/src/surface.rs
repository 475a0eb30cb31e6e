// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Control surface: element specs for the toggle, panel, skip link and overlays,
//! plus the renderers that keep their visual and ARIA state in step with the record.

use crate::document::{DocumentError, DocumentPort, ElementId, ElementSpec, Parent, Tag};
use crate::icons;
use crate::transition::PanelState;
use a11y_app_core::prefs::{Feature, PreferenceRecord, Section, Slider};
use a11y_app_core::widget_config::WidgetConfig;
use tracing::error;

/// Attribute the browser host reads to route clicks to controls.
pub const CONTROL_ATTR: &str = "data-a11y-control";
/// Attribute carrying the slider name on range inputs.
pub const SLIDER_ATTR: &str = "data-a11y-slider";
/// Attribute carrying the feature name on feature buttons.
pub const FEATURE_ATTR: &str = "data-feature";
/// Class marking an open panel and a pressed feature button.
pub const ACTIVE_CLASS: &str = "active";

/// Which independently mounted parts of the widget made it into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Surfaces {
    /// Skip-navigation link.
    pub skip_link: bool,
    /// Toggle, panel and everything inside it.
    pub controls: bool,
    /// Reading guide and mask overlays.
    pub overlays: bool,
}

/// Skip-navigation link spec.
pub fn skip_link_specs() -> Vec<ElementSpec> {
    vec![ElementSpec::new(ElementId::SkipLink, Tag::Anchor, Parent::BodyStart)
        .class("ada-skip-link")
        .attr("href", "#main-content")
        .text("Skip to Main Content")]
}

/// Specs for the toggle, the panel and every control, reflecting `record`.
pub fn control_specs(config: &WidgetConfig, record: &PreferenceRecord) -> Vec<ElementSpec> {
    let position = config.position.class();
    let size = config.button_size.class();
    let in_panel = Parent::Element(ElementId::Panel);
    let in_header = Parent::Element(ElementId::PanelHeader);
    let in_content = Parent::Element(ElementId::PanelContent);

    let mut specs = vec![
        ElementSpec::new(ElementId::Toggle, Tag::Button, Parent::Body)
            .class(position)
            .class(size)
            .attr("type", "button")
            .attr("aria-label", "Open Accessibility Menu")
            .attr("aria-expanded", "false")
            .attr("aria-controls", ElementId::Panel.dom_id())
            .attr(CONTROL_ATTR, "toggle"),
    ];
    specs.extend(icon_specs(
        ElementId::ToggleIcon,
        ElementId::ToggleIconPath,
        icons::TOGGLE,
        Parent::Element(ElementId::Toggle),
    ));
    specs.extend([
        ElementSpec::new(ElementId::Panel, Tag::Div, Parent::Body)
            .class(position)
            .class(size)
            .attr("role", "dialog")
            .attr("aria-label", "Accessibility Settings")
            .attr("aria-hidden", "true"),
        ElementSpec::new(ElementId::PanelHeader, Tag::Div, in_panel).class("ada-panel-header"),
        ElementSpec::new(ElementId::PanelTitle, Tag::Heading2, in_header).text("Accessibility"),
        ElementSpec::new(ElementId::CloseButton, Tag::Button, in_header)
            .class("ada-close-btn")
            .attr("type", "button")
            .attr("aria-label", "Close accessibility menu")
            .attr(CONTROL_ATTR, "close")
            .text("\u{00d7}"),
        ElementSpec::new(ElementId::PanelContent, Tag::Div, in_panel).class("ada-panel-content"),
    ]);

    for section in Section::ALL {
        let in_section = Parent::Element(ElementId::Section(section));
        specs.push(
            ElementSpec::new(ElementId::Section(section), Tag::Div, in_content)
                .class("ada-feature-section"),
        );
        specs.push(
            ElementSpec::new(ElementId::SectionTitle(section), Tag::Heading3, in_section)
                .text(section.title()),
        );
        if section == Section::TextAndReading {
            for slider in Slider::ALL {
                specs.extend(slider_specs(slider, record, in_section));
            }
        }
        specs.push(
            ElementSpec::new(ElementId::FeatureGrid(section), Tag::Div, in_section)
                .class("ada-feature-grid"),
        );
        let in_grid = Parent::Element(ElementId::FeatureGrid(section));
        for feature in Feature::ALL.into_iter().filter(|f| f.section() == section) {
            specs.extend(feature_specs(feature, record, in_grid));
        }
    }

    specs.push(
        ElementSpec::new(ElementId::ResetButton, Tag::Button, in_content)
            .class("ada-reset-btn")
            .attr("type", "button")
            .attr(CONTROL_ATTR, "reset")
            .text("Reset All Settings"),
    );
    let in_footer = Parent::Element(ElementId::PanelFooter);
    let in_note = Parent::Element(ElementId::FooterNote);
    specs.extend([
        ElementSpec::new(ElementId::PanelFooter, Tag::Div, in_panel).class("ada-panel-footer"),
        ElementSpec::new(ElementId::FooterNote, Tag::Paragraph, in_footer)
            .text("ADA Accessibility Widget by "),
        ElementSpec::new(ElementId::FooterLink, Tag::Anchor, in_note)
            .attr("href", "https://craftandcommunicate.com")
            .attr("target", "_blank")
            .attr("rel", "noopener")
            .text("Craft & Communicate"),
    ]);
    specs
}

/// A decorative `<svg>` holding one outline. Screen readers skip it.
fn icon_specs(svg: ElementId, path: ElementId, outline: &str, parent: Parent) -> [ElementSpec; 2] {
    [
        ElementSpec::new(svg, Tag::Svg, parent)
            .attr("viewBox", icons::VIEW_BOX)
            .attr("aria-hidden", "true")
            .attr("focusable", "false"),
        ElementSpec::new(path, Tag::SvgPath, Parent::Element(svg)).attr("d", outline),
    ]
}

fn slider_specs(slider: Slider, record: &PreferenceRecord, parent: Parent) -> Vec<ElementSpec> {
    let row = Parent::Element(ElementId::SliderRow(slider));
    let aria_label = match slider {
        Slider::TextSize => "Adjust text size",
        Slider::LineHeight => "Adjust line spacing",
    };
    vec![
        ElementSpec::new(ElementId::SliderRow(slider), Tag::Div, parent)
            .class("ada-slider-control"),
        ElementSpec::new(ElementId::SliderCaption(slider), Tag::Span, row).text(slider.caption()),
        ElementSpec::new(ElementId::SliderLabel(slider), Tag::Span, row)
            .attr("aria-live", "polite")
            .text(record.level_label(slider)),
        ElementSpec::new(ElementId::SliderInput(slider), Tag::Input, row)
            .attr("type", "range")
            .attr("min", "0")
            .attr("max", slider.max().to_string())
            .attr("step", "1")
            .attr("value", record.level(slider).to_string())
            .attr("aria-label", aria_label)
            .attr(SLIDER_ATTR, slider.wire_name()),
    ]
}

fn feature_specs(feature: Feature, record: &PreferenceRecord, parent: Parent) -> Vec<ElementSpec> {
    let button = ElementId::FeatureButton(feature);
    let mut spec = ElementSpec::new(button, Tag::Button, parent)
        .class("ada-feature-btn")
        .attr("type", "button")
        .attr(FEATURE_ATTR, feature.wire_name())
        .attr("aria-pressed", bool_attr(record.is_active(feature)))
        .attr(CONTROL_ATTR, "feature");
    if record.is_active(feature) {
        spec = spec.class(ACTIVE_CLASS);
    }
    let mut specs = vec![spec];
    specs.extend(icon_specs(
        ElementId::FeatureIcon(feature),
        ElementId::FeatureIconPath(feature),
        icons::feature(feature),
        Parent::Element(button),
    ));
    specs.push(
        ElementSpec::new(ElementId::FeatureLabel(feature), Tag::Span, Parent::Element(button))
            .text(feature.label()),
    );
    specs
}

/// Reading guide and mask overlay specs.
pub fn overlay_specs() -> Vec<ElementSpec> {
    [ElementId::GuideLine, ElementId::MaskTop, ElementId::MaskBottom]
        .into_iter()
        .map(|id| ElementSpec::new(id, Tag::Div, Parent::Body).attr("aria-hidden", "true"))
        .collect()
}

/// Mount every part of the widget. A part that fails is rolled back and
/// reported as unavailable; the others carry on.
pub fn mount<D: DocumentPort + ?Sized>(
    config: &WidgetConfig,
    record: &PreferenceRecord,
    doc: &mut D,
) -> Surfaces {
    doc.set_root_style("--ada-primary", &config.primary_color);
    doc.set_root_style("--ada-primary-hover", &config.primary_hover_color());
    Surfaces {
        skip_link: mount_group("skip-link", &skip_link_specs(), doc),
        controls: mount_group("controls", &control_specs(config, record), doc),
        overlays: mount_group("overlays", &overlay_specs(), doc),
    }
}

fn mount_group<D: DocumentPort + ?Sized>(group: &str, specs: &[ElementSpec], doc: &mut D) -> bool {
    match try_mount_all(specs, doc) {
        Ok(()) => true,
        Err((mounted, err)) => {
            error!(group, %err, "could not create widget elements; disabling this part");
            for id in mounted.into_iter().rev() {
                doc.remove(id);
            }
            false
        }
    }
}

fn try_mount_all<D: DocumentPort + ?Sized>(
    specs: &[ElementSpec],
    doc: &mut D,
) -> Result<(), (Vec<ElementId>, DocumentError)> {
    let mut mounted = Vec::with_capacity(specs.len());
    for spec in specs {
        if let Err(err) = doc.mount(spec) {
            return Err((mounted, err));
        }
        mounted.push(spec.id);
    }
    Ok(())
}

/// Reflect panel visibility on the panel and the toggle.
pub fn render_panel<D: DocumentPort + ?Sized>(panel: PanelState, doc: &mut D) {
    let open = panel == PanelState::Open;
    doc.set_class(ElementId::Panel, ACTIVE_CLASS, open);
    doc.set_attribute(ElementId::Panel, "aria-hidden", bool_attr(!open));
    doc.set_attribute(ElementId::Toggle, "aria-expanded", bool_attr(open));
}

/// Re-render every feature button and both sliders from `record`.
pub fn render_controls<D: DocumentPort + ?Sized>(record: &PreferenceRecord, doc: &mut D) {
    for feature in Feature::ALL {
        let id = ElementId::FeatureButton(feature);
        let on = record.is_active(feature);
        doc.set_class(id, ACTIVE_CLASS, on);
        doc.set_attribute(id, "aria-pressed", bool_attr(on));
    }
    for slider in Slider::ALL {
        render_slider(slider, record, doc);
    }
}

/// Re-render one slider's value and level label from `record`.
pub fn render_slider<D: DocumentPort + ?Sized>(
    slider: Slider,
    record: &PreferenceRecord,
    doc: &mut D,
) {
    doc.set_value(ElementId::SliderInput(slider), &record.level(slider).to_string());
    doc.set_text(ElementId::SliderLabel(slider), record.level_label(slider));
}

fn bool_attr(on: bool) -> &'static str {
    if on {
        "true"
    } else {
        "false"
    }
}
