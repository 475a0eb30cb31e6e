// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! End-to-end widget scenarios against an in-memory document and store.
#![allow(clippy::unwrap_used)]

use a11y_app_core::config::{ConfigError, ConfigStore, DEFAULT_STORAGE_KEY};
use a11y_app_core::memory::MemoryConfigStore;
use a11y_app_core::prefs::{ContrastMode, Feature, PreferenceRecord, Slider};
use a11y_app_core::widget_config::WidgetConfig;
use a11y_widget::pointer::PointerPosition;
use a11y_widget::presentation::KEYBOARD_NAV_CLASS;
use a11y_widget::{ElementId, Key, MemoryDocument, PanelState, WidgetController, WidgetEvent};
use serde_json::json;

fn fresh() -> WidgetController<MemoryConfigStore, MemoryDocument> {
    over(MemoryConfigStore::new())
}

fn opened() -> WidgetController<MemoryConfigStore, MemoryDocument> {
    let mut w = fresh();
    w.handle(WidgetEvent::ToggleActivated);
    w
}

fn over<S: ConfigStore>(channel: S) -> WidgetController<S, MemoryDocument> {
    WidgetController::init(WidgetConfig::default(), channel, MemoryDocument::default())
}

fn pressed<S>(w: &WidgetController<S, MemoryDocument>, f: Feature) -> bool {
    let doc = w.document();
    let id = ElementId::FeatureButton(f);
    let aria = doc.attribute(id, "aria-pressed") == Some("true");
    assert_eq!(aria, doc.has_class(id, "active"), "{f} class/aria drift");
    aria
}

#[test]
fn fresh_session_starts_closed_with_defaults() {
    let w = fresh();
    assert_eq!(w.panel(), PanelState::Closed);
    assert_eq!(*w.preferences(), PreferenceRecord::default());
    let doc = w.document();
    assert_eq!(doc.attribute(ElementId::Toggle, "aria-expanded"), Some("false"));
    assert_eq!(doc.attribute(ElementId::Panel, "aria-hidden"), Some("true"));
    assert_eq!(doc.attribute(ElementId::Panel, "role"), Some("dialog"));
    assert!(doc.is_mounted(ElementId::SkipLink));
    assert_eq!(doc.mount_order().first(), Some(&ElementId::SkipLink));
}

#[test]
fn opening_shows_panel_and_focuses_close() {
    let w = opened();
    let doc = w.document();
    assert!(w.is_open());
    assert!(doc.has_class(ElementId::Panel, "active"));
    assert_eq!(doc.attribute(ElementId::Panel, "aria-hidden"), Some("false"));
    assert_eq!(doc.attribute(ElementId::Toggle, "aria-expanded"), Some("true"));
    assert_eq!(doc.focused(), Some(ElementId::CloseButton));
    assert!(!pressed(&w, Feature::ContrastDark));
    assert!(!pressed(&w, Feature::ContrastLight));
}

#[test]
fn close_paths_hide_panel_and_return_focus() {
    for ev in [
        WidgetEvent::CloseActivated,
        WidgetEvent::KeyPressed(Key::Escape),
        WidgetEvent::ClickOutside,
        WidgetEvent::ToggleActivated,
    ] {
        let mut w = opened();
        w.handle(ev);
        let doc = w.document();
        assert_eq!(w.panel(), PanelState::Closed, "{ev:?}");
        assert!(!doc.has_class(ElementId::Panel, "active"));
        assert_eq!(doc.attribute(ElementId::Panel, "aria-hidden"), Some("true"));
        assert_eq!(doc.focused(), Some(ElementId::Toggle));
    }
}

#[test]
fn contrast_controls_are_exclusive() {
    let mut w = opened();
    w.handle(WidgetEvent::FeatureActivated(Feature::ContrastDark));
    assert_eq!(w.preferences().contrast_mode, ContrastMode::Dark);
    assert!(w.document().has_root_class("ada-contrast-dark"));
    assert!(pressed(&w, Feature::ContrastDark));

    w.handle(WidgetEvent::FeatureActivated(Feature::ContrastLight));
    assert_eq!(w.preferences().contrast_mode, ContrastMode::Light);
    let doc = w.document();
    assert!(doc.has_root_class("ada-contrast-light"));
    assert!(!doc.has_root_class("ada-contrast-dark"));
    assert!(pressed(&w, Feature::ContrastLight));
    assert!(!pressed(&w, Feature::ContrastDark));
    assert!(w.is_open());
}

#[test]
fn font_controls_are_exclusive() {
    let mut w = opened();
    w.handle(WidgetEvent::FeatureActivated(Feature::DyslexiaFont));
    w.handle(WidgetEvent::FeatureActivated(Feature::ReadableFont));
    let r = w.preferences();
    assert!(!r.dyslexia_font);
    assert!(r.readable_font);
    assert!(!pressed(&w, Feature::DyslexiaFont));
    assert!(pressed(&w, Feature::ReadableFont));
    assert!(!w.document().has_root_class("ada-dyslexia-font"));
}

#[test]
fn text_size_slider_persists_and_labels() {
    let channel = MemoryConfigStore::new();
    let mut w = over(&channel);
    w.handle(WidgetEvent::ToggleActivated);
    w.handle(WidgetEvent::SliderMoved(Slider::TextSize, 3));
    let doc = w.document();
    assert_eq!(doc.text(ElementId::SliderLabel(Slider::TextSize)), Some("Largest"));
    assert_eq!(doc.value(ElementId::SliderInput(Slider::TextSize)), Some("3"));
    assert!(doc.has_root_class("ada-text-largest"));
    drop(w);

    // Reload from the same channel.
    let reloaded = over(&channel);
    assert_eq!(reloaded.preferences().text_size.get(), 3);
    assert_eq!(
        reloaded.document().text(ElementId::SliderLabel(Slider::TextSize)),
        Some("Largest")
    );
    assert!(reloaded.document().has_root_class("ada-text-largest"));
}

#[test]
fn slider_values_are_clamped() {
    let mut w = opened();
    w.handle(WidgetEvent::SliderMoved(Slider::TextSize, 42));
    w.handle(WidgetEvent::SliderMoved(Slider::LineHeight, -3));
    assert_eq!(w.preferences().text_size.get(), 3);
    assert_eq!(w.preferences().line_height.get(), 0);
    w.handle(WidgetEvent::SliderMoved(Slider::LineHeight, 9));
    assert_eq!(w.preferences().line_height.get(), 2);
    assert_eq!(
        w.document().text(ElementId::SliderLabel(Slider::LineHeight)),
        Some("Loose")
    );
}

#[test]
fn reset_restores_defaults_everywhere() {
    let channel = MemoryConfigStore::new();
    let mut w = over(&channel);
    w.handle(WidgetEvent::ToggleActivated);
    w.handle(WidgetEvent::FeatureActivated(Feature::InvertColors));
    w.handle(WidgetEvent::SliderMoved(Slider::LineHeight, 2));
    w.handle(WidgetEvent::ResetActivated);

    assert_eq!(*w.preferences(), PreferenceRecord::default());
    assert!(w.is_open());
    let doc = w.document();
    assert!(!doc.has_root_class("ada-invert"));
    assert!(!doc.has_root_class("ada-line-height-loose"));
    assert_eq!(doc.text(ElementId::SliderLabel(Slider::LineHeight)), Some("Normal"));
    assert!(!pressed(&w, Feature::InvertColors));

    let blob: serde_json::Value =
        serde_json::from_slice(&channel.peek(DEFAULT_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(blob["invertColors"], json!(false));
    assert_eq!(blob["lineHeight"], json!(0));
}

#[test]
fn panel_controls_do_nothing_while_closed() {
    let mut w = fresh();
    w.handle(WidgetEvent::FeatureActivated(Feature::LargeCursor));
    w.handle(WidgetEvent::KeyPressed(Key::Escape));
    w.handle(WidgetEvent::ClickOutside);
    assert!(!w.preferences().large_cursor);
    assert_eq!(w.panel(), PanelState::Closed);
    assert_eq!(w.document().focused(), None);
}

#[test]
fn persisted_state_is_materialized_on_init() {
    let channel = MemoryConfigStore::seeded(
        DEFAULT_STORAGE_KEY,
        r#"{"contrastMode":"light","readingGuide":true,"lineHeight":1,"bogus":1}"#,
    );
    let w = WidgetController::init(WidgetConfig::default(), channel, MemoryDocument::default());
    let doc = w.document();
    assert!(doc.has_root_class("ada-contrast-light"));
    assert!(doc.has_root_class("ada-reading-guide"));
    assert!(doc.has_root_class("ada-line-height-relaxed"));
    assert_eq!(doc.text(ElementId::SliderLabel(Slider::LineHeight)), Some("Relaxed"));
    assert!(pressed(&w, Feature::ContrastLight));
    assert!(pressed(&w, Feature::ReadingGuide));
}

#[test]
fn keyboard_mode_tracks_tab_and_pointer() {
    let mut w = fresh();
    w.handle(WidgetEvent::KeyPressed(Key::Tab));
    assert!(w.keyboard_nav());
    assert!(w.document().has_root_class(KEYBOARD_NAV_CLASS));
    w.handle(WidgetEvent::PointerPressed);
    assert!(!w.keyboard_nav());
    assert!(!w.document().has_root_class(KEYBOARD_NAV_CLASS));
}

#[test]
fn pointer_moves_reposition_enabled_overlays_only() {
    let mut w = opened();
    w.handle(WidgetEvent::PointerMoved(PointerPosition::new(5.0, 300.0)));
    assert_eq!(w.document().style(ElementId::GuideLine, "top"), None);

    w.handle(WidgetEvent::FeatureActivated(Feature::ReadingGuide));
    w.handle(WidgetEvent::FeatureActivated(Feature::ReadingMask));
    w.handle(WidgetEvent::CloseActivated);
    // Tracking continues with the panel closed.
    w.handle(WidgetEvent::PointerMoved(PointerPosition::new(5.0, 300.0)));
    let doc = w.document();
    assert_eq!(doc.style(ElementId::GuideLine, "top"), Some("280px"));
    assert_eq!(doc.style(ElementId::MaskTop, "height"), Some("240px"));
    assert_eq!(doc.style(ElementId::MaskBottom, "top"), Some("360px"));
    assert_eq!(doc.style(ElementId::MaskBottom, "height"), Some("440px"));
}

#[test]
fn custom_config_reaches_the_document() {
    let config = WidgetConfig::from_json(&json!({
        "position": "left",
        "primaryColor": "#113355",
        "buttonSize": "medium"
    }));
    let w = WidgetController::init(config, MemoryConfigStore::new(), MemoryDocument::default());
    let doc = w.document();
    assert!(doc.has_class(ElementId::Toggle, "left"));
    assert!(doc.has_class(ElementId::Panel, "ada-size-medium"));
    assert_eq!(doc.root_style("--ada-primary"), Some("#113355"));
    assert_eq!(doc.root_style("--ada-primary-hover"), Some("#113355dd"));
}

#[test]
fn controls_carry_decorative_pictograms() {
    let mut w = opened();
    w.handle(WidgetEvent::FeatureActivated(Feature::ReadingGuide));
    let doc = w.document();
    assert_eq!(doc.attribute(ElementId::ToggleIcon, "aria-hidden"), Some("true"));
    assert_eq!(doc.attribute(ElementId::ToggleIcon, "viewBox"), Some("0 0 24 24"));
    for feature in Feature::ALL {
        assert_eq!(
            doc.attribute(ElementId::FeatureIcon(feature), "aria-hidden"),
            Some("true"),
            "{feature}"
        );
        assert!(doc.is_mounted(ElementId::FeatureIconPath(feature)));
        assert_eq!(doc.text(ElementId::FeatureLabel(feature)), Some(feature.label()));
    }
    assert!(pressed(&w, Feature::ReadingGuide));
    assert!(!doc.has_class(ElementId::FeatureIcon(Feature::ReadingGuide), "active"));
    assert_eq!(doc.text(ElementId::FooterLink), Some("Craft & Communicate"));
}

#[test]
fn failed_pictogram_disables_the_controls() {
    let mut doc = MemoryDocument::default();
    doc.refuse_mount(ElementId::FeatureIconPath(Feature::PauseAnimations));
    let w = WidgetController::init(WidgetConfig::default(), MemoryConfigStore::new(), doc);
    assert!(!w.surfaces().controls);
    assert!(w.surfaces().skip_link && w.surfaces().overlays);
    assert!(!w.document().is_mounted(ElementId::ToggleIcon));
    assert!(!w.document().is_mounted(ElementId::FeatureButton(Feature::ContrastDark)));
}

/// Channel whose writes fail, as when storage is disabled.
struct ReadOnlyChannel;

impl ConfigStore for ReadOnlyChannel {
    fn load_raw(&self, _key: &str) -> Result<Vec<u8>, ConfigError> {
        Err(ConfigError::Unavailable("storage disabled".into()))
    }

    fn save_raw(&self, _key: &str, _data: &[u8]) -> Result<(), ConfigError> {
        Err(ConfigError::Unavailable("storage disabled".into()))
    }
}

#[test]
fn write_failures_never_disturb_the_session() {
    let mut w = over(ReadOnlyChannel);
    w.handle(WidgetEvent::ToggleActivated);
    w.handle(WidgetEvent::FeatureActivated(Feature::HighlightLinks));
    assert!(w.preferences().highlight_links);
    assert!(w.store().is_unsynced());
    assert!(w.document().has_root_class("ada-highlight-links"));
    assert!(pressed(&w, Feature::HighlightLinks));
}

#[test]
fn missing_controls_leave_the_rest_working() {
    let mut doc = MemoryDocument::default();
    doc.refuse_mount(ElementId::Panel);
    let channel = MemoryConfigStore::seeded(DEFAULT_STORAGE_KEY, r#"{"readingMask":true}"#);
    let mut w = WidgetController::init(WidgetConfig::default(), channel, doc);

    assert!(!w.surfaces().controls);
    assert!(w.surfaces().overlays);
    assert!(!w.document().is_mounted(ElementId::Toggle));
    assert!(w.document().has_root_class("ada-reading-mask"));

    w.handle(WidgetEvent::ToggleActivated);
    assert_eq!(w.panel(), PanelState::Closed);
    w.handle(WidgetEvent::PointerMoved(PointerPosition::new(0.0, 100.0)));
    assert_eq!(w.document().style(ElementId::MaskTop, "height"), Some("40px"));
}

#[test]
fn missing_overlays_disable_tracking_only() {
    let mut doc = MemoryDocument::default();
    doc.refuse_mount(ElementId::MaskBottom);
    let mut w = WidgetController::init(WidgetConfig::default(), MemoryConfigStore::new(), doc);
    assert!(!w.surfaces().overlays);
    assert!(!w.document().is_mounted(ElementId::GuideLine));

    w.open();
    w.handle(WidgetEvent::FeatureActivated(Feature::ReadingGuide));
    w.handle(WidgetEvent::PointerMoved(PointerPosition::new(0.0, 100.0)));
    assert!(w.preferences().reading_guide);
    assert!(w.is_open());
}

#[test]
fn host_reset_works_with_panel_closed() {
    let mut w = opened();
    w.handle(WidgetEvent::FeatureActivated(Feature::PauseAnimations));
    w.close();
    w.reset_preferences();
    assert!(!w.preferences().pause_animations);
    assert!(!w.document().has_root_class("ada-pause-animations"));
    assert!(!pressed(&w, Feature::PauseAnimations));
}
