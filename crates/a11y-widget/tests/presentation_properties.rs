// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Properties of the presentation applier and the controller's rendered state.
#![allow(clippy::unwrap_used)]

use a11y_app_core::memory::MemoryConfigStore;
use a11y_app_core::prefs::{Feature, PreferenceRecord, Slider};
use a11y_app_core::widget_config::WidgetConfig;
use a11y_widget::presentation::{self, directives, Directive, KEYBOARD_NAV_CLASS};
use a11y_widget::{DocumentPort, ElementId, Key, MemoryDocument, WidgetController, WidgetEvent};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn event() -> impl Strategy<Value = WidgetEvent> {
    prop_oneof![
        Just(WidgetEvent::ToggleActivated),
        Just(WidgetEvent::CloseActivated),
        Just(WidgetEvent::ClickOutside),
        Just(WidgetEvent::ResetActivated),
        Just(WidgetEvent::PointerPressed),
        Just(WidgetEvent::KeyPressed(Key::Tab)),
        Just(WidgetEvent::KeyPressed(Key::Escape)),
        (0..Feature::ALL.len()).prop_map(|i| WidgetEvent::FeatureActivated(Feature::ALL[i])),
        (any::<bool>(), -4i64..8).prop_map(|(text, v)| {
            let slider = if text {
                Slider::TextSize
            } else {
                Slider::LineHeight
            };
            WidgetEvent::SliderMoved(slider, v)
        }),
    ]
}

fn record() -> impl Strategy<Value = PreferenceRecord> {
    prop::collection::vec(0..Feature::ALL.len(), 0..12).prop_flat_map(|features| {
        (0i64..4, 0i64..3).prop_map(move |(text, line)| {
            let mut r = PreferenceRecord::default();
            for &i in &features {
                r.activate(Feature::ALL[i]);
            }
            r.set_level(Slider::TextSize, text);
            r.set_level(Slider::LineHeight, line);
            r
        })
    })
}

fn owned_classes(doc: &MemoryDocument) -> BTreeSet<String> {
    doc.root_classes()
        .iter()
        .filter(|c| c.as_str() != KEYBOARD_NAV_CLASS)
        .cloned()
        .collect()
}

fn expected(record: &PreferenceRecord) -> BTreeSet<String> {
    directives(record)
        .into_iter()
        .map(|d| d.class().to_owned())
        .collect()
}

proptest! {
    #[test]
    fn applying_depends_only_on_the_record(before in record(), after in record()) {
        let mut doc = MemoryDocument::default();
        presentation::apply(&before, &mut doc);
        presentation::apply(&after, &mut doc);
        let once = doc.root_classes().clone();
        presentation::apply(&after, &mut doc);
        prop_assert_eq!(doc.root_classes(), &once);
        prop_assert_eq!(owned_classes(&doc), expected(&after));
    }

    #[test]
    fn foreign_root_classes_survive(r in record()) {
        let mut doc = MemoryDocument::default();
        doc.set_root_class("site-theme", true);
        presentation::apply(&r, &mut doc);
        prop_assert!(doc.has_root_class("site-theme"));
    }

    #[test]
    fn rendered_state_matches_the_record(events in prop::collection::vec(event(), 0..40)) {
        let mut w = WidgetController::init(
            WidgetConfig::default(),
            MemoryConfigStore::new(),
            MemoryDocument::default(),
        );
        for ev in events {
            w.handle(ev);
        }
        let record = *w.preferences();
        let doc = w.document();

        prop_assert_eq!(owned_classes(doc), expected(&record));
        let both = |a: &str, b: &str| doc.has_root_class(a) && doc.has_root_class(b);
        prop_assert!(!both("ada-contrast-dark", "ada-contrast-light"));
        prop_assert!(!both("ada-dyslexia-font", "ada-readable-font"));
        prop_assert_eq!(w.keyboard_nav(), doc.has_root_class(KEYBOARD_NAV_CLASS));

        for feature in Feature::ALL {
            let id = ElementId::FeatureButton(feature);
            let on = record.is_active(feature);
            let aria = if on { "true" } else { "false" };
            prop_assert_eq!(doc.attribute(id, "aria-pressed"), Some(aria));
            prop_assert_eq!(doc.has_class(id, "active"), on);
        }
        for slider in Slider::ALL {
            let label = doc.text(ElementId::SliderLabel(slider));
            prop_assert_eq!(label, Some(record.level_label(slider)));
            let level = record.level(slider).to_string();
            prop_assert_eq!(doc.value(ElementId::SliderInput(slider)), Some(level.as_str()));
        }

        let open = w.is_open();
        prop_assert_eq!(doc.has_class(ElementId::Panel, "active"), open);
        prop_assert_eq!(
            doc.attribute(ElementId::Toggle, "aria-expanded"),
            Some(if open { "true" } else { "false" })
        );
    }
}

#[test]
fn every_directive_has_a_distinct_class() {
    let classes: BTreeSet<_> = Directive::ALL.iter().map(|d| d.class()).collect();
    assert_eq!(classes.len(), Directive::ALL.len());
    assert!(!classes.contains(KEYBOARD_NAV_CLASS));
}
