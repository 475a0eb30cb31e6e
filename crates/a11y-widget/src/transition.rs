// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pure state transitions for the control panel (open/close, feature controls, sliders).

use crate::document::ElementId;
use crate::pointer::PointerPosition;
use a11y_app_core::prefs::{Feature, PreferenceRecord, Slider};

/// Panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    /// Hidden (initial).
    #[default]
    Closed,
    /// Visible.
    Open,
}

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Closes an open panel.
    Escape,
    /// Switches on keyboard-navigation mode.
    Tab,
    /// Anything else.
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            _ => Key::Other,
        }
    }
}

/// Discrete input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    /// The floating toggle was activated.
    ToggleActivated,
    /// The panel's close control was activated.
    CloseActivated,
    /// A key was pressed anywhere in the document.
    KeyPressed(Key),
    /// A click landed outside both the panel and the toggle.
    ClickOutside,
    /// A pointer button went down anywhere in the document.
    PointerPressed,
    /// A feature control was activated.
    FeatureActivated(Feature),
    /// A slider moved to a raw (unclamped) value.
    SliderMoved(Slider, i64),
    /// The reset control was activated.
    ResetActivated,
    /// The pointer moved.
    PointerMoved(PointerPosition),
}

/// A change to the preference record, applied through the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Feature-control activation.
    Activate(Feature),
    /// Slider move.
    SetLevel(Slider, i64),
}

impl Mutation {
    /// Apply to a record.
    pub fn apply(self, record: &mut PreferenceRecord) {
        match self {
            Mutation::Activate(feature) => record.activate(feature),
            Mutation::SetLevel(slider, value) => {
                record.set_level(slider, value);
            }
        }
    }
}

/// Side effects the controller executes, in order, after a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEffect {
    /// Render the panel as visible.
    ShowPanel,
    /// Render the panel as hidden.
    HidePanel,
    /// Move focus.
    Focus(ElementId),
    /// Mutate and persist the record.
    Mutate(Mutation),
    /// Replace the record with defaults and persist.
    Reset,
    /// Re-apply presentation directives from the record.
    ApplyPresentation,
    /// Re-render every control affordance from the record.
    RenderControls,
    /// Re-render one slider's value and label from the record.
    RenderSlider(Slider),
    /// Switch keyboard-navigation mode.
    KeyboardNav(bool),
    /// Reposition the pointer overlays.
    TrackPointer(PointerPosition),
}

/// Outcome of [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Panel state after the event.
    pub panel: PanelState,
    /// Effects to run, in order.
    pub effects: Vec<WidgetEffect>,
}

/// Compute the next panel state and the effects of `event`.
///
/// Panel controls only act while the panel is open; keyboard-mode and pointer
/// events act in either state.
pub fn reduce(panel: PanelState, event: WidgetEvent) -> Transition {
    use WidgetEffect as Fx;

    let close = || Transition {
        panel: PanelState::Closed,
        effects: vec![Fx::HidePanel, Fx::Focus(ElementId::Toggle)],
    };
    let stay = |effects: Vec<WidgetEffect>| Transition { panel, effects };
    let open = panel == PanelState::Open;

    match event {
        WidgetEvent::ToggleActivated if open => close(),
        WidgetEvent::ToggleActivated => Transition {
            panel: PanelState::Open,
            effects: vec![Fx::ShowPanel, Fx::Focus(ElementId::CloseButton)],
        },
        WidgetEvent::CloseActivated
        | WidgetEvent::KeyPressed(Key::Escape)
        | WidgetEvent::ClickOutside
            if open =>
        {
            close()
        }
        WidgetEvent::FeatureActivated(feature) if open => stay(vec![
            Fx::Mutate(Mutation::Activate(feature)),
            Fx::ApplyPresentation,
            Fx::RenderControls,
        ]),
        WidgetEvent::SliderMoved(slider, value) if open => stay(vec![
            Fx::Mutate(Mutation::SetLevel(slider, value)),
            Fx::ApplyPresentation,
            Fx::RenderSlider(slider),
        ]),
        WidgetEvent::ResetActivated if open => {
            stay(vec![Fx::Reset, Fx::ApplyPresentation, Fx::RenderControls])
        }
        WidgetEvent::KeyPressed(Key::Tab) => stay(vec![Fx::KeyboardNav(true)]),
        WidgetEvent::PointerPressed => stay(vec![Fx::KeyboardNav(false)]),
        WidgetEvent::PointerMoved(position) => stay(vec![Fx::TrackPointer(position)]),
        WidgetEvent::CloseActivated
        | WidgetEvent::KeyPressed(Key::Escape | Key::Other)
        | WidgetEvent::ClickOutside
        | WidgetEvent::FeatureActivated(_)
        | WidgetEvent::SliderMoved(..)
        | WidgetEvent::ResetActivated => stay(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_and_focuses_close() {
        let t = reduce(PanelState::Closed, WidgetEvent::ToggleActivated);
        assert_eq!(t.panel, PanelState::Open);
        assert_eq!(
            t.effects,
            vec![
                WidgetEffect::ShowPanel,
                WidgetEffect::Focus(ElementId::CloseButton)
            ]
        );
    }

    #[test]
    fn every_close_path_returns_focus_to_toggle() {
        for ev in [
            WidgetEvent::ToggleActivated,
            WidgetEvent::CloseActivated,
            WidgetEvent::KeyPressed(Key::Escape),
            WidgetEvent::ClickOutside,
        ] {
            let t = reduce(PanelState::Open, ev);
            assert_eq!(t.panel, PanelState::Closed, "{ev:?}");
            assert!(t
                .effects
                .contains(&WidgetEffect::Focus(ElementId::Toggle)));
        }
    }

    #[test]
    fn panel_controls_are_inert_while_closed() {
        for ev in [
            WidgetEvent::CloseActivated,
            WidgetEvent::KeyPressed(Key::Escape),
            WidgetEvent::ClickOutside,
            WidgetEvent::FeatureActivated(Feature::LargeCursor),
            WidgetEvent::SliderMoved(Slider::TextSize, 2),
            WidgetEvent::ResetActivated,
        ] {
            let t = reduce(PanelState::Closed, ev);
            assert_eq!(t.panel, PanelState::Closed);
            assert!(t.effects.is_empty(), "{ev:?}");
        }
    }

    #[test]
    fn feature_mutates_then_applies_then_renders() {
        let t = reduce(
            PanelState::Open,
            WidgetEvent::FeatureActivated(Feature::ReadingGuide),
        );
        assert_eq!(t.panel, PanelState::Open);
        assert_eq!(
            t.effects,
            vec![
                WidgetEffect::Mutate(Mutation::Activate(Feature::ReadingGuide)),
                WidgetEffect::ApplyPresentation,
                WidgetEffect::RenderControls,
            ]
        );
    }

    #[test]
    fn keyboard_mode_follows_tab_and_pointer_in_any_state() {
        for panel in [PanelState::Closed, PanelState::Open] {
            let t = reduce(panel, WidgetEvent::KeyPressed(Key::Tab));
            assert_eq!(t.effects, vec![WidgetEffect::KeyboardNav(true)]);
            let t = reduce(panel, WidgetEvent::PointerPressed);
            assert_eq!(t.effects, vec![WidgetEffect::KeyboardNav(false)]);
            assert_eq!(t.panel, panel);
        }
    }

    #[test]
    fn dom_key_names_map() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("Tab"), Key::Tab);
        assert_eq!(Key::from_dom("a"), Key::Other);
    }
}
