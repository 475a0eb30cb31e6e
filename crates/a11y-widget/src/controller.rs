// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Top-level widget orchestration: load, build, apply, then run events to completion.

use crate::document::DocumentPort;
use crate::pointer::PointerOverlayTracker;
use crate::presentation::{self, KEYBOARD_NAV_CLASS};
use crate::surface::{self, Surfaces};
use crate::transition::{self, PanelState, WidgetEffect, WidgetEvent};
use a11y_app_core::config::ConfigStore;
use a11y_app_core::prefs::PreferenceRecord;
use a11y_app_core::store::PreferenceStore;
use a11y_app_core::widget_config::WidgetConfig;
use tracing::debug;

/// The widget runtime.
///
/// Owns the preference store, the document port and the panel state. Every
/// event is reduced and its effects executed before `handle` returns, so no
/// half-applied state is ever observable between events.
pub struct WidgetController<S, D> {
    config: WidgetConfig,
    store: PreferenceStore<S>,
    doc: D,
    panel: PanelState,
    surfaces: Surfaces,
    tracker: Option<PointerOverlayTracker>,
    keyboard_nav: bool,
}

impl<S: ConfigStore, D: DocumentPort> WidgetController<S, D> {
    /// Build the widget over a persistence channel and a document.
    pub fn init(config: WidgetConfig, channel: S, doc: D) -> Self {
        Self::with_store(config, PreferenceStore::new(channel), doc)
    }

    /// Build the widget over an already configured store (custom key, etc.).
    pub fn with_store(config: WidgetConfig, mut store: PreferenceStore<S>, mut doc: D) -> Self {
        let record = store.load();
        let surfaces = surface::mount(&config, &record, &mut doc);
        debug!(?surfaces, "widget mounted");
        presentation::apply(&record, &mut doc);

        let mut this = Self {
            config,
            store,
            doc,
            panel: PanelState::Closed,
            surfaces,
            tracker: surfaces.overlays.then_some(PointerOverlayTracker),
            keyboard_nav: false,
        };
        if this.surfaces.controls {
            surface::render_panel(this.panel, &mut this.doc);
            surface::render_controls(this.store.record(), &mut this.doc);
        }
        this
    }

    /// Process one host event to completion.
    pub fn handle(&mut self, event: WidgetEvent) {
        if !self.surfaces.controls && needs_controls(event) {
            return;
        }
        let next = transition::reduce(self.panel, event);
        self.panel = next.panel;
        for effect in next.effects {
            self.run(effect);
        }
    }

    /// Open the panel if it is closed.
    pub fn open(&mut self) {
        if self.panel == PanelState::Closed {
            self.handle(WidgetEvent::ToggleActivated);
        }
    }

    /// Close the panel if it is open.
    pub fn close(&mut self) {
        if self.panel == PanelState::Open {
            self.handle(WidgetEvent::CloseActivated);
        }
    }

    /// Reset every preference regardless of panel state (host API).
    pub fn reset_preferences(&mut self) {
        for effect in [
            WidgetEffect::Reset,
            WidgetEffect::ApplyPresentation,
            WidgetEffect::RenderControls,
        ] {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: WidgetEffect) {
        match effect {
            WidgetEffect::ShowPanel | WidgetEffect::HidePanel => {
                surface::render_panel(self.panel, &mut self.doc);
            }
            WidgetEffect::Focus(id) => self.doc.focus(id),
            WidgetEffect::Mutate(mutation) => {
                self.store.update(|r| mutation.apply(r));
            }
            WidgetEffect::Reset => {
                self.store.reset();
            }
            WidgetEffect::ApplyPresentation => {
                presentation::apply(self.store.record(), &mut self.doc);
            }
            WidgetEffect::RenderControls => {
                surface::render_controls(self.store.record(), &mut self.doc);
            }
            WidgetEffect::RenderSlider(slider) => {
                surface::render_slider(slider, self.store.record(), &mut self.doc);
            }
            WidgetEffect::KeyboardNav(on) => {
                if self.keyboard_nav != on {
                    self.keyboard_nav = on;
                    self.doc.set_root_class(KEYBOARD_NAV_CLASS, on);
                }
            }
            WidgetEffect::TrackPointer(position) => {
                if let Some(tracker) = self.tracker {
                    tracker.track(self.store.record(), position, &mut self.doc);
                }
            }
        }
    }
}

impl<S, D> WidgetController<S, D> {
    /// Current panel state.
    pub fn panel(&self) -> PanelState {
        self.panel
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.panel == PanelState::Open
    }

    /// Snapshot of the authoritative preferences.
    pub fn preferences(&self) -> &PreferenceRecord {
        self.store.record()
    }

    /// The preference store.
    pub fn store(&self) -> &PreferenceStore<S> {
        &self.store
    }

    /// The document port.
    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Host configuration in effect.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Parts of the widget that mounted successfully.
    pub fn surfaces(&self) -> Surfaces {
        self.surfaces
    }

    /// Whether keyboard-navigation mode is on.
    pub fn keyboard_nav(&self) -> bool {
        self.keyboard_nav
    }
}

fn needs_controls(event: WidgetEvent) -> bool {
    !matches!(
        event,
        WidgetEvent::KeyPressed(transition::Key::Tab)
            | WidgetEvent::PointerPressed
            | WidgetEvent::PointerMoved(_)
    )
}
