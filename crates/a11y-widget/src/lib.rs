// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Accessibility overlay runtime.
//!
//! Four pieces, leaves first:
//!
//! - [`a11y_app_core::store::PreferenceStore`] owns the preference record.
//! - [`presentation`] projects the record onto document-root classes.
//! - [`pointer::PointerOverlayTracker`] moves the reading guide and mask.
//! - [`controller::WidgetController`] builds the control surface and turns
//!   host events into state transitions ([`transition::reduce`]).
//!
//! Hosts talk to the page through [`document::DocumentPort`].

pub mod controller;
pub mod document;
pub mod icons;
pub mod pointer;
pub mod presentation;
pub mod surface;
pub mod transition;

pub use controller::WidgetController;
pub use document::{DocumentPort, ElementId, MemoryDocument};
pub use transition::{Key, PanelState, WidgetEvent};
