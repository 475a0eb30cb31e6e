// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared services for the accessibility overlay (persistence port, prefs, host config).
//! Knows nothing about rendering; UI and browser adapters stay thin on top of it.

pub mod config;
pub mod memory;
pub mod prefs;
pub mod store;
pub mod widget_config;
