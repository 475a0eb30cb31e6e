// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Translation of raw DOM event data into widget events.
//!
//! Kept free of `web-sys` types so the routing rules run under native tests.

use a11y_app_core::prefs::{Feature, Slider};
use a11y_widget::WidgetEvent;
use tracing::debug;

/// Route a click.
///
/// `control` and `feature` are the `data-a11y-control` / `data-feature`
/// values of the nearest control ancestor of the target, and `inside_widget`
/// says whether the target sits within the panel or the toggle.
pub fn click(
    control: Option<&str>,
    feature: Option<&str>,
    inside_widget: bool,
) -> Option<WidgetEvent> {
    match control {
        Some("toggle") => Some(WidgetEvent::ToggleActivated),
        Some("close") => Some(WidgetEvent::CloseActivated),
        Some("reset") => Some(WidgetEvent::ResetActivated),
        Some("feature") => {
            let name = feature?;
            match name.parse::<Feature>() {
                Ok(f) => Some(WidgetEvent::FeatureActivated(f)),
                Err(err) => {
                    debug!(%err, "ignoring click on unknown feature control");
                    None
                }
            }
        }
        _ if inside_widget => None,
        _ => Some(WidgetEvent::ClickOutside),
    }
}

/// Route a range-input change from its `data-a11y-slider` name and raw value.
pub fn slider_input(slider: &str, raw: &str) -> Option<WidgetEvent> {
    let slider = Slider::ALL.into_iter().find(|s| s.wire_name() == slider)?;
    let raw = raw.trim();
    let value = match raw.parse::<i64>() {
        Ok(v) => v,
        Err(_) => rounded(raw.parse::<f64>().ok().filter(|v| v.is_finite())?),
    };
    Some(WidgetEvent::SliderMoved(slider, value))
}

/// Saturates outside the `i64` range; the slider clamps afterwards.
#[allow(clippy::cast_possible_truncation)]
const fn rounded(v: f64) -> i64 {
    v.round() as i64
}
