// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pictograms drawn inside the toggle and the feature controls.
//!
//! Each is a single outline on a 24×24 grid.

use a11y_app_core::prefs::Feature;

/// `viewBox` shared by every pictogram.
pub const VIEW_BOX: &str = "0 0 24 24";

/// Person with outstretched arms, on the toggle.
pub const TOGGLE: &str = "M12 2C13.1 2 14 2.9 14 4C14 5.1 13.1 6 12 6C10.9 6 10 5.1 10 4C10 \
2.9 10.9 2 12 2ZM21 9H15V22H13V16H11V22H9V9H3V7H21V9Z";

/// Outline for a feature control.
pub fn feature(feature: Feature) -> &'static str {
    match feature {
        Feature::LetterSpacing => {
            "M3 5H21V7H3V5ZM3 19H21V21H3V19ZM5 11L2 14L5 17V14H19V17L22 14L19 11V14H5V11Z"
        }
        Feature::DyslexiaFont => {
            "M9.93 13.5H14.07L12 6.89L9.93 13.5ZM11.11 3H12.89L18.89 21H16.94L15.74 \
17H8.26L7.06 21H5.11L11.11 3Z"
        }
        Feature::ReadableFont => "M5 4V7H10.5V19H13.5V7H19V4H5Z",
        Feature::ContrastDark => {
            "M12 3C7.03 3 3 7.03 3 12C3 16.97 7.03 21 12 21C16.97 21 21 16.97 21 12C21 7.03 \
16.97 3 12 3ZM12 19V5C15.86 5 19 8.14 19 12C19 15.86 15.86 19 12 19Z"
        }
        Feature::ContrastLight => {
            "M12 7C9.24 7 7 9.24 7 12C7 14.76 9.24 17 12 17C14.76 17 17 14.76 17 12C17 9.24 \
14.76 7 12 7ZM2 13H4V11H2V13ZM20 13H22V11H20V13ZM11 2V4H13V2H11ZM11 20V22H13V20H11ZM5.64 \
5.64L4.22 4.22L5.64 5.64ZM18.36 18.36L19.78 19.78L18.36 18.36ZM19.78 4.22L18.36 5.64L19.78 \
4.22ZM4.22 19.78L5.64 18.36L4.22 19.78Z"
        }
        Feature::Desaturate => {
            "M12 2C6.48 2 2 6.48 2 12C2 17.52 6.48 22 12 22C17.52 22 22 17.52 22 12C22 6.48 \
17.52 2 12 2ZM12 20C7.58 20 4 16.42 4 12C4 7.58 7.58 4 12 4C16.42 4 20 7.58 20 12C20 16.42 \
16.42 20 12 20Z"
        }
        Feature::InvertColors => {
            "M17.66 7.93L12 2.27L6.34 7.93C3.22 11.05 3.22 16.12 6.34 19.24C7.9 20.8 9.95 21.58 \
12 21.58C14.05 21.58 16.1 20.8 17.66 19.24C20.78 16.12 20.78 11.05 17.66 7.93ZM12 19.59C10.52 \
19.59 9.04 19.04 7.93 17.93C5.72 15.72 5.72 12.15 7.93 9.93L12 5.86V19.59Z"
        }
        Feature::ReadingGuide => "M3 5H21V7H3V5ZM3 11H21V13H3V11ZM3 17H21V19H3V17Z",
        Feature::ReadingMask => {
            "M12 4.5C7 4.5 2.73 7.61 1 12C2.73 16.39 7 19.5 12 19.5C17 19.5 21.27 16.39 23 \
12C21.27 7.61 17 4.5 12 4.5ZM12 17C9.24 17 7 14.76 7 12C7 9.24 9.24 7 12 7C14.76 7 17 9.24 17 \
12C17 14.76 14.76 17 12 17ZM12 9C10.34 9 9 10.34 9 12C9 13.66 10.34 15 12 15C13.66 15 15 13.66 \
15 12C15 10.34 13.66 9 12 9Z"
        }
        Feature::HighlightLinks => {
            "M3.9 12C3.9 10.29 5.29 8.9 7 8.9H11V7H7C4.24 7 2 9.24 2 12C2 14.76 4.24 17 7 \
17H11V15.1H7C5.29 15.1 3.9 13.71 3.9 12ZM8 13H16V11H8V13ZM17 7H13V8.9H17C18.71 8.9 20.1 10.29 \
20.1 12C20.1 13.71 18.71 15.1 17 15.1H13V17H17C19.76 17 22 14.76 22 12C22 9.24 19.76 7 17 7Z"
        }
        Feature::LargeCursor => {
            "M13.64 21.97C13.14 22.21 12.54 22 12.31 21.5L10.13 16.76L7.62 18.78C7.45 18.92 \
7.24 19 7.02 19C6.55 19 6.14 18.61 6.14 18.09V1.91C6.14 1.39 6.55 1 7.02 1C7.22 1 7.43 1.08 \
7.6 1.21L19.08 10.54C19.49 10.87 19.56 11.47 19.25 11.89C19.05 12.18 18.72 12.33 18.38 \
12.33H14.91L17.05 17.1C17.28 17.6 17.07 18.2 16.57 18.44L13.64 21.97Z"
        }
        Feature::HighlightFocus => {
            "M5 15H3V19C3 20.1 3.9 21 5 21H9V19H5V15ZM5 5H9V3H5C3.9 3 3 3.9 3 5V9H5V5ZM19 \
3H15V5H19V9H21V5C21 3.9 20.1 3 19 3ZM19 19H15V21H19C20.1 21 21 20.1 21 19V15H19V19ZM12 8C9.79 \
8 8 9.79 8 12C8 14.21 9.79 16 12 16C14.21 16 16 14.21 16 12C16 9.79 14.21 8 12 8Z"
        }
        Feature::PauseAnimations => "M6 19H10V5H6V19ZM14 5V19H18V5H14Z",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn every_outline_is_a_closed_path() {
        let outlines: Vec<&str> = Feature::ALL.into_iter().map(feature).chain([TOGGLE]).collect();
        for d in &outlines {
            assert!(d.starts_with('M'), "{d}");
            assert!(d.ends_with('Z'), "{d}");
            assert!(!d.contains("  "), "{d}");
        }
        let distinct: BTreeSet<&str> = outlines.iter().copied().collect();
        assert_eq!(distinct.len(), outlines.len());
    }
}
