// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The accessibility preference record and its mutation rules.
//!
//! The record is the only stateful entity of the widget. It serializes to the
//! same camelCase JSON blob the browser host keeps in storage, and it
//! deserializes leniently: every field is decoded on its own, so one bad field
//! never discards the rest of a saved blob.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Errors raised when building preference values from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefsError {
    /// A stepped level was outside its allowed range.
    #[error("{field} must be in 0..={max}, got {value}")]
    OutOfRange {
        /// Record field the value was meant for.
        field: &'static str,
        /// Offending value.
        value: i64,
        /// Inclusive upper bound.
        max: u8,
    },
    /// A feature control name did not match any known feature.
    #[error("unknown feature: {0}")]
    UnknownFeature(String),
}

macro_rules! stepped_level {
    ($(#[$meta:meta])* $name:ident, $field:literal, $labels:expr) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
            Serialize, Deserialize,
        )]
        #[serde(try_from = "u8", into = "u8")]
        pub struct $name(u8);

        impl $name {
            /// Display labels, indexed by level.
            pub const LABELS: &'static [&'static str] = $labels;
            /// Highest valid level.
            #[allow(clippy::cast_possible_truncation)]
            pub const MAX: u8 = (Self::LABELS.len() - 1) as u8;

            /// Checked constructor.
            pub fn new(level: u8) -> Result<Self, PrefsError> {
                if level > Self::MAX {
                    return Err(PrefsError::OutOfRange {
                        field: $field,
                        value: i64::from(level),
                        max: Self::MAX,
                    });
                }
                Ok(Self(level))
            }

            /// Saturate an arbitrary integer into the valid range.
            pub fn clamped(level: i64) -> Self {
                let level = level.clamp(0, i64::from(Self::MAX));
                Self(u8::try_from(level).unwrap_or(Self::MAX))
            }

            /// Raw level.
            pub fn get(self) -> u8 {
                self.0
            }

            /// Human-readable label for the level.
            pub fn label(self) -> &'static str {
                Self::LABELS[usize::from(self.0)]
            }
        }

        impl TryFrom<u8> for $name {
            type Error = PrefsError;

            fn try_from(level: u8) -> Result<Self, Self::Error> {
                Self::new(level)
            }
        }

        impl From<$name> for u8 {
            fn from(level: $name) -> Self {
                level.0
            }
        }
    };
}

stepped_level!(
    /// Text scaling step: 0 normal, 1 large, 2 larger, 3 largest.
    TextSize,
    "textSize",
    &["Normal", "Large", "Larger", "Largest"]
);

stepped_level!(
    /// Line spacing step: 0 normal, 1 relaxed, 2 loose.
    LineHeight,
    "lineHeight",
    &["Normal", "Relaxed", "Loose"]
);

/// Page-wide contrast override. One field, so dark and light can never both be active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastMode {
    /// No contrast override.
    #[default]
    None,
    /// Light text on dark backgrounds.
    Dark,
    /// Dark text on light backgrounds.
    Light,
}

/// The two stepped preferences driven by range sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slider {
    /// Drives [`PreferenceRecord::text_size`].
    TextSize,
    /// Drives [`PreferenceRecord::line_height`].
    LineHeight,
}

impl Slider {
    /// Both sliders, in panel order.
    pub const ALL: [Slider; 2] = [Slider::TextSize, Slider::LineHeight];

    /// Highest value the slider accepts.
    pub fn max(self) -> u8 {
        match self {
            Slider::TextSize => TextSize::MAX,
            Slider::LineHeight => LineHeight::MAX,
        }
    }

    /// Record field name (also the wire name).
    pub fn wire_name(self) -> &'static str {
        match self {
            Slider::TextSize => "textSize",
            Slider::LineHeight => "lineHeight",
        }
    }

    /// Caption shown next to the slider.
    pub fn caption(self) -> &'static str {
        match self {
            Slider::TextSize => "Text Size",
            Slider::LineHeight => "Line Spacing",
        }
    }
}

/// Panel grouping for feature controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// Sliders plus spacing and font controls.
    TextAndReading,
    /// Contrast and color filters.
    VisionAndColors,
    /// Guide, mask, link highlighting, cursor.
    ReadingAids,
    /// Focus highlighting and motion.
    Navigation,
}

impl Section {
    /// Sections in panel order.
    pub const ALL: [Section; 4] = [
        Section::TextAndReading,
        Section::VisionAndColors,
        Section::ReadingAids,
        Section::Navigation,
    ];

    /// Heading text.
    pub fn title(self) -> &'static str {
        match self {
            Section::TextAndReading => "Text & Reading",
            Section::VisionAndColors => "Vision & Colors",
            Section::ReadingAids => "Reading Aids",
            Section::Navigation => "Navigation",
        }
    }

    /// Stable identifier fragment used in element ids.
    pub fn slug(self) -> &'static str {
        match self {
            Section::TextAndReading => "text",
            Section::VisionAndColors => "vision",
            Section::ReadingAids => "reading",
            Section::Navigation => "navigation",
        }
    }
}

/// A discrete feature control exposed in the panel.
///
/// Contrast is one enum field in the record but two controls here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    /// Wider letter spacing.
    LetterSpacing,
    /// Dyslexia-friendly font (excludes [`Feature::ReadableFont`]).
    DyslexiaFont,
    /// Plain sans-serif font (excludes [`Feature::DyslexiaFont`]).
    ReadableFont,
    /// Dark contrast mode.
    ContrastDark,
    /// Light contrast mode.
    ContrastLight,
    /// Grayscale filter.
    Desaturate,
    /// Inverted colors.
    InvertColors,
    /// Horizontal line following the pointer.
    ReadingGuide,
    /// Opaque panels outside a band around the pointer.
    ReadingMask,
    /// Underline and outline links.
    HighlightLinks,
    /// Oversized pointer.
    LargeCursor,
    /// Strong focus rings.
    HighlightFocus,
    /// Stop CSS animations and transitions.
    PauseAnimations,
}

impl Feature {
    /// Every feature, in panel order.
    pub const ALL: [Feature; 13] = [
        Feature::LetterSpacing,
        Feature::DyslexiaFont,
        Feature::ReadableFont,
        Feature::ContrastDark,
        Feature::ContrastLight,
        Feature::Desaturate,
        Feature::InvertColors,
        Feature::ReadingGuide,
        Feature::ReadingMask,
        Feature::HighlightLinks,
        Feature::LargeCursor,
        Feature::HighlightFocus,
        Feature::PauseAnimations,
    ];

    /// Name carried by the control's `data-feature` attribute.
    pub fn wire_name(self) -> &'static str {
        match self {
            Feature::LetterSpacing => "letterSpacing",
            Feature::DyslexiaFont => "dyslexiaFont",
            Feature::ReadableFont => "readableFont",
            Feature::ContrastDark => "contrastDark",
            Feature::ContrastLight => "contrastLight",
            Feature::Desaturate => "desaturate",
            Feature::InvertColors => "invertColors",
            Feature::ReadingGuide => "readingGuide",
            Feature::ReadingMask => "readingMask",
            Feature::HighlightLinks => "highlightLinks",
            Feature::LargeCursor => "largeCursor",
            Feature::HighlightFocus => "highlightFocus",
            Feature::PauseAnimations => "pauseAnimations",
        }
    }

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Feature::LetterSpacing => "Letter Spacing",
            Feature::DyslexiaFont => "Dyslexia Font",
            Feature::ReadableFont => "Readable Font",
            Feature::ContrastDark => "Dark Contrast",
            Feature::ContrastLight => "Light Contrast",
            Feature::Desaturate => "Grayscale",
            Feature::InvertColors => "Invert Colors",
            Feature::ReadingGuide => "Reading Guide",
            Feature::ReadingMask => "Focus Mask",
            Feature::HighlightLinks => "Highlight Links",
            Feature::LargeCursor => "Large Cursor",
            Feature::HighlightFocus => "Focus Highlight",
            Feature::PauseAnimations => "Pause Animations",
        }
    }

    /// Panel section the control lives in.
    pub fn section(self) -> Section {
        match self {
            Feature::LetterSpacing | Feature::DyslexiaFont | Feature::ReadableFont => {
                Section::TextAndReading
            }
            Feature::ContrastDark
            | Feature::ContrastLight
            | Feature::Desaturate
            | Feature::InvertColors => Section::VisionAndColors,
            Feature::ReadingGuide
            | Feature::ReadingMask
            | Feature::HighlightLinks
            | Feature::LargeCursor => Section::ReadingAids,
            Feature::HighlightFocus | Feature::PauseAnimations => Section::Navigation,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Feature {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.wire_name() == s)
            .ok_or_else(|| PrefsError::UnknownFeature(s.to_owned()))
    }
}

/// Saved accessibility preferences.
///
/// Invariants: `text_size`/`line_height` are range-checked by their types,
/// contrast is a single enum, and `dyslexia_font`/`readable_font` are never
/// both true once a record has passed through [`PreferenceRecord::activate`]
/// or deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    /// Text scaling step.
    pub text_size: TextSize,
    /// Line spacing step.
    pub line_height: LineHeight,
    /// Wider letter spacing.
    pub letter_spacing: bool,
    /// Contrast override.
    pub contrast_mode: ContrastMode,
    /// Dyslexia-friendly font.
    pub dyslexia_font: bool,
    /// Plain readable font.
    pub readable_font: bool,
    /// Oversized pointer.
    pub large_cursor: bool,
    /// Reading guide overlay.
    pub reading_guide: bool,
    /// Reading mask overlay.
    pub reading_mask: bool,
    /// Link highlighting.
    pub highlight_links: bool,
    /// Focus highlighting.
    pub highlight_focus: bool,
    /// Animations paused.
    pub pause_animations: bool,
    /// Grayscale filter.
    pub desaturate: bool,
    /// Color inversion.
    pub invert_colors: bool,
}

impl PreferenceRecord {
    /// Apply one feature-control activation.
    ///
    /// Contrast controls select their mode or fall back to `None` when it is
    /// already selected. The two font controls flip and, when switched on,
    /// switch the other one off. Everything else flips.
    pub fn activate(&mut self, feature: Feature) {
        match feature {
            Feature::ContrastDark => self.toggle_contrast(ContrastMode::Dark),
            Feature::ContrastLight => self.toggle_contrast(ContrastMode::Light),
            Feature::DyslexiaFont => {
                self.dyslexia_font = !self.dyslexia_font;
                if self.dyslexia_font {
                    self.readable_font = false;
                }
            }
            Feature::ReadableFont => {
                self.readable_font = !self.readable_font;
                if self.readable_font {
                    self.dyslexia_font = false;
                }
            }
            other => {
                if let Some(flag) = self.flag_mut(other) {
                    *flag = !*flag;
                }
            }
        }
    }

    /// Whether the control for `feature` should render as pressed.
    pub fn is_active(&self, feature: Feature) -> bool {
        match feature {
            Feature::LetterSpacing => self.letter_spacing,
            Feature::DyslexiaFont => self.dyslexia_font,
            Feature::ReadableFont => self.readable_font,
            Feature::ContrastDark => self.contrast_mode == ContrastMode::Dark,
            Feature::ContrastLight => self.contrast_mode == ContrastMode::Light,
            Feature::Desaturate => self.desaturate,
            Feature::InvertColors => self.invert_colors,
            Feature::ReadingGuide => self.reading_guide,
            Feature::ReadingMask => self.reading_mask,
            Feature::HighlightLinks => self.highlight_links,
            Feature::LargeCursor => self.large_cursor,
            Feature::HighlightFocus => self.highlight_focus,
            Feature::PauseAnimations => self.pause_animations,
        }
    }

    /// Set a slider-driven level, clamping into range. Returns the stored level.
    pub fn set_level(&mut self, slider: Slider, value: i64) -> u8 {
        match slider {
            Slider::TextSize => {
                self.text_size = TextSize::clamped(value);
                self.text_size.get()
            }
            Slider::LineHeight => {
                self.line_height = LineHeight::clamped(value);
                self.line_height.get()
            }
        }
    }

    /// Current level of a slider-driven field.
    pub fn level(&self, slider: Slider) -> u8 {
        match slider {
            Slider::TextSize => self.text_size.get(),
            Slider::LineHeight => self.line_height.get(),
        }
    }

    /// Label for the current level of a slider-driven field.
    pub fn level_label(&self, slider: Slider) -> &'static str {
        match slider {
            Slider::TextSize => self.text_size.label(),
            Slider::LineHeight => self.line_height.label(),
        }
    }

    /// Build a record from a stored JSON blob, merging field by field over defaults.
    ///
    /// Non-objects yield the default record. Unknown keys are ignored; a known
    /// key whose value does not decode (wrong type, out of range) keeps its
    /// default.
    pub fn merge_json(value: &Value) -> Self {
        let mut record = Self::default();
        let Some(obj) = value.as_object() else {
            debug!("stored preferences are not an object; using defaults");
            return record;
        };
        merge_field(obj, "textSize", &mut record.text_size);
        merge_field(obj, "lineHeight", &mut record.line_height);
        merge_field(obj, "letterSpacing", &mut record.letter_spacing);
        merge_field(obj, "contrastMode", &mut record.contrast_mode);
        merge_field(obj, "dyslexiaFont", &mut record.dyslexia_font);
        merge_field(obj, "readableFont", &mut record.readable_font);
        merge_field(obj, "largeCursor", &mut record.large_cursor);
        merge_field(obj, "readingGuide", &mut record.reading_guide);
        merge_field(obj, "readingMask", &mut record.reading_mask);
        merge_field(obj, "highlightLinks", &mut record.highlight_links);
        merge_field(obj, "highlightFocus", &mut record.highlight_focus);
        merge_field(obj, "pauseAnimations", &mut record.pause_animations);
        merge_field(obj, "desaturate", &mut record.desaturate);
        merge_field(obj, "invertColors", &mut record.invert_colors);
        if record.dyslexia_font && record.readable_font {
            debug!("stored preferences enable both fonts; keeping dyslexiaFont");
            record.readable_font = false;
        }
        record
    }

    fn toggle_contrast(&mut self, mode: ContrastMode) {
        self.contrast_mode = if self.contrast_mode == mode {
            ContrastMode::None
        } else {
            mode
        };
    }

    fn flag_mut(&mut self, feature: Feature) -> Option<&mut bool> {
        match feature {
            Feature::LetterSpacing => Some(&mut self.letter_spacing),
            Feature::Desaturate => Some(&mut self.desaturate),
            Feature::InvertColors => Some(&mut self.invert_colors),
            Feature::ReadingGuide => Some(&mut self.reading_guide),
            Feature::ReadingMask => Some(&mut self.reading_mask),
            Feature::HighlightLinks => Some(&mut self.highlight_links),
            Feature::LargeCursor => Some(&mut self.large_cursor),
            Feature::HighlightFocus => Some(&mut self.highlight_focus),
            Feature::PauseAnimations => Some(&mut self.pause_animations),
            Feature::DyslexiaFont
            | Feature::ReadableFont
            | Feature::ContrastDark
            | Feature::ContrastLight => None,
        }
    }
}

impl<'de> Deserialize<'de> for PreferenceRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::merge_json(&value))
    }
}

fn merge_field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str, slot: &mut T) {
    let Some(raw) = obj.get(key) else {
        return;
    };
    match T::deserialize(raw) {
        Ok(value) => *slot = value,
        Err(err) => debug!(field = key, %err, "ignoring unreadable preference field"),
    }
}
