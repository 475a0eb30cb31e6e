// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Presentation applier: projects a preference record onto document-root classes.
//!
//! [`directives`] is the pure projection and [`apply`] writes it out. `apply`
//! always sets or clears every record-driven class, so the result depends on
//! the record alone and repeating it changes nothing.

use crate::document::DocumentPort;
use a11y_app_core::prefs::{ContrastMode, PreferenceRecord};
use std::collections::BTreeSet;

/// Root class marking keyboard navigation. Owned by the controller, never by [`apply`].
pub const KEYBOARD_NAV_CLASS: &str = "ada-keyboard-nav";

/// A named on/off document-level effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Directive {
    /// textSize == 1
    TextLarge,
    /// textSize == 2
    TextLarger,
    /// textSize == 3
    TextLargest,
    /// lineHeight == 1
    LineHeightRelaxed,
    /// lineHeight == 2
    LineHeightLoose,
    /// letterSpacing
    LetterSpacing,
    /// contrastMode == dark
    ContrastDark,
    /// contrastMode == light
    ContrastLight,
    /// dyslexiaFont
    DyslexiaFont,
    /// readableFont
    ReadableFont,
    /// largeCursor
    LargeCursor,
    /// readingGuide (also makes the guide overlay visible)
    ReadingGuide,
    /// readingMask (also makes the mask overlays visible)
    ReadingMask,
    /// highlightLinks
    HighlightLinks,
    /// highlightFocus
    HighlightFocus,
    /// pauseAnimations
    PauseAnimations,
    /// desaturate
    Desaturate,
    /// invertColors
    Invert,
}

impl Directive {
    /// Every directive the applier owns.
    pub const ALL: [Directive; 18] = [
        Directive::TextLarge,
        Directive::TextLarger,
        Directive::TextLargest,
        Directive::LineHeightRelaxed,
        Directive::LineHeightLoose,
        Directive::LetterSpacing,
        Directive::ContrastDark,
        Directive::ContrastLight,
        Directive::DyslexiaFont,
        Directive::ReadableFont,
        Directive::LargeCursor,
        Directive::ReadingGuide,
        Directive::ReadingMask,
        Directive::HighlightLinks,
        Directive::HighlightFocus,
        Directive::PauseAnimations,
        Directive::Desaturate,
        Directive::Invert,
    ];

    /// Class toggled on the document root.
    pub fn class(self) -> &'static str {
        match self {
            Directive::TextLarge => "ada-text-large",
            Directive::TextLarger => "ada-text-larger",
            Directive::TextLargest => "ada-text-largest",
            Directive::LineHeightRelaxed => "ada-line-height-relaxed",
            Directive::LineHeightLoose => "ada-line-height-loose",
            Directive::LetterSpacing => "ada-letter-spacing",
            Directive::ContrastDark => "ada-contrast-dark",
            Directive::ContrastLight => "ada-contrast-light",
            Directive::DyslexiaFont => "ada-dyslexia-font",
            Directive::ReadableFont => "ada-readable-font",
            Directive::LargeCursor => "ada-large-cursor",
            Directive::ReadingGuide => "ada-reading-guide",
            Directive::ReadingMask => "ada-reading-mask",
            Directive::HighlightLinks => "ada-highlight-links",
            Directive::HighlightFocus => "ada-highlight-focus",
            Directive::PauseAnimations => "ada-pause-animations",
            Directive::Desaturate => "ada-desaturate",
            Directive::Invert => "ada-invert",
        }
    }
}

/// Directives that must be active for `record`.
pub fn directives(record: &PreferenceRecord) -> BTreeSet<Directive> {
    let mut out = BTreeSet::new();

    match record.text_size.get() {
        1 => {
            out.insert(Directive::TextLarge);
        }
        2 => {
            out.insert(Directive::TextLarger);
        }
        3 => {
            out.insert(Directive::TextLargest);
        }
        _ => {}
    }
    match record.line_height.get() {
        1 => {
            out.insert(Directive::LineHeightRelaxed);
        }
        2 => {
            out.insert(Directive::LineHeightLoose);
        }
        _ => {}
    }
    match record.contrast_mode {
        ContrastMode::Dark => {
            out.insert(Directive::ContrastDark);
        }
        ContrastMode::Light => {
            out.insert(Directive::ContrastLight);
        }
        ContrastMode::None => {}
    }

    let flags = [
        (record.letter_spacing, Directive::LetterSpacing),
        (record.dyslexia_font, Directive::DyslexiaFont),
        (record.readable_font, Directive::ReadableFont),
        (record.large_cursor, Directive::LargeCursor),
        (record.reading_guide, Directive::ReadingGuide),
        (record.reading_mask, Directive::ReadingMask),
        (record.highlight_links, Directive::HighlightLinks),
        (record.highlight_focus, Directive::HighlightFocus),
        (record.pause_animations, Directive::PauseAnimations),
        (record.desaturate, Directive::Desaturate),
        (record.invert_colors, Directive::Invert),
    ];
    out.extend(flags.into_iter().filter(|(on, _)| *on).map(|(_, d)| d));
    out
}

/// Materialize `record` on the document root.
pub fn apply<D: DocumentPort + ?Sized>(record: &PreferenceRecord, doc: &mut D) {
    let active = directives(record);
    for directive in Directive::ALL {
        doc.set_root_class(directive.class(), active.contains(&directive));
    }
}
