// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pointer-driven reading guide and reading mask.

use crate::document::{DocumentPort, ElementId};
use a11y_app_core::prefs::PreferenceRecord;

/// The guide line sits this far above the pointer.
pub const GUIDE_OFFSET_PX: f64 = 20.0;
/// Half the height of the clear band the mask leaves around the pointer.
pub const MASK_HALF_BAND_PX: f64 = 60.0;

/// Pointer position in viewport (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl PointerPosition {
    /// Position from client coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry of the two mask panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskLayout {
    /// Height of the panel covering the viewport top.
    pub top_height: f64,
    /// Offset of the lower panel from the viewport top.
    pub bottom_top: f64,
    /// Height of the lower panel.
    pub bottom_height: f64,
}

/// Overlay geometry for one pointer update; `None` parts are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayLayout {
    /// Offset of the guide line, when the guide is enabled.
    pub guide_top: Option<f64>,
    /// Mask panels, when the mask is enabled.
    pub mask: Option<MaskLayout>,
}

/// Stateless subscriber repositioning the overlays on every pointer move.
///
/// Visibility is not its concern: the `ada-reading-guide`/`ada-reading-mask`
/// root classes decide whether the overlays show at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerOverlayTracker;

impl PointerOverlayTracker {
    /// Compute overlay geometry for a pointer at `y` in a viewport `viewport_height` tall.
    pub fn layout(record: &PreferenceRecord, y: f64, viewport_height: f64) -> OverlayLayout {
        OverlayLayout {
            guide_top: record.reading_guide.then_some(y - GUIDE_OFFSET_PX),
            mask: record.reading_mask.then(|| MaskLayout {
                top_height: (y - MASK_HALF_BAND_PX).max(0.0),
                bottom_top: y + MASK_HALF_BAND_PX,
                bottom_height: (viewport_height - y - MASK_HALF_BAND_PX).max(0.0),
            }),
        }
    }

    /// Reposition the overlays for a pointer update.
    pub fn track<D: DocumentPort + ?Sized>(
        self,
        record: &PreferenceRecord,
        position: PointerPosition,
        doc: &mut D,
    ) {
        let layout = Self::layout(record, position.y, doc.viewport_height());
        if let Some(top) = layout.guide_top {
            doc.set_style(ElementId::GuideLine, "top", &px(top));
        }
        if let Some(mask) = layout.mask {
            doc.set_style(ElementId::MaskTop, "height", &px(mask.top_height));
            doc.set_style(ElementId::MaskBottom, "top", &px(mask.bottom_top));
            doc.set_style(ElementId::MaskBottom, "height", &px(mask.bottom_height));
        }
    }
}

fn px(v: f64) -> String {
    format!("{v}px")
}
