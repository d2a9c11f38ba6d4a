//! Figure layout: where the facet grid, title and legend go.
//!
//! Margins are expressed as fractions of the figure, like a
//! `[left, bottom, right, top]` rectangle: `right` and `top` are the
//! coordinates of the far edges of the facet grid, not margin widths.

use crate::errors::{ReportError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Margins {
    /// Room for the title above the grid and the legend to its right.
    pub const TIGHT: Margins = Margins { left: 0.02, bottom: 0.12, right: 0.88, top: 0.92 };

    /// Used when the tight rectangle does not fit.
    pub const FALLBACK: Margins = Margins { left: 0.05, bottom: 0.15, right: 0.85, top: 0.90 };

    fn is_valid(&self) -> bool {
        let unit = 0.0..=1.0;
        unit.contains(&self.left)
            && unit.contains(&self.right)
            && unit.contains(&self.bottom)
            && unit.contains(&self.top)
            && self.left < self.right
            && self.bottom < self.top
    }
}

/// Pixel placement of the facet grid inside a figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub margins: Margins,
    pub width: u32,
    pub height: u32,
    /// Pixel margins around the facet grid.
    pub top_px: u32,
    pub bottom_px: u32,
    pub left_px: u32,
    pub right_px: u32,
    pub facet_width: u32,
    pub facet_height: u32,
}

impl Layout {
    /// Place the grid without checking that facets have usable room.
    pub fn unchecked(size: (u32, u32), facets: usize, margins: Margins) -> Self {
        let (w, h) = (size.0 as f64, size.1 as f64);
        let left_px = (margins.left * w).round() as u32;
        let right_px = ((1.0 - margins.right) * w).round() as u32;
        let top_px = ((1.0 - margins.top) * h).round() as u32;
        let bottom_px = (margins.bottom * h).round() as u32;
        let grid_w = size.0.saturating_sub(left_px + right_px);
        let grid_h = size.1.saturating_sub(top_px + bottom_px);
        Layout {
            margins,
            width: size.0,
            height: size.1,
            top_px,
            bottom_px,
            left_px,
            right_px,
            facet_width: grid_w / facets.max(1) as u32,
            facet_height: grid_h,
        }
    }

    /// Left edge of the legend strip.
    pub fn legend_x(&self) -> i32 {
        (self.width - self.right_px) as i32
    }
}

/// Fit `facets` side-by-side sub-charts of at least `min_facet` pixels into
/// a figure of `size` pixels using `margins`.
pub fn fit(size: (u32, u32), facets: usize, margins: Margins, min_facet: (u32, u32)) -> Result<Layout> {
    if facets == 0 {
        return Err(ReportError::Layout("no facets to lay out".into()));
    }
    if !margins.is_valid() {
        return Err(ReportError::Layout(format!("invalid margins {margins:?}")));
    }
    let layout = Layout::unchecked(size, facets, margins);
    if layout.facet_width < min_facet.0 || layout.facet_height < min_facet.1 {
        return Err(ReportError::Layout(format!(
            "facet area {}x{} is smaller than {}x{}",
            layout.facet_width, layout.facet_height, min_facet.0, min_facet.1
        )));
    }
    Ok(layout)
}

/// Try the tight margins; on failure fall back to fixed margins and warn.
pub fn fit_or_fallback(size: (u32, u32), facets: usize, min_facet: (u32, u32)) -> Layout {
    match fit(size, facets, Margins::TIGHT, min_facet) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::warn!("layout fitting failed ({e}); using fallback margins");
            Layout::unchecked(size, facets, Margins::FALLBACK)
        }
    }
}
