// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

//! Breakpoint Resolution
//! Turns a selected Breakpoint plus runtime inputs into pixel values
//!
//! Grid kinds (workspace, all apps, folder) run three phases:
//! - Phase 1: direct resolution (fixed, available-space, matchWorkspace)
//! - Phase 2: remainder accounting over paddings, gutters and cells
//! - Phase 3: remainder-mode fields take their share of what is left
//!
//! Hotseat and cell kinds are direct lookups (phase 1 only).

use log::{trace, warn};

use crate::gsb_breakpoint::{field, Breakpoint, CellSizes, GridSizes, HotseatSizes, ResponsiveSpec, SpecSizes};
use crate::gsc_core::{Axis, SpecKind};
use crate::gse_error::LookupError;
use crate::gsv_value::SizeSpec;

// ============================================================================
// SECTION 1: Calculated output types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPx {
    pub start_padding_px: i32,
    pub end_padding_px: i32,
    pub gutter_px: i32,
    pub cell_size_px: i32,
}

impl GridPx {
    /// Space taken by paddings, gutters and cells for `cell_count` cells
    /// Computed in i64 and saturating, so any cell count is safe to pass
    pub fn used_space(&self, cell_count: u32) -> i64 {
        let cells = i64::from(cell_count);
        let gutters = i64::from(cell_count.saturating_sub(1));
        i64::from(self.start_padding_px)
            .saturating_add(i64::from(self.end_padding_px))
            .saturating_add(i64::from(self.gutter_px).saturating_mul(gutters))
            .saturating_add(i64::from(self.cell_size_px).saturating_mul(cells))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotseatPx {
    pub hotseat_qsb_space_px: i32,
    pub edge_padding_px: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPx {
    pub icon_size_px: i32,
    pub icon_text_size_px: i32,
    pub icon_drawable_padding_px: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatedSizes {
    Grid(GridPx),
    Hotseat(HotseatPx),
    Cell(CellPx),
}

/// Which table row produced a calculated spec
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceEntry {
    pub max_aspect_ratio: f32,
    pub max_available_size: i32,
}

/// Resolved pixel values plus the inputs that produced them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatedSpec {
    kind: SpecKind,
    axis: Axis,
    available_space: i32,
    cell_count: u32,
    source: SourceEntry,
    sizes: CalculatedSizes,
}

impl ResponsiveSpec for CalculatedSpec {
    fn max_available_size(&self) -> i32 {
        self.source.max_available_size
    }

    fn axis(&self) -> Axis {
        self.axis
    }

    fn spec_kind(&self) -> SpecKind {
        self.kind
    }
}

impl CalculatedSpec {
    pub fn available_space(&self) -> i32 {
        self.available_space
    }

    pub fn cell_count(&self) -> u32 {
        self.cell_count
    }

    pub fn source(&self) -> SourceEntry {
        self.source
    }

    pub fn sizes(&self) -> &CalculatedSizes {
        &self.sizes
    }

    pub fn grid(&self) -> Option<&GridPx> {
        match &self.sizes {
            CalculatedSizes::Grid(g) => Some(g),
            _ => None,
        }
    }

    pub fn hotseat(&self) -> Option<&HotseatPx> {
        match &self.sizes {
            CalculatedSizes::Hotseat(h) => Some(h),
            _ => None,
        }
    }

    pub fn cell(&self) -> Option<&CellPx> {
        match &self.sizes {
            CalculatedSizes::Cell(c) => Some(c),
            _ => None,
        }
    }

    /// Pixel value of a named field, as spelled in the document
    pub fn value(&self, name: &str) -> Option<i32> {
        match &self.sizes {
            CalculatedSizes::Grid(g) => match name {
                field::START_PADDING => Some(g.start_padding_px),
                field::END_PADDING => Some(g.end_padding_px),
                field::GUTTER => Some(g.gutter_px),
                field::CELL_SIZE => Some(g.cell_size_px),
                _ => None,
            },
            CalculatedSizes::Hotseat(h) => match name {
                field::HOTSEAT_QSB_SPACE => Some(h.hotseat_qsb_space_px),
                field::EDGE_PADDING => Some(h.edge_padding_px),
                _ => None,
            },
            CalculatedSizes::Cell(c) => match name {
                field::ICON_SIZE => Some(c.icon_size_px),
                field::ICON_TEXT_SIZE => Some(c.icon_text_size_px),
                field::ICON_DRAWABLE_PADDING => Some(c.icon_drawable_padding_px),
                _ => None,
            },
        }
    }
}

// ============================================================================
// SECTION 2: Resolution entry point
// ============================================================================

/// Resolve `breakpoint` (selected from the group capped at `max_aspect_ratio`)
pub fn calculate(
    breakpoint: &Breakpoint,
    max_aspect_ratio: f32,
    available_space: i32,
    cell_count: u32,
    sibling: Option<&CalculatedSpec>,
) -> Result<CalculatedSpec, LookupError> {
    if i32::try_from(cell_count).is_err() {
        return Err(LookupError::CellCountOutOfRange { kind: breakpoint.spec_kind(), cell_count });
    }
    check_sibling(breakpoint, sibling)?;

    let sizes = match breakpoint.sizes() {
        SpecSizes::Workspace(g) | SpecSizes::AllApps(g) | SpecSizes::Folder(g) => {
            CalculatedSizes::Grid(resolve_grid(g, available_space, cell_count, sibling))
        }
        SpecSizes::Hotseat(h) => CalculatedSizes::Hotseat(resolve_hotseat(h, available_space)),
        SpecSizes::Cell(c) => CalculatedSizes::Cell(resolve_cell(c, available_space, sibling)),
    };

    let spec = CalculatedSpec {
        kind: breakpoint.spec_kind(),
        axis: breakpoint.axis(),
        available_space,
        cell_count,
        source: SourceEntry {
            max_aspect_ratio,
            max_available_size: breakpoint.max_available_size(),
        },
        sizes,
    };

    trace!(target: "resolve", "{} {} available={} cells={} -> {:?}",
        spec.kind, spec.axis, available_space, cell_count, spec.sizes);

    Ok(spec)
}

/// Sibling must be present iff a field matches it, and agree on kind and axis
fn check_sibling(breakpoint: &Breakpoint, sibling: Option<&CalculatedSpec>) -> Result<(), LookupError> {
    let kind = breakpoint.spec_kind();

    let Some(expected) = kind.sibling_kind() else {
        return match sibling {
            Some(_) => Err(LookupError::UnexpectedSibling { kind }),
            None => Ok(()),
        };
    };

    match sibling {
        Some(s) => {
            if s.spec_kind() != expected {
                return Err(LookupError::SiblingKindMismatch { kind, expected, found: s.spec_kind() });
            }
            if s.axis() != breakpoint.axis() {
                return Err(LookupError::AxisMismatch {
                    kind,
                    axis: breakpoint.axis(),
                    sibling_axis: s.axis(),
                });
            }
            Ok(())
        }
        None => match breakpoint.sizes().first_match_workspace() {
            Some(name) => Err(LookupError::MissingSibling { kind, field: name }),
            None => Ok(()),
        },
    }
}

fn sibling_value(sibling: Option<&CalculatedSpec>, name: &str) -> i32 {
    sibling.and_then(|s| s.value(name)).unwrap_or(0)
}

// ============================================================================
// SECTION 3: Per-kind algorithms
// ============================================================================

fn resolve_grid(sizes: &GridSizes, available_space: i32, cell_count: u32, sibling: Option<&CalculatedSpec>) -> GridPx {
    // Phase 1: remainder-mode fields resolve to 0 here
    let direct = |name: &str, spec: &SizeSpec| {
        spec.resolve(available_space, sibling_value(sibling, name))
    };
    let mut px = GridPx {
        start_padding_px: direct(field::START_PADDING, &sizes.start_padding),
        end_padding_px: direct(field::END_PADDING, &sizes.end_padding),
        gutter_px: direct(field::GUTTER, &sizes.gutter),
        cell_size_px: direct(field::CELL_SIZE, &sizes.cell_size),
    };

    // Phase 2: unclamped, negative means the table is mis-tuned for this device
    let remainder = i64::from(available_space).saturating_sub(px.used_space(cell_count));
    let remainder_space = remainder.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    if remainder_space < 0 {
        warn!(target: "resolve", "remainder space {} is negative (available={} cells={})",
            remainder_space, available_space, cell_count);
    }

    // Phase 3
    let slots = [
        (&sizes.start_padding, &mut px.start_padding_px),
        (&sizes.end_padding, &mut px.end_padding_px),
        (&sizes.gutter, &mut px.gutter_px),
        (&sizes.cell_size, &mut px.cell_size_px),
    ];
    for (spec, value) in slots {
        if spec.of_remainder_space() > 0.0 {
            *value = spec.resolve_remainder(remainder_space, *value);
        }
    }

    px
}

fn resolve_hotseat(sizes: &HotseatSizes, available_space: i32) -> HotseatPx {
    HotseatPx {
        hotseat_qsb_space_px: sizes.hotseat_qsb_space.resolve(available_space, 0),
        edge_padding_px: sizes.edge_padding.resolve(available_space, 0),
    }
}

fn resolve_cell(sizes: &CellSizes, available_space: i32, sibling: Option<&CalculatedSpec>) -> CellPx {
    CellPx {
        icon_size_px: sizes.icon_size.resolve(available_space, sibling_value(sibling, field::ICON_SIZE)),
        icon_text_size_px: sizes
            .icon_text_size
            .resolve(available_space, sibling_value(sibling, field::ICON_TEXT_SIZE)),
        icon_drawable_padding_px: sizes
            .icon_drawable_padding
            .resolve(available_space, sibling_value(sibling, field::ICON_DRAWABLE_PADDING)),
    }
}
