// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

//! Breakpoint entries
//!
//! A Breakpoint is one row of a spec table: a maxAvailableSize threshold on
//! one axis plus the kind-specific set of named SizeSpecs it configures.
//! The kind is carried by the SpecSizes variant, so dispatch is a match.

use crate::gsc_core::{Axis, SpecKind};
use crate::gse_error::{Error, ValidationError};
use crate::gsv_value::SizeSpec;

/// Tolerance when comparing float sums against 0 and 1
const SUM_EPSILON: f32 = 1e-4;

/// Field names as they appear in the configuration document
pub mod field {
    pub const START_PADDING: &str = "startPadding";
    pub const END_PADDING: &str = "endPadding";
    pub const GUTTER: &str = "gutter";
    pub const CELL_SIZE: &str = "cellSize";
    pub const HOTSEAT_QSB_SPACE: &str = "hotseatQsbSpace";
    pub const EDGE_PADDING: &str = "edgePadding";
    pub const ICON_SIZE: &str = "iconSize";
    pub const ICON_TEXT_SIZE: &str = "iconTextSize";
    pub const ICON_DRAWABLE_PADDING: &str = "iconDrawablePadding";
}

// ============================================================================
// SECTION 1: Kind-specific size sets
// ============================================================================

/// Paddings, gutter and cell size (workspace, all apps, folder)
#[derive(Debug, Clone, PartialEq)]
pub struct GridSizes {
    pub start_padding: SizeSpec,
    pub end_padding: SizeSpec,
    pub gutter: SizeSpec,
    pub cell_size: SizeSpec,
}

impl GridSizes {
    pub fn named(&self) -> [(&'static str, &SizeSpec); 4] {
        [
            (field::START_PADDING, &self.start_padding),
            (field::END_PADDING, &self.end_padding),
            (field::GUTTER, &self.gutter),
            (field::CELL_SIZE, &self.cell_size),
        ]
    }

    fn validate_sums(&self, max_available_size: i32) -> Result<(), ValidationError> {
        let named = self.named();

        let remainder: f32 = named.iter().map(|(_, s)| s.of_remainder_space()).sum();
        if remainder.abs() > SUM_EPSILON && (remainder - 1.0).abs() > SUM_EPSILON {
            return Err(ValidationError::RemainderSpaceSum(remainder));
        }

        let available: f32 = named.iter().map(|(_, s)| s.of_available_space()).sum();
        if available > 1.0 - SUM_EPSILON {
            return Err(ValidationError::AvailableSpaceSum(available));
        }

        check_fixed_budget(&named, max_available_size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotseatSizes {
    pub hotseat_qsb_space: SizeSpec,
    pub edge_padding: SizeSpec,
}

impl HotseatSizes {
    pub fn named(&self) -> [(&'static str, &SizeSpec); 2] {
        [
            (field::HOTSEAT_QSB_SPACE, &self.hotseat_qsb_space),
            (field::EDGE_PADDING, &self.edge_padding),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellSizes {
    pub icon_size: SizeSpec,
    pub icon_text_size: SizeSpec,
    pub icon_drawable_padding: SizeSpec,
}

impl CellSizes {
    pub fn named(&self) -> [(&'static str, &SizeSpec); 3] {
        [
            (field::ICON_SIZE, &self.icon_size),
            (field::ICON_TEXT_SIZE, &self.icon_text_size),
            (field::ICON_DRAWABLE_PADDING, &self.icon_drawable_padding),
        ]
    }
}

/// Size set of a breakpoint, tagged by spec kind
#[derive(Debug, Clone, PartialEq)]
pub enum SpecSizes {
    Workspace(GridSizes),
    AllApps(GridSizes),
    Folder(GridSizes),
    Hotseat(HotseatSizes),
    Cell(CellSizes),
}

impl SpecSizes {
    pub fn kind(&self) -> SpecKind {
        match self {
            SpecSizes::Workspace(_) => SpecKind::Workspace,
            SpecSizes::AllApps(_) => SpecKind::AllApps,
            SpecSizes::Folder(_) => SpecKind::Folder,
            SpecSizes::Hotseat(_) => SpecKind::Hotseat,
            SpecSizes::Cell(_) => SpecKind::Cell,
        }
    }

    /// All named fields in document order
    pub fn fields(&self) -> Vec<(&'static str, &SizeSpec)> {
        match self {
            SpecSizes::Workspace(g) | SpecSizes::AllApps(g) | SpecSizes::Folder(g) => g.named().to_vec(),
            SpecSizes::Hotseat(h) => h.named().to_vec(),
            SpecSizes::Cell(c) => c.named().to_vec(),
        }
    }

    /// First field that inherits from a sibling spec, if any
    pub fn first_match_workspace(&self) -> Option<&'static str> {
        self.fields()
            .into_iter()
            .find(|(_, spec)| spec.is_match_workspace())
            .map(|(name, _)| name)
    }
}

fn check_fixed_budget(named: &[(&'static str, &SizeSpec)], max_available_size: i32) -> Result<(), ValidationError> {
    let sum: f32 = named.iter().map(|(_, s)| s.fixed_size()).sum();
    if sum > max_available_size as f32 {
        return Err(ValidationError::FixedSizeBudget { sum, max_available_size });
    }
    Ok(())
}

// ============================================================================
// SECTION 2: Breakpoint
// ============================================================================

/// Identity shared by breakpoints and the specs calculated from them
pub trait ResponsiveSpec {
    fn max_available_size(&self) -> i32;
    fn axis(&self) -> Axis;
    fn spec_kind(&self) -> SpecKind;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoint {
    max_available_size: i32,
    axis: Axis,
    sizes: SpecSizes,
}

impl ResponsiveSpec for Breakpoint {
    fn max_available_size(&self) -> i32 {
        self.max_available_size
    }

    fn axis(&self) -> Axis {
        self.axis
    }

    fn spec_kind(&self) -> SpecKind {
        self.sizes.kind()
    }
}

impl Breakpoint {
    /// Validated constructor; the error names the offending entry
    pub fn new(max_available_size: i32, axis: Axis, sizes: SpecSizes) -> Result<Self, Error> {
        let breakpoint = Breakpoint { max_available_size, axis, sizes };
        breakpoint.validate().map_err(|source| Error::InvalidBreakpoint {
            kind: breakpoint.spec_kind(),
            axis,
            max_available_size,
            source,
        })?;
        Ok(breakpoint)
    }

    pub fn sizes(&self) -> &SpecSizes {
        &self.sizes
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_available_size <= 0 {
            return Err(ValidationError::NonPositiveMaxAvailableSize(self.max_available_size));
        }

        let kind = self.spec_kind();
        if !kind.axes().contains(&self.axis) {
            return Err(ValidationError::AxisNotAllowed { kind, axis: self.axis });
        }

        for (name, spec) in self.sizes.fields() {
            spec.validate(name)?;
        }

        match &self.sizes {
            SpecSizes::Workspace(g) => {
                // Workspace is what the other kinds match against
                if let Some(name) = self.sizes.first_match_workspace() {
                    return Err(ValidationError::WorkspaceMatch { field: name });
                }
                g.validate_sums(self.max_available_size)
            }
            SpecSizes::AllApps(g) | SpecSizes::Folder(g) => g.validate_sums(self.max_available_size),
            SpecSizes::Hotseat(h) => {
                Self::require_fixed(kind, &h.named(), false)?;
                check_fixed_budget(&h.named(), self.max_available_size)
            }
            SpecSizes::Cell(c) => {
                Self::require_fixed(kind, &c.named(), true)?;
                check_fixed_budget(&c.named(), self.max_available_size)
            }
        }
    }

    fn require_fixed(
        kind: SpecKind,
        named: &[(&'static str, &SizeSpec)],
        allow_match_workspace: bool,
    ) -> Result<(), ValidationError> {
        for &(name, spec) in named {
            if !spec.only_fixed_size(allow_match_workspace) {
                return Err(ValidationError::NotFixedSize { kind, field: name });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn grid(start: SizeSpec, end: SizeSpec, gutter: SizeSpec, cell: SizeSpec) -> GridSizes {
        GridSizes { start_padding: start, end_padding: end, gutter, cell_size: cell }
    }

    fn phone_width() -> GridSizes {
        grid(
            SizeSpec::fixed(58.0),
            SizeSpec::fixed(58.0),
            SizeSpec::fixed(42.0),
            SizeSpec::of_available(0.15808),
        )
    }

    #[test]
    fn test_valid_workspace_breakpoint() {
        let bp = Breakpoint::new(9999, Axis::Width, SpecSizes::Workspace(phone_width())).unwrap();
        assert_eq!(bp.max_available_size(), 9999);
        assert_eq!(bp.axis(), Axis::Width);
        assert_eq!(bp.spec_kind(), SpecKind::Workspace);
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let err = Breakpoint::new(0, Axis::Width, SpecSizes::Workspace(phone_width())).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidBreakpoint { source: ValidationError::NonPositiveMaxAvailableSize(0), .. }
        ));
    }

    #[test]
    fn test_remainder_sum_must_be_zero_or_one() {
        let half = grid(
            SizeSpec::fixed(10.0),
            SizeSpec::fixed(10.0),
            SizeSpec::fixed(10.0),
            SizeSpec::of_remainder(0.5),
        );
        let bp = Breakpoint { max_available_size: 500, axis: Axis::Height, sizes: SpecSizes::Workspace(half) };
        assert_eq!(bp.validate(), Err(ValidationError::RemainderSpaceSum(0.5)));

        // split across two fields is fine when it adds up to 1
        let split = grid(
            SizeSpec::of_remainder(0.5),
            SizeSpec::of_remainder(0.5),
            SizeSpec::fixed(10.0),
            SizeSpec::fixed(80.0),
        );
        let bp = Breakpoint { max_available_size: 500, axis: Axis::Height, sizes: SpecSizes::Workspace(split) };
        assert!(bp.is_valid());

        let uneven = grid(
            SizeSpec::of_remainder(0.3),
            SizeSpec::of_remainder(0.7),
            SizeSpec::fixed(10.0),
            SizeSpec::fixed(80.0),
        );
        let bp = Breakpoint { max_available_size: 500, axis: Axis::Height, sizes: SpecSizes::Folder(uneven) };
        assert!(bp.is_valid());
    }

    #[test]
    fn test_available_sum_must_stay_below_one() {
        let sizes = grid(
            SizeSpec::of_available(0.25),
            SizeSpec::of_available(0.25),
            SizeSpec::of_available(0.25),
            SizeSpec::of_available(0.25),
        );
        let bp = Breakpoint { max_available_size: 500, axis: Axis::Width, sizes: SpecSizes::AllApps(sizes) };
        assert_eq!(bp.validate(), Err(ValidationError::AvailableSpaceSum(1.0)));

        // within tolerance of 1 counts as the whole space
        let nearly = grid(
            SizeSpec::of_available(0.25),
            SizeSpec::of_available(0.25),
            SizeSpec::of_available(0.25),
            SizeSpec::of_available(0.24999),
        );
        let bp = Breakpoint { max_available_size: 500, axis: Axis::Width, sizes: SpecSizes::Folder(nearly) };
        assert!(matches!(bp.validate(), Err(ValidationError::AvailableSpaceSum(_))));

        let most = grid(
            SizeSpec::of_available(0.2),
            SizeSpec::of_available(0.2),
            SizeSpec::of_available(0.2),
            SizeSpec::of_available(0.3),
        );
        let bp = Breakpoint { max_available_size: 500, axis: Axis::Width, sizes: SpecSizes::Folder(most) };
        assert!(bp.is_valid());
    }

    #[test]
    fn test_fixed_sum_within_threshold() {
        let sizes = grid(
            SizeSpec::fixed(100.0),
            SizeSpec::fixed(100.0),
            SizeSpec::fixed(100.0),
            SizeSpec::fixed(300.0),
        );
        let bp = Breakpoint { max_available_size: 599, axis: Axis::Width, sizes: SpecSizes::Workspace(sizes.clone()) };
        assert_eq!(
            bp.validate(),
            Err(ValidationError::FixedSizeBudget { sum: 600.0, max_available_size: 599 })
        );
        let bp = Breakpoint { max_available_size: 600, axis: Axis::Width, sizes: SpecSizes::Workspace(sizes) };
        assert!(bp.is_valid());
    }

    #[test]
    fn test_workspace_cannot_match_workspace() {
        let sizes = grid(
            SizeSpec::fixed(10.0),
            SizeSpec::fixed(10.0),
            SizeSpec::match_workspace(),
            SizeSpec::of_remainder(1.0),
        );
        let bp = Breakpoint { max_available_size: 500, axis: Axis::Width, sizes: SpecSizes::Workspace(sizes.clone()) };
        assert_eq!(bp.validate(), Err(ValidationError::WorkspaceMatch { field: field::GUTTER }));

        let bp = Breakpoint { max_available_size: 500, axis: Axis::Width, sizes: SpecSizes::Folder(sizes) };
        assert!(bp.is_valid());
    }

    #[test]
    fn test_hotseat_fixed_only() {
        let ok = HotseatSizes { hotseat_qsb_space: SizeSpec::fixed(24.0), edge_padding: SizeSpec::fixed(40.0) };
        assert!(Breakpoint::new(300, Axis::Height, SpecSizes::Hotseat(ok)).is_ok());

        let bad = HotseatSizes { hotseat_qsb_space: SizeSpec::of_available(0.1), edge_padding: SizeSpec::fixed(40.0) };
        let bp = Breakpoint { max_available_size: 300, axis: Axis::Height, sizes: SpecSizes::Hotseat(bad) };
        assert_eq!(
            bp.validate(),
            Err(ValidationError::NotFixedSize { kind: SpecKind::Hotseat, field: field::HOTSEAT_QSB_SPACE })
        );

        let matching = HotseatSizes { hotseat_qsb_space: SizeSpec::match_workspace(), edge_padding: SizeSpec::fixed(40.0) };
        let bp = Breakpoint { max_available_size: 300, axis: Axis::Height, sizes: SpecSizes::Hotseat(matching) };
        assert!(!bp.is_valid());

        let over = HotseatSizes { hotseat_qsb_space: SizeSpec::fixed(200.0), edge_padding: SizeSpec::fixed(200.0) };
        let bp = Breakpoint { max_available_size: 300, axis: Axis::Width, sizes: SpecSizes::Hotseat(over) };
        assert!(matches!(bp.validate(), Err(ValidationError::FixedSizeBudget { .. })));
    }

    #[test]
    fn test_cell_height_only_and_may_match() {
        let cell = CellSizes {
            icon_size: SizeSpec::match_workspace(),
            icon_text_size: SizeSpec::fixed(14.0),
            icon_drawable_padding: SizeSpec::fixed(8.0),
        };
        let bp = Breakpoint { max_available_size: 9999, axis: Axis::Height, sizes: SpecSizes::Cell(cell.clone()) };
        assert!(bp.is_valid());

        let bp = Breakpoint { max_available_size: 9999, axis: Axis::Width, sizes: SpecSizes::Cell(cell) };
        assert_eq!(
            bp.validate(),
            Err(ValidationError::AxisNotAllowed { kind: SpecKind::Cell, axis: Axis::Width })
        );
    }

    #[test]
    fn test_invalid_field_is_named() {
        let sizes = grid(
            SizeSpec::fixed(10.0),
            SizeSpec::default(),
            SizeSpec::fixed(10.0),
            SizeSpec::of_remainder(1.0),
        );
        let bp = Breakpoint { max_available_size: 500, axis: Axis::Width, sizes: SpecSizes::AllApps(sizes) };
        assert_eq!(bp.validate(), Err(ValidationError::NoActiveMode { field: field::END_PADDING }));
    }
}
