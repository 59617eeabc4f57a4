// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

//! Spec tables and two-level lookup
//!
//! A SpecTable holds the aspect ratio groups of one spec kind, sorted by
//! their aspect ratio ceiling. Each group holds a width list and a height
//! list of breakpoints sorted by maxAvailableSize. Lookup takes the first
//! group whose ceiling covers the aspect ratio, then the first breakpoint
//! whose threshold covers the available size. Tables are immutable once
//! built and can be shared between threads for concurrent resolves.

use log::info;

use crate::gsb_breakpoint::{Breakpoint, ResponsiveSpec};
use crate::gsc_core::{Axis, SpecKind};
use crate::gse_error::{LookupError, Result, ValidationError};
use crate::gsr_resolve::{calculate, CalculatedSpec};

// ============================================================================
// SECTION 1: Aspect ratio group
// ============================================================================

#[derive(Debug, Clone)]
pub struct AspectRatioGroup {
    kind: SpecKind,
    max_aspect_ratio: f32,
    width_breakpoints: Vec<Breakpoint>,
    height_breakpoints: Vec<Breakpoint>,
}

impl AspectRatioGroup {
    /// Partition `breakpoints` by axis and sort each list ascending
    pub fn new(kind: SpecKind, max_aspect_ratio: f32, breakpoints: Vec<Breakpoint>) -> Result<Self> {
        if max_aspect_ratio.is_nan() || max_aspect_ratio <= 0.0 {
            return Err(ValidationError::NonPositiveAspectRatio(max_aspect_ratio).into());
        }

        let mut width_breakpoints = Vec::new();
        let mut height_breakpoints = Vec::new();

        for breakpoint in breakpoints {
            if breakpoint.spec_kind() != kind {
                return Err(ValidationError::KindMismatch { expected: kind, found: breakpoint.spec_kind() }.into());
            }
            // Breakpoint::new already rejected axes the kind does not allow
            debug_assert!(kind.axes().contains(&breakpoint.axis()));
            match breakpoint.axis() {
                Axis::Width => width_breakpoints.push(breakpoint),
                Axis::Height => height_breakpoints.push(breakpoint),
            }
        }

        let complete = kind.axes().iter().all(|axis| match axis {
            Axis::Width => !width_breakpoints.is_empty(),
            Axis::Height => !height_breakpoints.is_empty(),
        });
        if !complete {
            return Err(ValidationError::IncompleteGroup {
                kind,
                aspect_ratio: max_aspect_ratio,
                width: width_breakpoints.len(),
                height: height_breakpoints.len(),
            }
            .into());
        }

        width_breakpoints.sort_by_key(|b| b.max_available_size());
        height_breakpoints.sort_by_key(|b| b.max_available_size());

        Ok(AspectRatioGroup {
            kind,
            max_aspect_ratio,
            width_breakpoints,
            height_breakpoints,
        })
    }

    pub fn kind(&self) -> SpecKind {
        self.kind
    }

    pub fn max_aspect_ratio(&self) -> f32 {
        self.max_aspect_ratio
    }

    pub fn breakpoints(&self, axis: Axis) -> &[Breakpoint] {
        match axis {
            Axis::Width => &self.width_breakpoints,
            Axis::Height => &self.height_breakpoints,
        }
    }

    /// First breakpoint on `axis` whose threshold is >= `available_size`
    pub fn lookup_breakpoint(&self, axis: Axis, available_size: i32) -> std::result::Result<&Breakpoint, LookupError> {
        self.breakpoints(axis)
            .iter()
            .find(|b| available_size <= b.max_available_size())
            .ok_or(LookupError::NoBreakpoint {
                kind: self.kind,
                axis,
                available_size,
                aspect_ratio: self.max_aspect_ratio,
            })
    }
}

// ============================================================================
// SECTION 2: Spec table
// ============================================================================

#[derive(Debug, Clone)]
pub struct SpecTable {
    kind: SpecKind,
    groups: Vec<AspectRatioGroup>,
}

impl SpecTable {
    pub fn new(kind: SpecKind, mut groups: Vec<AspectRatioGroup>) -> Result<Self> {
        if groups.is_empty() {
            return Err(ValidationError::EmptyTable { kind }.into());
        }
        if let Some(group) = groups.iter().find(|g| g.kind() != kind) {
            return Err(ValidationError::KindMismatch { expected: kind, found: group.kind() }.into());
        }

        groups.sort_by(|a, b| a.max_aspect_ratio.total_cmp(&b.max_aspect_ratio));

        info!(target: "table", "{} table built: {} groups, ceilings {:?}",
            kind,
            groups.len(),
            groups.iter().map(|g| g.max_aspect_ratio).collect::<Vec<_>>());

        Ok(SpecTable { kind, groups })
    }

    pub fn kind(&self) -> SpecKind {
        self.kind
    }

    pub fn groups(&self) -> &[AspectRatioGroup] {
        &self.groups
    }

    /// First group whose ceiling is >= `aspect_ratio`
    pub fn lookup_group(&self, aspect_ratio: f32) -> std::result::Result<&AspectRatioGroup, LookupError> {
        self.groups
            .iter()
            .find(|g| aspect_ratio <= g.max_aspect_ratio)
            .ok_or(LookupError::NoAspectRatioGroup { kind: self.kind, aspect_ratio })
    }

    pub fn lookup_breakpoint(
        &self,
        aspect_ratio: f32,
        axis: Axis,
        available_size: i32,
    ) -> std::result::Result<&Breakpoint, LookupError> {
        self.lookup_group(aspect_ratio)?.lookup_breakpoint(axis, available_size)
    }

    /// Resolve a spec that does not inherit from a sibling
    pub fn resolve(&self, aspect_ratio: f32, axis: Axis, cell_count: u32, available_space: i32) -> Result<CalculatedSpec> {
        self.resolve_with(aspect_ratio, axis, cell_count, available_space, None)
    }

    /// Resolve a spec whose matchWorkspace fields read from `sibling`
    pub fn resolve_matching(
        &self,
        aspect_ratio: f32,
        axis: Axis,
        cell_count: u32,
        available_space: i32,
        sibling: &CalculatedSpec,
    ) -> Result<CalculatedSpec> {
        self.resolve_with(aspect_ratio, axis, cell_count, available_space, Some(sibling))
    }

    fn resolve_with(
        &self,
        aspect_ratio: f32,
        axis: Axis,
        cell_count: u32,
        available_space: i32,
        sibling: Option<&CalculatedSpec>,
    ) -> Result<CalculatedSpec> {
        let group = self.lookup_group(aspect_ratio)?;
        let breakpoint = group.lookup_breakpoint(axis, available_space)?;
        Ok(calculate(breakpoint, group.max_aspect_ratio, available_space, cell_count, sibling)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gse_error::Error;
    use crate::gsb_breakpoint::tests::grid;
    use crate::gsb_breakpoint::{CellSizes, SpecSizes};
    use crate::gsv_value::SizeSpec;

    fn ws(axis: Axis, max: i32, cell: f32) -> Breakpoint {
        Breakpoint::new(
            max,
            axis,
            SpecSizes::Workspace(grid(
                SizeSpec::fixed(10.0),
                SizeSpec::fixed(10.0),
                SizeSpec::fixed(5.0),
                SizeSpec::fixed(cell),
            )),
        )
        .unwrap()
    }

    fn table() -> SpecTable {
        let narrow = AspectRatioGroup::new(
            SpecKind::Workspace,
            1.0,
            vec![
                ws(Axis::Width, 9999, 3.0),
                ws(Axis::Width, 584, 1.0),
                ws(Axis::Width, 612, 2.0),
                ws(Axis::Height, 9999, 4.0),
            ],
        )
        .unwrap();
        let wide = AspectRatioGroup::new(
            SpecKind::Workspace,
            10.0,
            vec![ws(Axis::Width, 9999, 7.0), ws(Axis::Height, 9999, 8.0)],
        )
        .unwrap();
        SpecTable::new(SpecKind::Workspace, vec![wide, narrow]).unwrap()
    }

    #[test]
    fn test_breakpoint_lookup_is_monotonic() {
        let table = table();
        let pick = |size| table.lookup_breakpoint(0.5, Axis::Width, size).unwrap().max_available_size();
        assert_eq!(pick(600), 612);
        assert_eq!(pick(612), 612);
        assert_eq!(pick(613), 9999);
        assert_eq!(pick(9999), 9999);
        assert_eq!(pick(0), 584);
        assert_eq!(pick(-20), 584);
        assert_eq!(pick(584), 584);
    }

    #[test]
    fn test_lookup_beyond_catch_all_fails() {
        let table = table();
        assert_eq!(
            table.lookup_breakpoint(0.5, Axis::Height, 10000),
            Err(LookupError::NoBreakpoint {
                kind: SpecKind::Workspace,
                axis: Axis::Height,
                available_size: 10000,
                aspect_ratio: 1.0,
            })
        );
        assert_eq!(
            table.lookup_group(10.5).map(|g| g.max_aspect_ratio()),
            Err(LookupError::NoAspectRatioGroup { kind: SpecKind::Workspace, aspect_ratio: 10.5 })
        );
    }

    #[test]
    fn test_groups_sorted_by_ceiling() {
        let table = table();
        let ceilings: Vec<f32> = table.groups().iter().map(|g| g.max_aspect_ratio()).collect();
        assert_eq!(ceilings, vec![1.0, 10.0]);
        assert_eq!(table.lookup_group(1.0).unwrap().max_aspect_ratio(), 1.0);
        assert_eq!(table.lookup_group(1.01).unwrap().max_aspect_ratio(), 10.0);
    }

    #[test]
    fn test_resolve_uses_selected_entry() {
        let table = table();
        let spec = table.resolve(2.0, Axis::Width, 4, 1000).unwrap();
        assert_eq!(spec.grid().unwrap().cell_size_px, 7);
        assert_eq!(spec.source().max_aspect_ratio, 10.0);
        assert_eq!(spec.max_available_size(), 9999);

        // fixed-only entry: used space adds up exactly, nothing left to remainder
        let g = spec.grid().unwrap();
        assert_eq!(g.used_space(4), 10 + 10 + 5 * 3 + 7 * 4);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let table = table();
        let a = table.resolve(0.7, Axis::Width, 5, 600).unwrap();
        let b = table.resolve(0.7, Axis::Width, 5, 600).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_incomplete_group_rejected() {
        let err = AspectRatioGroup::new(SpecKind::Workspace, 1.0, vec![ws(Axis::Width, 9999, 3.0)]).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::IncompleteGroup { width: 1, height: 0, .. })
        ));
    }

    #[test]
    fn test_cell_group_height_only() {
        let cell = || {
            CellSizes {
                icon_size: SizeSpec::fixed(48.0),
                icon_text_size: SizeSpec::fixed(14.0),
                icon_drawable_padding: SizeSpec::fixed(8.0),
            }
        };
        let height = Breakpoint::new(9999, Axis::Height, SpecSizes::Cell(cell())).unwrap();
        assert!(AspectRatioGroup::new(SpecKind::Cell, 10.0, vec![height.clone()]).is_ok());

        let err = AspectRatioGroup::new(SpecKind::Workspace, 10.0, vec![height]).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::KindMismatch { expected: SpecKind::Workspace, found: SpecKind::Cell })
        ));

        assert!(Breakpoint::new(9999, Axis::Width, SpecSizes::Cell(cell())).is_err());
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            SpecTable::new(SpecKind::Folder, Vec::new()),
            Err(Error::Validation(ValidationError::EmptyTable { kind: SpecKind::Folder }))
        ));
        assert!(AspectRatioGroup::new(SpecKind::Folder, 0.0, Vec::new()).is_err());
    }
}
