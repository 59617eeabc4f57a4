// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

//! Whole-grid resolution
//!
//! GridSpecs owns one immutable table per launcher surface and resolves a
//! device configuration in dependency order:
//! workspace -> all apps, folder -> hotseat -> workspace cell -> all apps cell.
//! Surfaces that use matchWorkspace read the workspace result of the same axis.

use std::path::Path;

use log::{debug, info};

use crate::gsc_core::Axis;
use crate::gse_error::Result;
use crate::gsf_config::{load_document, Surface};
use crate::gsp_parse::{parse_table, LoadOptions};
use crate::gsr_resolve::CalculatedSpec;
use crate::gst_table::SpecTable;

/// Folder grid used when the request does not name one
pub const DEFAULT_FOLDER_GRID: (u32, u32) = (3, 3);

// ============================================================================
// SECTION 1: Request and result
// ============================================================================

/// Runtime inputs for one layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRequest {
    pub aspect_ratio: f32,
    pub width: i32,
    pub height: i32,
    pub columns: u32,
    pub rows: u32,
    pub folder_columns: u32,
    pub folder_rows: u32,
}

impl GridRequest {
    pub fn new(aspect_ratio: f32, width: i32, height: i32, columns: u32, rows: u32) -> Self {
        GridRequest {
            aspect_ratio,
            width,
            height,
            columns,
            rows,
            folder_columns: DEFAULT_FOLDER_GRID.0,
            folder_rows: DEFAULT_FOLDER_GRID.1,
        }
    }

    pub fn with_folder(mut self, columns: u32, rows: u32) -> Self {
        self.folder_columns = columns;
        self.folder_rows = rows;
        self
    }

    fn available(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }
}

/// Width and height results for one surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPair {
    pub width: CalculatedSpec,
    pub height: CalculatedSpec,
}

impl AxisPair {
    pub fn get(&self, axis: Axis) -> &CalculatedSpec {
        match axis {
            Axis::Width => &self.width,
            Axis::Height => &self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGrid {
    pub workspace: AxisPair,
    pub all_apps: AxisPair,
    pub folder: AxisPair,
    pub hotseat: AxisPair,
    pub workspace_cell: CalculatedSpec,
    pub all_apps_cell: CalculatedSpec,
}

// ============================================================================
// SECTION 2: GridSpecs
// ============================================================================

#[derive(Debug, Clone)]
pub struct GridSpecs {
    workspace: SpecTable,
    all_apps: SpecTable,
    folder: SpecTable,
    hotseat: SpecTable,
    workspace_cell: SpecTable,
    all_apps_cell: SpecTable,
}

impl GridSpecs {
    /// Build every table from documents in `dir`, using embedded defaults
    /// for surfaces with no file
    pub fn load(dir: &Path, options: &LoadOptions) -> Result<Self> {
        info!(target: "device", "loading grid specs from {}", dir.display());
        Self::build(|surface| Ok(load_document(dir, surface)?), options)
    }

    /// Build every table from the embedded defaults
    pub fn embedded(options: &LoadOptions) -> Result<Self> {
        info!(target: "device", "loading embedded grid specs");
        Self::build(|surface| Ok(surface.default_document().to_string()), options)
    }

    fn build<F>(mut document: F, options: &LoadOptions) -> Result<Self>
    where
        F: FnMut(Surface) -> Result<String>,
    {
        let mut table = |surface: Surface| -> Result<SpecTable> {
            let xml = document(surface)?;
            debug!(target: "device", "parsing {} table", surface);
            parse_table(surface.kind(), &xml, options)
        };

        Ok(GridSpecs {
            workspace: table(Surface::Workspace)?,
            all_apps: table(Surface::AllApps)?,
            folder: table(Surface::Folder)?,
            hotseat: table(Surface::Hotseat)?,
            workspace_cell: table(Surface::WorkspaceCell)?,
            all_apps_cell: table(Surface::AllAppsCell)?,
        })
    }

    pub fn table(&self, surface: Surface) -> &SpecTable {
        match surface {
            Surface::Workspace => &self.workspace,
            Surface::AllApps => &self.all_apps,
            Surface::Folder => &self.folder,
            Surface::Hotseat => &self.hotseat,
            Surface::WorkspaceCell => &self.workspace_cell,
            Surface::AllAppsCell => &self.all_apps_cell,
        }
    }

    /// Resolve every surface for one device configuration
    pub fn resolve_grid(&self, request: &GridRequest) -> Result<ResolvedGrid> {
        let ratio = request.aspect_ratio;

        let workspace = Self::resolve_pair(&self.workspace, request, request.columns, request.rows, None)?;
        let all_apps = Self::resolve_pair(&self.all_apps, request, request.columns, request.rows, Some(&workspace))?;
        let folder = Self::resolve_pair(
            &self.folder,
            request,
            request.folder_columns,
            request.folder_rows,
            Some(&workspace),
        )?;
        let hotseat = Self::resolve_pair(&self.hotseat, request, request.columns, 1, None)?;

        let workspace_cell = self.workspace_cell.resolve(ratio, Axis::Height, request.rows, request.height)?;
        let all_apps_cell =
            self.all_apps_cell
                .resolve_matching(ratio, Axis::Height, request.rows, request.height, &workspace_cell)?;

        debug!(
            target: "device",
            "resolved grid {}x{} ({} cols, {} rows, aspect {})",
            request.width, request.height, request.columns, request.rows, ratio
        );

        Ok(ResolvedGrid {
            workspace,
            all_apps,
            folder,
            hotseat,
            workspace_cell,
            all_apps_cell,
        })
    }

    fn resolve_pair(
        table: &SpecTable,
        request: &GridRequest,
        columns: u32,
        rows: u32,
        sibling: Option<&AxisPair>,
    ) -> Result<AxisPair> {
        let resolve = |axis: Axis, cells: u32| -> Result<CalculatedSpec> {
            let available = request.available(axis);
            match sibling {
                Some(pair) => table.resolve_matching(request.aspect_ratio, axis, cells, available, pair.get(axis)),
                None => table.resolve(request.aspect_ratio, axis, cells, available),
            }
        };

        Ok(AxisPair {
            width: resolve(Axis::Width, columns)?,
            height: resolve(Axis::Height, rows)?,
        })
    }
}
