// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

//! Responsive grid specs for launcher layouts
//!
//! Tables of breakpoints keyed by aspect ratio and available size, loaded
//! from XML documents and resolved into pixel values for a device.

// Value model
pub mod gsc_core;
pub mod gse_error;
pub mod gsv_value;
pub mod gsb_breakpoint;

// Tables and resolution
pub mod gsr_resolve;
pub mod gst_table;

// Documents and configuration
pub mod gsp_parse;
pub mod gsf_config;
pub mod gsd_device;

pub use gsb_breakpoint::{Breakpoint, CellSizes, GridSizes, HotseatSizes, ResponsiveSpec, SpecSizes};
pub use gsc_core::{Axis, SpecKind};
pub use gsd_device::{AxisPair, GridRequest, GridSpecs, ResolvedGrid};
pub use gse_error::{ConfigError, Error, LookupError, Result, ValidationError};
pub use gsf_config::{config_dir, deploy_defaults, load_document, Surface};
pub use gsp_parse::{parse_table, LoadOptions};
pub use gsr_resolve::{calculate, CalculatedSizes, CalculatedSpec, CellPx, GridPx, HotseatPx, SourceEntry};
pub use gst_table::{AspectRatioGroup, SpecTable};
pub use gsv_value::{SizeMode, SizeSpec};
