// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

//! Core vocabulary shared by every gridspec module
//!
//! - Axis and SpecKind enums (with their document spellings)
//! - Half-up pixel rounding used by every resolution step
//! - Scalar attribute parsing (dimensions, fractions, flags)

use std::fmt;

// ============================================================================
// SECTION 1: Axis and spec kind
// ============================================================================

/// Screen dimension a breakpoint governs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    /// Parse the `dimensionType` attribute value
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "width" => Some(Axis::Width),
            "height" => Some(Axis::Height),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Width => "width",
            Axis::Height => "height",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Which grid surface a spec table sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecKind {
    Workspace,
    AllApps,
    Folder,
    Hotseat,
    Cell,
}

impl SpecKind {
    pub const ALL: [SpecKind; 5] = [
        SpecKind::Workspace,
        SpecKind::AllApps,
        SpecKind::Folder,
        SpecKind::Hotseat,
        SpecKind::Cell,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecKind::Workspace => "workspace",
            SpecKind::AllApps => "allApps",
            SpecKind::Folder => "folder",
            SpecKind::Hotseat => "hotseat",
            SpecKind::Cell => "cell",
        }
    }

    /// Axes a table of this kind must populate
    pub fn axes(&self) -> &'static [Axis] {
        match self {
            SpecKind::Cell => &[Axis::Height],
            _ => &[Axis::Width, Axis::Height],
        }
    }

    /// Kind a `matchWorkspace` field of this kind reads its value from
    pub fn sibling_kind(&self) -> Option<SpecKind> {
        match self {
            SpecKind::AllApps | SpecKind::Folder => Some(SpecKind::Workspace),
            SpecKind::Cell => Some(SpecKind::Cell),
            SpecKind::Workspace | SpecKind::Hotseat => None,
        }
    }
}

impl fmt::Display for SpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ============================================================================
// SECTION 2: Rounding
// ============================================================================

/// Round half-up to whole pixels (2.5 -> 3, -2.5 -> -2)
pub fn round_px(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

// ============================================================================
// SECTION 3: Scalar attribute parsing
// ============================================================================

/// Parse a dimension: "58px", "24dp" or a bare pixel count
/// `dp` values are scaled by `density` and rounded half-up
pub fn parse_dimension(s: &str, density: f32) -> Result<f32, String> {
    let s = s.trim();

    let (number, scale) = if let Some(n) = s.strip_suffix("dp") {
        (n, density)
    } else if let Some(n) = s.strip_suffix("dip") {
        (n, density)
    } else if let Some(n) = s.strip_suffix("px") {
        (n, 1.0)
    } else {
        (s, 1.0)
    };

    let value = number
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("invalid dimension: {}", s))?;

    if !value.is_finite() {
        return Err(format!("invalid dimension: {}", s));
    }

    if scale == 1.0 {
        Ok(value)
    } else {
        Ok(round_px(value * scale) as f32)
    }
}

/// Parse a plain float (fractions, aspect ratios)
pub fn parse_float(s: &str) -> Result<f32, String> {
    let s = s.trim();
    match s.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("invalid number: {}", s)),
    }
}

/// Parse a boolean flag ("true"/"false")
pub fn parse_flag(s: &str) -> Result<bool, String> {
    match s.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(format!("invalid flag: {}", other)),
    }
}
