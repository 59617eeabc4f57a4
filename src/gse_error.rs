// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

//! Error types for loading, validating and resolving spec tables
//!
//! All failures are fatal for the operation that raised them: load-time
//! errors abort table construction, lookup errors abort the layout pass.

use thiserror::Error;

use crate::gsc_core::{Axis, SpecKind};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid {kind} breakpoint ({axis}, maxAvailableSize={max_available_size}): {source}")]
    InvalidBreakpoint {
        kind: SpecKind,
        axis: Axis,
        max_available_size: i32,
        #[source]
        source: ValidationError,
    },

    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),
}

/// Malformed or incomplete configuration document
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("XML parse error at byte {position}: {message}")]
    Xml { position: usize, message: String },

    #[error("document has no <{expected}> element")]
    MissingRoot { expected: &'static str },

    #[error("<{element}> missing required attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("<{element}> attribute '{attribute}': {message}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        message: String,
    },

    #[error("{kind} spec (maxAvailableSize={max_available_size}) missing <{field}>")]
    MissingField {
        kind: SpecKind,
        field: &'static str,
        max_available_size: i32,
    },

    #[error("unrecognized tag <{tag}> inside <{parent}>")]
    UnrecognizedTag { tag: String, parent: String },

    #[error("unexpected end of document inside <{element}>")]
    UnexpectedEof { element: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A value expression, breakpoint or group breaks an invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field}: no resolution mode is set")]
    NoActiveMode { field: &'static str },

    #[error("{field}: more than one resolution mode is set")]
    MultipleModes { field: &'static str },

    #[error("{field}: fraction {value} is outside [0, 1]")]
    FractionOutOfRange { field: &'static str, value: f32 },

    #[error("{field}: fixedSize {value} is negative")]
    NegativeFixedSize { field: &'static str, value: f32 },

    #[error("{field}: maxSize {value} must be positive")]
    InvalidMaxSize { field: &'static str, value: f32 },

    #[error("maxAvailableSize {0} must be positive")]
    NonPositiveMaxAvailableSize(i32),

    #[error("sum of ofRemainderSpace is {0}, expected 0 or 1")]
    RemainderSpaceSum(f32),

    #[error("sum of ofAvailableSpace is {0}, expected less than 1")]
    AvailableSpaceSum(f32),

    #[error("sum of fixedSize is {sum}, exceeds maxAvailableSize {max_available_size}")]
    FixedSizeBudget { sum: f32, max_available_size: i32 },

    #[error("{field}: workspace specs cannot use matchWorkspace")]
    WorkspaceMatch { field: &'static str },

    #[error("{field}: {kind} specs only accept fixed sizes")]
    NotFixedSize { kind: SpecKind, field: &'static str },

    #[error("{kind} specs do not accept {axis} breakpoints")]
    AxisNotAllowed { kind: SpecKind, axis: Axis },

    #[error("maxAspectRatio {0} must be positive")]
    NonPositiveAspectRatio(f32),

    #[error("{kind} group maxAspectRatio={aspect_ratio} is incomplete: width list size = {width}; height list size = {height}")]
    IncompleteGroup {
        kind: SpecKind,
        aspect_ratio: f32,
        width: usize,
        height: usize,
    },

    #[error("expected {expected} spec, found {found}")]
    KindMismatch { expected: SpecKind, found: SpecKind },

    #[error("{kind} table has no aspect ratio groups")]
    EmptyTable { kind: SpecKind },
}

/// Caller-facing resolution failure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("{kind}: no group covers aspect ratio {aspect_ratio}")]
    NoAspectRatioGroup { kind: SpecKind, aspect_ratio: f32 },

    #[error("{kind}: no {axis} breakpoint covers available size {available_size} (aspect ratio {aspect_ratio})")]
    NoBreakpoint {
        kind: SpecKind,
        axis: Axis,
        available_size: i32,
        aspect_ratio: f32,
    },

    #[error("{kind} {axis} spec given a {sibling_axis} sibling")]
    AxisMismatch {
        kind: SpecKind,
        axis: Axis,
        sibling_axis: Axis,
    },

    #[error("{kind} spec given a {found} sibling, expected {expected}")]
    SiblingKindMismatch {
        kind: SpecKind,
        expected: SpecKind,
        found: SpecKind,
    },

    #[error("{kind} field {field} uses matchWorkspace but no sibling spec was supplied")]
    MissingSibling { kind: SpecKind, field: &'static str },

    #[error("{kind} specs do not take a sibling spec")]
    UnexpectedSibling { kind: SpecKind },

    #[error("{kind}: cell count {cell_count} is out of range")]
    CellCountOutOfRange { kind: SpecKind, cell_count: u32 },
}
