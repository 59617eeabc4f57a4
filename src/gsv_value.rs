// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

//! Size value expressions
//!
//! A SizeSpec is one configurable quantity. Exactly one of its four modes
//! is active: a fixed pixel size, a fraction of the available space, a
//! fraction of the remainder space, or the matching workspace value.
//! An optional maxSize caps whatever the active mode produces.

use crate::gsc_core::round_px;
use crate::gse_error::ValidationError;

/// Active resolution mode of a SizeSpec (read-only view)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeMode {
    Fixed(f32),
    OfAvailableSpace(f32),
    OfRemainderSpace(f32),
    MatchWorkspace,
}

/// One configurable quantity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeSpec {
    fixed_size: f32,
    of_available_space: f32,
    of_remainder_space: f32,
    match_workspace: bool,
    max_size: Option<f32>,
}

impl SizeSpec {
    /// Build from raw attribute values as they appear in a document
    /// No checks are made here; call `validate` before use.
    pub fn from_parts(
        fixed_size: f32,
        of_available_space: f32,
        of_remainder_space: f32,
        match_workspace: bool,
        max_size: Option<f32>,
    ) -> Self {
        SizeSpec {
            fixed_size,
            of_available_space,
            of_remainder_space,
            match_workspace,
            max_size,
        }
    }

    pub fn fixed(px: f32) -> Self {
        SizeSpec { fixed_size: px, ..Default::default() }
    }

    pub fn of_available(fraction: f32) -> Self {
        SizeSpec { of_available_space: fraction, ..Default::default() }
    }

    pub fn of_remainder(fraction: f32) -> Self {
        SizeSpec { of_remainder_space: fraction, ..Default::default() }
    }

    pub fn match_workspace() -> Self {
        SizeSpec { match_workspace: true, ..Default::default() }
    }

    pub fn with_max_size(self, max_size: f32) -> Self {
        SizeSpec { max_size: Some(max_size), ..self }
    }

    pub fn fixed_size(&self) -> f32 {
        self.fixed_size
    }

    pub fn of_available_space(&self) -> f32 {
        self.of_available_space
    }

    pub fn of_remainder_space(&self) -> f32 {
        self.of_remainder_space
    }

    pub fn is_match_workspace(&self) -> bool {
        self.match_workspace
    }

    pub fn max_size(&self) -> Option<f32> {
        self.max_size
    }

    /// Active mode in resolution priority order, None when nothing is set
    pub fn mode(&self) -> Option<SizeMode> {
        if self.fixed_size > 0.0 {
            Some(SizeMode::Fixed(self.fixed_size))
        } else if self.of_available_space > 0.0 {
            Some(SizeMode::OfAvailableSpace(self.of_available_space))
        } else if self.of_remainder_space > 0.0 {
            Some(SizeMode::OfRemainderSpace(self.of_remainder_space))
        } else if self.match_workspace {
            Some(SizeMode::MatchWorkspace)
        } else {
            None
        }
    }

    fn active_mode_count(&self) -> usize {
        [
            self.fixed_size > 0.0,
            self.of_available_space > 0.0,
            self.of_remainder_space > 0.0,
            self.match_workspace,
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    /// Check the value-level invariants, naming `field` in the error
    pub fn validate(&self, field: &'static str) -> Result<(), ValidationError> {
        if self.fixed_size < 0.0 {
            return Err(ValidationError::NegativeFixedSize { field, value: self.fixed_size });
        }

        for value in [self.of_available_space, self.of_remainder_space] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::FractionOutOfRange { field, value });
            }
        }

        if let Some(max_size) = self.max_size {
            if max_size <= 0.0 {
                return Err(ValidationError::InvalidMaxSize { field, value: max_size });
            }
        }

        match self.active_mode_count() {
            0 => Err(ValidationError::NoActiveMode { field }),
            1 => Ok(()),
            _ => Err(ValidationError::MultipleModes { field }),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate("size").is_ok()
    }

    /// True when only a fixed size is set (or matchWorkspace, if allowed)
    pub fn only_fixed_size(&self, allow_match_workspace: bool) -> bool {
        if self.of_available_space > 0.0 || self.of_remainder_space > 0.0 {
            return false;
        }
        if self.match_workspace {
            return allow_match_workspace && self.fixed_size <= 0.0;
        }
        self.fixed_size > 0.0
    }

    /// Direct resolution; remainder-mode specs resolve to 0 here
    pub fn resolve(&self, available_space: i32, workspace_value: i32) -> i32 {
        let value = if self.fixed_size > 0.0 {
            round_px(self.fixed_size)
        } else if self.of_available_space > 0.0 {
            round_px(self.of_available_space * available_space as f32)
        } else if self.match_workspace {
            workspace_value
        } else {
            0
        };
        self.cap(value)
    }

    /// Remainder resolution; non-remainder specs return `default_value`
    pub fn resolve_remainder(&self, remainder_space: i32, default_value: i32) -> i32 {
        if self.of_remainder_space > 0.0 {
            self.cap(round_px(self.of_remainder_space * remainder_space as f32))
        } else {
            self.cap(default_value)
        }
    }

    fn cap(&self, value: i32) -> i32 {
        match self.max_size {
            Some(max_size) => value.min(round_px(max_size)),
            None => value,
        }
    }
}
