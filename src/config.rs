#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::sync::RwLock;

/// The leaf filter's coverage threshold (spec §4.D). Unlike the three
/// residual/merge constants below, this is compiled in rather than exposed
/// through [SetPlaneConstants][crate::ffi::SetPlaneConstants] — the
/// reference implementation never made it tunable.
pub const COVERAGE_LIMIT: f32 = 20.0;

/// Tuning constants for the splitter and the cluster merger (spec §4.X).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneConstants {
    /// Split if any single sample's plane-distance exceeds this.
    pub max_residual_threshold: f32,
    /// Split if mean plane-distance exceeds this.
    pub split_threshold: f32,
    /// Lower bound on `|n . n'|` for a coplanar neighbor merge.
    pub min_dot_product: f32,
}

impl Default for PlaneConstants {
    #[inline]
    fn default() -> Self {
        Self {
            max_residual_threshold: 0.05,
            split_threshold: 0.015,
            min_dot_product: 0.9,
        }
    }
}

static GLOBAL_CONSTANTS: RwLock<PlaneConstants> = RwLock::new(PlaneConstants {
    max_residual_threshold: 0.05,
    split_threshold: 0.015,
    min_dot_product: 0.9,
});

/// Read the process-wide constants, as last set by
/// [set_global_constants] (or the defaults, if never called).
///
/// Mirrors the reference implementation's `g_mindist`/`g_splitThreshold`/
/// `g_MinDPVal` globals, which `SetPlaneConstants` mutates process-wide.
#[must_use]
pub fn global_constants() -> PlaneConstants {
    *GLOBAL_CONSTANTS.read().unwrap()
}

/// Set the process-wide constants. Used by [crate::ffi::SetPlaneConstants].
pub fn set_global_constants(constants: PlaneConstants) {
    *GLOBAL_CONSTANTS.write().unwrap() = constants;
}
