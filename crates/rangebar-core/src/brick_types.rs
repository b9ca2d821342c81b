//! Brick types: verifiable widget contracts.
//!
//! Every widget is also a [`Brick`]: it publishes assertions about its own
//! state and a paint budget, and `verify()` evaluates those assertions
//! against live state. Renderers call `can_render()` before painting and
//! refuse to paint a widget whose state is falsified.

use std::time::Duration;

/// Assertion that must hold for a brick to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickAssertion {
    /// Maximum render latency in milliseconds
    MaxLatencyMs(u32),

    /// Named invariant checked by the widget itself
    Invariant(&'static str),
}

/// Performance budget for a brick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickBudget {
    /// Maximum time for measure phase
    pub measure_ms: u32,
    /// Maximum time for layout phase
    pub layout_ms: u32,
    /// Maximum time for paint phase
    pub paint_ms: u32,
    /// Total budget
    pub total_ms: u32,
}

impl BrickBudget {
    /// Budget split evenly across phases.
    #[must_use]
    pub const fn uniform(total_ms: u32) -> Self {
        let phase_ms = total_ms / 3;
        Self {
            measure_ms: phase_ms,
            layout_ms: phase_ms,
            paint_ms: phase_ms,
            total_ms,
        }
    }
}

impl Default for BrickBudget {
    fn default() -> Self {
        // one frame at 60fps
        Self::uniform(16)
    }
}

/// Result of verifying brick assertions
#[derive(Debug, Clone, Default)]
pub struct BrickVerification {
    /// All assertions that passed
    pub passed: Vec<BrickAssertion>,
    /// All assertions that failed with reasons
    pub failed: Vec<(BrickAssertion, String)>,
    /// Time taken to verify
    pub verification_time: Duration,
}

impl BrickVerification {
    /// Record the outcome of one assertion.
    pub fn check(&mut self, assertion: BrickAssertion, holds: bool, reason: impl FnOnce() -> String) {
        if holds {
            self.passed.push(assertion);
        } else {
            self.failed.push((assertion, reason()));
        }
    }

    /// Record the latency assertion for a verification that took `elapsed`.
    pub fn check_latency(&mut self, budget: BrickBudget, elapsed: Duration) {
        let limit = Duration::from_millis(u64::from(budget.total_ms));
        self.check(
            BrickAssertion::MaxLatencyMs(budget.total_ms),
            elapsed <= limit,
            || format!("took {elapsed:?}, budget {limit:?}"),
        );
        self.verification_time = elapsed;
    }

    /// Check if all assertions passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }

    /// Convert into a result, surfacing the first failed assertion.
    pub fn into_result(self) -> BrickResult<()> {
        match self.failed.into_iter().next() {
            None => Ok(()),
            Some((assertion, reason)) => Err(BrickError::AssertionFailed { assertion, reason }),
        }
    }
}

/// Core Brick trait.
///
/// `Widget` requires `Brick`, so every widget carries verifiable
/// assertions, a budget and an HTML/CSS rendition.
pub trait Brick: Send + Sync {
    /// Get the brick's unique type name
    fn brick_name(&self) -> &'static str;

    /// Get all assertions for this brick
    fn assertions(&self) -> &[BrickAssertion];

    /// Get the performance budget
    fn budget(&self) -> BrickBudget;

    /// Verify all assertions against current state
    fn verify(&self) -> BrickVerification;

    /// Generate HTML for this brick. Must be deterministic.
    fn to_html(&self) -> String;

    /// Generate CSS for this brick. Must be deterministic.
    fn to_css(&self) -> String;

    /// Get the test ID for DOM queries
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Check if this brick can be rendered (all assertions pass)
    fn can_render(&self) -> bool {
        self.verify().is_valid()
    }
}

/// Brick verification errors.
#[derive(Debug, Clone)]
pub enum BrickError {
    /// Assertion failed during verification
    AssertionFailed {
        /// The assertion that failed
        assertion: BrickAssertion,
        /// Reason for failure
        reason: String,
    },

    /// Missing required element
    MissingElement {
        /// Selector of the missing element
        selector: String,
    },
}

impl std::fmt::Display for BrickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AssertionFailed { assertion, reason } => {
                write!(f, "Assertion {assertion:?} failed: {reason}")
            }
            Self::MissingElement { selector } => {
                write!(f, "Missing required element: {selector}")
            }
        }
    }
}

impl std::error::Error for BrickError {}

/// Result type for brick operations
pub type BrickResult<T> = Result<T, BrickError>;
