// ABOUTME: Invocation state marker types for the type state pattern.
// ABOUTME: Each state carries exactly the data that exists at that point of the run.

use crate::locator::{ResourceLocator, TargetSpec};

use super::Plan;

/// Initial state: parameters parsed, nothing resolved remotely.
/// Available actions: `locate()`
#[derive(Debug, Clone)]
pub struct Pending {
    pub(crate) target: TargetSpec,
}

/// Located: the resource group is known and the service is reachable.
/// Available actions: `plan()`
#[derive(Debug, Clone)]
pub struct Located {
    pub(crate) locator: ResourceLocator,
}

/// Planned: the target slot is resolved and all preconditions passed.
/// Available actions: `apply()`
#[derive(Debug, Clone)]
pub struct Planned {
    pub(crate) locator: ResourceLocator,
    pub(crate) plan: Plan,
}

/// Applied: the single mutating call succeeded.
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct Applied {
    pub(crate) locator: ResourceLocator,
    pub(crate) plan: Plan,
}
