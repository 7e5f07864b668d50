// ABOUTME: Generic invocation struct parameterized by state marker.
// ABOUTME: State types carry their own data for compile-time guarantees.

use std::fmt;

use crate::locator::{ResourceLocator, TargetSpec};
use crate::types::DeploymentName;

use super::state::{Applied, Located, Pending, Planned};
use super::{Action, DeploymentRequest, Plan, SlotIntent};

/// One run of the tool, parameterized by how far it has progressed.
///
/// Transitions consume the invocation, so a plan can only be applied after the
/// registry was read, and the registry can only be read once the locator exists.
#[derive(Debug)]
pub struct Invocation<S> {
    pub(crate) request: DeploymentRequest,
    pub(crate) state: S,
}

impl Invocation<Pending> {
    pub fn new(target: TargetSpec, request: DeploymentRequest) -> Self {
        Invocation {
            request,
            state: Pending { target },
        }
    }

    pub fn target(&self) -> &TargetSpec {
        &self.state.target
    }
}

impl<S> Invocation<S> {
    pub fn request(&self) -> &DeploymentRequest {
        &self.request
    }

    pub fn action(&self) -> Action {
        self.request.action()
    }
}

impl Invocation<Located> {
    pub fn locator(&self) -> &ResourceLocator {
        &self.state.locator
    }
}

impl Invocation<Planned> {
    pub fn locator(&self) -> &ResourceLocator {
        &self.state.locator
    }

    pub fn plan(&self) -> &Plan {
        &self.state.plan
    }
}

impl Invocation<Applied> {
    /// Terminal state: report what was done.
    pub fn finish(self) -> Outcome {
        let intent = match &self.state.plan {
            Plan::Deploy { intent, .. } => Some(*intent),
            Plan::Promote { .. } | Plan::DeleteStaging { .. } => None,
        };

        Outcome {
            action: self.state.plan.action(),
            target: self.state.plan.target().clone(),
            intent,
            locator: self.state.locator,
        }
    }
}

/// Summary of a completed invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub action: Action,
    pub locator: ResourceLocator,
    pub target: DeploymentName,
    pub intent: Option<SlotIntent>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.action, self.intent) {
            (Action::Deploy, Some(SlotIntent::Create)) => write!(
                f,
                "Created deployment {} for {}",
                self.target, self.locator
            ),
            (Action::Deploy, _) => write!(
                f,
                "Updated deployment {} for {}",
                self.target, self.locator
            ),
            (Action::Promote, _) => write!(
                f,
                "Deployment {} now serves production for {}",
                self.target, self.locator
            ),
            (Action::DeleteStaging, _) => write!(
                f,
                "Deleted staging deployment {} for {}",
                self.target, self.locator
            ),
        }
    }
}
