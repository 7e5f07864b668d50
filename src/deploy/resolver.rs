// ABOUTME: Pure action resolution over a point-in-time slot registry view.
// ABOUTME: Picks the target slot and enforces the two-slot blue/green invariants.

use super::{Action, DEFAULT_STAGING_NAME, DeploymentRequest, DeploymentSettings, SlotSelector};
use super::error::PreconditionError;
use crate::slots::SlotView;
use crate::types::DeploymentName;

/// Most slots an app may have.
const MAX_SLOTS: usize = 2;

/// Whether a deploy provisions a new slot or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotIntent {
    Create,
    Update,
}

/// The single remote mutation an invocation will perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    Deploy {
        target: DeploymentName,
        intent: SlotIntent,
        settings: DeploymentSettings,
    },
    Promote {
        target: DeploymentName,
    },
    DeleteStaging {
        target: DeploymentName,
    },
}

impl Plan {
    pub fn target(&self) -> &DeploymentName {
        match self {
            Plan::Deploy { target, .. }
            | Plan::Promote { target }
            | Plan::DeleteStaging { target } => target,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Plan::Deploy { .. } => Action::Deploy,
            Plan::Promote { .. } => Action::Promote,
            Plan::DeleteStaging { .. } => Action::DeleteStaging,
        }
    }
}

/// Decide which slot `request` targets given the current registry.
///
/// Performs no I/O. Every failure here happens before any mutating call is issued.
pub fn resolve(request: &DeploymentRequest, view: &SlotView) -> Result<Plan, PreconditionError> {
    match request.action() {
        Action::Deploy => {
            let (target, intent) =
                resolve_deploy(request.target(), request.allow_create(), view)?;
            Ok(Plan::Deploy {
                target,
                intent,
                settings: request.settings().clone(),
            })
        }
        Action::Promote => Ok(Plan::Promote {
            target: resolve_promote(request.target(), view)?,
        }),
        Action::DeleteStaging => Ok(Plan::DeleteStaging {
            target: current_staging(view)?,
        }),
    }
}

fn resolve_deploy(
    selector: &SlotSelector,
    allow_create: bool,
    view: &SlotView,
) -> Result<(DeploymentName, SlotIntent), PreconditionError> {
    match selector {
        SlotSelector::Staging => match view.staging() {
            Some(staging) => Ok((remote_name(staging), SlotIntent::Update)),
            None if allow_create => {
                tracing::info!("no staging deployment, a new one will be created");
                Ok((remote_name(DEFAULT_STAGING_NAME), SlotIntent::Create))
            }
            None => Err(PreconditionError::NoStagingDeployment),
        },
        SlotSelector::Named(name) => {
            if view.contains(name.as_str()) {
                return Ok((name.clone(), SlotIntent::Update));
            }

            if !allow_create {
                return Err(PreconditionError::DeploymentDoesNotExist(name.to_string()));
            }

            if view.names.len() >= MAX_SLOTS {
                return Err(PreconditionError::TwoDeploymentsAlreadyExist {
                    requested: name.to_string(),
                    existing: view.names.clone(),
                });
            }

            tracing::info!(%name, "deployment does not exist, it will be created");
            Ok((name.clone(), SlotIntent::Create))
        }
    }
}

fn resolve_promote(
    selector: &SlotSelector,
    view: &SlotView,
) -> Result<DeploymentName, PreconditionError> {
    match selector {
        SlotSelector::Staging => current_staging(view),
        SlotSelector::Named(name) => {
            if view.staging() == Some(name.as_str()) {
                Ok(name.clone())
            } else {
                Err(PreconditionError::StagingDeploymentNameMismatch {
                    requested: name.to_string(),
                    staging: view.staging.clone(),
                })
            }
        }
    }
}

fn current_staging(view: &SlotView) -> Result<DeploymentName, PreconditionError> {
    view.staging()
        .map(remote_name)
        .ok_or(PreconditionError::NoStagingDeployment)
}

fn remote_name(name: &str) -> DeploymentName {
    DeploymentName::unchecked(name.to_string())
}
