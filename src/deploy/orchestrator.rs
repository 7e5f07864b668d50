// ABOUTME: Drives one invocation from parameters to a single remote mutation.
// ABOUTME: Locate, read the registry, resolve, apply; any failure aborts the run.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::locator::{ServiceDirectory, TargetSpec};
use crate::output::Output;
use crate::slots::{SlotReader, SlotWriter};

use super::{DeploymentRequest, Invocation, Outcome, Plan, SlotIntent};

/// Run the requested action against `client`.
///
/// Every remote call is awaited in sequence. Nothing is retried and nothing is
/// rolled back: a failure at any step ends the invocation.
pub async fn run<C>(
    client: &C,
    target: TargetSpec,
    request: DeploymentRequest,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<Outcome>
where
    C: ServiceDirectory + SlotReader + SlotWriter + ?Sized,
{
    output.progress(&format!(
        "Starting {} for service {} app {}",
        request.action(),
        target.service,
        target.app
    ));

    output.progress("  → Resolving service resource group...");
    let invocation = Invocation::new(target, request).locate(client).await?;
    output.progress(&format!(
        "  → Found service in resource group {}",
        invocation.locator().resource_group()
    ));

    output.progress("  → Reading deployments...");
    let invocation = invocation.plan(client, diag).await?;

    match invocation.plan() {
        Plan::Deploy {
            target,
            intent: SlotIntent::Create,
            ..
        } => output.progress(&format!("  → Creating deployment {target}...")),
        Plan::Deploy { target, .. } => {
            output.progress(&format!("  → Deploying to {target}..."))
        }
        Plan::Promote { target } => {
            output.progress(&format!("  → Setting {target} as production..."))
        }
        Plan::DeleteStaging { target } => {
            output.progress(&format!("  → Deleting staging deployment {target}..."))
        }
    }

    let outcome = invocation.apply(client, diag).await?.finish();
    tracing::info!(action = %outcome.action, target = %outcome.target, "action successful");

    Ok(outcome)
}
