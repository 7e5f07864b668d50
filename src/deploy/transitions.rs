// ABOUTME: State transition methods for invocation orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::artifact;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::Result;
use crate::locator::{LocatorError, ServiceDirectory, resolve_locator};
use crate::slots::{SlotReader, SlotView, SlotWriter, inactive_slot_count};

use super::error::RequestError;
use super::invocation::Invocation;
use super::resolver::{Plan, resolve};
use super::state::{Applied, Located, Pending, Planned};

// =============================================================================
// Pending -> Located
// =============================================================================

impl Invocation<Pending> {
    /// Discover the resource group of the target service.
    ///
    /// # Errors
    ///
    /// Returns a `LocatorError` if the service is missing, ambiguous, has a malformed
    /// id, or cannot be fetched.
    #[must_use = "invocation state must be used"]
    pub async fn locate<D: ServiceDirectory + ?Sized>(
        self,
        directory: &D,
    ) -> std::result::Result<Invocation<Located>, LocatorError> {
        let locator = resolve_locator(directory, self.state.target).await?;

        Ok(Invocation {
            request: self.request,
            state: Located { locator },
        })
    }
}

// =============================================================================
// Located -> Planned
// =============================================================================

impl Invocation<Located> {
    /// Read the slot registry once and resolve the target slot.
    ///
    /// # Errors
    ///
    /// Returns `ListDeploymentsError` if the registry cannot be read, or a
    /// precondition error if the registry does not allow the action.
    #[must_use = "invocation state must be used"]
    pub async fn plan<R: SlotReader + ?Sized>(
        self,
        reader: &R,
        diag: &mut Diagnostics,
    ) -> Result<Invocation<Planned>> {
        let locator = self.state.locator;
        let slots = reader.list_slots(&locator).await?;

        for slot in &slots {
            tracing::debug!(name = %slot.name, active = slot.active, "deployment slot");
        }

        let inactive = inactive_slot_count(&slots);
        if inactive > 1 {
            diag.warn(Warning::ambiguous_staging(format!(
                "{inactive} inactive deployments found for {locator}; using the last one listed"
            )));
        }

        let view = SlotView::from_slots(&slots);
        let plan = resolve(&self.request, &view)?;

        Ok(Invocation {
            request: self.request,
            state: Planned { locator, plan },
        })
    }
}

// =============================================================================
// Planned -> Applied
// =============================================================================

impl Invocation<Planned> {
    /// Issue the single mutating call the plan calls for.
    ///
    /// Deploys prepare the artifact first; a directory is compressed into a scratch
    /// archive that is removed once the call returns, whatever its result.
    ///
    /// # Errors
    ///
    /// Returns an artifact error if the package cannot be prepared, or the
    /// operation-specific remote error if the call fails.
    #[must_use = "invocation state must be used"]
    pub async fn apply<W: SlotWriter + ?Sized>(
        self,
        writer: &W,
        diag: &mut Diagnostics,
    ) -> Result<Invocation<Applied>> {
        let Planned { locator, plan } = self.state;

        match &plan {
            Plan::Deploy {
                target, settings, ..
            } => {
                let package = self.request.package().ok_or(RequestError::MissingPackage)?;
                let prepared = artifact::prepare(package).await?;
                tracing::info!(
                    source_type = %prepared.source_type(),
                    file = %prepared.path().display(),
                    "artifact ready for upload"
                );

                let result = writer
                    .create_or_update_deployment(&locator, target, &prepared, settings)
                    .await;

                if prepared.is_generated()
                    && let Err(e) = prepared.cleanup()
                {
                    diag.warn(Warning::archive_cleanup(format!(
                        "failed to remove temporary archive: {e}"
                    )));
                }

                result?;
            }
            Plan::Promote { target } => writer.set_active(&locator, target).await?,
            Plan::DeleteStaging { target } => writer.delete_deployment(&locator, target).await?,
        }

        Ok(Invocation {
            request: self.request,
            state: Applied { locator, plan },
        })
    }
}
