// ABOUTME: Read side of the slot registry.
// ABOUTME: One list call per query; scans are delegated to the pure registry helpers.

use async_trait::async_trait;

use super::registry::{self, Slot};
use crate::locator::ResourceLocator;
use crate::management::ApiError;

/// Lists the deployment slots of the app named by a locator.
#[async_trait]
pub trait SlotReader: Send + Sync {
    /// All slots of the app, in the order the management service reports them.
    async fn list_slots(&self, locator: &ResourceLocator) -> Result<Vec<Slot>, ApiError>;

    /// Name of the current staging slot, if any.
    async fn staging_slot_name(
        &self,
        locator: &ResourceLocator,
    ) -> Result<Option<String>, ApiError> {
        let slots = self.list_slots(locator).await?;
        Ok(registry::staging_slot_name(&slots).map(str::to_string))
    }

    /// Names of every slot, active or not.
    async fn all_slot_names(&self, locator: &ResourceLocator) -> Result<Vec<String>, ApiError> {
        let slots = self.list_slots(locator).await?;
        Ok(registry::slot_names(&slots))
    }
}
