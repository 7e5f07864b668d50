// ABOUTME: Deployment slot registry: the live set of slots for one app.
// ABOUTME: Exposes the reader/writer contracts and the pure scans over a listing.

mod reader;
mod registry;
mod writer;

pub use reader::SlotReader;
pub use registry::{Slot, SlotView, inactive_slot_count, slot_names, staging_slot_name};
pub use writer::{DeploymentDescriptor, SlotWriter, UploadLocation};
