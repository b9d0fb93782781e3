//! ID type wrappers for type safety.

mod id_macro;

pub mod catalog_ids;
pub mod device_id;
pub mod workflow_id;

pub use catalog_ids::{ModelId, VendorId};
pub use device_id::DeviceId;
pub use workflow_id::WorkflowId;
