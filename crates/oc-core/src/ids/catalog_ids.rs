use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Catalog key of a device vendor, e.g. `mikrotik`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(String);

/// Catalog key of a device model, scoped to its vendor, e.g. `routerboard`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl_id!(VendorId, ModelId);
