use serde::{Deserialize, Serialize};

use crate::domain::{SupplierRecord, WarehouseRecord};

/// Payload of `GET /best-suppliers?dc_city=<city>`.
///
/// The four collections always travel together in one response; the client
/// replaces its copies of all four atomically, never piecemeal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestSuppliersResponse {
    pub best_suppliers: Vec<SupplierRecord>,
    pub all_suppliers: Vec<SupplierRecord>,
    pub unique_cities: Vec<String>,
    pub warehouses: Vec<WarehouseRecord>,
}

/// Body of `GET /run-pipeline`. Informational only; callers judge pipeline
/// success by the HTTP status, not this message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRunResponse {
    pub message: String,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
