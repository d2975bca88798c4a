//! Audit DTOs

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct AuditParams {
    /// Newest `limit` entries; the whole trail when absent
    pub limit: Option<usize>,
}
