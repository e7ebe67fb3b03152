use serde::Deserialize;

#[derive(Deserialize)]
pub struct MitraStatusRequest {
    /// "approved" or "rejected".
    pub status: String,
    pub rejection_reason: Option<String>,
}
