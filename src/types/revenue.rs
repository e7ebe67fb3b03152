use serde::Deserialize;

use crate::utils::pagination::PaginationQuery;

#[derive(Deserialize)]
pub struct RefundRequest {
    pub pendapatan_id: Option<uuid::Uuid>,
    pub reason: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct CreateRefundRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct ListRefundsQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
}
