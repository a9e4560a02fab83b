use serde::{Deserialize, Serialize};

/// One line of the flat export CSV. Field names double as the CSV header:
/// `account_id,account_name,period_start,period_end,granularity,service,amount,unit`.
///
/// `amount` stays the decimal string Cost Explorer returned; parsing happens
/// only at aggregation time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CostRow {
    pub account_id: String,
    pub account_name: String,
    pub period_start: String,
    pub period_end: String,
    pub granularity: String,
    pub service: String,
    pub amount: String,
    pub unit: String,
}
