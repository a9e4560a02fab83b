/// Resolved identity of one AWS account. Both lookups are best-effort, so
/// either field may be empty.
#[derive(Debug, Clone, Default)]
pub struct AccountIdentity {
    pub account_id: String,
    pub account_name: String,
}

impl AccountIdentity {
    pub fn display_id(&self) -> &str {
        if self.account_id.is_empty() {
            "unknown"
        } else {
            &self.account_id
        }
    }

    pub fn display_name(&self) -> &str {
        if self.account_name.is_empty() {
            "no-alias"
        } else {
            &self.account_name
        }
    }
}
