use serde::{Deserialize, Serialize};

/// One entry from the accounts config file. Credentials are optional so a
/// half-filled entry deserializes fine and gets skipped with a warning.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AccountConfig {
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub region: Option<String>,
}

impl AccountConfig {
    /// Both credential fields present and non-empty after trimming.
    pub fn has_credentials(&self) -> bool {
        let ok = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        ok(&self.aws_access_key_id) && ok(&self.aws_secret_access_key)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct AccountsFile {
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

/// Persisted spreadsheet reference so repeat runs update the same sheet
/// instead of creating a new one each time.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SheetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_tab: Option<String>,
}
