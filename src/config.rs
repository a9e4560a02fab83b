use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::{AccountConfig, AccountsFile, SheetConfig};

/// Load the accounts config file. A missing or malformed file is fatal; an
/// empty `accounts` list is returned as-is and rejected by the caller.
pub fn load_accounts(path: &str) -> Result<Vec<AccountConfig>> {
    if !Path::new(path).exists() {
        anyhow::bail!("AWS accounts config file not found: {path}");
    }
    let raw = fs::read_to_string(path).with_context(|| format!("read accounts config {path}"))?;
    let file: AccountsFile =
        serde_json::from_str(&raw).with_context(|| format!("parse accounts config {path}"))?;
    Ok(file.accounts)
}

/// Resolve the spreadsheet id and tab for this run. Explicit CLI values win;
/// the persisted sheet config file fills in whatever is left blank. Always
/// returns a non-empty tab (falling back to "Sheet1").
pub fn resolve_sheet_config(
    explicit_id: &str,
    explicit_tab: &str,
    config_path: &str,
) -> (String, String) {
    let mut sheet_id = explicit_id.trim().to_string();
    let mut sheet_tab = explicit_tab.trim().to_string();

    if !config_path.is_empty() {
        if Path::new(config_path).exists() {
            match read_sheet_config(config_path) {
                Ok(stored) => {
                    if sheet_id.is_empty() {
                        sheet_id = stored.sheet_id.unwrap_or_default().trim().to_string();
                    }
                    if sheet_tab.is_empty() {
                        sheet_tab = stored.sheet_tab.unwrap_or_default().trim().to_string();
                    }
                    if sheet_id.is_empty() && sheet_tab.is_empty() {
                        eprintln!(
                            "Warning: {config_path} is empty. Provide a sheet_id or sheet_tab, \
                             or pass flags explicitly."
                        );
                    }
                }
                Err(err) => eprintln!("Warning: could not read {config_path}: {err}"),
            }
        } else {
            eprintln!("Warning: sheet config file not found: {config_path}");
        }
    }

    if sheet_tab.is_empty() {
        sheet_tab = "Sheet1".to_string();
    }

    (sheet_id, sheet_tab)
}

fn read_sheet_config(path: &str) -> Result<SheetConfig> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Persist the spreadsheet reference used this run, so the next run updates
/// the same sheet instead of creating a duplicate. Empty fields are omitted.
pub fn store_sheet_config(path: &str, sheet_id: &str, sheet_tab: &str) -> Result<()> {
    if path.is_empty() {
        return Ok(());
    }
    let payload = SheetConfig {
        sheet_id: (!sheet_id.is_empty()).then(|| sheet_id.to_string()),
        sheet_tab: (!sheet_tab.is_empty()).then(|| sheet_tab.to_string()),
    };
    let mut json = serde_json::to_string_pretty(&payload)
        .with_context(|| format!("serialize sheet config {path}"))?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("write sheet config {path}"))?;
    Ok(())
}
