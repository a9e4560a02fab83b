//! Per-account session setup and orchestration.
//!
//! Each configured account gets its own SDK config built from static
//! credentials. Identity lookups are best-effort: a failed STS or IAM call
//! leaves the matching column empty and never aborts the run.

use anyhow::Result;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_costexplorer::Client as CostExplorerClient;
use aws_sdk_iam::Client as IamClient;
use aws_sdk_sts::Client as StsClient;

use crate::cli::{GranularityArg, GroupByArg};
use crate::cost::{fetch_costs, flatten};
use crate::models::{AccountConfig, AccountIdentity, CostRow};

struct AccountClients {
    cost_explorer: CostExplorerClient,
    sts: StsClient,
    iam: IamClient,
}

/// Build the three service clients for one account. Cost Explorer always
/// talks to the global `--region` endpoint; STS and IAM honor the account's
/// region override when present.
async fn build_clients(
    account: &AccountConfig,
    cost_explorer_region: &str,
    default_region: &str,
) -> AccountClients {
    let access_key = account.aws_access_key_id.as_deref().unwrap_or_default();
    let secret_key = account.aws_secret_access_key.as_deref().unwrap_or_default();
    let account_region = account.region.as_deref().unwrap_or(default_region);

    let credentials = Credentials::new(access_key, secret_key, None, None, "accounts_config");
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .credentials_provider(credentials)
        .region(Region::new(account_region.to_string()))
        .load()
        .await;

    let ce_config = aws_sdk_costexplorer::config::Builder::from(&shared)
        .region(Region::new(cost_explorer_region.to_string()))
        .build();

    AccountClients {
        cost_explorer: CostExplorerClient::from_conf(ce_config),
        sts: StsClient::new(&shared),
        iam: IamClient::new(&shared),
    }
}

/// Account id from `GetCallerIdentity`, display name from the first IAM
/// account alias. Each failure independently degrades to an empty string.
async fn lookup_identity(sts: &StsClient, iam: &IamClient) -> AccountIdentity {
    let account_id = sts
        .get_caller_identity()
        .send()
        .await
        .ok()
        .and_then(|out| out.account().map(str::to_string))
        .unwrap_or_default();

    let account_name = iam
        .list_account_aliases()
        .send()
        .await
        .ok()
        .and_then(|out| out.account_aliases().first().cloned())
        .unwrap_or_default();

    AccountIdentity {
        account_id,
        account_name,
    }
}

/// Fetch and flatten one account's costs. Accounts without usable
/// credentials are skipped with a warning and produce no rows; a failing
/// cost query is fatal for the run.
pub async fn process_account(
    account: &AccountConfig,
    region: &str,
    start: &str,
    end: &str,
    granularity: GranularityArg,
    group_by: GroupByArg,
) -> Result<Vec<CostRow>> {
    if !account.has_credentials() {
        eprintln!("Warning: Skipping account - missing credentials");
        return Ok(Vec::new());
    }

    let clients = build_clients(account, region, region).await;
    let identity = lookup_identity(&clients.sts, &clients.iam).await;

    let periods = fetch_costs(&clients.cost_explorer, start, end, granularity, group_by).await?;
    let rows = flatten(&periods, &identity, granularity);

    println!(
        "Fetched {} rows for account {} ({})",
        rows.len(),
        identity.display_id(),
        identity.display_name()
    );
    Ok(rows)
}
