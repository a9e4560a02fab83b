//! Cost Explorer fetch and flatten.
//!
//! `fetch_costs` follows `NextPageToken` until the API is exhausted and maps
//! every `ResultByTime` into the SDK-free [`PeriodCosts`] form. `flatten`
//! then turns those into CSV rows and is a pure function, so the row-shaping
//! rules (grouped vs. total, zero/USD defaults) are testable offline.

use anyhow::{Context, Result};
use aws_sdk_costexplorer::Client as CostExplorerClient;
use aws_sdk_costexplorer::types::{
    DateInterval, Granularity, GroupDefinition, GroupDefinitionType, MetricValue, ResultByTime,
};

use crate::cli::{GranularityArg, GroupByArg};
use crate::models::{AccountIdentity, CostEntry, CostRow, PeriodCosts};

const UNBLENDED_COST: &str = "UnblendedCost";

/// Fetch all billing periods in `[start, end)` for one account, following
/// the pagination token until exhausted.
pub async fn fetch_costs(
    client: &CostExplorerClient,
    start: &str,
    end: &str,
    granularity: GranularityArg,
    group_by: GroupByArg,
) -> Result<Vec<PeriodCosts>> {
    let time_period = DateInterval::builder()
        .start(start)
        .end(end)
        .build()
        .context("build cost query time period")?;

    let mut periods = Vec::new();
    let mut next_token: Option<String> = None;
    loop {
        let mut request = client
            .get_cost_and_usage()
            .time_period(time_period.clone())
            .granularity(sdk_granularity(granularity))
            .metrics(UNBLENDED_COST);

        if group_by == GroupByArg::Service {
            request = request.group_by(
                GroupDefinition::builder()
                    .r#type(GroupDefinitionType::Dimension)
                    .key("SERVICE")
                    .build(),
            );
        }

        let response = request
            .set_next_page_token(next_token.take())
            .send()
            .await
            .context("GetCostAndUsage request failed")?;

        periods.extend(
            response
                .results_by_time()
                .iter()
                .map(|r| period_costs(r, group_by)),
        );

        next_token = response.next_page_token().map(str::to_string);
        if next_token.is_none() {
            break;
        }
    }

    Ok(periods)
}

fn sdk_granularity(granularity: GranularityArg) -> Granularity {
    match granularity {
        GranularityArg::Daily => Granularity::Daily,
        GranularityArg::Monthly => Granularity::Monthly,
    }
}

fn period_costs(result: &ResultByTime, group_by: GroupByArg) -> PeriodCosts {
    let (start, end) = result
        .time_period()
        .map(|p| (p.start().to_string(), p.end().to_string()))
        .unwrap_or_default();

    let entries = match group_by {
        GroupByArg::Service => result
            .groups()
            .iter()
            .map(|group| {
                metric_entry(
                    Some(group.keys().first().cloned().unwrap_or_default()),
                    group.metrics().and_then(|m| m.get(UNBLENDED_COST)),
                )
            })
            .collect(),
        GroupByArg::None => vec![metric_entry(
            None,
            result.total().and_then(|m| m.get(UNBLENDED_COST)),
        )],
    };

    PeriodCosts {
        start,
        end,
        entries,
    }
}

fn metric_entry(service: Option<String>, metric: Option<&MetricValue>) -> CostEntry {
    CostEntry {
        service,
        amount: metric.and_then(|m| m.amount()).unwrap_or("0").to_string(),
        unit: metric.and_then(|m| m.unit()).unwrap_or("USD").to_string(),
    }
}

/// Turn fetched periods into CSV rows: one row per (period, service) in
/// grouped mode, one row with an empty service column in ungrouped mode.
pub fn flatten(
    periods: &[PeriodCosts],
    identity: &AccountIdentity,
    granularity: GranularityArg,
) -> Vec<CostRow> {
    periods
        .iter()
        .flat_map(|period| {
            period.entries.iter().map(|entry| CostRow {
                account_id: identity.account_id.clone(),
                account_name: identity.account_name.clone(),
                period_start: period.start.clone(),
                period_end: period.end.clone(),
                granularity: granularity.as_str().to_string(),
                service: entry.service.clone().unwrap_or_default(),
                amount: entry.amount.clone(),
                unit: entry.unit.clone(),
            })
        })
        .collect()
}
