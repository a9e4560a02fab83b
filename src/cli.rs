use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GranularityArg {
    /// One billing period per day
    Daily,
    /// One billing period per calendar month
    Monthly,
}

impl GranularityArg {
    /// Cost Explorer spelling, also recorded verbatim in each CSV row.
    pub fn as_str(&self) -> &'static str {
        match self {
            GranularityArg::Daily => "DAILY",
            GranularityArg::Monthly => "MONTHLY",
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupByArg {
    /// Break costs out per AWS service
    Service,
    /// Single total per period
    None,
}

impl GroupByArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupByArg::Service => "SERVICE",
            GroupByArg::None => "NONE",
        }
    }
}

#[derive(clap::Parser, Debug)]
#[command(about = "Export AWS Cost Explorer data to CSV.")]
pub struct Args {
    /// Path to the AWS accounts configuration file
    #[arg(long, default_value = "aws_accounts.json")]
    pub config: String,

    /// AWS region for Cost Explorer
    #[arg(long, env = "AWS_COST_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Start date in YYYY-MM-DD (default: 30 days ago)
    #[arg(long)]
    pub start_date: Option<String>,

    /// End date in YYYY-MM-DD, exclusive (default: today)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Granularity of cost data: daily|monthly
    #[arg(long, value_enum, default_value_t = GranularityArg::Daily)]
    pub granularity: GranularityArg,

    /// Group costs by service or return totals: service|none
    #[arg(long, value_enum, default_value_t = GroupByArg::Service)]
    pub group_by: GroupByArg,

    /// Output CSV file name
    #[arg(long, default_value = "aws_costs.csv")]
    pub output: String,

    /// Per-service summary CSV file name
    #[arg(long, default_value = "cost_by_service.csv")]
    pub service_summary: String,

    /// Per-account summary CSV file name
    #[arg(long, default_value = "cost_by_account.csv")]
    pub account_summary: String,

    /// Path to a Google service account JSON key file
    #[arg(long, default_value = "key.json")]
    pub gcp_key: String,

    /// Google Sheet ID to update (if omitted, a new sheet is created)
    #[arg(long, default_value = "")]
    pub sheet_id: String,

    /// Path to a JSON file that stores the Google Sheet ID/tab
    #[arg(long, default_value = "sheet_config.json")]
    pub sheet_config: String,

    /// Google Sheet tab name to write raw data into
    #[arg(long, default_value = "raw_data")]
    pub sheet_tab: String,

    /// Title for a newly created Google Sheet
    #[arg(long, default_value = "AWS Cost Analyzer")]
    pub sheet_title: String,

    /// Email address to grant edit access to the Google Sheet
    #[arg(long)]
    pub share_with: Option<String>,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}

/// Resolve the inclusive start / exclusive end of the report range. Either
/// side may be given explicitly; the defaults are today and 30 days back.
pub fn default_dates(start: Option<&str>, end: Option<&str>) -> Result<(String, String)> {
    if let (Some(s), Some(e)) = (start, end) {
        parse_date(s)?;
        parse_date(e)?;
        return Ok((s.to_string(), e.to_string()));
    }

    let today = Local::now().date_naive();
    let end_date = match end {
        Some(e) => parse_date(e)?,
        None => today,
    };
    let start_date = match start {
        Some(s) => parse_date(s)?,
        None => today - Days::new(30),
    };

    Ok((start_date.to_string(), end_date.to_string()))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = <Args as clap::Parser>::try_parse_from(["aws_cost_analyzer"]).unwrap();
        assert_eq!(args.config, "aws_accounts.json");
        assert_eq!(args.output, "aws_costs.csv");
        assert_eq!(args.granularity, GranularityArg::Daily);
        assert_eq!(args.group_by, GroupByArg::Service);
        assert_eq!(args.sheet_tab, "raw_data");
        assert_eq!(args.sheet_title, "AWS Cost Analyzer");
        assert!(args.share_with.is_none());
    }

    #[test]
    fn test_args_enum_values() {
        let args = <Args as clap::Parser>::try_parse_from([
            "aws_cost_analyzer",
            "--granularity",
            "monthly",
            "--group-by",
            "none",
        ])
        .unwrap();
        assert_eq!(args.granularity, GranularityArg::Monthly);
        assert_eq!(args.group_by, GroupByArg::None);
    }

    #[test]
    fn test_explicit_dates_pass_through() {
        let (s, e) = default_dates(Some("2026-01-01"), Some("2026-02-01")).unwrap();
        assert_eq!(s, "2026-01-01");
        assert_eq!(e, "2026-02-01");
    }

    #[test]
    fn test_default_range_is_30_days() {
        let (s, e) = default_dates(None, None).unwrap();
        let start = NaiveDate::parse_from_str(&s, "%Y-%m-%d").unwrap();
        let end = NaiveDate::parse_from_str(&e, "%Y-%m-%d").unwrap();
        assert_eq!(start + Days::new(30), end);
    }

    #[test]
    fn test_partial_override_keeps_other_default() {
        let today = Local::now().date_naive();
        let (s, e) = default_dates(Some("2026-03-01"), None).unwrap();
        assert_eq!(s, "2026-03-01");
        assert_eq!(e, today.to_string());
    }

    #[test]
    fn test_invalid_date_is_fatal() {
        assert!(default_dates(Some("not-a-date"), Some("2026-02-01")).is_err());
        assert!(default_dates(Some("2026-13-40"), None).is_err());
    }

    #[test]
    fn test_granularity_spelling() {
        assert_eq!(GranularityArg::Daily.as_str(), "DAILY");
        assert_eq!(GranularityArg::Monthly.as_str(), "MONTHLY");
        assert_eq!(GroupByArg::Service.as_str(), "SERVICE");
        assert_eq!(GroupByArg::None.as_str(), "NONE");
    }
}
