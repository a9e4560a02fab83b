use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use aws_cost_analyzer::account::process_account;
use aws_cost_analyzer::aggregate::{SummaryKey, summarize_file};
use aws_cost_analyzer::cli::{Args, default_dates};
use aws_cost_analyzer::config::{load_accounts, resolve_sheet_config, store_sheet_config};
use aws_cost_analyzer::export::{ExportWriter, write_run_log};
use aws_cost_analyzer::models::RunLogRow;
use aws_cost_analyzer::sheets::SheetsClient;

const SERVICE_SUMMARY_TAB: &str = "cost_by_service";
const ACCOUNT_SUMMARY_TAB: &str = "cost_by_account";
const LOGS_TAB: &str = "logs";
const LOGS_PATH: &str = "logs.csv";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let run_started_at = Utc::now();
    let (start_date, end_date) =
        default_dates(args.start_date.as_deref(), args.end_date.as_deref())?;
    let (mut sheet_id, sheet_tab) =
        resolve_sheet_config(&args.sheet_id, &args.sheet_tab, &args.sheet_config);

    let accounts = load_accounts(&args.config)?;
    if accounts.is_empty() {
        anyhow::bail!("No AWS accounts configured in config file");
    }

    let mut writer = ExportWriter::create(&args.output)?;
    for account in &accounts {
        let rows = process_account(
            account,
            &args.region,
            &start_date,
            &end_date,
            args.granularity,
            args.group_by,
        )
        .await?;
        writer.append(&rows)?;
    }
    let total_rows = writer.finish()?;
    println!("Wrote {total_rows} rows to {}", args.output);

    let sheets = if Path::new(&args.gcp_key).exists() {
        Some(SheetsClient::from_key_file(&args.gcp_key).await?)
    } else {
        println!(
            "Google Sheets upload skipped (missing key file). \
             Provide --gcp-key or place key.json in the project directory."
        );
        None
    };

    if let Some(client) = &sheets {
        let (id, url) = client
            .upload_csv(
                &args.output,
                &sheet_id,
                &args.sheet_title,
                &sheet_tab,
                args.share_with.as_deref(),
            )
            .await?;
        sheet_id = id;
        store_sheet_config(&args.sheet_config, &sheet_id, &sheet_tab)?;
        println!("Uploaded to Google Sheet: {url}");
    }

    let summaries = [
        (&args.service_summary, SummaryKey::Service, SERVICE_SUMMARY_TAB),
        (&args.account_summary, SummaryKey::Account, ACCOUNT_SUMMARY_TAB),
    ];
    for (summary_path, key, tab) in summaries {
        let wrote = summarize_file(&args.output, summary_path, key)?;
        if wrote {
            if let Some(client) = &sheets {
                let (_, url) = client
                    .upload_csv(summary_path, &sheet_id, &args.sheet_title, tab, None)
                    .await?;
                println!("Uploaded {tab} to Google Sheet: {url}");
            }
        }
    }

    let run_finished_at = Utc::now();
    write_run_log(
        LOGS_PATH,
        &RunLogRow {
            run_started_at_utc: run_started_at.to_rfc3339(),
            run_finished_at_utc: run_finished_at.to_rfc3339(),
            data_start_date: start_date,
            data_end_date: end_date,
            granularity: args.granularity.as_str().to_string(),
            group_by: args.group_by.as_str().to_string(),
            rows_written: total_rows,
        },
    )?;

    if let Some(client) = &sheets {
        let (_, url) = client
            .upload_csv(LOGS_PATH, &sheet_id, &args.sheet_title, LOGS_TAB, None)
            .await?;
        println!("Uploaded logs to Google Sheet: {url}");
    }

    Ok(())
}
