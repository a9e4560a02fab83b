//! Offline walk through the data path: flatten fetched periods, write the
//! export CSV, then aggregate it back into a summary.

use tempfile::tempdir;

use aws_cost_analyzer::aggregate::{SummaryKey, summarize_file};
use aws_cost_analyzer::cli::GranularityArg;
use aws_cost_analyzer::cost::flatten;
use aws_cost_analyzer::export::ExportWriter;
use aws_cost_analyzer::models::{AccountIdentity, CostEntry, CostRow, PeriodCosts};

fn period(start: &str, end: &str, services: &[(&str, &str)]) -> PeriodCosts {
    PeriodCosts {
        start: start.to_string(),
        end: end.to_string(),
        entries: services
            .iter()
            .map(|(service, amount)| CostEntry {
                service: Some(service.to_string()),
                amount: amount.to_string(),
                unit: "USD".to_string(),
            })
            .collect(),
    }
}

#[test]
fn test_flatten_export_aggregate_round() {
    let dir = tempdir().unwrap();
    let export_path = dir.path().join("aws_costs.csv");
    let export_path = export_path.to_str().unwrap();
    let summary_path = dir.path().join("cost_by_service.csv");
    let summary_path = summary_path.to_str().unwrap();

    let identity = AccountIdentity {
        account_id: "123456789012".to_string(),
        account_name: "prod".to_string(),
    };
    let periods = vec![
        period(
            "2026-08-01",
            "2026-08-02",
            &[("Amazon EC2", "10.50"), ("Amazon S3", "2.00")],
        ),
        period("2026-08-02", "2026-08-03", &[("Amazon EC2", "4.50")]),
    ];

    let rows = flatten(&periods, &identity, GranularityArg::Daily);
    assert_eq!(rows.len(), 3);

    let mut writer = ExportWriter::create(export_path).unwrap();
    writer.append(&rows).unwrap();
    assert_eq!(writer.finish().unwrap(), 3);

    assert!(summarize_file(export_path, summary_path, SummaryKey::Service).unwrap());
    let contents = std::fs::read_to_string(summary_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[1], "Amazon EC2,$15.00,USD");
    assert_eq!(lines[2], "Amazon S3,$2.00,USD");
}

#[test]
fn test_service_names_with_commas_survive_the_round_trip() {
    let dir = tempdir().unwrap();
    let export_path = dir.path().join("aws_costs.csv");
    let export_path = export_path.to_str().unwrap();
    let summary_path = dir.path().join("summary.csv");
    let summary_path = summary_path.to_str().unwrap();

    let rows = vec![CostRow {
        account_id: "1".to_string(),
        account_name: "prod".to_string(),
        period_start: "2026-08-01".to_string(),
        period_end: "2026-08-02".to_string(),
        granularity: "DAILY".to_string(),
        service: "Amazon EC2 - Compute, Other".to_string(),
        amount: "7.00".to_string(),
        unit: "USD".to_string(),
    }];

    let mut writer = ExportWriter::create(export_path).unwrap();
    writer.append(&rows).unwrap();
    writer.finish().unwrap();

    assert!(summarize_file(export_path, summary_path, SummaryKey::Service).unwrap());
    let contents = std::fs::read_to_string(summary_path).unwrap();
    assert!(contents.contains("\"Amazon EC2 - Compute, Other\",$7.00,USD"));
}
