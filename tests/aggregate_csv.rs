use std::fs;
use tempfile::tempdir;

use aws_cost_analyzer::aggregate::{SummaryKey, summarize_file};

const HEADER: &str =
    "account_id,account_name,period_start,period_end,granularity,service,amount,unit\n";

fn write_export(dir: &std::path::Path, body: &str) -> String {
    let path = dir.join("aws_costs.csv");
    fs::write(&path, format!("{HEADER}{body}")).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_service_summary_end_to_end() {
    let dir = tempdir().unwrap();
    let input = write_export(
        dir.path(),
        "111,prod,2026-08-01,2026-08-02,DAILY,Amazon EC2,10.50,USD\n\
         111,prod,2026-08-02,2026-08-03,DAILY,Amazon EC2,4.50,USD\n\
         222,staging,2026-08-01,2026-08-02,DAILY,Amazon S3,2.00,USD\n",
    );
    let output = dir.path().join("cost_by_service.csv");
    let output = output.to_str().unwrap();

    let wrote = summarize_file(&input, output, SummaryKey::Service).unwrap();
    assert!(wrote);

    let contents = fs::read_to_string(output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "service,total_amount,unit",
            "Amazon EC2,$15.00,USD",
            "Amazon S3,$2.00,USD",
        ]
    );
}

#[test]
fn test_account_summary_end_to_end() {
    let dir = tempdir().unwrap();
    let input = write_export(
        dir.path(),
        "111,prod,2026-08-01,2026-08-02,DAILY,Amazon EC2,1000.00,USD\n\
         111,prod,2026-08-01,2026-08-02,DAILY,Amazon S3,234.56,USD\n\
         ,staging,2026-08-01,2026-08-02,DAILY,Amazon EC2,50.00,USD\n",
    );
    let output = dir.path().join("cost_by_account.csv");
    let output = output.to_str().unwrap();

    assert!(summarize_file(&input, output, SummaryKey::Account).unwrap());

    let contents = fs::read_to_string(output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "account,total_amount,unit");
    assert_eq!(lines[1], "111,\"$1,234.56\",USD");
    assert_eq!(lines[2], "staging,$50.00,USD");
}

#[test]
fn test_unparsable_amounts_do_not_fail_the_run() {
    let dir = tempdir().unwrap();
    let input = write_export(
        dir.path(),
        "111,prod,2026-08-01,2026-08-02,DAILY,Amazon EC2,garbage,USD\n\
         111,prod,2026-08-02,2026-08-03,DAILY,Amazon EC2,3.00,USD\n",
    );
    let output = dir.path().join("out.csv");
    let output = output.to_str().unwrap();

    assert!(summarize_file(&input, output, SummaryKey::Service).unwrap());
    let contents = fs::read_to_string(output).unwrap();
    assert!(contents.contains("Amazon EC2,$3.00,USD"));
}

#[test]
fn test_empty_input_writes_no_summary() {
    let dir = tempdir().unwrap();
    let input = write_export(dir.path(), "");
    let output = dir.path().join("out.csv");

    let wrote = summarize_file(&input, output.to_str().unwrap(), SummaryKey::Service).unwrap();
    assert!(!wrote);
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let err = summarize_file(
        "/nonexistent/aws_costs.csv",
        output.to_str().unwrap(),
        SummaryKey::Service,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Input CSV not found"));
}
