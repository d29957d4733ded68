mod common;

use zonetherm::report::{render_csv, render_json, render_table};

use common::*;

fn sample_results() -> Vec<ImageResult> {
    vec![
        ImageResult::measured("two.png", TemperatureStats::from_temperatures(&[6, 8]).unwrap()),
        ImageResult::no_objects("empty.png"),
        ImageResult::failed("broken, copy.png", "failed to decode image"),
    ]
}

#[test]
fn test_csv_rows() {
    let csv = render_csv(&sample_results());
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines,
        vec![
            "name,min,max,mean,stddev,variance,status",
            "two.png,6,8,7,1,1,ok",
            "empty.png,,,,,,no_objects",
            "\"broken, copy.png\",,,,,,failed",
        ]
    );
}

#[test]
fn test_csv_escapes_quotes() {
    let csv = render_csv(&[ImageResult::no_objects("say \"hi\".png")]);
    assert!(csv.contains("\"say \"\"hi\"\".png\",,,,,,no_objects"));
}

#[test]
fn test_table_rows() {
    let table = render_table(&sample_results());
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Image"));
    assert!(lines[0].contains("Std Dev"));
    assert!(lines[2].starts_with("two.png"));
    assert!(lines[2].contains("7.000"));
    assert!(lines[3].contains("no objects detected"));
    assert!(lines[4].contains("failed: failed to decode image"));
}

#[test]
fn test_json_statuses() -> anyhow::Result<()> {
    let json: serde_json::Value = serde_json::from_str(&render_json(&sample_results())?)?;

    assert_eq!(json[0]["name"], "two.png");
    assert_eq!(json[0]["status"], "ok");
    assert_eq!(json[0]["stddev"], 1.0);
    assert_eq!(json[0]["min"], 6);
    assert_eq!(json[1]["status"], "no_objects");
    assert_eq!(json[2]["status"], "failed");
    assert_eq!(json[2]["reason"], "failed to decode image");

    Ok(())
}
