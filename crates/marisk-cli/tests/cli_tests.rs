//! End-to-end tests of the `marisk` binary against CSV fixtures.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use chrono::{Datelike, NaiveDate};
use predicates::prelude::*;
use tempfile::TempDir;

// ===== TEST FIXTURES =====

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Price files for AAA and BBB: 60 weekday bars from 2024-01-01.
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();
        let ws = Self { dir };
        ws.write_prices("AAA", 100.0, 0.2);
        ws.write_prices("BBB", 50.0, -0.05);
        ws
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_prices(&self, symbol: &str, base: f64, step: f64) {
        let mut text = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
        let mut d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut written = 0u32;
        while written < 60 {
            if d.weekday().number_from_monday() <= 5 {
                let px = base + step * f64::from(written) + if written % 2 == 0 { 0.5 } else { -0.5 };
                text.push_str(&format!(
                    "{},{px},{},{},{px},{px},{}\n",
                    d,
                    px + 1.0,
                    px - 1.0,
                    1000 + written * 10
                ));
                written += 1;
            }
            d = d.succ_opt().unwrap();
        }
        std::fs::write(self.path("data").join(format!("{symbol}.csv")), text).unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("marisk").unwrap();
        cmd.env("MARISK_CONFIG", self.path("config.json"))
            .env("MARISK_DATA_DIR", self.path("data"))
            .env_remove("MARISK_NEWS_FILE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Command with the fixture date range appended.
    fn ranged(&self, args: &[&str]) -> Command {
        let mut cmd = self.cmd();
        cmd.args(args)
            .args(["--start", "2024-01-01", "--end", "2024-03-31"]);
        cmd
    }
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

// ===== PRICES AND RETURNS =====

#[test]
fn test_prices_minimal_prints_last_close() {
    let ws = Workspace::new();
    // Bar 59: 100 + 0.2 * 59 - 0.5
    ws.ranged(&["prices", "AAA", "-f", "minimal"])
        .assert()
        .success()
        .stdout("111.30\n");
}

#[test]
fn test_prices_json_has_summary_and_bars() {
    let ws = Workspace::new();
    let out = stdout_of(&mut ws.ranged(&["prices", "aaa", "-f", "json"]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json["summary"]["bars"], 60);
    assert_eq!(json["bars"].as_array().unwrap().len(), 60);
    assert!(json["cumulative_return"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_prices_weekly_table() {
    let ws = Workspace::new();
    ws.ranged(&["prices", "AAA", "-g", "weekly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AAA Prices (Weekly)"))
        .stdout(predicate::str::contains("Key Metrics"));
}

#[test]
fn test_unknown_symbol_fails() {
    let ws = Workspace::new();
    ws.ranged(&["prices", "ZZZ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ZZZ"));
}

#[test]
fn test_range_without_data_fails() {
    let ws = Workspace::new();
    // Configured default range ends in 2023.
    ws.cmd()
        .args(["prices", "AAA"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data for AAA"));
}

#[test]
fn test_returns_export() {
    let ws = Workspace::new();
    let path = ws.path("returns.csv");
    ws.ranged(&["returns", "AAA", "-q", "-f", "minimal", "--export"])
        .arg(&path)
        .assert()
        .success();

    let text = read(&path);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Date,Return"));
    assert_eq!(lines.count(), 59);
}

// ===== RISK =====

#[test]
fn test_risk_json_report() {
    let ws = Workspace::new();
    let out = stdout_of(&mut ws.ranged(&[
        "risk", "AAA", "-f", "json", "--seed", "3", "--simulations", "2000", "-w", "20",
    ]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let report = &json["report"];

    assert_eq!(report["observations"], 59);
    assert_eq!(report["historical"]["method"], "historical");
    assert_eq!(report["monte_carlo"]["method"], "monte-carlo");
    assert!(report["cvar"]["value"].as_f64().unwrap() <= report["historical"]["value"].as_f64().unwrap());
    assert!(report["rolling_volatility"]["value"].is_number());
}

#[test]
fn test_risk_seed_is_reproducible() {
    let ws = Workspace::new();
    let args = ["risk", "AAA", "-f", "json", "--seed", "11", "--simulations", "500"];
    let first = stdout_of(&mut ws.ranged(&args));
    let second = stdout_of(&mut ws.ranged(&args));
    assert_eq!(first, second);
}

#[test]
fn test_risk_rejects_bad_confidence() {
    let ws = Workspace::new();
    ws.ranged(&["risk", "AAA", "--confidence", "100"])
        .assert()
        .failure();
}

// ===== PORTFOLIO =====

#[test]
fn test_portfolio_weights_must_sum_to_one() {
    let ws = Workspace::new();
    ws.ranged(&["portfolio", "analyze", "-a", "AAA", "-w", "0.6", "-a", "BBB", "-w", "0.3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sum to 1.0"));
}

#[test]
fn test_portfolio_analyze_json() {
    let ws = Workspace::new();
    let out = stdout_of(&mut ws.ranged(&[
        "portfolio", "analyze", "-a", "AAA", "-w", "0.7", "-a", "BBB", "-w", "0.3", "-f", "json",
    ]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json["observations"], 59);
    assert!(json["historical_var"]["value"].is_number());
    let shares: f64 = json["contributions"]["by_asset"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["contribution_pct"].as_f64().unwrap())
        .sum();
    assert!((shares - 100.0).abs() < 1e-9);
    assert_eq!(json["correlation"]["values"][0][0], 1.0);
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn test_portfolio_file_editing() {
    let ws = Workspace::new();
    let file = ws.path("book.json");
    let file_arg = file.to_str().unwrap();

    ws.cmd().args(["portfolio", "init", file_arg]).assert().success();
    ws.cmd()
        .args(["portfolio", "show", file_arg, "-f", "minimal"])
        .assert()
        .success()
        .stdout("invalid\n");

    ws.cmd()
        .args(["portfolio", "set", file_arg, "1", "--symbol", "aaa", "--weight", "0.5"])
        .assert()
        .success();
    ws.cmd().args(["portfolio", "add", file_arg, "BBB"]).assert().success();
    ws.cmd()
        .args(["portfolio", "set", file_arg, "2", "--weight", "0.5"])
        .assert()
        .success();
    ws.cmd()
        .args(["portfolio", "show", file_arg, "-f", "minimal"])
        .assert()
        .success()
        .stdout("valid\n");

    ws.ranged(&["portfolio", "analyze", "--file", file_arg, "-f", "minimal"])
        .assert()
        .success();

    // The last asset cannot be removed.
    ws.cmd().args(["portfolio", "remove", file_arg, "2"]).assert().success();
    ws.cmd()
        .args(["portfolio", "remove", file_arg, "1"])
        .assert()
        .failure();
}

// ===== STRESS =====

#[test]
fn test_stress_csv_columns() {
    let ws = Workspace::new();
    let out = stdout_of(&mut ws.ranged(&["stress", "--symbol", "AAA", "--custom", "-20", "-f", "csv"]));
    let header = out.lines().next().unwrap();
    assert_eq!(header, "Date,Baseline,Custom -20%");
    assert_eq!(out.lines().count(), 60);
}

#[test]
fn test_stress_portfolio_export() {
    let ws = Workspace::new();
    let path = ws.path("stress.csv");
    ws.ranged(&["stress", "-a", "AAA", "-a", "BBB", "--no-baseline", "--export"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Market Crash"));

    let text = read(&path);
    assert!(text.starts_with("Date,Interest Rate Hike,Oil Price Shock,Market Crash\n"));
}

#[test]
fn test_stress_custom_shock_out_of_range() {
    let ws = Workspace::new();
    ws.ranged(&["stress", "--symbol", "AAA", "--custom", "80"])
        .assert()
        .failure();
}

// ===== NEWS AND CONFIG =====

#[test]
fn test_news_from_file() {
    let ws = Workspace::new();
    let news = ws.path("news.json");
    std::fs::write(
        &news,
        r#"[{"symbol":"AAA","title":"AAA beats estimates","link":"https://example.com/1"},
            {"symbol":"BBB","title":"BBB misses","link":"https://example.com/2"}]"#,
    )
    .unwrap();

    ws.cmd()
        .args(["news", "aaa", "-f", "minimal", "--news-file"])
        .arg(&news)
        .assert()
        .success()
        .stdout("AAA beats estimates\n");
}

#[test]
fn test_news_without_source_is_empty() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["news", "AAA", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("No news file configured"));
}

#[test]
fn test_config_set_get_reset() {
    let ws = Workspace::new();

    ws.cmd().args(["config", "set", "confidence", "0.99"]).assert().success();
    ws.cmd()
        .args(["config", "get", "confidence_level", "-f", "minimal"])
        .assert()
        .success()
        .stdout("0.99\n");
    assert!(read(&ws.path("config.json")).contains("0.99"));

    ws.cmd().args(["config", "set", "confidence", "2"]).assert().failure();

    ws.cmd().args(["config", "reset", "confidence"]).assert().success();
    ws.cmd()
        .args(["config", "get", "confidence", "-f", "minimal"])
        .assert()
        .success()
        .stdout("0.95\n");
}

#[test]
fn test_config_default_range_applies() {
    let ws = Workspace::new();
    ws.cmd().args(["config", "set", "default_start", "2024-01-01"]).assert().success();
    ws.cmd().args(["config", "set", "default_end", "2024-03-31"]).assert().success();

    ws.cmd()
        .args(["prices", "BBB", "-f", "minimal"])
        .assert()
        .success();
}
