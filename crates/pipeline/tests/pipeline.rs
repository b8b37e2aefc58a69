//! End-to-end tests for the factor pipeline.

use approx::assert_abs_diff_eq;
use chrono::{Duration, TimeZone, Utc};
use factor_core::{
    config::InstrumentOrder, ColumnData, Config, Factor, FactorTable, InputTable,
};
use factor_pipeline::FactorPipeline;

struct Row {
    ticker: &'static str,
    ts: i64,
    last: f64,
    volume: f64,
    eps: f64,
}

fn row(ticker: &'static str, ts: i64, last: f64) -> Row {
    Row {
        ticker,
        ts,
        last,
        volume: 1_000.0 + ts as f64,
        eps: 2.0,
    }
}

fn to_table(rows: &[Row]) -> InputTable {
    InputTable::new()
        .with_column(
            "ticker",
            ColumnData::Text(rows.iter().map(|r| r.ticker.to_string()).collect()),
        )
        .with_column("date", ColumnData::Int(rows.iter().map(|r| r.ts).collect()))
        .with_column("last", ColumnData::Float(rows.iter().map(|r| r.last).collect()))
        .with_column("volume", ColumnData::Float(rows.iter().map(|r| r.volume).collect()))
        .with_column("eps", ColumnData::Float(rows.iter().map(|r| r.eps).collect()))
}

/// Two instruments interleaved, each out of time order.
fn interleaved() -> Vec<Row> {
    let mut rows = Vec::new();
    for t in (0..30).rev() {
        rows.push(row("MSFT", t, 300.0 + (t as f64 * 0.7).sin() * 5.0 + t as f64));
        if t % 2 == 0 {
            rows.push(row("AAPL", t, 150.0 - t as f64 * 0.5));
        }
    }
    for t in (0..30).filter(|t| t % 2 == 1) {
        rows.push(row("AAPL", t, 150.0 - t as f64 * 0.5));
    }
    rows
}

fn assert_same_values(a: &FactorTable, b: &FactorTable) {
    assert_eq!(a.factors, b.factors);
    assert_eq!(a.len(), b.len());
    for (ra, rb) in a.rows.iter().zip(&b.rows) {
        assert_eq!(ra.instrument, rb.instrument);
        assert_eq!(ra.ts_ms, rb.ts_ms);
        for (va, vb) in ra.values.iter().zip(&rb.values) {
            if va.is_nan() {
                assert!(vb.is_nan());
            } else {
                assert_abs_diff_eq!(*va, *vb, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn output_row_count_and_order() -> anyhow::Result<()> {
    let rows = interleaved();
    let pipeline = FactorPipeline::new(Config::default())?;
    let out = pipeline.compute(&to_table(&rows))?;

    assert_eq!(out.len(), rows.len());
    // first appearance: MSFT (row 0) before AAPL
    assert_eq!(out.instruments(), vec!["MSFT", "AAPL"]);

    for ticker in ["MSFT", "AAPL"] {
        let ts: Vec<i64> = out.rows_for(ticker).map(|r| r.ts_ms).collect();
        assert_eq!(ts, (0..30).collect::<Vec<_>>());
    }
    Ok(())
}

#[test]
fn lexicographic_instrument_order() -> anyhow::Result<()> {
    let mut config = Config::default();
    config.instrument_order = InstrumentOrder::Lexicographic;
    let out = FactorPipeline::new(config)?.compute(&to_table(&interleaved()))?;
    assert_eq!(out.instruments(), vec!["AAPL", "MSFT"]);
    Ok(())
}

#[test]
fn instruments_do_not_influence_each_other() -> anyhow::Result<()> {
    let pipeline = FactorPipeline::new(Config::default())?;
    let combined = pipeline.compute(&to_table(&interleaved()))?;

    let aapl_only: Vec<Row> = interleaved()
        .into_iter()
        .filter(|r| r.ticker == "AAPL")
        .collect();
    let alone = pipeline.compute(&to_table(&aapl_only))?;

    let mut from_combined = FactorTable::new(combined.factors.clone());
    from_combined.extend(combined.rows_for("AAPL").cloned());
    assert_same_values(&from_combined, &alone);
    Ok(())
}

#[test]
fn parallel_matches_sequential() -> anyhow::Result<()> {
    let table = to_table(&interleaved());
    let sequential = FactorPipeline::new(Config::default())?.compute(&table)?;

    let mut config = Config::default();
    config.parallel = true;
    let parallel = FactorPipeline::new(config)?.compute(&table)?;

    assert_same_values(&sequential, &parallel);
    Ok(())
}

#[test]
fn earnings_column_adds_pe() -> anyhow::Result<()> {
    let mut config = Config::default();
    config.columns.earnings = Some("eps".to_string());
    let out = FactorPipeline::new(config)?.compute(&to_table(&interleaved()))?;

    assert_eq!(out.factors.len(), Factor::ALL.len());
    let first = &out.rows[0];
    let pe = out.value(0, Factor::Pe).unwrap();
    let pe_idx = out.factor_index(Factor::Pe).unwrap();
    assert_eq!(first.values[pe_idx], pe);
    // MSFT at t = 0: price 300, eps 2
    assert_abs_diff_eq!(pe, 150.0, epsilon = 1e-3);
    Ok(())
}

#[test]
fn datetime_timestamps() -> anyhow::Result<()> {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let dates = vec![start + Duration::days(2), start, start + Duration::days(1)];
    let table = InputTable::new()
        .with_column("ticker", ColumnData::Text(vec!["SPY".into(); 3]))
        .with_column("date", ColumnData::DateTime(dates))
        .with_column("last", ColumnData::Float(vec![12.0, 10.0, 11.0]))
        .with_column("volume", ColumnData::Int(vec![100, 100, 100]));

    let out = FactorPipeline::new(Config::default())?.compute(&table)?;
    let ts: Vec<i64> = out.rows.iter().map(|r| r.ts_ms).collect();
    assert_eq!(ts[0], start.timestamp_millis());
    assert!(ts.windows(2).all(|w| w[0] < w[1]));

    // sorted closes are 10, 11, 12: OBV climbs twice
    let obv = out.column(Factor::Obv).unwrap();
    assert_eq!(obv[0], 0.0);
    assert_abs_diff_eq!(obv[2], 2.0 * 100.0_f64.ln(), epsilon = 1e-6);
    Ok(())
}

#[test]
fn obv_scenario_through_pipeline() -> anyhow::Result<()> {
    let table = InputTable::new()
        .with_column("ticker", ColumnData::Text(vec!["X".into(); 4]))
        .with_column("date", ColumnData::Int(vec![4, 3, 2, 1]))
        .with_column("last", ColumnData::Float(vec![9.0, 11.0, 11.0, 10.0]))
        .with_column("volume", ColumnData::Float(vec![100.0; 4]));

    let out = FactorPipeline::new(Config::default())?.compute(&table)?;
    let obv = out.column(Factor::Obv).unwrap();
    let expected = [0.0, 4.605, 4.605, 0.0];
    for (got, want) in obv.iter().zip(expected) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-3);
    }
    Ok(())
}

#[test]
fn rsi_stays_bounded() -> anyhow::Result<()> {
    let out = FactorPipeline::new(Config::default())?.compute(&to_table(&interleaved()))?;
    for v in out.column(Factor::Rsi).unwrap() {
        assert!(v.is_nan() || (0.0..=100.0).contains(&v));
    }
    // AAPL falls monotonically, so once warm its RSI is exactly 0
    let idx = out.factor_index(Factor::Rsi).unwrap();
    let last_aapl = out.rows_for("AAPL").last().unwrap();
    assert_eq!(last_aapl.values[idx], 0.0);
    Ok(())
}

#[test]
fn config_from_json_drives_pipeline() -> anyhow::Result<()> {
    let config = Config::from_json_str(
        r#"{"columns": {"price": "px"}, "momentum": {"period": 1}}"#,
    )?;
    let table = InputTable::new()
        .with_column("ticker", ColumnData::Text(vec!["A".into(); 3]))
        .with_column("date", ColumnData::Int(vec![1, 2, 3]))
        .with_column("px", ColumnData::Float(vec![1.0, 4.0, 9.0]))
        .with_column("volume", ColumnData::Float(vec![1.0; 3]));

    let out = FactorPipeline::new(config)?.compute(&table)?;
    let mom = out.column(Factor::Momentum).unwrap();
    assert!(mom[0].is_nan());
    assert_eq!(&mom[1..], &[3.0, 5.0]);
    Ok(())
}

#[test]
fn factor_table_serializes() -> anyhow::Result<()> {
    let out = FactorPipeline::new(Config::default())?.compute(&to_table(&interleaved()[..3]))?;
    let json = serde_json::to_value(&out)?;
    assert_eq!(json["factors"][0], "momentum");
    assert_eq!(json["rows"].as_array().map(|r| r.len()), Some(3));
    assert_eq!(json["rows"][0]["instrument"], "MSFT");
    assert!(json["rows"][0]["timestamp"].is_i64());
    Ok(())
}

#[test]
fn factor_table_json_round_trip() -> anyhow::Result<()> {
    let out = FactorPipeline::new(Config::default())?.compute(&to_table(&interleaved()))?;
    // default windows leave the first rows of each instrument undefined
    assert!(out.value(0, Factor::Sma).is_some_and(f64::is_nan));

    let text = serde_json::to_string(&out)?;
    let back: FactorTable = serde_json::from_str(&text)?;
    assert_same_values(&out, &back);
    Ok(())
}
