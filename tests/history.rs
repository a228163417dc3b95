//! 이력 CSV 저장소 테스트. 추가 순서 보존, 라운드트립, 손상 파일 처리를 검증한다.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use turbine_performance_calc::history::{HistoryError, HistoryRecord, HistoryStore, COLUMNS};
use turbine_performance_calc::perf::{compute_performance, TestMeasurement};

fn sample_measurement(operator: &str, meter_end_l: f64) -> TestMeasurement {
    TestMeasurement {
        operator: operator.to_string(),
        turbine_id: "GT-01".to_string(),
        test_date: NaiveDate::from_ymd_opt(2024, 3, 14).expect("date"),
        start_time: NaiveTime::from_hms_opt(8, 0, 0).expect("time"),
        end_time: NaiveTime::from_hms_opt(12, 0, 0).expect("time"),
        intake_temp_c: 25.0,
        atm_pressure_bar: 1.013,
        meter_start_l: 1000.0,
        meter_end_l,
        density_15_g_per_l: 840.0,
        vcf: 0.98,
        pci_kj_per_kg: 42700.0,
        energy_start_kwh: 20000.0,
        energy_end_kwh: 24000.0,
        gross_power_kw: 2000.0,
        transformer_loss_kwh: 50.0,
        aux_consumption_kwh: 30.0,
        net_power_kw: 1920.0,
        ..TestMeasurement::default()
    }
}

fn sample_record(operator: &str, meter_end_l: f64) -> HistoryRecord {
    let measurement = sample_measurement(operator, meter_end_l);
    let indicators = compute_performance(measurement.clone());
    HistoryRecord::from_run(&measurement, &indicators, recorded_at())
}

fn recorded_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 14)
        .expect("date")
        .and_hms_opt(12, 30, 0)
        .expect("time")
}

#[test]
fn missing_file_loads_empty_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = HistoryStore::new(dir.path().join("history.csv"));
    assert!(store.load().expect("load").is_empty());
}

#[test]
fn empty_file_loads_empty_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("history.csv");
    fs::write(&path, "").expect("write");
    let store = HistoryStore::new(path);
    assert!(store.load().expect("load").is_empty());
}

#[test]
fn append_keeps_prior_rows_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = HistoryStore::new(dir.path().join("history.csv"));

    let first = store.append(sample_record("kim", 1500.0)).expect("append");
    assert_eq!(first.len(), 1);

    let second = store.append(sample_record("lee", 1600.0)).expect("append");
    assert_eq!(second.len(), 2);
    assert_eq!(second[0].operator, "kim");
    assert_eq!(second[1].operator, "lee");

    for i in 0..5 {
        store
            .append(sample_record(&format!("op{i}"), 1700.0 + i as f64))
            .expect("append");
    }
    let rows = store.load().expect("load");
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0].operator, "kim");
    assert_eq!(rows[1].operator, "lee");
    for i in 0..5 {
        assert_eq!(rows[2 + i].operator, format!("op{i}"));
    }
}

#[test]
fn roundtrip_preserves_rows_exactly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = HistoryStore::new(dir.path().join("history.csv"));

    store.append(sample_record("kim", 1500.0)).expect("append");
    let appended = store.append(sample_record("lee", 1600.0)).expect("append");

    let reloaded = store.load().expect("load");
    assert_eq!(reloaded, appended);
}

#[test]
fn header_row_is_stable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("history.csv");
    let store = HistoryStore::new(&path);
    store.append(sample_record("kim", 1500.0)).expect("append");

    let content = fs::read_to_string(&path).expect("read");
    let header = content.lines().next().expect("header line");
    assert_eq!(header, COLUMNS.join(","));
}

#[test]
fn record_flattening_uses_persisted_forms() {
    let measurement = sample_measurement("kim", 1500.0);
    let indicators = compute_performance(measurement.clone());
    let record = HistoryRecord::from_run(&measurement, &indicators, recorded_at());

    assert_eq!(record.test_date, "2024-03-14");
    assert_eq!(record.start_time, "08:00");
    assert_eq!(record.end_time, "12:00");
    assert_eq!(record.recorded_at, "2024-03-14 12:30:00");
    // 순 출력 열은 수동 입력값이 아니라 계산값이다.
    assert_eq!(record.net_power_kw, indicators.net_power_calc_kw);
    // 효율 두 열은 % 환산값으로 기록한다.
    assert_eq!(
        record.measured_efficiency_pct,
        indicators.measured_efficiency * 100.0
    );
    assert_eq!(
        record.corrected_efficiency_pct,
        indicators.corrected_efficiency * 100.0
    );
}

#[test]
fn corrupt_file_fails_load_and_append_without_touching_it() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("history.csv");
    let garbage = "not,a,history\n1,2,3\n";
    fs::write(&path, garbage).expect("write");

    let store = HistoryStore::new(&path);
    assert!(matches!(store.load(), Err(HistoryError::Corrupt { .. })));
    assert!(matches!(
        store.append(sample_record("kim", 1500.0)),
        Err(HistoryError::Corrupt { .. })
    ));

    let content = fs::read_to_string(&path).expect("read");
    assert_eq!(content, garbage);
}

#[test]
fn mangled_row_under_valid_header_is_corrupt() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("history.csv");
    let content = format!("{}\nnot,enough,fields\n", COLUMNS.join(","));
    fs::write(&path, content).expect("write");

    let store = HistoryStore::new(&path);
    assert!(matches!(store.load(), Err(HistoryError::Corrupt { .. })));
}
