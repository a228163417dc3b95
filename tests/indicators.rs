//! 성능 지표 계산 회귀 테스트. 분모 가드와 기준 시나리오 값을 검증한다.

use chrono::{NaiveDate, NaiveTime};
use turbine_performance_calc::perf::{compute_performance, TestMeasurement};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.9} got {actual:.9} (diff {diff:.9}, tol {rel_tol})"
    );
}

fn base_measurement() -> TestMeasurement {
    TestMeasurement {
        operator: "kim".to_string(),
        turbine_id: "GT-01".to_string(),
        test_date: NaiveDate::from_ymd_opt(2024, 3, 14).expect("date"),
        start_time: NaiveTime::from_hms_opt(8, 0, 0).expect("time"),
        end_time: NaiveTime::from_hms_opt(12, 0, 0).expect("time"),
        run_hours: 4.0,
        load_pct: 95.0,
        intake_temp_c: 25.0,
        atm_pressure_bar: 1.013,
        meter_start_l: 1000.0,
        meter_end_l: 1500.0,
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

#[test]
fn defaults_match_reference_conditions() {
    let m = TestMeasurement::default();
    assert_eq!(m.ref_temp_c, 15.0);
    assert_eq!(m.ref_pressure_bar, 1.013);
    assert_eq!(m.kp, 1.0);
    assert_eq!(m.a_h, 1.0);
    assert_eq!(m.a_pf, 1.0);
    assert_eq!(m.a_dpa, 1.0);
    assert_eq!(m.a_dpe, 1.0);
    assert_eq!(m.a_ta_manual, 1.0);
    assert_eq!(m.a_pa_manual, 1.0);
}

#[test]
fn fuel_volume_and_mass_reference_case() {
    let res = compute_performance(TestMeasurement {
        meter_start_l: 100.0,
        meter_end_l: 150.0,
        vcf: 1.0,
        density_15_g_per_l: 840.0,
        ..TestMeasurement::default()
    });
    assert_eq!(res.apparent_volume_l, 50.0);
    assert_eq!(res.corrected_volume_l, 50.0);
    assert_eq!(res.fuel_mass_kg, 42000.0);
}

#[test]
fn full_scenario_reference_values() {
    let res = compute_performance(base_measurement());
    assert_close("apparent_volume", res.apparent_volume_l, 500.0, 1e-12);
    assert_close("corrected_volume", res.corrected_volume_l, 490.0, 1e-12);
    assert_close("fuel_mass", res.fuel_mass_kg, 411_600.0, 1e-12);
    assert_close("energy_produced", res.energy_produced_kwh, 4000.0, 1e-12);
    assert_close("net_power_calc", res.net_power_calc_kw, 1920.0, 1e-12);
    assert_close("ata", res.ata_factor, 0.966_442_953_020_134_3, 1e-12);
    assert_close("apa", res.apa_factor, 1.0, 1e-12);
    assert_close(
        "specific_consumption",
        res.specific_consumption_g_per_kwh,
        102.9,
        1e-12,
    );
    assert_close("hrm", res.hrm_kj_per_kwh, 4393.83, 1e-12);
    assert_close("pmc", res.pmc_kw, 1855.570_469_798_657_8, 1e-12);
    assert_close("hrmc", res.hrmc_kj_per_kwh, 4246.386_040_268_457, 1e-12);
    assert_close(
        "measured_efficiency",
        res.measured_efficiency,
        0.000_393_278_756_802_152_1,
        1e-12,
    );
    assert_close(
        "corrected_efficiency",
        res.corrected_efficiency,
        0.847_779_727_481_491,
        1e-12,
    );
}

#[test]
fn ata_factor_reference_point() {
    // Tref=15, T흡기=25 → 288/298
    let res = compute_performance(TestMeasurement {
        intake_temp_c: 25.0,
        ..TestMeasurement::default()
    });
    assert_close("ata", res.ata_factor, 288.0 / 298.0, 1e-12);
}

#[test]
fn ata_guard_at_zero_absolute_denominator() {
    let res = compute_performance(TestMeasurement {
        intake_temp_c: -273.0,
        ..TestMeasurement::default()
    });
    assert_eq!(res.ata_factor, 1.0);
}

#[test]
fn apa_guard_nonpositive_reference_pressure() {
    let res = compute_performance(TestMeasurement {
        atm_pressure_bar: 2.0,
        ref_pressure_bar: 0.0,
        ..TestMeasurement::default()
    });
    assert_eq!(res.apa_factor, 1.0);
}

#[test]
fn zero_energy_produced_zeroes_energy_metrics() {
    let res = compute_performance(TestMeasurement {
        energy_start_kwh: 12_000.0,
        energy_end_kwh: 12_000.0,
        ..base_measurement()
    });
    assert_eq!(res.energy_produced_kwh, 0.0);
    assert_eq!(res.specific_consumption_g_per_kwh, 0.0);
    assert_eq!(res.hrm_kj_per_kwh, 0.0);
    // HRM이 0이면 보정 열소비율과 보정 효율도 0으로 이어진다.
    assert_eq!(res.hrmc_kj_per_kwh, 0.0);
    assert_eq!(res.corrected_efficiency, 0.0);
}

#[test]
fn negative_apparent_volume_propagates_and_zeroes_measured_efficiency() {
    // 유량계 역전은 거부하지 않고 음수 체적 그대로 전파한다.
    let res = compute_performance(TestMeasurement {
        meter_start_l: 1500.0,
        meter_end_l: 1000.0,
        ..base_measurement()
    });
    assert_eq!(res.apparent_volume_l, -500.0);
    assert_eq!(res.corrected_volume_l, -490.0);
    assert_eq!(res.fuel_mass_kg, -411_600.0);
    assert_eq!(res.measured_efficiency, 0.0);
}

#[test]
fn zero_manual_factor_zeroes_corrected_metrics() {
    for field in ["kp", "a_h", "a_pf", "a_dpa", "a_dpe"] {
        let mut m = base_measurement();
        match field {
            "kp" => m.kp = 0.0,
            "a_h" => m.a_h = 0.0,
            "a_pf" => m.a_pf = 0.0,
            "a_dpa" => m.a_dpa = 0.0,
            _ => m.a_dpe = 0.0,
        }
        let res = compute_performance(m);
        assert_eq!(res.pmc_kw, 0.0, "{field}=0 should zero PMC");
        assert_eq!(res.hrmc_kj_per_kwh, 0.0, "{field}=0 should zero HRMC");
        assert_eq!(
            res.corrected_efficiency, 0.0,
            "{field}=0 should zero corrected efficiency"
        );
    }
}

#[test]
fn zero_atm_pressure_zeroes_corrected_metrics() {
    // APA=0이면 보정 분모 전체가 0이 된다.
    let res = compute_performance(TestMeasurement {
        atm_pressure_bar: 0.0,
        ..base_measurement()
    });
    assert_eq!(res.apa_factor, 0.0);
    assert_eq!(res.pmc_kw, 0.0);
    assert_eq!(res.hrmc_kj_per_kwh, 0.0);
    assert_eq!(res.corrected_efficiency, 0.0);
}

#[test]
fn compute_is_idempotent() {
    let m = base_measurement();
    let first = compute_performance(m.clone());
    let second = compute_performance(m);
    assert_eq!(first, second);
}

#[test]
fn manual_ata_apa_factors_do_not_affect_results() {
    let mut m = base_measurement();
    m.a_ta_manual = 0.5;
    m.a_pa_manual = 2.0;
    let with_manual = compute_performance(m.clone());
    m.a_ta_manual = 1.0;
    m.a_pa_manual = 1.0;
    let without_manual = compute_performance(m);
    assert_eq!(with_manual, without_manual);
}
