use crate::perf::measurement::TestMeasurement;

/// 성능 지표 계산 결과.
///
/// 효율은 0~1 비율로 보관하며 % 환산은 표시/기록 단계에서 수행한다.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceIndicators {
    /// 외관 체적 [L]
    pub apparent_volume_l: f64,
    /// VCF 보정 체적 [L]
    pub corrected_volume_l: f64,
    /// 연료 질량 [kg]
    pub fuel_mass_kg: f64,
    /// 생산 전력량 [kWh]
    pub energy_produced_kwh: f64,
    /// 계산 순 출력 [kW]
    pub net_power_calc_kw: f64,
    /// 주위온도 보정계수 ATA
    pub ata_factor: f64,
    /// 대기압 보정계수 APA
    pub apa_factor: f64,
    /// 보정 비연료소비율 [g/kWh]
    pub specific_consumption_g_per_kwh: f64,
    /// 보정 출력 PMC [kW]
    pub pmc_kw: f64,
    /// 측정 열소비율 HRM [kJ/kWh]
    pub hrm_kj_per_kwh: f64,
    /// 보정 열소비율 HRMC [kJ/kWh]
    pub hrmc_kj_per_kwh: f64,
    /// 측정 효율 (0~1)
    pub measured_efficiency: f64,
    /// 보정 효율 (0~1)
    pub corrected_efficiency: f64,
}

/// 측정값으로부터 성능 지표 일체를 계산한다.
///
/// 부작용과 내부 상태가 없는 순수 함수다. 분모가 정의되지 않는 항목은
/// 오류를 내는 대신 0을 돌려준다 (해당 지표는 이번 입력에서 정의 불가라는 뜻).
pub fn compute_performance(input: TestMeasurement) -> PerformanceIndicators {
    let apparent_volume_l = input.meter_end_l - input.meter_start_l;
    let corrected_volume_l = apparent_volume_l * input.vcf;
    let fuel_mass_kg = corrected_volume_l * input.density_15_g_per_l;

    let energy_produced_kwh = input.energy_end_kwh - input.energy_start_kwh;
    let net_power_calc_kw =
        input.gross_power_kw - input.transformer_loss_kwh - input.aux_consumption_kwh;

    // 절대온도 환산은 273 상수를 사용한다 (273.15 아님).
    let intake_abs = 273.0 + input.intake_temp_c;
    let ata_factor = if intake_abs != 0.0 {
        (273.0 + input.ref_temp_c) / intake_abs
    } else {
        1.0
    };
    let apa_factor = if input.ref_pressure_bar > 0.0 {
        input.atm_pressure_bar / input.ref_pressure_bar
    } else {
        1.0
    };

    let correction_denominator =
        input.a_h * input.a_pf * apa_factor * input.a_dpa * input.a_dpe * input.kp;

    let fuel_heat_kj = fuel_mass_kg * input.pci_kj_per_kg;

    let measured_efficiency = if fuel_mass_kg > 0.0 {
        (net_power_calc_kw * 3600.0) / fuel_heat_kj
    } else {
        0.0
    };
    let specific_consumption_g_per_kwh = if energy_produced_kwh > 0.0 {
        fuel_mass_kg / energy_produced_kwh
    } else {
        0.0
    };
    let hrm_kj_per_kwh = if energy_produced_kwh > 0.0 {
        (fuel_heat_kj / energy_produced_kwh) / 1000.0
    } else {
        0.0
    };
    let pmc_kw = if correction_denominator > 0.0 {
        (net_power_calc_kw * ata_factor) / correction_denominator
    } else {
        0.0
    };
    let hrmc_kj_per_kwh = if correction_denominator > 0.0 {
        (hrm_kj_per_kwh * ata_factor) / correction_denominator
    } else {
        0.0
    };
    let corrected_efficiency = if hrmc_kj_per_kwh > 0.0 {
        3600.0 / hrmc_kj_per_kwh
    } else {
        0.0
    };

    PerformanceIndicators {
        apparent_volume_l,
        corrected_volume_l,
        fuel_mass_kg,
        energy_produced_kwh,
        net_power_calc_kw,
        ata_factor,
        apa_factor,
        specific_consumption_g_per_kwh,
        pmc_kw,
        hrm_kj_per_kwh,
        hrmc_kj_per_kwh,
        measured_efficiency,
        corrected_efficiency,
    }
}
