use chrono::{NaiveDate, NaiveTime};

/// 터빈 성능 시험 1회분의 측정값과 수동 보정계수 입력.
///
/// 제출 시점에 한 번 만들어 계산기에 값으로 넘기는 일회성 레코드이며,
/// 필드 간 교차 검증은 하지 않는다 (예: 유량계 종료 값이 시작 값보다 작으면
/// 음의 외관 체적이 그대로 하류 지표로 전파된다).
#[derive(Debug, Clone)]
pub struct TestMeasurement {
    /// 측정자 이름
    pub operator: String,
    /// 터빈 이름 또는 관리 번호
    pub turbine_id: String,
    /// 시험 일자
    pub test_date: NaiveDate,
    /// 시험 시작 시각
    pub start_time: NaiveTime,
    /// 시험 종료 시각
    pub end_time: NaiveTime,
    /// 운전 시간 [h]
    pub run_hours: f64,
    /// 부하율 [%] (0~100)
    pub load_pct: f64,
    /// 흡기 온도 [°C]. 유일하게 음수가 허용되는 수치 입력.
    pub intake_temp_c: f64,
    /// 기준 온도 [°C]
    pub ref_temp_c: f64,
    /// 대기압 [bar]
    pub atm_pressure_bar: f64,
    /// 기준 압력 [bar]
    pub ref_pressure_bar: f64,
    /// 연료 유량계 시작 값 [L]
    pub meter_start_l: f64,
    /// 연료 유량계 종료 값 [L]
    pub meter_end_l: f64,
    /// 15°C 기준 연료 밀도 [g/L]
    pub density_15_g_per_l: f64,
    /// 체적 보정계수 VCF
    pub vcf: f64,
    /// 저위발열량 PCI [kJ/kg]
    pub pci_kj_per_kg: f64,
    /// 적산 전력계 시작 값 [kWh]
    pub energy_start_kwh: f64,
    /// 적산 전력계 종료 값 [kWh]
    pub energy_end_kwh: f64,
    /// 총 발전 출력 [kW]
    pub gross_power_kw: f64,
    /// 변압기 손실 [kWh]
    pub transformer_loss_kwh: f64,
    /// 소내 보조 소비 [kWh]
    pub aux_consumption_kwh: f64,
    /// 수동 입력 순 출력 [kW]. 계산 순 출력과 별개로 기록만 받는다.
    pub net_power_kw: f64,
    /// 경년열화 계수 (k_p)
    pub kp: f64,
    /// 습도 보정계수 (aH)
    pub a_h: f64,
    /// 역률 보정계수 (aPF)
    pub a_pf: f64,
    /// 대기압 변화율 보정계수 (aDPA)
    pub a_dpa: f64,
    /// 배기압 변화율 보정계수 (aDPE)
    pub a_dpe: f64,
    /// 수동 주위온도 보정계수 (ATA). 계산식은 계산된 ATA를 사용한다.
    pub a_ta_manual: f64,
    /// 수동 대기압 보정계수 (APA). 계산식은 계산된 APA를 사용한다.
    pub a_pa_manual: f64,
}

impl Default for TestMeasurement {
    fn default() -> Self {
        Self {
            operator: String::new(),
            turbine_id: String::new(),
            test_date: NaiveDate::default(),
            start_time: NaiveTime::default(),
            end_time: NaiveTime::default(),
            run_hours: 0.0,
            load_pct: 0.0,
            intake_temp_c: 0.0,
            ref_temp_c: 15.0,
            atm_pressure_bar: 0.0,
            ref_pressure_bar: 1.013,
            meter_start_l: 0.0,
            meter_end_l: 0.0,
            density_15_g_per_l: 0.0,
            vcf: 0.0,
            pci_kj_per_kg: 0.0,
            energy_start_kwh: 0.0,
            energy_end_kwh: 0.0,
            gross_power_kw: 0.0,
            transformer_loss_kwh: 0.0,
            aux_consumption_kwh: 0.0,
            net_power_kw: 0.0,
            kp: 1.0,
            a_h: 1.0,
            a_pf: 1.0,
            a_dpa: 1.0,
            a_dpe: 1.0,
            a_ta_manual: 1.0,
            a_pa_manual: 1.0,
        }
    }
}
