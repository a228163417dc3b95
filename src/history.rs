//! 시험 이력 CSV 저장소.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::perf::{PerformanceIndicators, TestMeasurement};

/// 기본 이력 파일 이름.
pub const DEFAULT_HISTORY_FILE: &str = "history.csv";

/// 이력 파일의 헤더. 순서와 표기는 배포 후 변경하지 않으며
/// `HistoryRecord`의 serde rename과 일치해야 한다.
pub const COLUMNS: [&str; 36] = [
    "Operator",
    "Date",
    "Start time",
    "End time",
    "Turbine",
    "Meter start (L)",
    "Meter end (L)",
    "Apparent volume (L)",
    "VCF",
    "Corrected volume (L)",
    "Density 15C (g/L)",
    "Fuel mass (kg)",
    "Energy start (kWh)",
    "Energy end (kWh)",
    "Energy produced (kWh)",
    "Gross power (kW)",
    "Net power (kW)",
    "Transformer loss (kWh)",
    "Aux consumption (kWh)",
    "Intake temp (C)",
    "Atm pressure (bar)",
    "ATA factor",
    "APA factor",
    "Humidity corr (aH)",
    "Power factor corr (aPF)",
    "Atm pressure deriv corr (aDPA)",
    "Exhaust pressure deriv corr (aDPE)",
    "KP factor",
    "PCI (kJ/kg)",
    "Specific consumption (g/kWh)",
    "PMC (kW)",
    "HRM (kJ/kWh)",
    "HRMC (kJ/kWh)",
    "Measured efficiency (%)",
    "Corrected efficiency (%)",
    "Recorded at",
];

/// 이력 파일의 한 행. 측정 입력 일부 + 계산 지표 + 기록 시각을 평탄화한 것.
///
/// 한 번 추가된 행은 수정/삭제하지 않는다. 효율 두 열은 과거 성적서와 같은
/// % 환산값으로 기록한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "Operator")]
    pub operator: String,
    /// 시험 일자 (YYYY-MM-DD)
    #[serde(rename = "Date")]
    pub test_date: String,
    /// 시작 시각 (HH:MM)
    #[serde(rename = "Start time")]
    pub start_time: String,
    /// 종료 시각 (HH:MM)
    #[serde(rename = "End time")]
    pub end_time: String,
    #[serde(rename = "Turbine")]
    pub turbine_id: String,
    #[serde(rename = "Meter start (L)")]
    pub meter_start_l: f64,
    #[serde(rename = "Meter end (L)")]
    pub meter_end_l: f64,
    #[serde(rename = "Apparent volume (L)")]
    pub apparent_volume_l: f64,
    #[serde(rename = "VCF")]
    pub vcf: f64,
    #[serde(rename = "Corrected volume (L)")]
    pub corrected_volume_l: f64,
    #[serde(rename = "Density 15C (g/L)")]
    pub density_15_g_per_l: f64,
    #[serde(rename = "Fuel mass (kg)")]
    pub fuel_mass_kg: f64,
    #[serde(rename = "Energy start (kWh)")]
    pub energy_start_kwh: f64,
    #[serde(rename = "Energy end (kWh)")]
    pub energy_end_kwh: f64,
    #[serde(rename = "Energy produced (kWh)")]
    pub energy_produced_kwh: f64,
    #[serde(rename = "Gross power (kW)")]
    pub gross_power_kw: f64,
    /// 계산 순 출력. 수동 입력값이 아니라 계산값을 기록한다.
    #[serde(rename = "Net power (kW)")]
    pub net_power_kw: f64,
    #[serde(rename = "Transformer loss (kWh)")]
    pub transformer_loss_kwh: f64,
    #[serde(rename = "Aux consumption (kWh)")]
    pub aux_consumption_kwh: f64,
    #[serde(rename = "Intake temp (C)")]
    pub intake_temp_c: f64,
    #[serde(rename = "Atm pressure (bar)")]
    pub atm_pressure_bar: f64,
    #[serde(rename = "ATA factor")]
    pub ata_factor: f64,
    #[serde(rename = "APA factor")]
    pub apa_factor: f64,
    #[serde(rename = "Humidity corr (aH)")]
    pub a_h: f64,
    #[serde(rename = "Power factor corr (aPF)")]
    pub a_pf: f64,
    #[serde(rename = "Atm pressure deriv corr (aDPA)")]
    pub a_dpa: f64,
    #[serde(rename = "Exhaust pressure deriv corr (aDPE)")]
    pub a_dpe: f64,
    #[serde(rename = "KP factor")]
    pub kp: f64,
    #[serde(rename = "PCI (kJ/kg)")]
    pub pci_kj_per_kg: f64,
    #[serde(rename = "Specific consumption (g/kWh)")]
    pub specific_consumption_g_per_kwh: f64,
    #[serde(rename = "PMC (kW)")]
    pub pmc_kw: f64,
    #[serde(rename = "HRM (kJ/kWh)")]
    pub hrm_kj_per_kwh: f64,
    #[serde(rename = "HRMC (kJ/kWh)")]
    pub hrmc_kj_per_kwh: f64,
    #[serde(rename = "Measured efficiency (%)")]
    pub measured_efficiency_pct: f64,
    #[serde(rename = "Corrected efficiency (%)")]
    pub corrected_efficiency_pct: f64,
    /// 기록 시각 (YYYY-MM-DD HH:MM:SS)
    #[serde(rename = "Recorded at")]
    pub recorded_at: String,
}

impl HistoryRecord {
    /// 측정값과 계산 지표를 한 행으로 평탄화한다.
    pub fn from_run(
        measurement: &TestMeasurement,
        indicators: &PerformanceIndicators,
        recorded_at: NaiveDateTime,
    ) -> Self {
        Self {
            operator: measurement.operator.clone(),
            test_date: measurement.test_date.format("%Y-%m-%d").to_string(),
            start_time: measurement.start_time.format("%H:%M").to_string(),
            end_time: measurement.end_time.format("%H:%M").to_string(),
            turbine_id: measurement.turbine_id.clone(),
            meter_start_l: measurement.meter_start_l,
            meter_end_l: measurement.meter_end_l,
            apparent_volume_l: indicators.apparent_volume_l,
            vcf: measurement.vcf,
            corrected_volume_l: indicators.corrected_volume_l,
            density_15_g_per_l: measurement.density_15_g_per_l,
            fuel_mass_kg: indicators.fuel_mass_kg,
            energy_start_kwh: measurement.energy_start_kwh,
            energy_end_kwh: measurement.energy_end_kwh,
            energy_produced_kwh: indicators.energy_produced_kwh,
            gross_power_kw: measurement.gross_power_kw,
            net_power_kw: indicators.net_power_calc_kw,
            transformer_loss_kwh: measurement.transformer_loss_kwh,
            aux_consumption_kwh: measurement.aux_consumption_kwh,
            intake_temp_c: measurement.intake_temp_c,
            atm_pressure_bar: measurement.atm_pressure_bar,
            ata_factor: indicators.ata_factor,
            apa_factor: indicators.apa_factor,
            a_h: measurement.a_h,
            a_pf: measurement.a_pf,
            a_dpa: measurement.a_dpa,
            a_dpe: measurement.a_dpe,
            kp: measurement.kp,
            pci_kj_per_kg: measurement.pci_kj_per_kg,
            specific_consumption_g_per_kwh: indicators.specific_consumption_g_per_kwh,
            pmc_kw: indicators.pmc_kw,
            hrm_kj_per_kwh: indicators.hrm_kj_per_kwh,
            hrmc_kj_per_kwh: indicators.hrmc_kj_per_kwh,
            measured_efficiency_pct: indicators.measured_efficiency * 100.0,
            corrected_efficiency_pct: indicators.corrected_efficiency * 100.0,
            recorded_at: recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// 이력 저장소 접근 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum HistoryError {
    /// 이력 파일 입출력 오류
    Io(std::io::Error),
    /// 이력 파일이 존재하지만 기대한 행 형식으로 해석할 수 없음.
    /// 이 경우 기존 파일은 건드리지 않는다.
    Corrupt { path: PathBuf, detail: String },
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::Io(e) => write!(f, "이력 파일 입출력 오류: {e}"),
            HistoryError::Corrupt { path, detail } => {
                write!(f, "이력 파일 해석 불가 ({}): {detail}", path.display())
            }
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<std::io::Error> for HistoryError {
    fn from(value: std::io::Error) -> Self {
        HistoryError::Io(value)
    }
}

/// 시험 이력을 보관하는 CSV 저장소.
///
/// 단일 프로세스·단일 작성자 전제. 추가는 전체 읽기 → 새 행 연결 → 전체
/// 재작성 방식이라, 두 프로세스가 같은 파일에 동시에 기록하면 먼저 쓴 쪽의
/// 행이 사라질 수 있다. 교차 프로세스 잠금이나 원자적 교체는 제공하지 않는다.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// 주어진 경로의 저장소 핸들을 만든다. 파일이 아직 없어도 된다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 기존 이력을 모두 읽는다. 파일이 없거나 비어 있으면 빈 목록을 돌려준다.
    pub fn load(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        if fs::metadata(&self.path)?.len() == 0 {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| self.corrupt(e.to_string()))?
            .clone();
        if headers.len() != COLUMNS.len() || headers.iter().zip(COLUMNS).any(|(h, c)| h != c) {
            return Err(self.corrupt(format!("기대하지 않은 헤더: {headers:?}")));
        }

        let mut rows = Vec::new();
        for row in reader.deserialize() {
            let record: HistoryRecord = row.map_err(|e| self.corrupt(e.to_string()))?;
            rows.push(record);
        }
        Ok(rows)
    }

    /// 새 행을 기존 이력 끝에 붙이고 파일 전체를 다시 쓴다.
    /// 기존 이력이 해석되지 않으면 아무것도 쓰지 않고 실패한다.
    /// 성공 시 새 행을 포함한 전체 이력을 돌려준다.
    pub fn append(&self, record: HistoryRecord) -> Result<Vec<HistoryRecord>, HistoryError> {
        let mut rows = self.load()?;
        rows.push(record);

        let file = File::create(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(file);
        for row in &rows {
            writer.serialize(row).map_err(write_error)?;
        }
        writer.flush().map_err(HistoryError::Io)?;
        Ok(rows)
    }

    /// 측정값과 계산 지표를 한 행으로 묶어 추가한다. 기록 시각은 호출자가
    /// 넘긴다 (표시 계층은 현재 시각, 테스트는 고정 시각).
    pub fn append_run(
        &self,
        measurement: &TestMeasurement,
        indicators: &PerformanceIndicators,
        recorded_at: NaiveDateTime,
    ) -> Result<Vec<HistoryRecord>, HistoryError> {
        self.append(HistoryRecord::from_run(measurement, indicators, recorded_at))
    }

    fn corrupt(&self, detail: String) -> HistoryError {
        HistoryError::Corrupt {
            path: self.path.clone(),
            detail,
        }
    }
}

fn write_error(e: csv::Error) -> HistoryError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => HistoryError::Io(io),
        other => HistoryError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("CSV 직렬화 실패: {other:?}"),
        )),
    }
}
