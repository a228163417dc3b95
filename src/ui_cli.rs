use std::io::{self, Write};

use chrono::{Local, NaiveDate, NaiveTime};

use crate::app::AppError;
use crate::config::Config;
use crate::history::HistoryStore;
use crate::i18n::{keys, Translator};
use crate::perf::{self, PerformanceIndicators, TestMeasurement};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    RunTest,
    History,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_RUN_TEST));
    println!("{}", tr.t(keys::MAIN_MENU_HISTORY));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::RunTest),
            "2" => return Ok(MenuChoice::History),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 성능 시험 입력 폼을 처리한다.
/// 계산 결과는 이력 저장 성공 여부와 무관하게 항상 표시한다.
pub fn handle_run_test(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::FORM_HEADING));
    let measurement = read_measurement(tr)?;
    let indicators = perf::compute_performance(measurement.clone());
    print_indicators(tr, &indicators);

    let store = HistoryStore::new(&cfg.history_path);
    match store.append_run(&measurement, &indicators, Local::now().naive_local()) {
        Ok(rows) => {
            println!("{} {}", tr.t(keys::HISTORY_SAVED), store.path().display());
            println!("{} {}", tr.t(keys::HISTORY_COUNT), rows.len());
        }
        Err(e) => println!("{} {e}", tr.t(keys::HISTORY_SAVE_FAILED)),
    }
    Ok(())
}

/// 시험 이력 조회 메뉴를 처리한다.
pub fn handle_history(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::HISTORY_HEADING));
    let store = HistoryStore::new(&cfg.history_path);
    let rows = match store.load() {
        Ok(rows) => rows,
        Err(e) => {
            println!("{}: {e}", tr.t(keys::ERROR_PREFIX));
            return Ok(());
        }
    };
    if rows.is_empty() {
        println!("{}", tr.t(keys::HISTORY_EMPTY));
        return Ok(());
    }
    println!("{} {}", tr.t(keys::HISTORY_COUNT), rows.len());
    for row in &rows {
        println!(
            "{} | {} | {} | PMC {:.2} kW | HRMC {:.2} kJ/kWh | {:.2} %",
            row.recorded_at,
            row.turbine_id,
            row.operator,
            row.pmc_kw,
            row.hrmc_kj_per_kwh,
            row.corrected_efficiency_pct
        );
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어 변경은 다음 실행부터 적용된다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANG), cfg.language);
    let lang = read_line(tr.t(keys::SETTINGS_PROMPT_LANG))?;
    if !lang.trim().is_empty() {
        cfg.language = lang.trim().to_string();
    }
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_HISTORY), cfg.history_path);
    let path = read_line(tr.t(keys::SETTINGS_PROMPT_HISTORY))?;
    if !path.trim().is_empty() {
        cfg.history_path = path.trim().to_string();
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

/// 폼 항목을 순서대로 입력받아 측정 레코드를 만든다.
/// 수치 범위(0 이상, 부하율 0~100)는 여기서 걸러서 계산기에는 검증된 값만 넘긴다.
fn read_measurement(tr: &Translator) -> Result<TestMeasurement, AppError> {
    println!("{}", tr.t(keys::SECTION_GENERAL));
    let operator = read_line(tr.t(keys::PROMPT_OPERATOR))?.trim().to_string();
    let turbine_id = read_line(tr.t(keys::PROMPT_TURBINE))?.trim().to_string();
    let test_date = read_date(tr, keys::PROMPT_TEST_DATE)?;
    let start_time = read_time(tr, keys::PROMPT_START_TIME)?;
    let end_time = read_time(tr, keys::PROMPT_END_TIME)?;
    let run_hours = read_nonneg(tr, keys::PROMPT_RUN_HOURS)?;
    let load_pct = read_pct(tr, keys::PROMPT_LOAD_PCT)?;

    println!("{}", tr.t(keys::SECTION_ATMOSPHERIC));
    let intake_temp_c = read_f64(tr, keys::PROMPT_INTAKE_TEMP)?;
    let ref_temp_c = read_or_default(tr, keys::PROMPT_REF_TEMP, 15.0)?;
    let atm_pressure_bar = read_nonneg(tr, keys::PROMPT_ATM_PRESSURE)?;
    let ref_pressure_bar = read_or_default(tr, keys::PROMPT_REF_PRESSURE, 1.013)?;

    println!("{}", tr.t(keys::SECTION_FUEL));
    let meter_start_l = read_nonneg(tr, keys::PROMPT_METER_START)?;
    let meter_end_l = read_nonneg(tr, keys::PROMPT_METER_END)?;
    let density_15_g_per_l = read_nonneg(tr, keys::PROMPT_DENSITY)?;
    let vcf = read_nonneg(tr, keys::PROMPT_VCF)?;
    let pci_kj_per_kg = read_nonneg(tr, keys::PROMPT_PCI)?;

    println!("{}", tr.t(keys::SECTION_ENERGY));
    let energy_start_kwh = read_nonneg(tr, keys::PROMPT_ENERGY_START)?;
    let energy_end_kwh = read_nonneg(tr, keys::PROMPT_ENERGY_END)?;
    let gross_power_kw = read_nonneg(tr, keys::PROMPT_GROSS_POWER)?;
    let transformer_loss_kwh = read_nonneg(tr, keys::PROMPT_TRANSFORMER_LOSS)?;
    let aux_consumption_kwh = read_nonneg(tr, keys::PROMPT_AUX_CONSUMPTION)?;
    let net_power_kw = read_nonneg(tr, keys::PROMPT_NET_POWER)?;

    println!("{}", tr.t(keys::SECTION_FACTORS));
    let kp = read_factor(tr, keys::PROMPT_KP)?;
    let a_h = read_factor(tr, keys::PROMPT_AH)?;
    let a_pf = read_factor(tr, keys::PROMPT_APF)?;
    let a_dpa = read_factor(tr, keys::PROMPT_ADPA)?;
    let a_dpe = read_factor(tr, keys::PROMPT_ADPE)?;
    let a_ta_manual = read_factor(tr, keys::PROMPT_ATA_MANUAL)?;
    let a_pa_manual = read_factor(tr, keys::PROMPT_APA_MANUAL)?;

    Ok(TestMeasurement {
        operator,
        turbine_id,
        test_date,
        start_time,
        end_time,
        run_hours,
        load_pct,
        intake_temp_c,
        ref_temp_c,
        atm_pressure_bar,
        ref_pressure_bar,
        meter_start_l,
        meter_end_l,
        density_15_g_per_l,
        vcf,
        pci_kj_per_kg,
        energy_start_kwh,
        energy_end_kwh,
        gross_power_kw,
        transformer_loss_kwh,
        aux_consumption_kwh,
        net_power_kw,
        kp,
        a_h,
        a_pf,
        a_dpa,
        a_dpe,
        a_ta_manual,
        a_pa_manual,
    })
}

fn print_indicators(tr: &Translator, ind: &PerformanceIndicators) {
    println!("{}", tr.t(keys::RESULT_HEADING));
    println!(
        "{} {:.2} L",
        tr.t(keys::RESULT_APPARENT_VOLUME),
        ind.apparent_volume_l
    );
    println!(
        "{} {:.2} L",
        tr.t(keys::RESULT_CORRECTED_VOLUME),
        ind.corrected_volume_l
    );
    println!("{} {:.2} kg", tr.t(keys::RESULT_FUEL_MASS), ind.fuel_mass_kg);
    println!(
        "{} {:.2} kWh",
        tr.t(keys::RESULT_ENERGY_PRODUCED),
        ind.energy_produced_kwh
    );
    println!(
        "{} {:.2} g/kWh",
        tr.t(keys::RESULT_SPECIFIC_CONSUMPTION),
        ind.specific_consumption_g_per_kwh
    );
    println!("{} {:.2} kW", tr.t(keys::RESULT_PMC), ind.pmc_kw);
    println!(
        "{} {:.2} kJ/kWh",
        tr.t(keys::RESULT_HRM),
        ind.hrm_kj_per_kwh
    );
    println!(
        "{} {:.2} kJ/kWh",
        tr.t(keys::RESULT_HRMC),
        ind.hrmc_kj_per_kwh
    );
    println!(
        "{} {:.2} %",
        tr.t(keys::RESULT_MEASURED_EFFICIENCY),
        ind.measured_efficiency * 100.0
    );
    println!(
        "{} {:.2} %",
        tr.t(keys::RESULT_CORRECTED_EFFICIENCY),
        ind.corrected_efficiency * 100.0
    );
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, key: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(tr.t(key))?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_nonneg(tr: &Translator, key: &str) -> Result<f64, AppError> {
    loop {
        let v = read_f64(tr, key)?;
        if v >= 0.0 {
            return Ok(v);
        }
        println!("{}", tr.t(keys::ERROR_OUT_OF_RANGE));
    }
}

fn read_pct(tr: &Translator, key: &str) -> Result<f64, AppError> {
    loop {
        let v = read_f64(tr, key)?;
        if (0.0..=100.0).contains(&v) {
            return Ok(v);
        }
        println!("{}", tr.t(keys::ERROR_OUT_OF_RANGE));
    }
}

/// 엔터 입력 시 기본값을 돌려준다. 값 자체에는 범위 제한을 두지 않는다.
fn read_or_default(tr: &Translator, key: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(tr.t(key))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 보정계수 입력. 엔터=1.0, 0 이상만 허용한다.
fn read_factor(tr: &Translator, key: &str) -> Result<f64, AppError> {
    loop {
        let v = read_or_default(tr, key, 1.0)?;
        if v >= 0.0 {
            return Ok(v);
        }
        println!("{}", tr.t(keys::ERROR_OUT_OF_RANGE));
    }
}

fn read_date(tr: &Translator, key: &str) -> Result<NaiveDate, AppError> {
    loop {
        let s = read_line(tr.t(key))?;
        if s.trim().is_empty() {
            return Ok(Local::now().date_naive());
        }
        match NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
            Ok(d) => return Ok(d),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_DATE)),
        }
    }
}

fn read_time(tr: &Translator, key: &str) -> Result<NaiveTime, AppError> {
    loop {
        let s = read_line(tr.t(key))?;
        if s.trim().is_empty() {
            return Ok(Local::now().time());
        }
        match NaiveTime::parse_from_str(s.trim(), "%H:%M") {
            Ok(t) => return Ok(t),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_TIME)),
        }
    }
}
