use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_RUN_TEST: &str = "main_menu.run_test";
    pub const MAIN_MENU_HISTORY: &str = "main_menu.history";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const FORM_HEADING: &str = "form.heading";
    pub const SECTION_GENERAL: &str = "form.section_general";
    pub const SECTION_ATMOSPHERIC: &str = "form.section_atmospheric";
    pub const SECTION_FUEL: &str = "form.section_fuel";
    pub const SECTION_ENERGY: &str = "form.section_energy";
    pub const SECTION_FACTORS: &str = "form.section_factors";

    pub const PROMPT_OPERATOR: &str = "prompt.operator";
    pub const PROMPT_TURBINE: &str = "prompt.turbine";
    pub const PROMPT_TEST_DATE: &str = "prompt.test_date";
    pub const PROMPT_START_TIME: &str = "prompt.start_time";
    pub const PROMPT_END_TIME: &str = "prompt.end_time";
    pub const PROMPT_RUN_HOURS: &str = "prompt.run_hours";
    pub const PROMPT_LOAD_PCT: &str = "prompt.load_pct";
    pub const PROMPT_INTAKE_TEMP: &str = "prompt.intake_temp";
    pub const PROMPT_REF_TEMP: &str = "prompt.ref_temp";
    pub const PROMPT_ATM_PRESSURE: &str = "prompt.atm_pressure";
    pub const PROMPT_REF_PRESSURE: &str = "prompt.ref_pressure";
    pub const PROMPT_METER_START: &str = "prompt.meter_start";
    pub const PROMPT_METER_END: &str = "prompt.meter_end";
    pub const PROMPT_DENSITY: &str = "prompt.density";
    pub const PROMPT_VCF: &str = "prompt.vcf";
    pub const PROMPT_PCI: &str = "prompt.pci";
    pub const PROMPT_ENERGY_START: &str = "prompt.energy_start";
    pub const PROMPT_ENERGY_END: &str = "prompt.energy_end";
    pub const PROMPT_GROSS_POWER: &str = "prompt.gross_power";
    pub const PROMPT_TRANSFORMER_LOSS: &str = "prompt.transformer_loss";
    pub const PROMPT_AUX_CONSUMPTION: &str = "prompt.aux_consumption";
    pub const PROMPT_NET_POWER: &str = "prompt.net_power";
    pub const PROMPT_KP: &str = "prompt.kp";
    pub const PROMPT_AH: &str = "prompt.a_h";
    pub const PROMPT_APF: &str = "prompt.a_pf";
    pub const PROMPT_ADPA: &str = "prompt.a_dpa";
    pub const PROMPT_ADPE: &str = "prompt.a_dpe";
    pub const PROMPT_ATA_MANUAL: &str = "prompt.a_ta_manual";
    pub const PROMPT_APA_MANUAL: &str = "prompt.a_pa_manual";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_INVALID_DATE: &str = "error.invalid_date";
    pub const ERROR_INVALID_TIME: &str = "error.invalid_time";
    pub const ERROR_OUT_OF_RANGE: &str = "error.out_of_range";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_APPARENT_VOLUME: &str = "result.apparent_volume";
    pub const RESULT_CORRECTED_VOLUME: &str = "result.corrected_volume";
    pub const RESULT_FUEL_MASS: &str = "result.fuel_mass";
    pub const RESULT_ENERGY_PRODUCED: &str = "result.energy_produced";
    pub const RESULT_SPECIFIC_CONSUMPTION: &str = "result.specific_consumption";
    pub const RESULT_PMC: &str = "result.pmc";
    pub const RESULT_HRM: &str = "result.hrm";
    pub const RESULT_HRMC: &str = "result.hrmc";
    pub const RESULT_MEASURED_EFFICIENCY: &str = "result.measured_efficiency";
    pub const RESULT_CORRECTED_EFFICIENCY: &str = "result.corrected_efficiency";

    pub const HISTORY_HEADING: &str = "history.heading";
    pub const HISTORY_EMPTY: &str = "history.empty";
    pub const HISTORY_COUNT: &str = "history.count";
    pub const HISTORY_SAVED: &str = "history.saved";
    pub const HISTORY_SAVE_FAILED: &str = "history.save_failed";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANG: &str = "settings.current_lang";
    pub const SETTINGS_PROMPT_LANG: &str = "settings.prompt_lang";
    pub const SETTINGS_CURRENT_HISTORY: &str = "settings.current_history";
    pub const SETTINGS_PROMPT_HISTORY: &str = "settings.prompt_history";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Turbine Performance Calculator ===",
        MAIN_MENU_RUN_TEST => "1) 성능 시험 입력/계산",
        MAIN_MENU_HISTORY => "2) 시험 이력 조회",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        FORM_HEADING => "\n-- 성능 시험 입력 --",
        SECTION_GENERAL => "[일반 정보]",
        SECTION_ATMOSPHERIC => "[대기 조건]",
        SECTION_FUEL => "[연료 데이터]",
        SECTION_ENERGY => "[전력 데이터]",
        SECTION_FACTORS => "[수동 보정계수]",
        PROMPT_OPERATOR => "측정자 이름: ",
        PROMPT_TURBINE => "터빈 이름/관리 번호: ",
        PROMPT_TEST_DATE => "시험 일자 YYYY-MM-DD (엔터=오늘): ",
        PROMPT_START_TIME => "시작 시각 HH:MM (엔터=현재): ",
        PROMPT_END_TIME => "종료 시각 HH:MM (엔터=현재): ",
        PROMPT_RUN_HOURS => "운전 시간 [h]: ",
        PROMPT_LOAD_PCT => "부하율 [%] (0~100): ",
        PROMPT_INTAKE_TEMP => "흡기 온도 [°C]: ",
        PROMPT_REF_TEMP => "기준 온도 [°C] (엔터=15.0): ",
        PROMPT_ATM_PRESSURE => "대기압 [bar]: ",
        PROMPT_REF_PRESSURE => "기준 압력 [bar] (엔터=1.013): ",
        PROMPT_METER_START => "유량계 시작 값 [L]: ",
        PROMPT_METER_END => "유량계 종료 값 [L]: ",
        PROMPT_DENSITY => "15°C 밀도 [g/L]: ",
        PROMPT_VCF => "체적 보정계수 VCF: ",
        PROMPT_PCI => "저위발열량 PCI [kJ/kg]: ",
        PROMPT_ENERGY_START => "전력계 시작 값 [kWh]: ",
        PROMPT_ENERGY_END => "전력계 종료 값 [kWh]: ",
        PROMPT_GROSS_POWER => "총 출력 [kW]: ",
        PROMPT_TRANSFORMER_LOSS => "변압기 손실 [kWh]: ",
        PROMPT_AUX_CONSUMPTION => "소내 보조 소비 [kWh]: ",
        PROMPT_NET_POWER => "수동 순 출력 [kW]: ",
        PROMPT_KP => "경년열화 계수 k_p (엔터=1.0): ",
        PROMPT_AH => "습도 보정 aH (엔터=1.0): ",
        PROMPT_APF => "역률 보정 aPF (엔터=1.0): ",
        PROMPT_ADPA => "대기압 변화율 보정 aDPA (엔터=1.0): ",
        PROMPT_ADPE => "배기압 변화율 보정 aDPE (엔터=1.0): ",
        PROMPT_ATA_MANUAL => "수동 주위온도 보정 ATA (엔터=1.0): ",
        PROMPT_APA_MANUAL => "수동 대기압 보정 APA (엔터=1.0): ",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_INVALID_DATE => "날짜 형식이 잘못되었습니다 (YYYY-MM-DD).",
        ERROR_INVALID_TIME => "시각 형식이 잘못되었습니다 (HH:MM).",
        ERROR_OUT_OF_RANGE => "허용 범위를 벗어났습니다.",
        RESULT_HEADING => "\n-- 계산 결과 --",
        RESULT_APPARENT_VOLUME => "외관 체적:",
        RESULT_CORRECTED_VOLUME => "보정 체적:",
        RESULT_FUEL_MASS => "연료 질량:",
        RESULT_ENERGY_PRODUCED => "생산 전력량:",
        RESULT_SPECIFIC_CONSUMPTION => "보정 비연료소비율:",
        RESULT_PMC => "보정 출력 PMC:",
        RESULT_HRM => "열소비율 HRM:",
        RESULT_HRMC => "보정 열소비율 HRMC:",
        RESULT_MEASURED_EFFICIENCY => "측정 효율:",
        RESULT_CORRECTED_EFFICIENCY => "보정 효율:",
        HISTORY_HEADING => "\n-- 시험 이력 --",
        HISTORY_EMPTY => "저장된 이력이 없습니다.",
        HISTORY_COUNT => "총 기록 수:",
        HISTORY_SAVED => "이력이 저장되었습니다:",
        HISTORY_SAVE_FAILED => "이력 저장 실패 (위 계산 결과는 그대로 유효합니다):",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANG => "현재 언어:",
        SETTINGS_PROMPT_LANG => "언어 코드 (auto/ko-kr/en-us, 엔터=유지): ",
        SETTINGS_CURRENT_HISTORY => "현재 이력 파일:",
        SETTINGS_PROMPT_HISTORY => "이력 파일 경로 (엔터=유지): ",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Turbine Performance Calculator ===",
        MAIN_MENU_RUN_TEST => "1) Run performance test",
        MAIN_MENU_HISTORY => "2) Browse test history",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        FORM_HEADING => "\n-- Performance Test Entry --",
        SECTION_GENERAL => "[General]",
        SECTION_ATMOSPHERIC => "[Atmospheric conditions]",
        SECTION_FUEL => "[Fuel data]",
        SECTION_ENERGY => "[Energy data]",
        SECTION_FACTORS => "[Manual correction factors]",
        PROMPT_OPERATOR => "Operator name: ",
        PROMPT_TURBINE => "Turbine name/reference: ",
        PROMPT_TEST_DATE => "Test date YYYY-MM-DD (enter=today): ",
        PROMPT_START_TIME => "Start time HH:MM (enter=now): ",
        PROMPT_END_TIME => "End time HH:MM (enter=now): ",
        PROMPT_RUN_HOURS => "Running hours [h]: ",
        PROMPT_LOAD_PCT => "Load [%] (0-100): ",
        PROMPT_INTAKE_TEMP => "Intake temperature [°C]: ",
        PROMPT_REF_TEMP => "Reference temperature [°C] (enter=15.0): ",
        PROMPT_ATM_PRESSURE => "Atmospheric pressure [bar]: ",
        PROMPT_REF_PRESSURE => "Reference pressure [bar] (enter=1.013): ",
        PROMPT_METER_START => "Fuel meter start [L]: ",
        PROMPT_METER_END => "Fuel meter end [L]: ",
        PROMPT_DENSITY => "Density at 15°C [g/L]: ",
        PROMPT_VCF => "Volume correction factor VCF: ",
        PROMPT_PCI => "Lower heating value PCI [kJ/kg]: ",
        PROMPT_ENERGY_START => "Energy meter start [kWh]: ",
        PROMPT_ENERGY_END => "Energy meter end [kWh]: ",
        PROMPT_GROSS_POWER => "Gross power [kW]: ",
        PROMPT_TRANSFORMER_LOSS => "Transformer loss [kWh]: ",
        PROMPT_AUX_CONSUMPTION => "Auxiliary consumption [kWh]: ",
        PROMPT_NET_POWER => "Manual net power [kW]: ",
        PROMPT_KP => "Aging factor k_p (enter=1.0): ",
        PROMPT_AH => "Humidity correction aH (enter=1.0): ",
        PROMPT_APF => "Power factor correction aPF (enter=1.0): ",
        PROMPT_ADPA => "Atm pressure derivative corr. aDPA (enter=1.0): ",
        PROMPT_ADPE => "Exhaust pressure derivative corr. aDPE (enter=1.0): ",
        PROMPT_ATA_MANUAL => "Manual ambient temp corr. ATA (enter=1.0): ",
        PROMPT_APA_MANUAL => "Manual atm pressure corr. APA (enter=1.0): ",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_INVALID_DATE => "Invalid date format (YYYY-MM-DD).",
        ERROR_INVALID_TIME => "Invalid time format (HH:MM).",
        ERROR_OUT_OF_RANGE => "Value out of allowed range.",
        RESULT_HEADING => "\n-- Results --",
        RESULT_APPARENT_VOLUME => "Apparent volume:",
        RESULT_CORRECTED_VOLUME => "Corrected volume:",
        RESULT_FUEL_MASS => "Fuel mass:",
        RESULT_ENERGY_PRODUCED => "Energy produced:",
        RESULT_SPECIFIC_CONSUMPTION => "Specific consumption:",
        RESULT_PMC => "Corrected power PMC:",
        RESULT_HRM => "Heat rate HRM:",
        RESULT_HRMC => "Corrected heat rate HRMC:",
        RESULT_MEASURED_EFFICIENCY => "Measured efficiency:",
        RESULT_CORRECTED_EFFICIENCY => "Corrected efficiency:",
        HISTORY_HEADING => "\n-- Test History --",
        HISTORY_EMPTY => "No stored history.",
        HISTORY_COUNT => "Total records:",
        HISTORY_SAVED => "History saved:",
        HISTORY_SAVE_FAILED => "History save failed (results above remain valid):",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANG => "Current language:",
        SETTINGS_PROMPT_LANG => "Language code (auto/ko-kr/en-us, enter=keep): ",
        SETTINGS_CURRENT_HISTORY => "Current history file:",
        SETTINGS_PROMPT_HISTORY => "History file path (enter=keep): ",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}
