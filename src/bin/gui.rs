#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use chrono::{Local, NaiveDate, NaiveTime};
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};
use turbine_performance_calc::{
    config,
    history::{HistoryRecord, HistoryStore},
    i18n,
    perf::{self, PerformanceIndicators, TestMeasurement},
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(760.0, 860.0));
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "Turbine Performance Calculator",
        native_options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search
        .iter()
        .find(|p| Path::new(*p).exists())
        .map(|s| s.to_string())?;
    let bytes = fs::read(&path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글 라벨을 표시하기 위해 CJK 폰트를 우선 적용한다.
/// 1) assets/fonts/ 아래 ttf
/// 2) Windows 시스템 폰트(맑은 고딕/굴림/바탕 등)
/// 3) 모두 실패 시 Err를 반환하고 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let candidates = [
        "assets/fonts/malgun.ttf",
        "assets/fonts/NanumGothic.ttf",
        "assets/fonts/NotoSansKR-Regular.ttf",
    ];
    for cand in candidates {
        let p = Path::new(cand);
        if p.exists() {
            let bytes =
                fs::read(p).map_err(|e| format!("Failed to read font file ({cand}): {e}"))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }

    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts_dir = Path::new(&windir).join("Fonts");
        let candidates = ["malgun.ttf", "malgunsl.ttf", "gulim.ttc", "batang.ttc"];
        for cand in candidates {
            let p = fonts_dir.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    Err("Font not found. Place a .ttf under assets/fonts/ for CJK labels.".into())
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Performance,
    History,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    tab: Tab,
    show_settings_modal: bool,
    show_help_modal: bool,
    lang_input: String,
    history_path_input: String,
    settings_status: Option<String>,
    // 폼 입력 (일반)
    operator: String,
    turbine_id: String,
    test_date_input: String,
    start_time_input: String,
    end_time_input: String,
    run_hours: f64,
    load_pct: f64,
    // 대기 조건
    intake_temp_c: f64,
    ref_temp_c: f64,
    atm_pressure_bar: f64,
    ref_pressure_bar: f64,
    // 연료
    meter_start_l: f64,
    meter_end_l: f64,
    density_15_g_per_l: f64,
    vcf: f64,
    pci_kj_per_kg: f64,
    // 전력
    energy_start_kwh: f64,
    energy_end_kwh: f64,
    gross_power_kw: f64,
    transformer_loss_kwh: f64,
    aux_consumption_kwh: f64,
    net_power_kw: f64,
    // 수동 보정계수
    kp: f64,
    a_h: f64,
    a_pf: f64,
    a_dpa: f64,
    a_dpe: f64,
    a_ta_manual: f64,
    a_pa_manual: f64,
    // 계산/저장 상태
    form_error: Option<String>,
    last_run: Option<(TestMeasurement, PerformanceIndicators)>,
    save_status: Option<String>,
    history_rows: Option<Result<Vec<HistoryRecord>, String>>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let lang_input = config.language.clone();
        let history_path_input = config.history_path.clone();
        let now = Local::now();
        Self {
            config,
            tr,
            tab: Tab::Performance,
            show_settings_modal: false,
            show_help_modal: false,
            lang_input,
            history_path_input,
            settings_status: None,
            operator: String::new(),
            turbine_id: String::new(),
            test_date_input: now.format("%Y-%m-%d").to_string(),
            start_time_input: now.format("%H:%M").to_string(),
            end_time_input: now.format("%H:%M").to_string(),
            run_hours: 0.0,
            load_pct: 100.0,
            intake_temp_c: 20.0,
            ref_temp_c: 15.0,
            atm_pressure_bar: 1.013,
            ref_pressure_bar: 1.013,
            meter_start_l: 0.0,
            meter_end_l: 0.0,
            density_15_g_per_l: 840.0,
            vcf: 1.0,
            pci_kj_per_kg: 42700.0,
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
            form_error: None,
            last_run: None,
            save_status: None,
            history_rows: None,
        }
    }

    fn txt(&self) -> impl Fn(&str, &str) -> String {
        let tr = self.tr.clone();
        move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string())
    }

    /// 폼 상태를 측정 레코드로 변환한다. 날짜/시각 문자열 파싱 실패 시 Err.
    fn parse_measurement(&self) -> Result<TestMeasurement, String> {
        let txt = self.txt();
        let test_date = NaiveDate::parse_from_str(self.test_date_input.trim(), "%Y-%m-%d")
            .map_err(|_| txt("gui.form.error.date", "Invalid test date (YYYY-MM-DD)."))?;
        let start_time = NaiveTime::parse_from_str(self.start_time_input.trim(), "%H:%M")
            .map_err(|_| txt("gui.form.error.start_time", "Invalid start time (HH:MM)."))?;
        let end_time = NaiveTime::parse_from_str(self.end_time_input.trim(), "%H:%M")
            .map_err(|_| txt("gui.form.error.end_time", "Invalid end time (HH:MM)."))?;
        Ok(TestMeasurement {
            operator: self.operator.trim().to_string(),
            turbine_id: self.turbine_id.trim().to_string(),
            test_date,
            start_time,
            end_time,
            run_hours: self.run_hours,
            load_pct: self.load_pct,
            intake_temp_c: self.intake_temp_c,
            ref_temp_c: self.ref_temp_c,
            atm_pressure_bar: self.atm_pressure_bar,
            ref_pressure_bar: self.ref_pressure_bar,
            meter_start_l: self.meter_start_l,
            meter_end_l: self.meter_end_l,
            density_15_g_per_l: self.density_15_g_per_l,
            vcf: self.vcf,
            pci_kj_per_kg: self.pci_kj_per_kg,
            energy_start_kwh: self.energy_start_kwh,
            energy_end_kwh: self.energy_end_kwh,
            gross_power_kw: self.gross_power_kw,
            transformer_loss_kwh: self.transformer_loss_kwh,
            aux_consumption_kwh: self.aux_consumption_kwh,
            net_power_kw: self.net_power_kw,
            kp: self.kp,
            a_h: self.a_h,
            a_pf: self.a_pf,
            a_dpa: self.a_dpa,
            a_dpe: self.a_dpe,
            a_ta_manual: self.a_ta_manual,
            a_pa_manual: self.a_pa_manual,
        })
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let txt = self.txt();
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (
                Tab::Performance,
                txt("gui.tab.performance", "Performance Test"),
            ),
            (Tab::History, txt("gui.tab.history", "Test History")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
                if tab == Tab::History {
                    self.reload_history();
                }
            }
            ui.add_space(4.0);
        }
    }

    fn ui_performance(&mut self, ui: &mut egui::Ui) {
        let txt = self.txt();
        ui.heading(txt("gui.perf.heading", "Turbine Performance Test"));
        ui.small(txt(
            "gui.perf.tip",
            "Fill in the measurements, then Calculate. Saving appends one row to the history file.",
        ));
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(txt("gui.section.general", "General"));
            egui::Grid::new("general_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.field.operator", "Operator"));
                    ui.text_edit_singleline(&mut self.operator);
                    ui.end_row();
                    ui.label(txt("gui.field.turbine", "Turbine"));
                    ui.text_edit_singleline(&mut self.turbine_id);
                    ui.end_row();
                    ui.label(txt("gui.field.test_date", "Test date (YYYY-MM-DD)"));
                    ui.text_edit_singleline(&mut self.test_date_input);
                    ui.end_row();
                    ui.label(txt("gui.field.start_time", "Start time (HH:MM)"));
                    ui.text_edit_singleline(&mut self.start_time_input);
                    ui.end_row();
                    ui.label(txt("gui.field.end_time", "End time (HH:MM)"));
                    ui.text_edit_singleline(&mut self.end_time_input);
                    ui.end_row();
                    ui.label(txt("gui.field.run_hours", "Running hours [h]"));
                    ui.add(
                        egui::DragValue::new(&mut self.run_hours)
                            .speed(0.1)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    ui.label(txt("gui.field.load_pct", "Load [%]"));
                    ui.add(
                        egui::DragValue::new(&mut self.load_pct)
                            .speed(1.0)
                            .clamp_range(0.0..=100.0),
                    );
                    ui.end_row();
                });
        });
        ui.add_space(6.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(txt("gui.section.atmospheric", "Atmospheric conditions"));
            egui::Grid::new("atmo_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    label_with_tip(
                        ui,
                        &txt("gui.field.intake_temp", "Intake temperature [°C]"),
                        &txt("gui.field.intake_temp_tip", "May be negative."),
                    );
                    ui.add(egui::DragValue::new(&mut self.intake_temp_c).speed(0.1));
                    ui.end_row();
                    ui.label(txt("gui.field.ref_temp", "Reference temperature [°C]"));
                    ui.add(egui::DragValue::new(&mut self.ref_temp_c).speed(0.1));
                    ui.end_row();
                    ui.label(txt("gui.field.atm_pressure", "Atmospheric pressure [bar]"));
                    ui.add(
                        egui::DragValue::new(&mut self.atm_pressure_bar)
                            .speed(0.001)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    ui.label(txt("gui.field.ref_pressure", "Reference pressure [bar]"));
                    ui.add(egui::DragValue::new(&mut self.ref_pressure_bar).speed(0.001));
                    ui.end_row();
                });
        });
        ui.add_space(6.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(txt("gui.section.fuel", "Fuel data"));
            egui::Grid::new("fuel_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.field.meter_start", "Fuel meter start [L]"));
                    ui.add(
                        egui::DragValue::new(&mut self.meter_start_l)
                            .speed(1.0)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    ui.label(txt("gui.field.meter_end", "Fuel meter end [L]"));
                    ui.add(
                        egui::DragValue::new(&mut self.meter_end_l)
                            .speed(1.0)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    ui.label(txt("gui.field.density", "Density at 15°C [g/L]"));
                    ui.add(
                        egui::DragValue::new(&mut self.density_15_g_per_l)
                            .speed(1.0)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    ui.label(txt("gui.field.vcf", "Volume correction factor VCF"));
                    ui.add(
                        egui::DragValue::new(&mut self.vcf)
                            .speed(0.001)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    ui.label(txt("gui.field.pci", "Lower heating value PCI [kJ/kg]"));
                    ui.add(
                        egui::DragValue::new(&mut self.pci_kj_per_kg)
                            .speed(10.0)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                });
        });
        ui.add_space(6.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(txt("gui.section.energy", "Energy data"));
            egui::Grid::new("energy_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.field.energy_start", "Energy meter start [kWh]"));
                    ui.add(
                        egui::DragValue::new(&mut self.energy_start_kwh)
                            .speed(10.0)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    ui.label(txt("gui.field.energy_end", "Energy meter end [kWh]"));
                    ui.add(
                        egui::DragValue::new(&mut self.energy_end_kwh)
                            .speed(10.0)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    ui.label(txt("gui.field.gross_power", "Gross power [kW]"));
                    ui.add(
                        egui::DragValue::new(&mut self.gross_power_kw)
                            .speed(10.0)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    ui.label(txt("gui.field.transformer_loss", "Transformer loss [kWh]"));
                    ui.add(
                        egui::DragValue::new(&mut self.transformer_loss_kwh)
                            .speed(1.0)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    ui.label(txt("gui.field.aux", "Auxiliary consumption [kWh]"));
                    ui.add(
                        egui::DragValue::new(&mut self.aux_consumption_kwh)
                            .speed(1.0)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    label_with_tip(
                        ui,
                        &txt("gui.field.net_power", "Manual net power [kW]"),
                        &txt(
                            "gui.field.net_power_tip",
                            "Recorded for reference; results use the computed net power.",
                        ),
                    );
                    ui.add(
                        egui::DragValue::new(&mut self.net_power_kw)
                            .speed(10.0)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                });
        });
        ui.add_space(6.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(txt("gui.section.factors", "Manual correction factors"));
            egui::Grid::new("factors_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    for (label, value) in [
                        (txt("gui.field.kp", "Aging factor (k_p)"), &mut self.kp),
                        (txt("gui.field.a_h", "Humidity corr. (aH)"), &mut self.a_h),
                        (
                            txt("gui.field.a_pf", "Power factor corr. (aPF)"),
                            &mut self.a_pf,
                        ),
                        (
                            txt("gui.field.a_dpa", "Atm pressure deriv. corr. (aDPA)"),
                            &mut self.a_dpa,
                        ),
                        (
                            txt("gui.field.a_dpe", "Exhaust pressure deriv. corr. (aDPE)"),
                            &mut self.a_dpe,
                        ),
                        (
                            txt("gui.field.a_ta", "Manual ambient temp corr. (ATA)"),
                            &mut self.a_ta_manual,
                        ),
                        (
                            txt("gui.field.a_pa", "Manual atm pressure corr. (APA)"),
                            &mut self.a_pa_manual,
                        ),
                    ] {
                        ui.label(label);
                        ui.add(
                            egui::DragValue::new(value)
                                .speed(0.01)
                                .clamp_range(0.0..=f64::MAX),
                        );
                        ui.end_row();
                    }
                });
        });
        ui.add_space(8.0);

        if ui.button(txt("gui.perf.run", "Calculate")).clicked() {
            match self.parse_measurement() {
                Ok(measurement) => {
                    let indicators = perf::compute_performance(measurement.clone());
                    self.last_run = Some((measurement, indicators));
                    self.form_error = None;
                    self.save_status = None;
                }
                Err(e) => {
                    self.form_error = Some(e);
                    self.last_run = None;
                }
            }
        }
        if let Some(err) = &self.form_error {
            ui.colored_label(egui::Color32::LIGHT_RED, err);
        }

        let mut save_requested = false;
        if let Some((_, ind)) = &self.last_run {
            ui.add_space(8.0);
            ui.separator();
            ui.strong(txt("gui.result.heading", "Results"));
            egui::Grid::new("result_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    let rows = [
                        (
                            txt("gui.result.apparent_volume", "Apparent volume"),
                            format!("{:.2} L", ind.apparent_volume_l),
                        ),
                        (
                            txt("gui.result.corrected_volume", "Corrected volume"),
                            format!("{:.2} L", ind.corrected_volume_l),
                        ),
                        (
                            txt("gui.result.fuel_mass", "Fuel mass"),
                            format!("{:.2} kg", ind.fuel_mass_kg),
                        ),
                        (
                            txt("gui.result.energy_produced", "Energy produced"),
                            format!("{:.2} kWh", ind.energy_produced_kwh),
                        ),
                        (
                            txt("gui.result.specific_consumption", "Specific consumption"),
                            format!("{:.2} g/kWh", ind.specific_consumption_g_per_kwh),
                        ),
                        (
                            txt("gui.result.pmc", "Corrected power PMC"),
                            format!("{:.2} kW", ind.pmc_kw),
                        ),
                        (
                            txt("gui.result.hrm", "Heat rate HRM"),
                            format!("{:.2} kJ/kWh", ind.hrm_kj_per_kwh),
                        ),
                        (
                            txt("gui.result.hrmc", "Corrected heat rate HRMC"),
                            format!("{:.2} kJ/kWh", ind.hrmc_kj_per_kwh),
                        ),
                        (
                            txt("gui.result.measured_efficiency", "Measured efficiency"),
                            format!("{:.2} %", ind.measured_efficiency * 100.0),
                        ),
                        (
                            txt("gui.result.corrected_efficiency", "Corrected efficiency"),
                            format!("{:.2} %", ind.corrected_efficiency * 100.0),
                        ),
                    ];
                    for (label, value) in rows {
                        ui.label(label);
                        ui.strong(value);
                        ui.end_row();
                    }
                });
            ui.add_space(6.0);
            if ui.button(txt("gui.perf.save", "Save to history")).clicked() {
                save_requested = true;
            }
        }
        if save_requested {
            self.save_last_run();
        }
        if let Some(status) = &self.save_status {
            ui.label(status);
        }
    }

    /// 마지막 계산 결과를 이력 파일에 추가한다.
    /// 저장 실패는 계산 결과 표시와 별개로 상태 메시지로만 알린다.
    fn save_last_run(&mut self) {
        let txt = self.txt();
        let Some((measurement, indicators)) = &self.last_run else {
            return;
        };
        let store = HistoryStore::new(&self.config.history_path);
        match store.append_run(measurement, indicators, Local::now().naive_local()) {
            Ok(rows) => {
                self.save_status = Some(format!(
                    "{} {} ({})",
                    txt("gui.perf.saved", "Saved to"),
                    store.path().display(),
                    rows.len()
                ));
                self.history_rows = None;
            }
            Err(e) => {
                self.save_status =
                    Some(format!("{} {e}", txt("gui.perf.save_failed", "Save failed:")));
            }
        }
    }

    fn reload_history(&mut self) {
        let store = HistoryStore::new(&self.config.history_path);
        self.history_rows = Some(store.load().map_err(|e| e.to_string()));
    }

    fn ui_history(&mut self, ui: &mut egui::Ui) {
        let txt = self.txt();
        ui.heading(txt("gui.history.heading", "Test History"));
        ui.horizontal(|ui| {
            ui.label(self.config.history_path.clone());
            if ui.button(txt("gui.history.reload", "Reload")).clicked() {
                self.reload_history();
            }
        });
        ui.add_space(6.0);
        if self.history_rows.is_none() {
            self.reload_history();
        }
        let Some(state) = self.history_rows.as_ref() else {
            return;
        };
        match state {
            Err(e) => {
                ui.colored_label(egui::Color32::LIGHT_RED, e);
            }
            Ok(rows) if rows.is_empty() => {
                ui.label(txt("gui.history.empty", "No stored history."));
            }
            Ok(rows) => {
                ui.label(format!(
                    "{} {}",
                    txt("gui.history.count", "Total records:"),
                    rows.len()
                ));
                egui::Grid::new("history_grid")
                    .num_columns(7)
                    .striped(true)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        ui.strong(txt("gui.history.col.recorded", "Recorded at"));
                        ui.strong(txt("gui.history.col.date", "Date"));
                        ui.strong(txt("gui.history.col.turbine", "Turbine"));
                        ui.strong(txt("gui.history.col.operator", "Operator"));
                        ui.strong("PMC (kW)");
                        ui.strong("HRMC (kJ/kWh)");
                        ui.strong(txt("gui.history.col.efficiency", "Corrected eff. (%)"));
                        ui.end_row();
                        for row in rows {
                            ui.label(&row.recorded_at);
                            ui.label(&row.test_date);
                            ui.label(&row.turbine_id);
                            ui.label(&row.operator);
                            ui.label(format!("{:.2}", row.pmc_kw));
                            ui.label(format!("{:.2}", row.hrmc_kj_per_kwh));
                            ui.label(format!("{:.2}", row.corrected_efficiency_pct));
                            ui.end_row();
                        }
                    });
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let txt = self.txt();

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Turbine Performance Calculator"));
                ui.separator();
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            let mut save_clicked = false;
            egui::Window::new(txt("gui.settings.title", "Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.label(txt("gui.settings.lang", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut self.lang_input,
                                "auto".into(),
                                txt("gui.settings.lang.auto", "System"),
                            );
                            ui.selectable_value(
                                &mut self.lang_input,
                                "en-us".into(),
                                "English (US)",
                            );
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    ui.separator();
                    ui.label(txt("gui.settings.history_path", "History file (CSV)"));
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.history_path_input);
                        if ui.button(txt("gui.settings.browse", "Browse…")).clicked() {
                            if let Some(path) = FileDialog::new()
                                .add_filter("CSV", &["csv"])
                                .set_file_name("history.csv")
                                .save_file()
                            {
                                self.history_path_input = path.display().to_string();
                            }
                        }
                    });
                    ui.separator();
                    if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                        save_clicked = true;
                    }
                    if let Some(msg) = &self.settings_status {
                        ui.label(msg);
                    }
                });
            if save_clicked {
                self.config.language = self.lang_input.clone();
                self.config.history_path = self.history_path_input.trim().to_string();
                // 즉시 번역기 반영
                let resolved = i18n::resolve_language(&self.config.language, None);
                self.tr = i18n::Translator::new_with_pack(
                    &resolved,
                    self.config.language_pack_dir.as_deref(),
                );
                self.history_rows = None;
                if let Err(e) = self.config.save() {
                    self.settings_status = Some(format!("Save error: {e}"));
                } else {
                    self.settings_status = Some(txt("gui.settings.saved", "Saved."));
                }
            }
        }

        // 도움말 모달
        if self.show_help_modal {
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(txt(
                        "gui.about.app",
                        "Offline calculator for turbine performance tests",
                    ));
                    ui.separator();
                    ui.label(txt(
                        "gui.about.flow",
                        "- Fill in the form, Calculate, then Save to append one history row.",
                    ));
                    ui.label(txt(
                        "gui.about.zero",
                        "- A metric shows 0 when its denominator is undefined for this input.",
                    ));
                    ui.label(txt(
                        "gui.about.efficiency",
                        "- Efficiencies are displayed and stored as percentages.",
                    ));
                });
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(180.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Performance => self.ui_performance(ui),
                    Tab::History => self.ui_history(ui),
                });
        });
    }
}
