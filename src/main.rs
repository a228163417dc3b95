use clap::Parser;

use turbine_performance_calc::{app, config, i18n};

/// 터빈 성능 시험 계산기 CLI.
#[derive(Debug, Parser)]
#[command(name = "turbine_performance_calc_cli", version)]
struct Cli {
    /// UI 언어 (auto/ko/ko-kr/en/en-us)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 이력 CSV 파일 경로. 지정하면 설정값 대신 사용한다.
    #[arg(long)]
    history: Option<String>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    if let Some(history) = cli.history {
        cfg.history_path = history;
    }
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    app::run(&mut cfg, &tr)?;
    Ok(())
}
