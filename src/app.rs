use crate::config::Config;
use crate::history;
use crate::i18n::{self, Translator};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 시험 이력 저장소 오류
    History(history::HistoryError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::History(e) => write!(f, "이력 저장소 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<history::HistoryError> for AppError {
    fn from(value: history::HistoryError) -> Self {
        AppError::History(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::RunTest => ui_cli::handle_run_test(tr, config)?,
            MenuChoice::History => ui_cli::handle_history(tr, config)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
