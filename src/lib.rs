//! 터빈 성능 시험 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 GUI 확장도 쉽게 한다.

pub mod app;
pub mod config;
pub mod history;
pub mod i18n;
pub mod perf;
pub mod ui_cli;
