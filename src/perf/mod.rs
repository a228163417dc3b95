//! 터빈 성능 시험 계산 모듈 모음.

pub mod indicators;
pub mod measurement;

pub use indicators::*;
pub use measurement::*;
