//! QR Lab application layer
//!
//! Ties the settings model, capacity estimator, damage simulator and symbol
//! renderer together into an interactive session, plus the `qrlab` CLI.

pub mod cli;
pub mod config;
pub mod logging;
pub mod notice;
pub mod session;

pub use config::{LogFormat, QrLabConfig};
pub use notice::{Notice, NoticeKind, NoticeQueue};
pub use session::{LearnState, LearnTab, QrLabSession, SessionEvent};
