//! Expression evaluation and equation solving for a keypad calculator.
//!
//! The [`calculator`] module turns typed text into a result, the [`history`]
//! module keeps the bounded log of past calculations, and [`session`] ties
//! both to a [`store::KeyValueStore`].

pub mod calculator;
pub mod history;
pub mod logging;
pub mod preferences;
pub mod session;
pub mod store;

pub use calculator::{CalcFailure, CalcResult, calculate};
pub use history::{HistoryEntry, HistoryLedger};
pub use preferences::Preferences;
pub use session::Calculator;
