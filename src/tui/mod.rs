//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the dashboard shell:
//! - Navigation bar over the static route list
//! - One page per analysis, fetched on entry
//! - Risk calculator form

mod app;
mod nav;
mod pages;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use nav::Route;
pub use pages::{Fetcher, PageController};
pub use styles::MedicalTheme;
pub use worker::{FetchHandle, FetchWorker};
