//! Charts for external-sort experiments.
//!
//! Two independent batch pipelines:
//!
//! * α: `<base>/alpha/<method><n>*` files → one line per file-count →
//!   `<base>/<method>.svg|png`
//! * β: `<base>/beta.txt` → mean / population σ per memory size →
//!   `<base>/beta.png|svg` or the viewer window

pub mod app;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod state;
pub mod ui;

pub use config::PlotConfig;
pub use error::PlotError;
