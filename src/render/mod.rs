//! Text rendering for the console. Everything returns a `String`; printing is
//! left to the command handlers.

pub mod dashboard;
pub mod format;
pub mod monitoring;
pub mod records;
pub mod settings;
pub mod table;

pub use dashboard::render_dashboard;
pub use monitoring::render_panel;
pub use records::{render_page, render_record};
pub use settings::{render_diff, render_settings};
pub use table::Table;
