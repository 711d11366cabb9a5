pub mod app;
pub mod context;
pub mod dropdown_window;
pub mod field_window;
pub mod month_pane;

pub use app::App;
pub use context::{Context, Focus, Theme, DROPDOWN_WIDTH, MONTH_WIDTH, SIDEBAR_WIDTH};
pub use dropdown_window::{dropdown_window, Footer, OptionList};
pub use field_window::{field_window, Toggle};
pub use month_pane::MonthPane;
