pub mod calendar;
pub mod config;
pub mod dropdown;
pub mod error;
pub mod events;
pub mod field;
pub mod locale;
pub mod period;
pub mod picker;
pub mod props;
pub mod ui;

pub use error::{Error, ErrorKind, Result};
pub use period::{DateRange, Selection};
