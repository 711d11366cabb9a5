//! Shallow composition of plain option tables.
//!
//! Used by the field wrapper to hand everything it does not consume itself
//! over to the dropdown toggle:
//!
//! ```ignore
//! let forwarded = build_from(&config.dropdown)
//!     .and(&overrides)
//!     .without(&["from", "to", "placeholder"])
//!     .result();
//! ```

use toml::value::{Table, Value};

pub struct Builder {
    result: Table,
}

/// Starts a builder from a copy of `value`; `value` itself is never touched.
pub fn build_from(value: &Table) -> Builder {
    Builder {
        result: value.clone(),
    }
}

impl Builder {
    /// Merges `value` on top, later keys win. Nested tables are replaced, not merged.
    pub fn and(mut self, value: &Table) -> Builder {
        for (key, val) in value.iter() {
            self.result.insert(key.clone(), val.clone());
        }
        self
    }

    /// Drops all `keys` from the result.
    pub fn without<S: AsRef<str>>(mut self, keys: &[S]) -> Builder {
        for key in keys {
            self.result.remove(key.as_ref());
        }
        self
    }

    pub fn result(self) -> Table {
        self.result
    }
}

/// Reads a boolean option, absent or non-boolean values count as `false`.
pub fn flag(table: &Table, key: &str) -> bool {
    table.get(key).and_then(Value::as_bool).unwrap_or(false)
}
