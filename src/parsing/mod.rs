//! Pure string utilities used by the cascade and by alias initialization.
//!
//! - [`split_metrics`] turns filter text into backend filter values.
//! - [`expand_item_name`] renders an item's parameterized name.

mod item_name;
mod multi_value;

pub use item_name::expand_item_name;
pub use multi_value::split_metrics;
