//! Entry formatting and display
//!
//! - `config` - Output configuration types
//! - `format` - Plain-text columns: tree prefix, blocks, long format, timestamps
//! - `style` - Colored names and header

mod config;
mod format;
mod style;

pub use config::OutputConfig;
pub use format::{
    TIMESTAMP_WIDTH, block_column, format_timestamp, format_timestamp_in, long_columns,
    tree_prefix,
};
pub use style::{name_color, write_header, write_name};
