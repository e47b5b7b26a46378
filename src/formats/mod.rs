//! File format adapters
//!
//! Adapters for the delimited segment table read and written by the CLI.

pub mod table;

pub use table::{
    parse_table_line, read_segments, read_segments_from, unescape_separator, write_gaps,
    write_segments, write_segments_to, COLUMN_COUNT, DEFAULT_SEPARATOR,
};
