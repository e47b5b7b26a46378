//! Segment table adapter
//!
//! Reads and writes headerless delimited tables with four columns:
//!
//! ```text
//! category  name  start  end
//! ```
//!
//! Coordinates are inclusive integers. Blank lines and lines starting with
//! `#` are skipped on input.

use crate::core::io::{open_reader, LineIterator};
use crate::core::{GapfillError, Gap, Result, Segment};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

/// Default column separator
pub const DEFAULT_SEPARATOR: &str = "\t";

/// Number of columns in a segment row
pub const COLUMN_COUNT: usize = 4;

/// Turn a shell-quoted escape such as `\t` into the character it names
pub fn unescape_separator(raw: &str) -> String {
    match raw {
        "\\t" => "\t".to_string(),
        "\\n" => "\n".to_string(),
        "\\s" => " ".to_string(),
        _ => raw.to_string(),
    }
}

fn parse_coord(field: &str, column: &str, line: usize) -> Result<u64> {
    let field = field.trim();
    field.parse::<u64>().map_err(|e| {
        GapfillError::malformed(line, format!("invalid {} '{}': {}", column, field, e))
    })
}

/// Parse one table row into a segment
pub fn parse_table_line(line: &str, separator: &str, line_number: usize) -> Result<Segment> {
    if separator.is_empty() {
        return Err(GapfillError::malformed(line_number, "empty column separator"));
    }

    let fields: Vec<&str> = line.split(separator).collect();
    if fields.len() != COLUMN_COUNT {
        return Err(GapfillError::malformed(
            line_number,
            format!("expected {} columns, found {}", COLUMN_COUNT, fields.len()),
        ));
    }

    let start = parse_coord(fields[2], "start", line_number)?;
    let end = parse_coord(fields[3], "end", line_number)?;

    if start > end {
        return Err(GapfillError::malformed(
            line_number,
            format!("start ({}) > end ({})", start, end),
        ));
    }
    if end == u64::MAX {
        return Err(GapfillError::malformed(line_number, "end coordinate out of range"));
    }

    Ok(Segment::new(fields[0], fields[1], start, end))
}

/// Read every row of a table from a reader, preserving row order
pub fn read_segments_from<R: BufRead>(reader: R, separator: &str) -> Result<Vec<Segment>> {
    let mut lines = LineIterator::new(reader);
    let mut segments = Vec::new();
    let mut line_number = 0;

    while let Some(line) = lines.next_line() {
        let line = line?;
        line_number += 1;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        segments.push(parse_table_line(line, separator, line_number)?);
    }

    if segments.is_empty() {
        return Err(GapfillError::malformed(line_number, "no segment rows"));
    }
    Ok(segments)
}

/// Read a segment table from disk
///
/// Automatically handles gzip and bzip2 compression.
pub fn read_segments<P: AsRef<Path>>(path: P, separator: &str) -> Result<Vec<Segment>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(GapfillError::InputNotFound(path.to_path_buf()));
    }

    let reader = open_reader(path)?;
    let segments = read_segments_from(reader, separator)?;
    debug!("Read {} segments from {:?}", segments.len(), path);
    Ok(segments)
}

/// Write segments, one row per segment, no header
pub fn write_segments_to<W: Write>(writer: &mut W, segments: &[Segment], separator: &str) -> Result<()> {
    for seg in segments {
        writeln!(
            writer,
            "{}{sep}{}{sep}{}{sep}{}",
            seg.category,
            seg.name,
            seg.start(),
            seg.end(),
            sep = separator
        )?;
    }
    Ok(())
}

/// Write segments to a file
pub fn write_segments<P: AsRef<Path>>(path: P, segments: &[Segment], separator: &str) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_segments_to(&mut writer, segments, separator)?;
    writer.flush()?;
    Ok(())
}

/// Write unfillable gaps as `start<TAB>end` rows
pub fn write_gaps<P: AsRef<Path>>(path: P, gaps: &[Gap]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    for gap in gaps {
        writeln!(writer, "{}\t{}", gap.start, gap.end)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let seg = parse_table_line("exon\te1\t10\t20", "\t", 1).unwrap();
        assert_eq!(seg.category, "exon");
        assert_eq!(seg.name, "e1");
        assert_eq!((seg.start(), seg.end()), (10, 20));
    }

    #[test]
    fn test_parse_custom_separator() {
        let seg = parse_table_line("CR,cr1, 5 ,15", ",", 1).unwrap();
        assert_eq!(seg.category, "CR");
        assert_eq!((seg.start(), seg.end()), (5, 15));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_table_line("exon\te1\t10", "\t", 1).is_err());
        assert!(parse_table_line("exon\te1\t10\t20\textra", "\t", 1).is_err());
        assert!(parse_table_line("exon\te1\tabc\t20", "\t", 1).is_err());
        assert!(parse_table_line("exon\te1\t-5\t20", "\t", 1).is_err());
        assert!(parse_table_line("exon\te1\t30\t20", "\t", 1).is_err());
        assert!(parse_table_line("exon\te1\t10\t20", "", 1).is_err());
    }

    #[test]
    fn test_parse_error_carries_line() {
        let err = parse_table_line("exon\te1\t30\t20", "\t", 7).unwrap_err();
        match err {
            GapfillError::MalformedInput { line, .. } => assert_eq!(line, 7),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_read_skips_blank_and_comments() {
        let data = b"# annotated segments\nexon\te1\t1\t10\n\nCR\tcr1\t5\t15\n";
        let segs = read_segments_from(&data[..], "\t").unwrap();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].name, "cr1");
    }

    #[test]
    fn test_read_empty_is_malformed() {
        let err = read_segments_from(&b"\n# nothing\n"[..], "\t").unwrap_err();
        assert!(matches!(err, GapfillError::MalformedInput { .. }));
    }

    #[test]
    fn test_read_missing_path() {
        let err = read_segments("no/such/table.tsv", "\t").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_rows() {
        let segs = vec![Segment::new("exon", "e1", 1, 4), Segment::new("CR", "cr1", 5, 9)];
        let mut out = Vec::new();
        write_segments_to(&mut out, &segs, "\t").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "exon\te1\t1\t4\nCR\tcr1\t5\t9\n");
    }

    #[test]
    fn test_unescape_separator() {
        assert_eq!(unescape_separator("\\t"), "\t");
        assert_eq!(unescape_separator(","), ",");
        assert_eq!(unescape_separator("\t"), "\t");
    }
}
