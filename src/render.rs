//! Plain-text output of dependency names.

use std::io::{self, Write};

use crate::parser::Dependency;

/// Sorts `records` by name and writes one name per line.
///
/// Ordering is byte-wise on the name. The sort is stable, so records that
/// share a name keep their collection order and every one is written.
pub fn render<W: Write>(records: &mut [Dependency], writer: &mut W) -> io::Result<()> {
    records.sort_by(|a, b| a.name.cmp(&b.name));
    for record in records.iter() {
        writeln!(writer, "{}", record.name)?;
    }
    writer.flush()
}

/// Renders into a string.
pub fn render_to_string(records: &mut [Dependency]) -> io::Result<String> {
    let mut buffer = Vec::new();
    render(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
