use std::io::Write;

use crate::{results::HarmonizationResult, types::CharmError};

/// Write the whole result as pretty-printed JSON
pub fn write_json_format<W: Write>(
    writer: &mut W,
    result: &HarmonizationResult,
) -> Result<(), CharmError> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}
