use std::io::Write;

use bio::io::fasta;

use crate::{results::HarmonizationResult, types::CharmError};

/// Write the harmonized sequence as a FASTA record
pub fn write_fasta_format<W: Write>(
    writer: &mut W,
    result: &HarmonizationResult,
) -> Result<(), CharmError> {
    let mut fasta_writer = fasta::Writer::new(writer);
    fasta_writer.write(
        &result.sequence_info.header,
        Some("harmonized"),
        result.harmonized_sequence.as_bytes(),
    )?;
    fasta_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::output::test_support::create_test_result;

    use super::*;

    #[test]
    fn test_write_fasta_format() {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);

        write_fasta_format(&mut cursor, &create_test_result()).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        insta::assert_snapshot!(output, @r"
        >test_cds harmonized
        ATGCTCGTTTGA
        ");
    }
}
