use std::fmt;

/// Offset / hex / ASCII rendering of raw frame bytes, 16 bytes per row.
#[derive(Debug, Clone, Copy)]
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.0.chunks(16).enumerate() {
            write!(f, "{:04x}   ", row * 16)?;

            let mut hex_part = String::with_capacity(48);
            let mut ascii_part = String::with_capacity(16);
            for &byte in chunk {
                hex_part.push_str(&format!("{:02x} ", byte));
                ascii_part.push(if (32..=126).contains(&byte) {
                    byte as char
                } else {
                    '.'
                });
            }

            writeln!(f, "{:<48}  {}", hex_part, ascii_part)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::HexDump;

    #[test]
    fn renders_rows_with_offsets() {
        let bytes: Vec<u8> = (0x41..0x41 + 18).collect();
        let dump = HexDump(&bytes).to_string();
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0000   41 42 43"));
        assert!(lines[0].ends_with("ABCDEFGHIJKLMNOP"));
        assert!(lines[1].starts_with("0010   51 52 "));
        assert!(lines[1].ends_with("  QR"));
    }

    #[test]
    fn non_printable_bytes_become_dots() {
        let dump = HexDump(&[0x00, 0x7f, 0x20]).to_string();
        assert!(dump.ends_with(".. \n"));
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(HexDump(&[]).to_string(), "");
    }
}
