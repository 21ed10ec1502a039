//! Code-page 437 → Unicode decoding (spec §4.2).
//!
//! Bytes `0x00..=0x7F` map identically onto their ASCII code points (control
//! bytes are passed through unchanged here; the ANSI stripper downstream is
//! what decides which survive). Bytes `0x80..=0xFF` are looked up in the
//! standard CP437 upper-half table.

/// CP437 code points for bytes `0x80..=0xFF`, index 0 == byte `0x80`.
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', 'É', 'æ', 'Æ',
    'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', 'á', 'í', 'ó', 'ú', 'ñ', 'Ñ',
    'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕',
    '╣', '║', '╗', '╝', '╜', '╛', '┐', '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦',
    '╠', '═', '╬', '╧', '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐',
    '▀', 'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', '≡', '±',
    '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
];

/// Decode a CP437-encoded byte slice into the internal Unicode
/// representation. Total and infallible: every byte maps to exactly one
/// `char`.
pub fn decode_cp437(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if b < 0x80 {
            out.push(b as char);
        } else {
            out.push(CP437_HIGH[(b - 0x80) as usize]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_range_is_identity() {
        assert_eq!(decode_cp437(b"Hello, World!"), "Hello, World!");
    }

    #[test]
    fn control_bytes_pass_through_unchanged() {
        // ESC must decode to an actual escape, not a CP437 smiley glyph —
        // the ANSI stripper downstream depends on this.
        assert_eq!(decode_cp437(&[0x1B, b'[', b'm']), "\u{1B}[m");
        assert_eq!(decode_cp437(&[b'\r', b'\n']), "\r\n");
    }

    #[test]
    fn high_bytes_map_to_box_drawing_and_accents() {
        assert_eq!(decode_cp437(&[0xC4]), "─");
        assert_eq!(decode_cp437(&[0x87]), "ç");
        assert_eq!(decode_cp437(&[0xFF]), "\u{00A0}");
    }

    #[test]
    fn table_is_exactly_128_entries() {
        assert_eq!(CP437_HIGH.len(), 128);
    }
}
