use super::Key;

impl Key {
    /// Traduit un caractère tapé ; `\n` et `\r` valent `Enter`.
    pub fn from_char(c: char) -> Self {
        match c {
            '\n' | '\r' => Key::Enter,
            _ => match c.to_digit(10) {
                Some(d) => Key::Digit(d as u8),
                None => Key::Other(c),
            },
        }
    }

    /// Nom de touche tel qu'écrit dans un script (`1`, `enter`, ...).
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("enter") || name.eq_ignore_ascii_case("return") {
            return Key::Enter;
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::from_char(c),
            _ => Key::Other('\0'),
        }
    }
}

/// Position 1-based visée par un chiffre ; `0` ne désigne rien.
pub(super) fn digit_position(digit: u8, catalog_len: usize) -> Option<usize> {
    let n = usize::from(digit);
    (1..=catalog_len).contains(&n).then_some(n)
}
