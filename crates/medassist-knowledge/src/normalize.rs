//! Text normalization shared by every matching routine.

/// Collapse whitespace runs to a single space, trim, and lowercase.
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Split normalized text into matching tokens.
///
/// Tokens are whitespace-delimited with surrounding punctuation stripped, so
/// "tylenoll?" is compared as "tylenoll". Inner punctuation ("z-pak") is kept.
pub(crate) fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(' ')
        .map(|t| t.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|t| !t.is_empty())
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_and_lowercases() {
        assert_eq!(normalize("  High   Fever\n"), "high fever");
        assert_eq!(normalize("\tChest\r\n PAIN "), "chest pain");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["  High   Fever\n", "I take Tylenol and Advil", "a\u{00A0}b", "ÄSPIRIN  x"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn tokens_strip_edge_punctuation() {
        let got: Vec<&str> = tokens("i took tylenoll? and z-pak.").collect();
        assert_eq!(got, vec!["i", "took", "tylenoll", "and", "z-pak"]);
    }

    #[test]
    fn capitalize_matches_title_style() {
        assert_eq!(capitalize("paracetamol"), "Paracetamol");
        assert_eq!(capitalize("sTOMACH pain"), "Stomach pain");
        assert_eq!(capitalize(""), "");
    }
}
