//! Column name normalization
//!
//! Turns a raw header such as `"Fecha De Reparación"` into a safe
//! identifier (`"fecha_de_reparacion"`) usable as a SQL column or file name.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// Unicode whitespace plus the ASCII information separators U+001C..U+001F
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '_' || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Normalize a raw header into a lowercase snake_case identifier
///
/// Diacritics are stripped, whitespace runs become a single underscore,
/// anything outside `[a-z0-9_]` is dropped, underscore runs collapse and
/// leading/trailing underscores are trimmed. The result may be empty.
pub fn normalize_identifier(raw: &str) -> String {
    let lowered: String = raw
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        let keep = if is_separator(c) {
            '_'
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            continue;
        };

        if keep == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(keep);
    }

    if out.ends_with('_') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics_and_spaces() {
        assert_eq!(normalize_identifier("Fecha De Reparación"), "fecha_de_reparacion");
        assert_eq!(normalize_identifier("Año"), "ano");
        assert_eq!(normalize_identifier("Teléfono\nMóvil"), "telefono_movil");
    }

    #[test]
    fn test_collapses_and_trims() {
        assert_eq!(normalize_identifier("  Multi   Space!! "), "multi_space");
        assert_eq!(normalize_identifier("__a__b__"), "a_b");
        assert_eq!(normalize_identifier("a - b"), "a_b");
        assert_eq!(normalize_identifier("TimestampReparacion"), "timestampreparacion");
    }

    #[test]
    fn test_information_separators_count_as_whitespace() {
        assert_eq!(normalize_identifier("a\u{1c}b"), "a_b");
        assert_eq!(normalize_identifier("a\u{1f}\u{1d} b"), "a_b");
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(normalize_identifier(""), "");
        assert_eq!(normalize_identifier("¿?¡!"), "");
        assert_eq!(normalize_identifier("   "), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Fecha De Reparación",
            "  Multi   Space!! ",
            "",
            "ÑANDÚ  über_Straße",
            "x__ _y",
            "123 Main St.",
            "日本語 col",
        ];
        for sample in samples {
            let once = normalize_identifier(sample);
            assert_eq!(normalize_identifier(&once), once, "input: {sample:?}");
        }
    }
}
