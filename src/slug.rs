use deunicode::deunicode;
use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// Derive a URL-safe slug from a display name.
///
/// Non-ASCII text is transliterated first ("Atlético" becomes `atletico`,
/// "Fußball" becomes `fussball`). Apostrophes are dropped so "Rock 'n' Roll"
/// becomes `rock-n-roll`, every other run of non-alphanumeric characters
/// collapses to a single hyphen, and hyphens at either end are trimmed.
pub fn slugify(name: &str) -> String {
    let lowered = deunicode(name).to_lowercase().replace('\'', "");
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_simple_name() {
        assert_eq!(slugify("Football"), "football");
    }

    #[test]
    fn test_slugify_collapses_punctuation_and_spaces() {
        assert_eq!(slugify("Arsenal v Chelsea"), "arsenal-v-chelsea");
        assert_eq!(slugify("  Man. Utd -- Spurs!! "), "man-utd-spurs");
        assert_eq!(slugify("Ice_Hockey / NHL"), "ice-hockey-nhl");
    }

    #[test]
    fn test_slugify_drops_apostrophes() {
        assert_eq!(slugify("Women's Cup"), "womens-cup");
        assert_eq!(slugify("Women\u{2019}s Cup"), "womens-cup");
    }

    #[test]
    fn test_slugify_transliterates_accents() {
        assert_eq!(slugify("Atlético Madrid"), "atletico-madrid");
        assert_eq!(slugify("FC Zürich"), "fc-zurich");
        assert_eq!(slugify("Fußball"), "fussball");
    }

    #[test]
    fn test_slugify_non_latin_names_are_distinct() {
        let football = slugify("足球");
        let baseball = slugify("棒球");

        assert!(!football.is_empty());
        assert!(!baseball.is_empty());
        assert_ne!(football, baseball);
        for slug in [&football, &baseball] {
            assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for name in ["Arsenal v Chelsea", "Formula 1", "e-Sports: LoL", "Women's Cup", "Atlético Madrid"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
