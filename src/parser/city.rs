use regex::Regex;
use std::sync::OnceLock;

fn admin_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"metropolitan city of |city of |province of |county of ")
            .expect("Invalid regex pattern defined in code")
    })
}

/// Produces the storage key for a city: administrative prefixes removed,
/// cut at the first comma, and title-cased.
///
/// Every path that writes or looks up a history record by city goes through
/// this function, so two spellings of the same place always land on the same
/// row.
///
/// ```
/// use weathervane::parser::city::normalize_city;
///
/// assert_eq!(normalize_city("london"), "London");
/// assert_eq!(normalize_city("City of Paris"), "Paris");
/// assert_eq!(normalize_city("Metropolitan City of Milan, IT"), "Milan");
/// ```
#[must_use]
pub fn normalize_city(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped = admin_prefix_regex().replace_all(&lowered, "");
    let head = stripped.split(',').next().unwrap_or_default().trim();
    capitalize_words(head)
}

/// Lower-cases `s` and upper-cases the first character of every word.
#[must_use]
pub fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.to_lowercase().chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !is_word;
    }

    out
}

/// The lookup string a selected suggestion turns into, e.g. `"Paris, FR"`.
#[must_use]
pub fn format_suggestion(name: &str, country_code: &str) -> String {
    format!(
        "{}, {}",
        capitalize_words(name.trim()),
        country_code.trim().to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_simple() {
        assert_eq!(normalize_city("london"), "London");
        assert_eq!(normalize_city("  LONDON  "), "London");
        assert_eq!(normalize_city("new york"), "New York");
    }

    #[test]
    fn test_normalize_strips_admin_prefixes() {
        assert_eq!(normalize_city("City of Paris"), "Paris");
        assert_eq!(normalize_city("city of paris"), "Paris");
        assert_eq!(normalize_city("Province of Ontario"), "Ontario");
        assert_eq!(normalize_city("County of Kent"), "Kent");
        assert_eq!(normalize_city("Metropolitan City of Milan"), "Milan");
    }

    #[test]
    fn test_normalize_cuts_at_first_comma() {
        assert_eq!(normalize_city("Paris, FR"), "Paris");
        assert_eq!(normalize_city("springfield, il, us"), "Springfield");
    }

    #[test]
    fn test_normalize_variants_share_key() {
        let key = normalize_city("paris");
        assert_eq!(normalize_city("City of Paris"), key);
        assert_eq!(normalize_city("PARIS, FR"), key);
        assert_eq!(normalize_city("city of paris, france"), key);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["rio de janeiro", "City of London, GB", "saint-étienne", "o'fallon"] {
            let once = normalize_city(raw);
            assert_eq!(normalize_city(&once), once);
        }
    }

    #[test]
    fn test_capitalize_words_handles_punctuation() {
        assert_eq!(capitalize_words("saint-étienne"), "Saint-Étienne");
        assert_eq!(capitalize_words("o'fallon"), "O'Fallon");
        assert_eq!(capitalize_words("SÃO PAULO"), "São Paulo");
    }

    #[test]
    fn test_format_suggestion() {
        assert_eq!(format_suggestion("paris", "fr"), "Paris, FR");
        assert_eq!(format_suggestion("NEW YORK CITY", "us"), "New York City, US");
    }
}
