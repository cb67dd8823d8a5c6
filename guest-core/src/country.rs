//! Phone-prefix country resolution.
//!
//! A best-effort guess of the country a phone number belongs to, by
//! matching its leading digits against a fixed table. This is not a
//! telecom numbering directory: the table is a small compiled-in
//! constant and resolution is a plain longest-prefix string match with
//! no numeric interpretation.

/// Prefix → country table. Keys are 1–4 digits; overlapping keys are
/// allowed because resolution always tries the longest prefix first.
static COUNTRY_PREFIXES: [(&str, &str); 7] = [
    ("1", "USA"),
    ("2", "United Kingdom"),
    ("3", "Germany"),
    ("7", "Russia"),
    ("44", "Finland"),
    ("123", "Liechtenstein"),
    ("971", "UAE"),
];

/// Length of the longest key in [`COUNTRY_PREFIXES`].
const MAX_PREFIX_LEN: usize = 4;

/// Resolve a phone number to a country name.
///
/// A single leading `+` is stripped (once, not repeatedly), surrounding
/// whitespace is trimmed, and prefixes of length 4 down to 1 are looked
/// up until one matches. Phones shorter than the probed length are
/// checked as-is. An unmappable phone is not an error; it simply
/// resolves to `None`.
pub fn resolve_country(phone: &str) -> Option<&'static str> {
    let normalized = phone.strip_prefix('+').unwrap_or(phone).trim();

    for len in (1..=MAX_PREFIX_LEN).rev() {
        let prefix: String = normalized.chars().take(len).collect();
        if let Some(&(_, country)) = COUNTRY_PREFIXES.iter().find(|(key, _)| *key == prefix) {
            return Some(country);
        }
    }

    None
}
