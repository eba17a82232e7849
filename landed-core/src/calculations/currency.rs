//! Pure currency conversions between KRW, USD and EUR.
//!
//! Rate semantics: `krw_per_usd` is "KRW needed to buy 1 USD" and
//! `usd_per_eur` is "USD needed to buy 1 EUR". A conversion with a
//! non-finite or non-positive rate yields 0 rather than an error; callers
//! validate rates against the plausible bands before trusting the output.

use std::sync::OnceLock;

use regex::Regex;

fn usable_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

/// Converts a KRW amount to USD. Returns 0 when the rate is non-finite or
/// not positive.
pub fn convert_krw_to_usd(
    krw: f64,
    krw_per_usd: f64,
) -> f64 {
    if !usable_rate(krw_per_usd) {
        return 0.0;
    }
    krw / krw_per_usd
}

/// Converts a USD amount to EUR. Returns 0 on an invalid rate.
pub fn convert_usd_to_eur(
    usd: f64,
    usd_per_eur: f64,
) -> f64 {
    if !usable_rate(usd_per_eur) {
        return 0.0;
    }
    usd / usd_per_eur
}

/// Converts a KRW amount to EUR through USD. Returns 0 if either rate is
/// invalid.
pub fn convert_krw_to_eur(
    krw: f64,
    krw_per_usd: f64,
    usd_per_eur: f64,
) -> f64 {
    if !usable_rate(krw_per_usd) || !usable_rate(usd_per_eur) {
        return 0.0;
    }
    convert_usd_to_eur(convert_krw_to_usd(krw, krw_per_usd), usd_per_eur)
}

/// EUR obtained per USD: the inverse of the USD/EUR quote. Returns 0 on an
/// invalid rate.
pub fn eur_per_usd(usd_per_eur: f64) -> f64 {
    if !usable_rate(usd_per_eur) {
        return 0.0;
    }
    1.0 / usd_per_eur
}

static NON_NUMERIC: OnceLock<Regex> = OnceLock::new();

fn strip_non_numeric(text: &str) -> String {
    let re = NON_NUMERIC.get_or_init(|| Regex::new(r"[^0-9.,]+").expect("valid literal pattern"));
    re.replace_all(text, "").into_owned()
}

/// Parses free-text KRW amounts as typed by a user.
///
/// Whitespace, currency marks and letters are discarded. `.` and `,` are
/// both treated as candidate separators: the first separator followed by a
/// run of at most two digits (up to the next separator or end of input)
/// becomes the decimal point; every other separator is dropped as a group
/// mark. Unparseable input yields 0.
///
/// `"1 234 567,89"` parses to 1234567.89. Multi-separator input such as
/// `"12.34.56"` parses to 12.3456 because the first separator already
/// qualifies as the decimal point; kept for compatibility with existing
/// stored inputs.
pub fn parse_krw_input(text: &str) -> f64 {
    let cleaned = strip_non_numeric(text);
    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        tracing::debug!(input = %text, "unparseable KRW amount, treating as 0");
        return 0.0;
    }

    let resolved = resolve_separators(&cleaned);
    match resolved.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            tracing::debug!(input = %text, "unparseable KRW amount, treating as 0");
            0.0
        }
    }
}

/// Rewrites a digits-and-separators string so it contains at most one `.`.
fn resolve_separators(cleaned: &str) -> String {
    let separators: Vec<usize> = cleaned
        .bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'.' || *b == b',')
        .map(|(i, _)| i)
        .collect();

    let decimal_pos = separators.iter().enumerate().find_map(|(k, &pos)| {
        let run_end = separators.get(k + 1).copied().unwrap_or(cleaned.len());
        let digits_after = run_end - pos - 1;
        (digits_after <= 2).then_some(pos)
    });

    cleaned
        .bytes()
        .enumerate()
        .filter_map(|(i, b)| match b {
            b'.' | b',' => (Some(i) == decimal_pos).then_some('.'),
            digit => Some(digit as char),
        })
        .collect()
}
