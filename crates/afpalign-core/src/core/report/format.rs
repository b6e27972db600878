//! Number formatting shared by the text reports.

/// Formats `value` in scientific notation the way the established report consumers
/// expect it: a signed exponent of at least two digits (`4.20e-06`, `1.00e+00`).
pub fn java_scientific(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let rendered = format!("{value:.precision$e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => rendered,
    }
}

/// Splits `total` columns into consecutive `(start, len)` runs of at most `width`.
pub(crate) fn line_chunks(total: usize, width: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..total)
        .step_by(width.max(1))
        .map(move |start| (start, width.min(total - start)))
}

/// Substring by character positions; alignment strings are ASCII in practice.
pub(crate) fn char_slice(text: &str, start: usize, len: usize) -> &str {
    let begin = text.char_indices().nth(start).map_or(text.len(), |(i, _)| i);
    let end = text[begin..]
        .char_indices()
        .nth(len)
        .map_or(text.len(), |(i, _)| begin + i);
    &text[begin..end]
}
