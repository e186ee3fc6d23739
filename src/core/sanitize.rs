// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Longest leading numeric prefix parsed as `f64`, like a browser's
/// `parseFloat`. Anything without a numeric prefix is NaN; the only word
/// accepted is a case-sensitive `Infinity`.
pub fn leading_number(s: &str) -> f64 {
    let t = s.trim_start();
    let (sign, unsigned) = match t.as_bytes().first() {
        Some(b'-') => (-1.0, &t[1..]),
        Some(b'+') => (1.0, &t[1..]),
        _ => (1.0, t),
    };
    if unsigned.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }

    let end = t
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);
    (1..=end)
        .rev()
        .find_map(|n| t[..n].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_ws("  Chaos \n  Orb "), "Chaos Orb");
    }

    #[test]
    fn leading_number_like_parse_float() {
        assert_eq!(leading_number(" 10 "), 10.0);
        assert_eq!(leading_number("2.5x"), 2.5);
        assert_eq!(leading_number("1e3"), 1000.0);
        assert_eq!(leading_number("7e"), 7.0);
        assert!(leading_number("abc").is_nan());
        assert!(leading_number("").is_nan());
    }

    #[test]
    fn only_spelled_out_infinity_is_a_word() {
        assert_eq!(leading_number("Infinity"), f64::INFINITY);
        assert_eq!(leading_number(" -Infinityx"), f64::NEG_INFINITY);
        assert!(leading_number("inf").is_nan());
        assert!(leading_number("infinity").is_nan());
        assert!(leading_number("nan").is_nan());
        assert!(leading_number("-inf").is_nan());
    }
}
