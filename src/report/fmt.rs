pub fn fmt_int(v: u64) -> String {
    let s = v.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    let len = s.len();
    for (i, ch) in s.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Thousands-separated number with a fixed number of decimals.
pub fn fmt_num(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return "n/a".to_string();
    }
    let neg = v < 0.0;
    let s = format!("{:.*}", decimals, v.abs());
    let (int_part, frac) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let int_val: u64 = int_part.parse().unwrap_or(0);
    let mut out = String::new();
    if neg {
        out.push('-');
    }
    out.push_str(&fmt_int(int_val));
    if let Some(f) = frac {
        out.push('.');
        out.push_str(f);
    }
    out
}

pub fn fmt_money(v: f64) -> String {
    if !v.is_finite() {
        return "n/a".to_string();
    }
    if v < 0.0 {
        format!("-${}", fmt_num(-v, 0))
    } else {
        format!("${}", fmt_num(v, 0))
    }
}

/// Compact tick label: 500, 2k, 150k, 1M, 2.5M, 1B.
pub fn fmt_compact(v: f64) -> String {
    let a = v.abs();
    let (scaled, suffix) = if a >= 1e9 {
        (v / 1e9, "B")
    } else if a >= 1e6 {
        (v / 1e6, "M")
    } else if a >= 1e3 {
        (v / 1e3, "k")
    } else {
        (v, "")
    };
    if (scaled - scaled.round()).abs() < 1e-9 {
        format!("{}{}", scaled.round() as i64, suffix)
    } else {
        format!("{:.1}{}", scaled, suffix)
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_money_and_numbers() {
        assert_eq!(fmt_money(10_000_000.0), "$10,000,000");
        assert_eq!(fmt_money(265_000.4), "$265,000");
        assert_eq!(fmt_num(2322.456, 2), "2,322.46");
        assert_eq!(fmt_num(750.0, 0), "750");
        assert_eq!(fmt_num(f64::INFINITY, 0), "n/a");
    }

    #[test]
    fn compact_ticks() {
        assert_eq!(fmt_compact(100_000.0), "100k");
        assert_eq!(fmt_compact(1_000_000.0), "1M");
        assert_eq!(fmt_compact(2_500_000.0), "2.5M");
        assert_eq!(fmt_compact(500.0), "500");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("A & B <b>\""), "A &amp; B &lt;b&gt;&quot;");
    }
}
