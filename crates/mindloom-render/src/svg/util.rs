use std::fmt::Write as _;

/// Shortest round-trippable form, without `-0` or float noise. Used for style attributes.
pub(crate) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

pub(crate) fn fmt_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }

    let _ = write!(out, "{v}");
}

/// Fixed two-decimal form used for geometry.
pub(crate) fn fmt2(v: f64) -> String {
    let mut out = String::new();
    fmt2_into(&mut out, v);
    out
}

pub(crate) fn fmt2_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push_str("0.00");
        return;
    }
    // Anything that would print as "-0.00" prints as "0.00".
    let v = if v.abs() < 0.005 { 0.0 } else { v };
    let _ = write!(out, "{v:.2}");
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_trims_noise_and_negative_zero() {
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(16.0), "16");
        assert_eq!(fmt(1.6), "1.6");
        assert_eq!(fmt(11.000_000_1), "11");
    }

    #[test]
    fn fmt2_uses_two_decimals() {
        assert_eq!(fmt2(130.0), "130.00");
        assert_eq!(fmt2(-0.001), "0.00");
        assert_eq!(fmt2(67.126), "67.13");
        assert_eq!(fmt2(-12.5), "-12.50");
    }

    #[test]
    fn escape_xml_covers_markup_and_quotes() {
        assert_eq!(
            escape_xml(r#"a < b & "c" > 'd'"#),
            "a &lt; b &amp; &quot;c&quot; &gt; &#39;d&#39;"
        );
        assert_eq!(escape_xml("東京"), "東京");
    }
}
