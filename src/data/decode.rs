//! Provider text decoding.
//!
//! Only numeric character references (`&#233;`) are decoded. Named entities
//! such as `&amp;` or `&quot;` are passed through untouched; this is a known
//! limitation of the current contract and callers rely on it.

/// Replaces every `&#<decimal>;` reference with the character it names.
///
/// References that do not name a valid Unicode scalar value are left as written.
pub fn decode_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("&#") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let digits = tail.bytes().take_while(u8::is_ascii_digit).count();

        if digits > 0 && tail[digits..].starts_with(';') {
            let decoded = tail[..digits].parse::<u32>().ok().and_then(char::from_u32);
            if let Some(ch) = decoded {
                out.push(ch);
                rest = &tail[digits + 1..];
                continue;
            }
        }

        out.push_str("&#");
        rest = tail;
    }

    out.push_str(rest);
    out
}
