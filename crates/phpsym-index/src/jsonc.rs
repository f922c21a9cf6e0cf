//! JSON-with-comments support for Composer manifests.

/// Blank out `//` and `/* */` comments that sit outside string literals.
///
/// Comment bytes become spaces (newlines are kept), so line and column numbers
/// reported by `serde_json` still point into the original file.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                chars.next();
                out.push_str("  ");
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                    blank(&mut out, next);
                }
            }
            ('/', Some('*')) => {
                chars.next();
                out.push_str("  ");
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        out.push(' ');
                        break;
                    }
                    blank(&mut out, next);
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn blank(out: &mut String, c: char) {
    if c == '\n' || c == '\r' {
        out.push(c);
    } else {
        out.push(' ');
    }
}

/// Parse JSON-with-comments into a `serde_json::Value`.
pub fn parse(input: &str) -> serde_json::Result<serde_json::Value> {
    serde_json::from_str(&strip_comments(input))
}
