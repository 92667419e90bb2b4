//! Text renderings of JSON values that match what the legacy data and the
//! existing API clients expect: plain coercion for stored flags and
//! quoted lists for advisory messages.

use serde_json::Value;

/// Coerces a JSON value to a flag string. Strings pass through unchanged;
/// other values use the legacy spelling (`True`, `None`, `['a', 1]`, ...).
pub fn coerce_flag(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => quoted_value(other),
    }
}

/// Quoted rendering of a JSON value, e.g. `'HR'`, `[1, 'x']`, `{'a': None}`.
///
/// Integer literals beyond the `i64`/`u64` range are already floats once
/// parsed, so `100000000000000000000` renders as `1e+20`. Unassigned code
/// points are not escaped.
pub fn quoted_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(quoted_value).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), quoted_value(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

// Integers verbatim; floats in shortest round-trip form, always with a
// fraction or an exponent (`2.0`, `1e+16`, `1.5e-05`).
fn number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let f = match n.as_f64() {
        Some(f) => f,
        None => return n.to_string(),
    };

    let scientific = format!("{:e}", f);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let decimal = format!("{}", f);
        if decimal.contains('.') {
            decimal
        } else {
            format!("{}.0", decimal)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// Renders a list of names as `['a', 'b']`.
pub fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    let parts: Vec<String> = items.iter().map(|s| quote(s.as_ref())).collect();
    format!("[{}]", parts.join(", "))
}

// Single quotes unless the text contains a single quote and no double quote.
fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if is_unprintable(c) => out.push_str(&escape_code_point(c)),
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

// Control and format characters, and every separator except the plain space.
fn is_unprintable(c: char) -> bool {
    c.is_control()
        || (c.is_whitespace() && c != ' ')
        || matches!(
            c,
            '\u{00ad}'
                | '\u{061c}'
                | '\u{180e}'
                | '\u{200b}'..='\u{200f}'
                | '\u{202a}'..='\u{202e}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{206f}'
                | '\u{feff}'
                | '\u{fff9}'..='\u{fffb}'
                | '\u{e000}'..='\u{f8ff}'
        )
}

fn escape_code_point(c: char) -> String {
    let code = c as u32;
    if code <= 0xff {
        format!("\\x{:02x}", code)
    } else if code <= 0xffff {
        format!("\\u{:04x}", code)
    } else {
        format!("\\U{:08x}", code)
    }
}
