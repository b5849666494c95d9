//! Per-placeholder format specs.
//!
//! A spec such as `%.2f` or `[%-8s]` is literal text with `%` directives
//! in between: `%[flags][width][.precision]verb`. Every directive in a
//! spec renders the placeholder's one value.
//!
//! | verb | output |
//! |---|---|
//! | `v` | default rendering |
//! | `s` | string form, precision truncates |
//! | `q` | quoted, escaped string form |
//! | `d` | integer, floats truncated toward zero |
//! | `f` `F` | fixed point, precision defaults to 6 |
//! | `e` `E` | scientific, precision defaults to 6 |
//! | `g` | shortest float form |
//! | `x` `X` | hexadecimal integer |
//! | `t` | boolean |
//!
//! Flags are `-` (left-justify), `+` (always sign), ` ` (space for
//! positive numbers) and `0` (zero padding for numbers). A verb that does
//! not apply to the value falls back to default rendering. Precision is
//! applied to the shortest decimal form of a float, rounding half away
//! from zero, so `%.2f` of `42.235` is `42.24` on every platform.

use crate::data::Value;
use crate::settings::Settings;
use chrono::Utc;
use std::fmt::Write;

/// Largest width or precision a directive may ask for. Larger ones are
/// printed literally.
const MAX_DIGITS: usize = 1_000_000;

/// Render `value` with no format spec.
pub(crate) fn write_default(out: &mut String, value: &Value, settings: &Settings) {
    match value {
        Value::Time(t) => {
            let mut rendered = String::new();
            let result = if settings.utc {
                write!(rendered, "{}", t.with_timezone(&Utc).format(&settings.date_format))
            } else {
                write!(rendered, "{}", t.format(&settings.date_format))
            };
            match result {
                Ok(()) => out.push_str(&rendered),
                // invalid layout
                Err(_) => out.push_str(&t.to_rfc3339()),
            }
        }
        Value::Str(s) => out.push_str(s),
        other => {
            let _ = write!(out, "{}", other);
        }
    }
}

/// Render `value` through the format spec `spec`.
pub(crate) fn write_spec(out: &mut String, spec: &str, value: &Value, settings: &Settings) {
    let mut chars = spec.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut directive = Directive::default();

        while let Some(&(_, flag)) = chars.peek() {
            match flag {
                '-' => directive.minus = true,
                '+' => directive.plus = true,
                ' ' => directive.space = true,
                '0' => directive.zero = true,
                _ => break,
            }
            chars.next();
        }

        directive.width = take_number(&mut chars);

        if let Some(&(_, '.')) = chars.peek() {
            chars.next();
            directive.precision = Some(take_number(&mut chars).unwrap_or(0));
        }

        match chars.next() {
            None => out.push_str(&spec[start..]),
            Some((_, '%')) => out.push('%'),
            Some((at, verb)) => {
                if directive.too_large() || !directive.write(out, verb, value, settings) {
                    out.push_str(&spec[start..at + verb.len_utf8()]);
                }
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> Option<usize> {
    let mut number: Option<usize> = None;
    while let Some(&(_, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else { break };
        number = Some(number.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    number
}

#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// A rendered directive body before padding.
struct Body {
    negative: bool,
    numeric: bool,
    text: String,
}

impl Body {
    fn text(text: String) -> Self {
        Body { negative: false, numeric: false, text }
    }

    fn number(negative: bool, digits: String) -> Self {
        Body { negative, numeric: true, text: digits }
    }
}

impl Directive {
    /// Returns `false` for an unknown verb, leaving `out` untouched.
    fn write(&self, out: &mut String, verb: char, value: &Value, settings: &Settings) -> bool {
        let body = match verb {
            'v' => self.fallback(value, settings),
            's' => {
                let mut text = String::new();
                write_default(&mut text, value, settings);
                if let Some(p) = self.precision {
                    text = text.chars().take(p).collect();
                }
                Body::text(text)
            }
            'q' => {
                let mut text = String::new();
                write_default(&mut text, value, settings);
                Body::text(format!("{:?}", text))
            }
            'd' => match *value {
                Value::Int(v) => Body::number(v < 0, v.unsigned_abs().to_string()),
                Value::UInt(v) => Body::number(false, v.to_string()),
                Value::Float(v) if v.is_finite() => {
                    let t = v.trunc();
                    Body::number(t < 0.0, format!("{}", t.abs()))
                }
                _ => self.fallback(value, settings),
            },
            'f' | 'F' => match value.as_f64() {
                Some(v) if v.is_finite() => {
                    Body::number(v < 0.0, fixed(v.abs(), self.precision.unwrap_or(6)))
                }
                Some(v) => Body::number(v < 0.0, non_finite(v, verb == 'F')),
                None => self.fallback(value, settings),
            },
            'e' | 'E' => match value.as_f64() {
                Some(v) if v.is_finite() => {
                    let text = scientific(v.abs(), self.precision.unwrap_or(6));
                    let text = if verb == 'E' { text.to_uppercase() } else { text };
                    Body::number(v < 0.0, text)
                }
                Some(v) => Body::number(v < 0.0, non_finite(v, verb == 'E')),
                None => self.fallback(value, settings),
            },
            'g' => match value.as_f64() {
                Some(v) if v.is_finite() => Body::number(v < 0.0, format!("{}", v.abs())),
                Some(v) => Body::number(v < 0.0, non_finite(v, false)),
                None => self.fallback(value, settings),
            },
            'x' | 'X' => {
                let body = match *value {
                    Value::Int(v) => Body::number(v < 0, format!("{:x}", v.unsigned_abs())),
                    Value::UInt(v) => Body::number(false, format!("{:x}", v)),
                    _ => self.fallback(value, settings),
                };
                if verb == 'X' && body.numeric {
                    Body { text: body.text.to_uppercase(), ..body }
                } else {
                    body
                }
            }
            't' => match *value {
                Value::Bool(v) => Body::text(v.to_string()),
                _ => self.fallback(value, settings),
            },
            _ => return false,
        };

        self.pad(out, body);
        true
    }

    fn too_large(&self) -> bool {
        self.width.is_some_and(|w| w > MAX_DIGITS)
            || self.precision.is_some_and(|p| p > MAX_DIGITS)
    }

    fn fallback(&self, value: &Value, settings: &Settings) -> Body {
        let mut text = String::new();
        write_default(&mut text, value, settings);
        Body::text(text)
    }

    fn pad(&self, out: &mut String, body: Body) {
        let sign = if body.negative {
            "-"
        } else if body.numeric && self.plus {
            "+"
        } else if body.numeric && self.space {
            " "
        } else {
            ""
        };

        let len = sign.len() + body.text.chars().count();
        let fill = self.width.map_or(0, |w| w.saturating_sub(len));

        if self.minus {
            out.push_str(sign);
            out.push_str(&body.text);
            out.extend(std::iter::repeat(' ').take(fill));
        } else if self.zero && body.numeric {
            out.push_str(sign);
            out.extend(std::iter::repeat('0').take(fill));
            out.push_str(&body.text);
        } else {
            out.extend(std::iter::repeat(' ').take(fill));
            out.push_str(sign);
            out.push_str(&body.text);
        }
    }
}

fn non_finite(v: f64, upper: bool) -> String {
    let text = if v.is_nan() { "NaN" } else { "Inf" };
    if upper {
        text.to_uppercase()
    } else {
        text.to_string()
    }
}

/// Fixed-point form of a finite, non-negative `v` with `precision`
/// fractional digits.
fn fixed(v: f64, precision: usize) -> String {
    // f64's Display is the shortest round-trip form and never uses exponents.
    let shortest = format!("{}", v);
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));
    round_decimal(int_part, frac_part, precision)
}

/// Scientific form of a finite, non-negative `v`, e.g. `4.223524e+01`.
fn scientific(v: f64, precision: usize) -> String {
    let shortest = format!("{:e}", v);
    let (mantissa, exp) = shortest.split_once('e').unwrap_or((shortest.as_str(), "0"));
    let mut exp: i32 = exp.parse().unwrap_or(0);

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut rounded = round_decimal(int_part, frac_part, precision);

    // 9.99 -> 10.0 after rounding; renormalize to one integer digit
    if rounded.starts_with("10") {
        exp += 1;
        let digits: String = rounded.chars().filter(|c| *c != '.').collect();
        let (int_part, frac_part) = digits.split_at(1);
        rounded = round_decimal(int_part, frac_part, precision);
    }

    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", rounded, sign, exp.unsigned_abs())
}

/// Round the decimal `int_part.frac_part` to `precision` fractional
/// digits, half away from zero.
fn round_decimal(int_part: &str, frac_part: &str, precision: usize) -> String {
    let mut digits: Vec<u8> = int_part.bytes().collect();

    if frac_part.len() <= precision {
        digits.extend(frac_part.bytes());
        digits.extend(std::iter::repeat(b'0').take(precision - frac_part.len()));
    } else {
        digits.extend(frac_part[..precision].bytes());
        if frac_part.as_bytes()[precision] >= b'5' {
            let mut i = digits.len();
            loop {
                if i == 0 {
                    digits.insert(0, b'1');
                    break;
                }
                i -= 1;
                if digits[i] == b'9' {
                    digits[i] = b'0';
                } else {
                    digits[i] += 1;
                    break;
                }
            }
        }
    }

    let split = digits.len() - precision;
    let mut result = String::with_capacity(digits.len() + 1);
    result.extend(digits[..split].iter().map(|&b| b as char));
    if precision > 0 {
        result.push('.');
        result.extend(digits[split..].iter().map(|&b| b as char));
    }
    result
}
