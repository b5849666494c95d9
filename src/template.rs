//! Message templates.
//!
//! A template is text with `{name}` or `{name|spec}` placeholders, bound
//! left to right to positional arguments. Rendering produces the final
//! message and, from the same pass, a [`Data`] record mapping each
//! placeholder name to the value it consumed.
//!
//! - `{{` and `}}` are literal braces. Escapes are paired up before
//!   placeholders are looked for, so `{{name}}` is never a placeholder.
//! - A name starts with `a-z` and continues with `a-z`, `0-9` or `_`.
//!   Anything else between braces is copied out literally and consumes
//!   no argument.
//! - A placeholder with no argument left renders as `{name:MISSING}` and
//!   records nothing.
//! - Arguments left over after the last placeholder are recorded under
//!   `_<index>`, their position in the argument list.
//! - `spec` is a printf-style format such as `%.2f`; the record keeps
//!   the raw value.

use crate::arg::Arg;
use crate::data::Data;
use crate::format::{write_default, write_spec};
use crate::settings::Settings;
use std::borrow::Cow;
use std::fmt::Write;
use std::sync::Arc;

/// Template engine bound to one [`Settings`] value.
#[derive(Clone, Debug)]
pub struct Renderer {
    settings: Arc<Settings>,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(Settings::default_ref())
    }
}

impl Renderer {
    pub fn new(settings: Arc<Settings>) -> Self {
        Renderer { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The shared handle behind [`Renderer::settings`].
    pub fn shared_settings(&self) -> Arc<Settings> {
        Arc::clone(&self.settings)
    }

    /// Render `template` against `args`, returning the message and the
    /// structured details. Never fails: malformed placeholders and
    /// missing arguments show up inline in the message.
    pub fn render(&self, template: &str, args: Vec<Arg>) -> (String, Data) {
        let bytes = template.as_bytes();
        let escapes = find_escapes(bytes);

        let mut message = String::with_capacity(template.len());
        let mut details = Data::new();
        let mut args = args.into_iter().enumerate();

        let mut literal_start = 0;
        let mut pos = 0;

        while let Some(open) = find_brace(bytes, &escapes, b'{', pos) {
            let Some(close) = find_brace(bytes, &escapes, b'}', open + 1) else {
                break;
            };

            // `{}` is not a placeholder; keep looking from the next byte
            if close == open + 1 {
                pos = close;
                continue;
            }

            push_literal(&mut message, template, literal_start..open, &escapes);

            match parse_placeholder(&template[open + 1..close]) {
                None => push_literal(&mut message, template, open..close + 1, &escapes),
                Some((key, spec_start)) => {
                    let spec = spec_start.map(|at| {
                        unescape(template, open + 1 + at..close, &escapes)
                    });

                    match args.next() {
                        None => {
                            let _ = write!(message, "{{{}:MISSING}}", key);
                        }
                        Some((_, arg)) => {
                            let value = arg.resolve();
                            match spec.as_deref() {
                                None | Some("") => {
                                    write_default(&mut message, &value, &self.settings)
                                }
                                Some(spec) => {
                                    write_spec(&mut message, spec, &value, &self.settings)
                                }
                            }
                            details.set(key, value);
                        }
                    }
                }
            }

            literal_start = close + 1;
            pos = close + 1;
        }

        push_literal(&mut message, template, literal_start..bytes.len(), &escapes);

        for (index, arg) in args {
            details.set(extra_key(index), arg.resolve());
        }

        (message, details)
    }
}

/// Render with the process-wide default [`Settings`].
pub fn render(template: &str, args: Vec<Arg>) -> (String, Data) {
    Renderer::default().render(template, args)
}

/// Key for an argument no placeholder consumed.
pub fn extra_key(index: usize) -> String {
    format!("_{}", index)
}

/// Positions of the first byte of every `{{` / `}}` pair. A brace that
/// completes a pair can't start another, so `{{{` is one escape plus
/// an ordinary `{`.
fn find_escapes(bytes: &[u8]) -> Vec<usize> {
    let mut escapes = Vec::new();
    let mut prev = 0u8;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'{' | b'}' if prev == b => {
                escapes.push(i - 1);
                prev = 0;
            }
            b'{' | b'}' => prev = b,
            _ => prev = 0,
        }
    }

    escapes
}

fn is_escaped(escapes: &[usize], i: usize) -> bool {
    if escapes.is_empty() {
        return false;
    }
    escapes.binary_search(&i).is_ok() || (i > 0 && escapes.binary_search(&(i - 1)).is_ok())
}

fn find_brace(bytes: &[u8], escapes: &[usize], brace: u8, from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == brace)
        .map(|(offset, _)| from + offset)
        .find(|&i| !is_escaped(escapes, i))
}

/// Copy `template[range]`, collapsing escape pairs to single braces.
fn push_literal(out: &mut String, template: &str, range: std::ops::Range<usize>, escapes: &[usize]) {
    let first = escapes.partition_point(|&p| p < range.start);
    let mut start = range.start;

    for &p in escapes[first..].iter().take_while(|&&p| p < range.end) {
        out.push_str(&template[start..=p]);
        start = p + 2;
    }

    if start < range.end {
        out.push_str(&template[start..range.end]);
    }
}

fn unescape<'a>(template: &'a str, range: std::ops::Range<usize>, escapes: &[usize]) -> Cow<'a, str> {
    let has_escape = escapes.iter().any(|&p| range.contains(&p));
    if has_escape {
        let mut out = String::with_capacity(range.len());
        push_literal(&mut out, template, range, escapes);
        Cow::Owned(out)
    } else {
        Cow::Borrowed(&template[range])
    }
}

/// Split `name` or `name|spec` into the name and the byte offset of
/// `spec` within `inner`. `None` when the name is not a valid identifier.
fn parse_placeholder(inner: &str) -> Option<(&str, Option<usize>)> {
    let (key, spec_start) = match inner.find('|') {
        Some(bar) => (&inner[..bar], Some(bar + 1)),
        None => (inner, None),
    };

    let mut chars = key.bytes();
    let first = chars.next()?;
    if !first.is_ascii_lowercase() {
        return None;
    }
    if !chars.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_') {
        return None;
    }

    Some((key, spec_start))
}
