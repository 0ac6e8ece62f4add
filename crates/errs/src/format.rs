// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! printf-style message templates.
//!
//! A directive is `%`, then any of the flags `-+ 0#`, an optional width, an optional
//! `.precision` and a verb character. `%%` is a literal percent sign and is not a verb.
//! Arguments that do not suit their verb are rendered inline (`%!d(str=text)`) instead of
//! failing, so a bad template never prevents an error from being built.

use std::borrow::Cow;

use crate::Arg;

const ELLIPSIS: &str = "...";

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

#[derive(Debug)]
enum Piece<'a> {
    Literal(&'a str),
    Percent,
    Verb { start: usize, spec: Spec, verb: Option<char> },
}

struct Pieces<'a> {
    template: &'a str,
    pos: usize,
}

fn pieces(template: &str) -> Pieces<'_> {
    Pieces { template, pos: 0 }
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.template[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let Some(body) = rest.strip_prefix('%') else {
            let len = rest.find('%').unwrap_or(rest.len());
            self.pos += len;
            return Some(Piece::Literal(&rest[..len]));
        };

        let start = self.pos;
        let bytes = body.as_bytes();
        let mut spec = Spec::default();
        let mut i = 0;

        while let Some(flag) = bytes.get(i) {
            match flag {
                b'-' => spec.minus = true,
                b'+' => spec.plus = true,
                b' ' => spec.space = true,
                b'0' => spec.zero = true,
                b'#' => spec.sharp = true,
                _ => break,
            }
            i += 1;
        }

        let (width, len) = number(&body[i..]);
        spec.width = width;
        i += len;

        if bytes.get(i) == Some(&b'.') {
            i += 1;
            let (precision, len) = number(&body[i..]);
            spec.precision = Some(precision.unwrap_or(0));
            i += len;
        }

        let verb = body[i..].chars().next();
        self.pos += 1 + i + verb.map_or(0, char::len_utf8);

        Some(match verb {
            Some('%') => Piece::Percent,
            verb => Piece::Verb { start, spec, verb },
        })
    }
}

/// Parses leading ASCII digits, returning the value and the number of bytes consumed.
fn number(s: &str) -> (Option<usize>, usize) {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return (None, 0);
    }

    let value = s[..len]
        .bytes()
        .fold(0_usize, |acc, b| acc.saturating_mul(10).saturating_add(usize::from(b - b'0')));
    (Some(value), len)
}

/// Counts the verbs of a template. `%%` and a dangling `%` are not verbs.
pub(crate) fn count_verbs(template: &str) -> usize {
    pieces(template)
        .filter(|piece| matches!(piece, Piece::Verb { verb: Some(_), .. }))
        .count()
}

/// Returns the byte offset where the verb with the given zero-based index starts.
fn verb_offset(template: &str, index: usize) -> Option<usize> {
    pieces(template)
        .filter_map(|piece| match piece {
            Piece::Verb { start, verb: Some(_), .. } => Some(start),
            _ => None,
        })
        .nth(index)
}

/// Builds a message from a template and the arguments that follow it.
///
/// - no arguments: the template verbatim,
/// - as many arguments as verbs: the formatted template,
/// - more arguments than verbs: the surplus is dropped,
/// - fewer arguments than verbs: the template is cut right before the first verb without an
///   argument, trailing whitespace is trimmed and `...` appended, then it is formatted.
pub(crate) fn reconcile(template: &str, args: &[Arg]) -> String {
    if args.is_empty() {
        return template.to_owned();
    }

    let verbs = count_verbs(template);
    if args.len() >= verbs {
        return sprintf(template, &args[..verbs]);
    }

    let cut = verb_offset(template, args.len()).unwrap_or(template.len());
    let truncated = format!("{}{ELLIPSIS}", template[..cut].trim_end());
    sprintf(&truncated, args)
}

/// Formats a template with printf-style verbs.
pub(crate) fn sprintf(template: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;

    for piece in pieces(template) {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Percent => out.push('%'),
            Piece::Verb { verb: None, .. } => out.push_str("%!(NOVERB)"),
            Piece::Verb { verb: Some(verb), spec, .. } => {
                if let Some(arg) = args.get(next) {
                    next += 1;
                    out.push_str(&format_arg(&spec, verb, arg));
                } else {
                    out.push_str(&format!("%!{verb}(MISSING)"));
                }
            }
        }
    }

    if let Some(extra) = args.get(next..).filter(|extra| !extra.is_empty()) {
        let extra = extra
            .iter()
            .map(|arg| format!("{}={arg}", arg.type_name()))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("%!(EXTRA {extra})"));
    }

    out
}

fn format_arg(spec: &Spec, verb: char, arg: &Arg) -> String {
    match (verb, arg) {
        ('T', _) => pad_text(spec, arg.type_name()),
        ('v', Arg::Nil) => pad_text(spec, "<nil>"),
        (_, Arg::Nil) => format!("%!{verb}(<nil>)"),

        ('v' | 's', Arg::Str(s)) => pad_text(spec, &truncate(spec, s)),
        ('q', Arg::Str(s)) => pad_text(spec, &format!("{:?}", truncate(spec, s))),
        ('x' | 'X', Arg::Str(s)) => pad_text(spec, &hex_bytes(s, verb == 'X')),

        ('v' | 'd' | 'x' | 'X' | 'o' | 'b', Arg::Int(v)) => integer(spec, verb, *v < 0, v.unsigned_abs()),
        ('v' | 'd' | 'x' | 'X' | 'o' | 'b', Arg::Uint(v)) => integer(spec, verb, false, *v),
        ('c' | 'q' | 'U', Arg::Int(v)) => code_point(spec, verb, u32::try_from(*v).ok()),
        ('c' | 'q' | 'U', Arg::Uint(v)) => code_point(spec, verb, u32::try_from(*v).ok()),

        ('v' | 'f' | 'F' | 'e' | 'E' | 'g' | 'G', Arg::Float(v)) => float(spec, verb, *v),

        ('v' | 't', Arg::Bool(v)) => pad_text(spec, if *v { "true" } else { "false" }),

        ('v' | 'c' | 'q' | 'U', Arg::Char(c)) => code_point(spec, if verb == 'v' { 'c' } else { verb }, Some(u32::from(*c))),
        ('d' | 'x' | 'X' | 'o' | 'b', Arg::Char(c)) => integer(spec, verb, false, u64::from(u32::from(*c))),

        ('v' | 's', Arg::Cause(_) | Arg::Value(_)) => pad_text(spec, &truncate(spec, &arg.to_string())),
        ('q', Arg::Cause(_) | Arg::Value(_)) => pad_text(spec, &format!("{:?}", truncate(spec, &arg.to_string()))),
        ('x' | 'X', Arg::Cause(_) | Arg::Value(_)) => pad_text(spec, &hex_bytes(&arg.to_string(), verb == 'X')),

        _ => format!("%!{verb}({}={arg})", arg.type_name()),
    }
}

fn truncate<'a>(spec: &Spec, text: &'a str) -> Cow<'a, str> {
    match spec.precision {
        Some(precision) if text.chars().count() > precision => Cow::Owned(text.chars().take(precision).collect()),
        _ => Cow::Borrowed(text),
    }
}

fn hex_bytes(text: &str, upper: bool) -> String {
    text.bytes()
        .map(|b| if upper { format!("{b:02X}") } else { format!("{b:02x}") })
        .collect()
}

fn integer(spec: &Spec, verb: char, negative: bool, magnitude: u64) -> String {
    let (digits, prefix) = match verb {
        'x' => (format!("{magnitude:x}"), "0x"),
        'X' => (format!("{magnitude:X}"), "0X"),
        'o' => (format!("{magnitude:o}"), "0"),
        'b' => (format!("{magnitude:b}"), "0b"),
        _ => (magnitude.to_string(), ""),
    };

    let digits = match spec.precision {
        Some(precision) if digits.len() < precision => format!("{}{digits}", "0".repeat(precision - digits.len())),
        _ => digits,
    };

    let prefix = if spec.sharp { prefix } else { "" };
    pad_number(spec, sign(spec, negative), prefix, &digits, spec.precision.is_none())
}

fn code_point(spec: &Spec, verb: char, code: Option<u32>) -> String {
    let c = code.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER);
    match verb {
        'q' => pad_text(spec, &format!("{c:?}")),
        'U' => pad_text(spec, &format!("U+{:04X}", u32::from(c))),
        _ => pad_text(spec, c.encode_utf8(&mut [0; 4])),
    }
}

fn float(spec: &Spec, verb: char, value: f64) -> String {
    let negative = value.is_sign_negative();
    let magnitude = value.abs();

    if value.is_nan() {
        return pad_number(spec, if spec.plus { "+" } else { "" }, "", "NaN", false);
    }

    if value.is_infinite() {
        return pad_number(spec, sign(spec, negative), "", "Inf", false);
    }

    let digits = match verb {
        'f' | 'F' => format!("{magnitude:.precision$}", precision = spec.precision.unwrap_or(6)),
        'e' | 'E' => exponent(magnitude, spec.precision.unwrap_or(6), verb == 'E'),
        _ => general(magnitude, spec.precision, verb == 'G'),
    };

    pad_number(spec, sign(spec, negative), "", &digits, true)
}

/// `1.500000e+00` style output.
fn exponent(magnitude: f64, precision: usize, upper: bool) -> String {
    let formatted = format!("{magnitude:.precision$e}");
    with_signed_exponent(&formatted, upper)
}

/// Rewrites Rust's `1.5e-7` exponent into the two-digit signed `1.5e-07` form.
fn with_signed_exponent(formatted: &str, upper: bool) -> String {
    let (mantissa, exp) = formatted.split_once('e').unwrap_or((formatted, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{sign}{:02}", exp.unsigned_abs())
}

/// `%g`: exponent form for large or small exponents, fixed form otherwise, no trailing zeros.
fn general(magnitude: f64, precision: Option<usize>, upper: bool) -> String {
    let Some(precision) = precision else {
        // shortest representation that round-trips
        let scientific = format!("{magnitude:e}");
        let exp = exponent_of(&scientific);
        if exp < -4 || exp >= 6 {
            return with_signed_exponent(&scientific, upper);
        }
        return magnitude.to_string();
    };

    let precision = precision.max(1);
    let scientific = format!("{magnitude:.prec$e}", prec = precision - 1);
    let exp = exponent_of(&scientific);

    if exp < -4 || exp >= i32::try_from(precision).unwrap_or(i32::MAX) {
        let (mantissa, _) = scientific.split_once('e').unwrap_or((&scientific, "0"));
        return with_signed_exponent(&format!("{}e{exp}", trim_fraction(mantissa)), upper);
    }

    let decimals = usize::try_from(i64::try_from(precision).unwrap_or(i64::MAX) - 1 - i64::from(exp)).unwrap_or(0);
    trim_fraction(&format!("{magnitude:.decimals$}")).to_owned()
}

fn exponent_of(scientific: &str) -> i32 {
    scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

fn sign(spec: &Spec, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn pad_number(spec: &Spec, sign: &str, prefix: &str, digits: &str, zero_fill: bool) -> String {
    let len = sign.len() + prefix.len() + digits.chars().count();
    let fill = spec.width.unwrap_or(0).saturating_sub(len);

    if fill == 0 {
        format!("{sign}{prefix}{digits}")
    } else if spec.minus {
        format!("{sign}{prefix}{digits}{}", " ".repeat(fill))
    } else if spec.zero && zero_fill {
        format!("{sign}{prefix}{}{digits}", "0".repeat(fill))
    } else {
        format!("{}{sign}{prefix}{digits}", " ".repeat(fill))
    }
}

fn pad_text(spec: &Spec, text: &str) -> String {
    let fill = spec.width.unwrap_or(0).saturating_sub(text.chars().count());

    if fill == 0 {
        text.to_owned()
    } else if spec.minus {
        format!("{text}{}", " ".repeat(fill))
    } else if spec.zero {
        format!("{}{text}", "0".repeat(fill))
    } else {
        format!("{}{text}", " ".repeat(fill))
    }
}
