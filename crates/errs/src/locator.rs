// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Call-site capture.
//!
//! Sites come from two places. The construction macros use [`call_site!`](crate::call_site), which
//! resolves everything at compile time. The function entry points use [`locate`], which walks the
//! active call stack at run time.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

const UNKNOWN: &str = "unknown";

/// Name of the marker item declared by [`call_site!`](crate::call_site).
const MARKER: &str = "__errs_call_site";

/// Where an [`Error`](crate::Error) was annotated.
///
/// Displays as `package::function:line`. A site that could not be resolved is
/// [`CallSite::unknown`], which displays as `unknown::unknown:-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallSite {
    package: String,
    function: String,
    file: String,
    line: Option<u32>,
}

impl CallSite {
    /// Creates a call site from its parts.
    ///
    /// Useful for building errors with a fixed, deterministic site.
    pub fn new(package: impl Into<String>, function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            package: package.into(),
            function: function.into(),
            file: file.into(),
            line: Some(line),
        }
    }

    /// The sentinel site used when the caller cannot be resolved.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            package: UNKNOWN.to_owned(),
            function: UNKNOWN.to_owned(),
            file: UNKNOWN.to_owned(),
            line: None,
        }
    }

    /// Returns the package (crate or module path) of the site.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the function of the site, `::`-qualified for nested items.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Returns the source file of the site.
    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file
    }

    /// Returns the 1-based line of the site, if known.
    #[must_use]
    pub fn line_number(&self) -> Option<u32> {
        self.line
    }

    /// Returns `true` if this is the [`CallSite::unknown`] sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.line.is_none() && self.package == UNKNOWN && self.function == UNKNOWN
    }

    /// Builds a site from the marker item of [`call_site!`](crate::call_site).
    #[doc(hidden)]
    #[must_use]
    pub fn from_marker(module: &str, marker: &str, file: &str, line: u32) -> Self {
        let symbol = expand_qualified(
            marker
                .strip_suffix(MARKER)
                .and_then(|s| s.strip_suffix("::"))
                .unwrap_or(marker),
        );

        let (package, function) = match symbol.strip_prefix(module).and_then(|rest| rest.strip_prefix("::")) {
            Some(rest) => (module.to_owned(), join_or_unknown(&normalized_segments(rest))),
            None => parse_symbol(&symbol).unwrap_or_else(|| (module.to_owned(), UNKNOWN.to_owned())),
        };

        Self {
            package,
            function,
            file: file.to_owned(),
            line: Some(line),
        }
    }

    fn from_frame(symbol: &str, file: Option<&Path>, line: Option<u32>) -> Self {
        let Some((package, function)) = parse_symbol(symbol) else {
            return Self::unknown();
        };

        Self {
            package,
            function,
            file: file.map_or_else(|| UNKNOWN.to_owned(), |path| path.display().to_string()),
            line,
        }
    }
}

impl Default for CallSite {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}::{}:{line}", self.package, self.function),
            None => write!(f, "{}::{}:-1", self.package, self.function),
        }
    }
}

/// Returns the call site `skip` frames above the caller of `locate`.
///
/// `locate(0)` describes the function that called `locate`, `locate(1)` its caller, and so on.
/// Inlined frames count as frames when the debug information describes them. Returns
/// [`CallSite::unknown`] if the stack cannot be walked or the frame has no symbol.
#[inline(never)]
#[must_use]
#[cfg_attr(test, mutants::skip)] // frame layout depends on the build, only the happy path is observable
pub fn locate(skip: usize) -> CallSite {
    const SELF_SYMBOL: &str = concat!(module_path!(), "::locate");

    let mut remaining = skip;
    let mut seen_self = false;
    let mut site = None;

    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if site.is_some() {
                return;
            }

            let Some(name) = symbol.name() else {
                return;
            };
            let name = format!("{name:#}");

            if !seen_self {
                seen_self = name.ends_with(SELF_SYMBOL);
                return;
            }

            if remaining > 0 {
                remaining -= 1;
                return;
            }

            site = Some(CallSite::from_frame(&name, symbol.filename(), symbol.lineno()));
        });

        site.is_none()
    });

    site.unwrap_or_default()
}

/// Splits a function symbol into its package and function names.
///
/// Mangling hashes, closure suffixes and impl decorations are removed first, and a leading
/// `<Type as Trait>` is replaced by the path of `Type`. The first
/// remaining segment is the package. The rest is joined with `::` to form the function
/// name, or is `"unknown"` when nothing remains. Returns `None` for an empty symbol.
///
/// # Examples
///
/// ```rust
/// use errs::parse_symbol;
///
/// let (package, function) = parse_symbol("app::store::<impl app::store::Db>::get::{{closure}}").unwrap();
/// assert_eq!(package, "app");
/// assert_eq!(function, "store::Db::get");
/// ```
#[must_use]
pub fn parse_symbol(symbol: &str) -> Option<(String, String)> {
    let segments = normalized_segments(symbol);
    let (package, rest) = segments.split_first()?;
    Some((package.clone(), join_or_unknown(rest)))
}

fn join_or_unknown(segments: &[String]) -> String {
    if segments.is_empty() {
        UNKNOWN.to_owned()
    } else {
        segments.join("::")
    }
}

fn normalized_segments(symbol: &str) -> Vec<String> {
    let symbol = expand_qualified(symbol);
    let mut segments = split_path(&symbol);

    if segments.last().is_some_and(|last| is_hash(last)) {
        segments.pop();
    }

    // closures and other anonymous items report their enclosing function
    if let Some(pos) = segments.iter().position(|s| s.starts_with("{{")) {
        segments.truncate(pos);
    }

    segments
        .into_iter()
        .map(undecorate)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Splits on `::` outside of angle brackets.
fn split_path(symbol: &str) -> Vec<&str> {
    let bytes = symbol.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&symbol[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    segments.push(&symbol[start..]);
    segments
}

fn is_hash(segment: &str) -> bool {
    segment.len() == 17
        && segment
            .strip_prefix('h')
            .is_some_and(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// `<impl Trait for Type>` and `<Type as Trait>` become `Type`, generic lists are dropped.
fn undecorate(segment: &str) -> String {
    let segment = segment.trim();

    let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) else {
        return strip_generics(segment).to_owned();
    };

    split_path(self_type(inner))
        .last()
        .map(|last| strip_generics(last).to_owned())
        .unwrap_or_default()
}

/// A leading `<Type as Trait>` is replaced by the full path of `Type`, so
/// `<app::db::Row as core::fmt::Display>::fmt` becomes `app::db::Row::fmt`.
fn expand_qualified(symbol: &str) -> Cow<'_, str> {
    let symbol = symbol.trim();

    let Some(first) = split_path(symbol).first().copied().filter(|s| s.starts_with('<')) else {
        return Cow::Borrowed(symbol);
    };

    let Some(inner) = first.strip_prefix('<').and_then(|s| s.strip_suffix('>')) else {
        return Cow::Borrowed(symbol);
    };

    Cow::Owned(format!("{}{}", self_type(inner), &symbol[first.len()..]))
}

/// The type an impl block or a qualified path refers to, without references.
fn self_type(decoration: &str) -> &str {
    let decoration = decoration.strip_prefix("impl ").unwrap_or(decoration);
    let target = match (decoration.rfind(" for "), decoration.find(" as ")) {
        (Some(pos), _) => &decoration[pos + " for ".len()..],
        (None, Some(pos)) => &decoration[..pos],
        (None, None) => decoration,
    };

    target
        .trim()
        .trim_start_matches('&')
        .trim_start_matches("mut ")
        .trim_start_matches("dyn ")
}

fn strip_generics(segment: &str) -> &str {
    segment.find('<').map_or(segment, |pos| &segment[..pos])
}

/// Captures the [`CallSite`] of the enclosing function at compile time.
///
/// The package is the current module path and the function is the path of the enclosing
/// function relative to it. Closures report their enclosing function.
///
/// # Examples
///
/// ```rust
/// fn load() -> errs::CallSite {
///     errs::call_site!()
/// }
///
/// let site = load();
/// assert!(site.function().ends_with("load"));
/// assert!(site.line_number().is_some());
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __errs_call_site() {}
        $crate::CallSite::from_marker(
            ::core::module_path!(),
            ::core::any::type_name_of_val(&__errs_call_site),
            ::core::file!(),
            ::core::line!(),
        )
    }};
}
