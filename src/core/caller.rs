//! Call-site capture
//!
//! Frames are resolved with the `backtrace` crate and flattened so that each
//! inlined function gets its own entry. Positions are counted from an anchor
//! function (the public logger method that asked for the capture), so depth 0
//! is the anchor itself and depth 1 its caller. A missing anchor, stripped
//! symbols or a too-shallow stack all produce no descriptors.

use backtrace::Backtrace;

/// Default bound for [`capture_frames`].
pub const DEFAULT_MAX_CALLER_DEPTH: usize = 25;

/// One resolved stack entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerFrame {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl CallerFrame {
    /// `"<file>:<line> <function>"`, the single-caller form.
    #[must_use]
    pub fn descriptor(&self) -> String {
        format!("{}:{} {}", self.file, self.line, self.function)
    }

    /// `"<file>: <line> <function>"`, the stack-walk form.
    #[must_use]
    pub fn frame_descriptor(&self) -> String {
        format!("{}: {} {}", self.file, self.line, self.function)
    }

    /// Whether debug info gave this entry a source file and line.
    #[must_use]
    pub fn is_located(&self) -> bool {
        self.line != 0 && self.file != UNKNOWN_FILE
    }
}

const UNKNOWN_FILE: &str = "???";

/// Resolve the entry `skip` positions above `anchor`.
pub(crate) fn capture_one(anchor: &str, skip: usize) -> Option<CallerFrame> {
    pick(resolve_from(anchor), skip)
}

/// An entry without file and line means frames were lost to missing debug
/// info, so the position count can no longer be trusted.
fn pick(entries: Vec<CallerFrame>, skip: usize) -> Option<CallerFrame> {
    entries
        .into_iter()
        .nth(skip)
        .filter(CallerFrame::is_located)
}

/// Resolve up to `max_depth` entries starting one position above `anchor`.
pub(crate) fn capture_frames(anchor: &str, max_depth: usize) -> Vec<CallerFrame> {
    resolve_from(anchor)
        .into_iter()
        .skip(1)
        .take(max_depth)
        .collect()
}

/// All resolved entries from `anchor` outwards, anchor first.
#[inline(never)]
fn resolve_from(anchor: &str) -> Vec<CallerFrame> {
    let backtrace = Backtrace::new();
    let mut entries = Vec::new();
    let mut found = false;

    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            let function = match symbol.name() {
                Some(name) => trim_hash(&format!("{:#}", name)).to_string(),
                None => continue,
            };

            if !found {
                if is_anchor(&function, anchor) {
                    found = true;
                } else {
                    continue;
                }
            }

            let file = symbol
                .filename()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| UNKNOWN_FILE.to_string());
            entries.push(CallerFrame {
                file,
                line: symbol.lineno().unwrap_or(0),
                function,
            });
        }
    }

    entries
}

/// Whether `function` is `path` or ends in `::path`.
///
/// v0 mangling demangles inherent methods as `<crate::Type>::method`, so the
/// angle brackets are dropped before comparing.
pub(crate) fn is_anchor(function: &str, path: &str) -> bool {
    let function = function.replace(['<', '>'], "");
    function == path
        || function
            .strip_suffix(path)
            .is_some_and(|head| head.ends_with("::"))
}

/// Drop a trailing `::h0123456789abcdef` legacy mangling hash.
fn trim_hash(name: &str) -> &str {
    match name.rsplit_once("::h") {
        Some((head, hash))
            if hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()) =>
        {
            head
        }
        _ => name,
    }
}
