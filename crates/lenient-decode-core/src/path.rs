//! Coding paths — ordered field-name segments locating a value within its
//! parent structure.
//!
//! Rendered as a JSON-Pointer-style string (e.g. `/users/0/email`) with
//! RFC 6901 escaping so that field names containing `/` or `~` stay
//! unambiguous in reported outcomes.

use std::borrow::Cow;
use std::fmt;

/// Escape a single path segment per RFC 6901.
///
/// - `~` → `~0`
/// - `/` → `~1`
///
/// Returns `Cow::Borrowed` when no escaping is needed (the common case).
pub fn escape_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') || segment.contains('/') {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Ordered sequence of field-name segments identifying the position of the
/// field being decoded. Carried through to every reported outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodingPath {
    segments: Vec<String>,
}

impl CodingPath {
    /// The root path (no segments), rendered as `/`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path with one more segment, returning the child path.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", escape_pointer_segment(segment))?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for CodingPath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}
