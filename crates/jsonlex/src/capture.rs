use alloc::string::String;
use core::{fmt, ops::Deref};

/// A string payload produced by the lexer.
///
/// Strings without escapes are returned as `Borrowed` slices of the source.
/// Anything the lexer had to decode is `Owned`. Equality compares the text,
/// so a borrowed and an owned capture of the same content are equal.
#[derive(Debug, Clone)]
pub enum Capture<'src> {
    /// A slice of the source, returned without copying.
    Borrowed(&'src str),
    /// Decoded text that differs from the source representation.
    Owned(String),
}

impl<'src> Capture<'src> {
    /// Returns the text of the capture.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Capture::Borrowed(s) => s,
            Capture::Owned(s) => s.as_str(),
        }
    }

    /// Returns `true` when the capture is a slice of the source.
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Capture::Borrowed(_))
    }

    /// Converts the capture into an owned `String`, copying only when the
    /// capture is borrowed.
    #[must_use]
    pub fn into_owned(self) -> String {
        match self {
            Capture::Borrowed(s) => s.into(),
            Capture::Owned(s) => s,
        }
    }

    /// Returns the borrowed slice, if the capture is one.
    #[must_use]
    pub fn as_borrowed(&self) -> Option<&'src str> {
        match self {
            Capture::Borrowed(s) => Some(*s),
            Capture::Owned(_) => None,
        }
    }
}

impl Deref for Capture<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Capture<'_> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for Capture<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Capture<'_> {}

impl PartialEq<str> for Capture<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Capture<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Capture<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Capture<'_>> for String {
    fn from(capture: Capture<'_>) -> Self {
        capture.into_owned()
    }
}
