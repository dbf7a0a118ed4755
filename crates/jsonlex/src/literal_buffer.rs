/// A keyword literal the lexer can match in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpectedLiteral {
    Null,
    True,
    False,
}

impl ExpectedLiteral {
    /// Start matching from the *first* character (`n`, `t`, or `f`), ASCII
    /// case-insensitively for the booleans.
    pub fn from_first(first: char) -> Option<Self> {
        match first {
            'n' => Some(ExpectedLiteral::Null),
            't' | 'T' => Some(ExpectedLiteral::True),
            'f' | 'F' => Some(ExpectedLiteral::False),
            _ => None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            ExpectedLiteral::Null => "null",
            ExpectedLiteral::True => "true",
            ExpectedLiteral::False => "false",
        }
    }

    /// The word used in error messages.
    pub fn kind(self) -> &'static str {
        match self {
            ExpectedLiteral::Null => "null",
            ExpectedLiteral::True | ExpectedLiteral::False => "boolean",
        }
    }

    /// Byte length of the literal if `rest` starts with it.
    ///
    /// `null` is matched exactly, booleans ignore ASCII case.
    pub fn match_prefix(self, rest: &str) -> Option<usize> {
        let text = self.text();
        let candidate = rest.get(..text.len())?;
        let matched = match self {
            ExpectedLiteral::Null => candidate == text,
            ExpectedLiteral::True | ExpectedLiteral::False => candidate.eq_ignore_ascii_case(text),
        };
        matched.then_some(text.len())
    }
}
