use std::fmt;

/// One token of a route pattern.
///
/// Literal tokens never contain `/`; the splitter breaks literal text on
/// every slash so that each static node of the tree owns exactly one path
/// segment (or a segment prefix when a wildcard follows in the same segment).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(String),
    Wildcard {
        name: String,
        pattern: Option<String>,
    },
}

impl Segment {
    pub fn literal<S: Into<String>>(text: S) -> Self {
        Segment::Literal(text.into())
    }

    pub fn wildcard<S: Into<String>>(name: S) -> Self {
        Segment::Wildcard {
            name: name.into(),
            pattern: None,
        }
    }

    pub fn regex<S: Into<String>, P: Into<String>>(name: S, pattern: P) -> Self {
        Segment::Wildcard {
            name: name.into(),
            pattern: Some(pattern.into()),
        }
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard { .. })
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Wildcard {
                name,
                pattern: None,
            } => write!(f, "{{{name}}}"),
            Segment::Wildcard {
                name,
                pattern: Some(pattern),
            } => write!(f, "{{{name}:{pattern}}}"),
        }
    }
}

/// Renders segments back into a slash-separated pattern, used in error and
/// log output.
pub(crate) fn render(segments: &[Segment]) -> String {
    let mut out = String::with_capacity(segments.len() * 8 + 1);
    for segment in segments {
        out.push('/');
        out.push_str(&segment.to_string());
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}
