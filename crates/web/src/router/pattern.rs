use std::fmt;

/// The shape a registered route path takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// No `:name` segment; matched by exact string lookup only.
    Literal(String),

    /// At least one `:name` segment.
    Parameterized { raw: String, segments: Vec<Segment> },

    /// Matches every path that starts with the string.
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

impl RoutePattern {
    /// Parses a route path, `/api/employees/:id` style.
    pub fn parse(pattern: impl Into<String>) -> Self {
        let raw = pattern.into();
        if !raw.contains(':') {
            return RoutePattern::Literal(raw);
        }

        let segments = path_segments(&raw)
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect::<Vec<_>>();

        if segments.iter().any(|segment| matches!(segment, Segment::Param(_))) {
            RoutePattern::Parameterized { raw, segments }
        } else {
            // a colon inside a segment, e.g. `/a/b:c`, is literal text
            RoutePattern::Literal(raw)
        }
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        RoutePattern::Prefix(prefix.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoutePattern::Literal(raw) | RoutePattern::Parameterized { raw, .. } | RoutePattern::Prefix(raw) => raw,
        }
    }

    /// Whether this pattern goes into the exact lookup table.
    pub(crate) fn is_exact_key(&self) -> bool {
        !matches!(self, RoutePattern::Prefix(_))
    }

    /// Matches `path` against this pattern, returning the bound parameters on success.
    ///
    /// Literal patterns only ever match through exact lookup, never through this scan.
    pub fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
        match self {
            RoutePattern::Literal(_) => None,
            RoutePattern::Prefix(prefix) => path.starts_with(prefix.as_str()).then(Vec::new),
            RoutePattern::Parameterized { segments, .. } => {
                let parts = path_segments(path).collect::<Vec<_>>();
                if parts.len() != segments.len() {
                    return None;
                }

                let mut params = Vec::new();
                for (segment, part) in segments.iter().zip(parts) {
                    match segment {
                        Segment::Param(name) => params.push((name.clone(), part.to_string())),
                        Segment::Literal(literal) if literal == part => {}
                        Segment::Literal(_) => return None,
                    }
                }
                Some(params)
            }
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePattern::Prefix(prefix) => write!(f, "{prefix}*"),
            other => f.write_str(other.as_str()),
        }
    }
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
