use memchr::memchr;

use super::{PatternError, PatternResult, Segment};

/// Splits a route pattern into literal and wildcard tokens.
///
/// Wildcards are written `{name}` or `{name:regex}`. Literal text between
/// wildcards is trimmed of slashes and broken into one token per path
/// segment; empty pieces are dropped, so `/`, `` and `//` all yield no
/// tokens. Braces nest inside a regex body (`{id:[0-9]{3}}`) and a backslash
/// escapes the following byte.
#[tracing::instrument(level = "trace", skip(pattern), fields(pattern = %pattern))]
pub fn split_pattern(pattern: &str) -> PatternResult<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut rest = pattern;
    let mut offset = 0usize;

    while let Some(open) = memchr(b'{', rest.as_bytes()) {
        push_literals(&rest[..open], offset, pattern, &mut segments)?;

        let close = find_closing_brace(rest, open).ok_or_else(|| {
            PatternError::UnterminatedWildcard {
                pattern: pattern.to_string(),
                index: offset + open,
            }
        })?;
        segments.push(parse_wildcard(
            &rest[open + 1..close],
            offset + open,
            pattern,
        )?);

        rest = &rest[close + 1..];
        offset += close + 1;
    }

    push_literals(rest, offset, pattern, &mut segments)?;

    Ok(segments)
}

fn push_literals(
    text: &str,
    offset: usize,
    pattern: &str,
    segments: &mut Vec<Segment>,
) -> PatternResult<()> {
    if let Some(index) = memchr(b'}', text.as_bytes()) {
        return Err(PatternError::UnexpectedClosingBrace {
            pattern: pattern.to_string(),
            index: offset + index,
        });
    }

    segments.extend(
        text.split('/')
            .filter(|part| !part.is_empty())
            .map(Segment::literal),
    );

    Ok(())
}

fn find_closing_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut idx = open;

    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 1,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
        idx += 1;
    }

    None
}

fn parse_wildcard(body: &str, index: usize, pattern: &str) -> PatternResult<Segment> {
    let (name, regex) = match body.split_once(':') {
        Some((name, regex)) => (name, Some(regex)),
        None => (body, None),
    };

    if name.is_empty() {
        return Err(PatternError::EmptyWildcardName {
            pattern: pattern.to_string(),
            index,
        });
    }

    match regex {
        Some("") => Err(PatternError::EmptyRegex {
            pattern: pattern.to_string(),
            name: name.to_string(),
        }),
        Some(regex) => Ok(Segment::regex(name, regex)),
        None => Ok(Segment::wildcard(name)),
    }
}
