use std::fmt;

use kurbo::Vec2;

/// One operation in a transform expression.
///
/// Only `translate` is understood structurally; every other function
/// (rotate, scale, skew, matrix, ...) passes through verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum TransformOp {
    Translate(Vec2),
    Opaque(String),
}

impl TransformOp {
    /// Whether this op is a `translate(...)` function, parseable or not.
    pub fn is_translate(&self) -> bool {
        match self {
            Self::Translate(_) => true,
            Self::Opaque(token) => token_name(token) == Some("translate"),
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate(offset) => write!(f, "translate({},{})", offset.x, offset.y),
            Self::Opaque(token) => f.write_str(token),
        }
    }
}

/// An ordered sequence of transform operations.
///
/// Parsed once from the authored expression, operated on structurally,
/// and re-serialized with single-space separators. Non-translate ops are
/// never reordered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformList {
    ops: Vec<TransformOp>,
}

impl TransformList {
    /// Tokenize a transform expression into an op sequence.
    ///
    /// Tokens are `name(args)` groups separated by whitespace or commas.
    /// Malformed fragments survive as opaque tokens; parsing never fails.
    pub fn parse(expr: &str) -> Self {
        let ops = tokenize(expr).into_iter().map(parse_op).collect();
        Self { ops }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Replace the first `translate` op with `offset`, or append one when
    /// no translate is present. Later translate occurrences are left alone.
    pub fn set_translate(&mut self, offset: Vec2) {
        match self.ops.iter_mut().find(|op| op.is_translate()) {
            Some(op) => *op = TransformOp::Translate(offset),
            None => self.ops.push(TransformOp::Translate(offset)),
        }
    }
}

impl fmt::Display for TransformList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// Merge a requested translate offset into an existing transform expression.
///
/// - empty `existing` and an offset: just the translate token
/// - `existing` containing a translate: first occurrence replaced in place
/// - `existing` without one: translate appended after a space
/// - no offset: `existing` returned unchanged
///
/// Idempotent: composing twice with identical inputs equals composing once.
pub fn compose(existing: &str, translate: Option<Vec2>) -> String {
    let Some(offset) = translate else {
        return existing.to_string();
    };

    if existing.trim().is_empty() {
        return TransformOp::Translate(offset).to_string();
    }

    let mut list = TransformList::parse(existing);
    list.set_translate(offset);
    list.to_string()
}

fn tokenize(expr: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut depth = 0usize;

    let mut flush = |buf: &mut String| {
        let token = buf.trim();
        if !token.is_empty() {
            tokens.push(token.to_string());
        }
        buf.clear();
    };

    for c in expr.chars() {
        match c {
            '(' => {
                depth += 1;
                buf.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                buf.push(c);
                if depth == 0 {
                    flush(&mut buf);
                }
            }
            c if depth == 0 && (c.is_whitespace() || c == ',') => flush(&mut buf),
            c => buf.push(c),
        }
    }
    flush(&mut buf);
    tokens
}

fn token_name(token: &str) -> Option<&str> {
    token.split_once('(').map(|(name, _)| name.trim())
}

fn parse_op(token: String) -> TransformOp {
    if token_name(&token) == Some("translate")
        && let Some(offset) = parse_translate_args(&token)
    {
        return TransformOp::Translate(offset);
    }
    TransformOp::Opaque(token)
}

fn parse_translate_args(token: &str) -> Option<Vec2> {
    let inner = token.split_once('(')?.1.strip_suffix(')')?;
    let mut args = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_length);

    let x = args.next()??;
    // SVG translate(tx) implies ty = 0.
    let y = match args.next() {
        None => 0.0,
        Some(v) => v?,
    };
    if args.next().is_some() {
        return None;
    }
    Some(Vec2::new(x, y))
}

fn parse_length(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number.trim().parse::<f64>().ok()
}
