const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A piece of template text: either literal text or a `{{ path }}` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'t> {
    Literal(&'t str),
    Token {
        /// The token exactly as written, braces included.
        raw: &'t str,
        /// The trimmed text between the braces.
        path: &'t str,
    },
}

impl<'t> Piece<'t> {
    /// The original text of the piece.
    pub fn text(&self) -> &'t str {
        match self {
            Piece::Literal(text) => text,
            Piece::Token { raw, .. } => raw,
        }
    }
}

/// Splits `text` into literal pieces and tokens.
///
/// Tokens do not nest: a `{{` is closed by the first `}}` after it. A `{{` with no
/// closing `}}` is literal text. Concatenating the pieces' text reproduces the input.
pub fn scan(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(OPEN) {
        let after_open = &rest[open + OPEN.len()..];
        let Some(close) = after_open.find(CLOSE) else {
            break;
        };
        if open > 0 {
            pieces.push(Piece::Literal(&rest[..open]));
        }
        let end = open + OPEN.len() + close + CLOSE.len();
        pieces.push(Piece::Token {
            raw: &rest[open..end],
            path: after_open[..close].trim(),
        });
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        pieces.push(Piece::Literal(rest));
    }
    pieces
}

/// Lists the paths referenced by a template, in order of appearance.
pub fn variables(text: &str) -> Vec<&str> {
    scan(text)
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Token { path, .. } => Some(path),
            Piece::Literal(_) => None,
        })
        .collect()
}
