use super::scanner::{Piece, scan};
use crate::path::PathResolver;
use crate::value::Value;
use serde::Serialize;

/// How a template should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Split into spans for a presentation layer to colour.
    Highlight,
    /// Replace every resolvable token with its value.
    Substitute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpanKind {
    Literal,
    Variable,
}

/// A run of highlighted template text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
    /// Always `true` for literals; for variables, whether the path resolved.
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedOutput {
    Highlighted(Vec<Span>),
    Substituted(String),
}

impl RenderedOutput {
    /// The rendered text. For highlighted output this is the original text.
    pub fn text(&self) -> String {
        match self {
            RenderedOutput::Highlighted(spans) => spans.iter().map(|s| s.text.as_str()).collect(),
            RenderedOutput::Substituted(text) => text.clone(),
        }
    }
}

/// A substituted template together with how many of its tokens resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    pub tokens: usize,
    pub resolved: usize,
}

impl Substitution {
    /// Whether every token in the template resolved.
    pub fn fully_resolved(&self) -> bool {
        self.resolved == self.tokens
    }
}

/// Renders templates against a path resolver. Rendering is a single pass: text produced
/// by a resolved value is never scanned for further tokens.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRenderer<'a> {
    resolver: PathResolver<'a>,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(resolver: PathResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn render(&self, text: &str, mode: RenderMode) -> RenderedOutput {
        match mode {
            RenderMode::Highlight => RenderedOutput::Highlighted(self.highlight(text)),
            RenderMode::Substitute => RenderedOutput::Substituted(self.substitute(text).text),
        }
    }

    /// Replaces resolved tokens with their value; unresolved tokens stay verbatim.
    pub fn substitute(&self, text: &str) -> Substitution {
        let mut out = String::with_capacity(text.len());
        let mut tokens = 0;
        let mut resolved = 0;

        for piece in scan(text) {
            match piece {
                Piece::Literal(literal) => out.push_str(literal),
                Piece::Token { raw, path } => {
                    tokens += 1;
                    match self.resolver.resolve(path).value {
                        Some(value) => {
                            resolved += 1;
                            out.push_str(&value.to_template_text());
                        }
                        None => out.push_str(raw),
                    }
                }
            }
        }

        Substitution {
            text: out,
            tokens,
            resolved,
        }
    }

    /// The resolved value of a template made of a single token, such as `{{A.note}}`.
    /// Returns `None` for mixed text, literals and unresolved tokens.
    pub fn sole_value(&self, text: &str) -> Option<Value> {
        match scan(text.trim()).as_slice() {
            [Piece::Token { path, .. }] => self.resolver.resolve(path).value,
            _ => None,
        }
    }

    /// Splits the text into literal and variable spans without altering it.
    pub fn highlight(&self, text: &str) -> Vec<Span> {
        scan(text)
            .into_iter()
            .map(|piece| match piece {
                Piece::Literal(literal) => Span {
                    kind: SpanKind::Literal,
                    text: literal.to_string(),
                    exists: true,
                },
                Piece::Token { raw, path } => Span {
                    kind: SpanKind::Variable,
                    text: raw.to_string(),
                    exists: self.resolver.resolve(path).exists,
                },
            })
            .collect()
    }
}
