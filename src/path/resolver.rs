use super::{PathSegment, VariablePath};
use crate::builtins::BuiltinRegistry;
use crate::value::{InputContext, Value};
use tracing::debug;

/// Outcome of resolving a variable path.
///
/// `exists == false` always comes with `value == None`. A path that points at an
/// explicit `null` leaf resolves to `exists: true, value: Some(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolutionResult {
    pub exists: bool,
    pub value: Option<Value>,
}

impl ResolutionResult {
    pub fn found(value: Value) -> Self {
        Self {
            exists: true,
            value: Some(value),
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }
}

/// Resolves variable paths against an input context and the built-in registry.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    ctx: &'a InputContext,
    builtins: &'a BuiltinRegistry,
}

impl<'a> PathResolver<'a> {
    pub fn new(ctx: &'a InputContext, builtins: &'a BuiltinRegistry) -> Self {
        Self { ctx, builtins }
    }

    /// Parses and resolves `path`. Malformed paths resolve as missing.
    pub fn resolve(&self, path: &str) -> ResolutionResult {
        match VariablePath::parse(path) {
            Ok(parsed) => self.resolve_parsed(&parsed),
            Err(e) => {
                debug!(path, error = %e, "Unparseable variable path treated as missing");
                ResolutionResult::missing()
            }
        }
    }

    /// Resolves an already parsed path.
    pub fn resolve_parsed(&self, path: &VariablePath) -> ResolutionResult {
        let root = path.root();
        let result = if let Some(builtin) = self.builtins.resolve(root) {
            walk(&builtin, path.rest()).cloned()
        } else {
            self.ctx
                .get(root)
                .and_then(|node| walk(node, path.rest()))
                .cloned()
        };

        match result {
            Some(value) => ResolutionResult::found(value),
            None => {
                debug!(path = %path, "Variable path not found");
                ResolutionResult::missing()
            }
        }
    }
}

/// Follows `segments` down from `value`, stopping at the first segment that does not apply.
pub fn walk<'v>(value: &'v Value, segments: &[PathSegment]) -> Option<&'v Value> {
    segments
        .iter()
        .try_fold(value, |current, segment| match segment {
            PathSegment::Key(key) => current.get(key),
            PathSegment::Index(index) => current.get_index(*index),
        })
}
