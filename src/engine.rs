use crate::builtins::BuiltinRegistry;
use crate::condition::{Condition, ConditionEvaluator};
use crate::config::{EngineConfig, NodeConfig};
use crate::error::ConfigError;
use crate::path::{PathResolver, ResolutionResult};
use crate::router::{ConditionSet, ConditionSetOutcome, RoutingDecision, RuleSet};
use crate::template::{RenderMode, RenderedOutput, Span, TemplateRenderer};
use crate::trace::ConditionTrace;
use crate::value::{InputContext, Value};

/// Resolves paths, renders templates and routes nodes against input contexts.
///
/// An `Engine` holds no per-evaluation state. It can be shared across threads and used
/// for any number of contexts.
#[derive(Debug, Default)]
pub struct Engine {
    builtins: BuiltinRegistry,
    config: EngineConfig,
}

/// Builder for an [`Engine`].
pub struct EngineBuilder {
    builtins: BuiltinRegistry,
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            builtins: BuiltinRegistry::default(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers an additional built-in variable, or replaces an existing one.
    pub fn with_builtin<F>(mut self, name: &str, provider: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.builtins.register(name, provider);
        self
    }

    /// Starts from an empty registry, dropping `now`.
    pub fn without_default_builtins(mut self) -> Self {
        self.builtins = BuiltinRegistry::empty();
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            builtins: self.builtins,
            config: self.config,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    fn resolver<'a>(&'a self, ctx: &'a InputContext) -> PathResolver<'a> {
        PathResolver::new(ctx, &self.builtins)
    }

    fn renderer<'a>(&'a self, ctx: &'a InputContext) -> TemplateRenderer<'a> {
        TemplateRenderer::new(self.resolver(ctx))
    }

    fn evaluator<'a>(&'a self, ctx: &'a InputContext) -> ConditionEvaluator<'a> {
        ConditionEvaluator::new(self.renderer(ctx), &self.config)
    }

    pub fn resolve_path(&self, path: &str, ctx: &InputContext) -> ResolutionResult {
        self.resolver(ctx).resolve(path)
    }

    pub fn render_template(
        &self,
        text: &str,
        ctx: &InputContext,
        mode: RenderMode,
    ) -> RenderedOutput {
        self.renderer(ctx).render(text, mode)
    }

    /// Shorthand for [`RenderMode::Substitute`].
    pub fn substitute(&self, text: &str, ctx: &InputContext) -> String {
        self.renderer(ctx).substitute(text).text
    }

    /// Shorthand for [`RenderMode::Highlight`].
    pub fn highlight(&self, text: &str, ctx: &InputContext) -> Vec<Span> {
        self.renderer(ctx).highlight(text)
    }

    pub fn evaluate_condition(&self, condition: &Condition, ctx: &InputContext) -> bool {
        self.trace_condition(condition, ctx).passed()
    }

    /// Evaluates one condition and returns the full trace.
    pub fn trace_condition(&self, condition: &Condition, ctx: &InputContext) -> ConditionTrace {
        self.evaluator(ctx).evaluate(condition)
    }

    /// Evaluates an If-node. Fails only when the set has no conditions.
    pub fn evaluate_condition_set(
        &self,
        set: &ConditionSet,
        ctx: &InputContext,
    ) -> Result<bool, ConfigError> {
        self.explain_condition_set(set, ctx).map(|outcome| outcome.passed)
    }

    pub fn explain_condition_set(
        &self,
        set: &ConditionSet,
        ctx: &InputContext,
    ) -> Result<ConditionSetOutcome, ConfigError> {
        set.evaluate(&self.evaluator(ctx))
    }

    /// Routes a Switch-node, returning the chosen output name. Fails only when the set
    /// has no rules.
    pub fn evaluate_rule_set(
        &self,
        set: &RuleSet,
        ctx: &InputContext,
    ) -> Result<String, ConfigError> {
        self.route(set, ctx).map(|decision| decision.output_name)
    }

    pub fn route(&self, set: &RuleSet, ctx: &InputContext) -> Result<RoutingDecision, ConfigError> {
        set.route(&self.evaluator(ctx))
    }

    /// Evaluates any node configuration. If-nodes route to `"true"` or `"false"`.
    pub fn route_node(
        &self,
        node: &NodeConfig,
        ctx: &InputContext,
    ) -> Result<RoutingDecision, ConfigError> {
        match node {
            NodeConfig::Switch(set) => self.route(set, ctx),
            NodeConfig::If(set) => {
                let outcome = self.explain_condition_set(set, ctx)?;
                Ok(RoutingDecision {
                    output_name: outcome.passed.to_string(),
                    matched_rule: None,
                    traces: outcome.traces,
                    reason: outcome.reason,
                })
            }
        }
    }
}
