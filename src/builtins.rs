//! Context-free variables such as `{{now}}`.
//!
//! Built-ins are looked up by the root segment of a path before the input context is
//! consulted, so a node can never shadow them.

use crate::value::Value;
use ahash::AHashMap;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::fmt;

/// Identifier of the current-time built-in.
pub const NOW: &str = "now";

/// Layout of the `now` built-in: `DD/MM/YYYY HH:MM:SS`, 24-hour clock.
pub const NOW_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// UTC offset of `Asia/Ho_Chi_Minh`. The zone has not observed daylight saving since 1975.
pub const HO_CHI_MINH_OFFSET_SECS: i32 = 7 * 3600;

type Provider = Box<dyn Fn() -> Value + Send + Sync>;

/// Registry of built-in variables, keyed by identifier.
pub struct BuiltinRegistry {
    providers: AHashMap<String, Provider>,
}

impl BuiltinRegistry {
    /// A registry with no built-ins at all.
    pub fn empty() -> Self {
        Self {
            providers: AHashMap::new(),
        }
    }

    /// Registers (or replaces) a built-in.
    pub fn register<F>(&mut self, name: impl Into<String>, provider: F)
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.providers.insert(name.into(), Box::new(provider));
    }

    /// Produces the current value of a built-in, or `None` if `name` is not reserved.
    pub fn resolve(&self, name: &str) -> Option<Value> {
        self.providers.get(name).map(|provider| provider())
    }

    /// Registered identifiers in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(NOW, || Value::String(format_now(Utc::now())));
        registry
    }
}

impl fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// The fixed offset every `now` value is expressed in.
pub fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(HO_CHI_MINH_OFFSET_SECS).unwrap_or(Utc.fix())
}

/// Formats an instant the way the `now` built-in renders it.
pub fn format_now(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&local_offset())
        .format(NOW_FORMAT)
        .to_string()
}
