use core::fmt;
use std::ops::Range;
use std::sync::Arc;

use super::{Expression, Grammar, Symbol};
use crate::Value;

/// Callback turning the values matched by a rule into the rule's result.
///
/// It receives exactly one value per symbol, in symbol order. Lookahead symbols
/// contribute `Value::Null`.
pub type Transform = Arc<dyn Fn(Vec<Value>, &MatchContext<'_>) -> Value + Send + Sync>;

/// Read-only view of the frame a transform runs in.
#[derive(Debug, Clone)]
pub struct MatchContext<'a> {
    /// Grammar unqualified references resolve in for this frame.
    pub grammar: &'a Grammar,
    pub expression: &'a Expression,
    pub rule: &'a Rule,
    /// Last symbol evaluated by the rule.
    pub symbol: Option<&'a Symbol>,
    pub input: &'a str,
    /// Byte range consumed by the rule.
    pub span: Range<usize>,
}

impl<'a> MatchContext<'a> {
    pub fn matched_text(&self) -> &'a str {
        &self.input[self.span.clone()]
    }
}

/// One alternative of an expression.
#[derive(Clone)]
pub struct Rule {
    symbols: Vec<Symbol>,
    transform: Option<Transform>,
}

impl Rule {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            transform: None,
        }
    }

    pub fn with_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec<Value>, &MatchContext<'_>) -> Value + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(f));
        self
    }

    /// Like [`Rule::with_transform`] for callbacks that ignore the context.
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        self.with_transform(move |args, _| f(args))
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    /// Runs the transform, or yields the consumed input text when there is none.
    pub(crate) fn apply(&self, args: Vec<Value>, context: &MatchContext<'_>) -> Value {
        match &self.transform {
            Some(transform) => transform(args, context),
            None => Value::String(context.matched_text().to_string()),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Rule")
            .field("symbols", &self.symbols)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbols: Vec<String> = self.symbols.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", symbols.join(", "))
    }
}
