//! # Grammar Model
//!
//! Static structure consumed by the matching engine:
//!
//! * [`Grammar`]: named table of expressions plus imported sub-grammars
//! * [`Expression`]: ordered choice over [`Rule`]s
//! * [`Rule`]: sequence of [`Symbol`]s with an optional transform
//! * [`Symbol`]: literal, pattern or reference, with quantifier and lookahead flags
//!
//! The builder methods mirror how grammars are authored:
//!
//! ```ignore
//! let mut grammar = Grammar::new("math");
//! grammar
//!     .expression("math")
//!     .rule_map([":numb", ":plus", ":numb"], addition)
//!     .rule_map([":numb", ":minus", ":numb"], subtraction);
//! grammar.expression("plus").rule(["+"]);
//! ```
//!
//! Nothing is validated here. Dangling references surface as
//! [`GrammarError`](crate::GrammarError)s when the engine reaches them.

mod rule;
mod symbol;

use std::collections::HashMap;

pub use rule::{MatchContext, Rule, Transform};
pub use symbol::{Lookahead, Pattern, Quantifier, Reference, Symbol, SymbolKind};

use crate::Value;

#[derive(Debug, Clone)]
pub struct Expression {
    name: String,
    rules: Vec<Rule>,
}

impl Expression {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn push_rule(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Adds a rule without a transform; it yields the text it consumed.
    pub fn rule<I, S>(&mut self, symbols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.push_rule(Rule::new(symbols))
    }

    pub fn rule_map<I, S, F>(&mut self, symbols: I, f: F) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        self.push_rule(Rule::new(symbols).map(f))
    }

    pub fn rule_with<I, S, F>(&mut self, symbols: I, f: F) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
        F: Fn(Vec<Value>, &MatchContext<'_>) -> Value + Send + Sync + 'static,
    {
        self.push_rule(Rule::new(symbols).with_transform(f))
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    root: Option<String>,
    expressions: HashMap<String, Expression>,
    imports: HashMap<String, Grammar>,
}

impl Grammar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: None,
            expressions: HashMap::new(),
            imports: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the expression called `name`, creating it if needed.
    ///
    /// The first expression created becomes the root unless [`Grammar::set_root`]
    /// says otherwise.
    pub fn expression(&mut self, name: &str) -> &mut Expression {
        if self.root.is_none() {
            self.root = Some(name.to_string());
        }
        self.expressions
            .entry(name.to_string())
            .or_insert_with(|| Expression::new(name))
    }

    /// Adds a fully built expression, replacing any expression of the same name.
    pub fn define(&mut self, expression: Expression) -> &mut Self {
        if self.root.is_none() {
            self.root = Some(expression.name().to_string());
        }
        self.expressions
            .insert(expression.name().to_string(), expression);
        self
    }

    pub fn set_root(&mut self, name: impl Into<String>) -> &mut Self {
        self.root = Some(name.into());
        self
    }

    /// Imports `grammar` under its own name, for `:name:expression` references.
    pub fn use_grammar(&mut self, grammar: Grammar) -> &mut Self {
        self.imports.insert(grammar.name.clone(), grammar);
        self
    }

    pub fn root_name(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn root(&self) -> Option<&Expression> {
        self.root
            .as_deref()
            .and_then(|name| self.expressions.get(name))
    }

    pub fn get_expression(&self, name: &str) -> Option<&Expression> {
        self.expressions.get(name)
    }

    pub fn import(&self, name: &str) -> Option<&Grammar> {
        self.imports.get(name)
    }

    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.expressions.values()
    }
}
