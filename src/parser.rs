//! # Parser Session
//!
//! A [`Parser`] binds one [`Grammar`] to a cursor over an input string. Each call to
//! [`Parser::parse`] matches the grammar's root expression against a prefix of the
//! input and then resets the session, so one session can serve many inputs:
//!
//! ```ignore
//! let mut parser = Parser::new(&grammar);
//! assert_eq!(parser.parse("1+2")?, Some(Value::Integer(3)));
//! assert_eq!(parser.parse("nope")?, None);
//! ```
//!
//! Sessions are not reentrant. The grammar is only borrowed, so any number of
//! sessions, on any number of threads, may share it.

use tracing::{instrument, trace};

use crate::config::ParserConfig;
use crate::grammar::{Expression, Grammar, Rule, Symbol};
use crate::{EngineResult, GrammarError, Value};

#[derive(Debug)]
pub struct Parser<'g> {
    pub(crate) grammar: &'g Grammar,
    pub(crate) config: ParserConfig,
    pub(crate) input: String,
    pub(crate) cursor: usize,
    pub(crate) depth: usize,
    pub(crate) expression: Option<&'g Expression>,
    pub(crate) rule: Option<&'g Rule>,
    pub(crate) symbol: Option<&'g Symbol>,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self::with_config(grammar, ParserConfig::default())
    }

    pub fn with_config(grammar: &'g Grammar, config: ParserConfig) -> Self {
        Self {
            grammar,
            config,
            input: String::new(),
            cursor: 0,
            depth: 0,
            expression: None,
            rule: None,
            symbol: None,
        }
    }

    /// Matches the root expression against a prefix of `input`.
    ///
    /// Returns `Ok(None)` when no rule of the root expression matches and `Err` when
    /// the grammar itself is broken. The session is reset on every path.
    #[instrument(level = "debug", skip(self, input), fields(grammar = %self.grammar.name(), len = input.len()))]
    pub fn parse(&mut self, input: &str) -> EngineResult<Option<Value>> {
        self.reset();
        self.input.clear();
        self.input.push_str(input);

        let result = self.parse_root();
        trace!(
            matched = matches!(result, Ok(Some(_))),
            cursor = self.cursor,
            "parse finished"
        );
        self.reset();
        result
    }

    fn parse_root(&mut self) -> EngineResult<Option<Value>> {
        let grammar = self.grammar;
        let root = grammar.root().ok_or_else(|| GrammarError::MissingRoot {
            grammar: grammar.name().to_string(),
        })?;

        let result = self.match_expression(root, grammar)?;
        if self.config.require_full_match && result.is_some() && self.cursor < self.input.len() {
            trace!(
                cursor = self.cursor,
                len = self.input.len(),
                "rejecting partial match"
            );
            return Ok(None);
        }
        Ok(result)
    }

    /// Rewinds the cursor and forgets the transient match context.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.depth = 0;
        self.expression = None;
        self.rule = None;
        self.symbol = None;
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_expression(&self) -> Option<&'g Expression> {
        self.expression
    }

    pub fn current_rule(&self) -> Option<&'g Rule> {
        self.rule
    }

    pub fn current_symbol(&self) -> Option<&'g Symbol> {
        self.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn digits() -> Grammar {
        let mut grammar = Grammar::new("numbers");
        grammar
            .expression("numbers")
            .rule([Symbol::pattern(r"\d+").unwrap()]);
        grammar
    }

    #[test]
    fn test_parse_resets_on_success_and_failure() {
        let grammar = digits();
        let mut parser = Parser::new(&grammar);

        assert_eq!(parser.parse("42abc").unwrap(), Some(Value::from("42")));
        assert_eq!(parser.cursor(), 0);
        assert!(parser.current_expression().is_none());
        assert!(parser.current_rule().is_none());
        assert!(parser.current_symbol().is_none());

        assert_eq!(parser.parse("abc").unwrap(), None);
        assert_eq!(parser.cursor(), 0);
        assert_eq!(parser.input(), "abc");
    }

    #[test]
    fn test_reset_is_idempotent() {
        let grammar = digits();
        let mut parser = Parser::new(&grammar);
        parser.reset();
        parser.reset();
        assert_eq!(parser.cursor(), 0);
    }

    #[test]
    fn test_require_full_match() {
        let grammar = digits();
        let mut parser = Parser::with_config(&grammar, ParserConfig::default().with_full_match(true));
        assert_eq!(parser.parse("42abc").unwrap(), None);
        assert_eq!(parser.parse("42").unwrap(), Some(Value::from("42")));
    }

    #[test]
    fn test_missing_root() {
        let grammar = Grammar::new("empty");
        let mut parser = Parser::new(&grammar);
        let err = parser.parse("x").unwrap_err();
        assert!(matches!(
            err,
            Error::Grammar(GrammarError::MissingRoot { ref grammar }) if grammar == "empty"
        ));
        assert_eq!(parser.cursor(), 0);
    }
}
