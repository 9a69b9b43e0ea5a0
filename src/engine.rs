//! # Matching Engine
//!
//! The recursive `match_expression → match_rule → match_symbol` cycle behind
//! [`Parser::parse`].
//!
//! Every level reports `Ok(Some(value))` on success and `Ok(None)` on a match
//! failure, and a failing level leaves the cursor exactly where it found it. `Err` is
//! reserved for broken grammars and is never backtracked.
//!
//! The active grammar travels as an explicit argument: crossing a qualified
//! reference hands the imported grammar down to the nested frame only.
//!
//! Left recursion is not detected. A left-recursive grammar recurses until
//! [`ParserConfig::max_depth`](crate::ParserConfig) (when set) or the stack runs out.

use tracing::trace;

use crate::grammar::{
    Expression, Grammar, Lookahead, MatchContext, Quantifier, Rule, Symbol, SymbolKind,
};
use crate::parser::Parser;
use crate::resolver::{self, Resolved};
use crate::{EngineResult, GrammarError, Value};

impl<'g> Parser<'g> {
    /// Tries the rules of `expression` in order and commits to the first match.
    pub(crate) fn match_expression(
        &mut self,
        expression: &'g Expression,
        grammar: &'g Grammar,
    ) -> EngineResult<Option<Value>> {
        self.depth += 1;
        if let Some(limit) = self.config.max_depth {
            if self.depth > limit {
                return Err(GrammarError::DepthExceeded {
                    limit,
                    expression: expression.name().to_string(),
                }
                .into());
            }
        }

        let saved = (self.expression, self.rule, self.symbol);
        self.expression = Some(expression);

        let mut result = Ok(None);
        for rule in expression.rules() {
            match self.match_rule(rule, expression, grammar) {
                Ok(None) => continue,
                other => {
                    result = other;
                    break;
                }
            }
        }

        if matches!(result, Ok(None)) {
            trace!(
                expression = expression.name(),
                grammar = grammar.name(),
                cursor = self.cursor,
                "no rule matched"
            );
        }

        (self.expression, self.rule, self.symbol) = saved;
        self.depth -= 1;
        result
    }

    fn match_rule(
        &mut self,
        rule: &'g Rule,
        expression: &'g Expression,
        grammar: &'g Grammar,
    ) -> EngineResult<Option<Value>> {
        let start = self.cursor;
        self.rule = Some(rule);
        let mut args = Vec::with_capacity(rule.symbols().len());

        for symbol in rule.symbols() {
            let before = self.cursor;
            self.symbol = Some(symbol);

            match (self.match_symbol(symbol, expression, grammar)?, symbol.lookahead()) {
                (None, Lookahead::Lenient) => {
                    self.cursor = before;
                    args.push(Value::Null);
                }
                (None, _) => {
                    trace!(
                        expression = expression.name(),
                        rule = %rule,
                        failed = %symbol,
                        from = self.cursor,
                        to = start,
                        "backtrack"
                    );
                    self.cursor = start;
                    return Ok(None);
                }
                (Some(_), Lookahead::Assert) => {
                    self.cursor = before;
                    args.push(Value::Null);
                }
                (Some(value), _) => args.push(value),
            }
        }

        let context = MatchContext {
            grammar,
            expression,
            rule,
            symbol: rule.symbols().last(),
            input: &self.input,
            span: start..self.cursor,
        };
        let value = rule.apply(args, &context);
        trace!(
            expression = expression.name(),
            rule = %rule,
            span = ?context.span,
            "rule matched"
        );
        Ok(Some(value))
    }

    fn match_symbol(
        &mut self,
        symbol: &'g Symbol,
        expression: &'g Expression,
        grammar: &'g Grammar,
    ) -> EngineResult<Option<Value>> {
        let quantifier = symbol.quantifier();
        let result = match symbol.kind() {
            SymbolKind::Literal(text) => self.match_text(quantifier, |rest| {
                rest.starts_with(text.as_str()).then_some(text.len())
            }),
            SymbolKind::Pattern(pattern) => self.match_text(quantifier, |rest| {
                rest.chars()
                    .next()
                    .filter(|c| pattern.matches(*c))
                    .map(char::len_utf8)
            }),
            SymbolKind::Reference(reference) => {
                let target = resolver::resolve(reference, grammar, expression.name())?;
                self.match_reference(quantifier, target)?
            }
        };

        trace!(
            symbol = %symbol,
            matched = result.is_some(),
            cursor = self.cursor,
            "symbol"
        );
        Ok(result)
    }

    /// Matches literal or pattern text. `step` returns the byte length of one
    /// occurrence at the start of the remaining input.
    fn match_text<F>(&mut self, quantifier: Quantifier, step: F) -> Option<Value>
    where
        F: Fn(&str) -> Option<usize>,
    {
        let start = self.cursor;
        let mut end = start;
        let mut count = 0usize;

        while let Some(len) = step(&self.input[end..]) {
            end += len;
            count += 1;
            if len == 0 || !quantifier.is_repeating() {
                break;
            }
        }

        match (count, quantifier) {
            (0, Quantifier::One | Quantifier::OneOrMore) => None,
            (0, Quantifier::Optional | Quantifier::ZeroOrMore) => {
                Some(Value::String(String::new()))
            }
            _ => {
                self.cursor = end;
                Some(Value::String(self.input[start..end].to_string()))
            }
        }
    }

    fn match_reference(
        &mut self,
        quantifier: Quantifier,
        target: Resolved<'g>,
    ) -> EngineResult<Option<Value>> {
        let Resolved {
            grammar,
            expression,
        } = target;

        match quantifier {
            Quantifier::One => self.match_expression(expression, grammar),
            Quantifier::Optional => Ok(Some(
                self.match_expression(expression, grammar)?
                    .unwrap_or_else(|| Value::String(String::new())),
            )),
            Quantifier::ZeroOrMore | Quantifier::OneOrMore => {
                let start = self.cursor;
                let mut items = Vec::new();
                loop {
                    let before = self.cursor;
                    match self.match_expression(expression, grammar)? {
                        Some(value) => {
                            items.push(value);
                            // a zero-width match would repeat forever
                            if self.cursor == before {
                                break;
                            }
                        }
                        None => break,
                    }
                }

                if items.is_empty() && quantifier == Quantifier::OneOrMore {
                    self.cursor = start;
                    return Ok(None);
                }
                Ok(Some(Value::List(items)))
            }
        }
    }
}
