//! Reference resolution across grammar boundaries.
//!
//! An unqualified reference is looked up in the active grammar. A qualified
//! reference (`:nested:operator`) is looked up in the imported grammar, which then
//! becomes the active grammar for everything matched beneath it.

use tracing::debug;

use crate::grammar::{Expression, Grammar, Reference};
use crate::GrammarError;

/// Target of a reference together with the grammar its rules resolve in.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'g> {
    pub grammar: &'g Grammar,
    pub expression: &'g Expression,
}

pub fn resolve<'g>(
    reference: &Reference,
    active: &'g Grammar,
    referenced_from: &str,
) -> Result<Resolved<'g>, GrammarError> {
    let grammar = match &reference.grammar {
        None => active,
        Some(name) => match active.import(name) {
            Some(imported) => imported,
            None if name == active.name() => active,
            None => {
                debug!(
                    grammar = %name,
                    active = %active.name(),
                    referenced_from,
                    "unresolved sub-grammar"
                );
                return Err(GrammarError::UnknownGrammar {
                    grammar: name.clone(),
                    active: active.name().to_string(),
                    referenced_from: referenced_from.to_string(),
                });
            }
        },
    };

    let expression = grammar
        .get_expression(&reference.expression)
        .ok_or_else(|| {
            debug!(
                expression = %reference.expression,
                grammar = %grammar.name(),
                referenced_from,
                "unresolved expression"
            );
            GrammarError::UnknownExpression {
                expression: reference.expression.clone(),
                grammar: grammar.name().to_string(),
                referenced_from: referenced_from.to_string(),
            }
        })?;

    Ok(Resolved {
        grammar,
        expression,
    })
}
