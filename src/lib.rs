//! # descent: grammar-driven recursive-descent matching
//!
//! A grammar is a table of named expressions. Each expression is an ordered list of
//! alternative rules, and each rule is a sequence of symbols. Matching an input walks
//! that structure top-down with backtracking:
//!
//! ```text
//! Parser::parse → match_expression → match_rule → match_symbol
//!                        ↑                              │
//!                        └──────── references ──────────┘
//! ```
//!
//! ## Components
//!
//! * [`grammar`]: the static model (`Grammar`, `Expression`, `Rule`, `Symbol`) and the
//!   builder used to author it
//! * [`resolver`]: reference lookup across imported sub-grammars
//! * [`engine`]: ordered choice, quantifiers, lookahead and cursor rollback
//! * [`parser`]: the session owning input and cursor
//! * [`value`]: the dynamic result type handed to and returned by transforms
//! * [`config`] / [`error`]: session settings and the error types
//!
//! ## Example
//!
//! ```ignore
//! use descent::{Grammar, Parser, Symbol, Value};
//!
//! let mut grammar = Grammar::new("math");
//! grammar.expression("math").rule_map(
//!     [Symbol::pattern(r"\d+")?, "+".into(), Symbol::pattern(r"\d+")?],
//!     |args| Value::Integer(args[0].to_integer().unwrap_or(0) + args[2].to_integer().unwrap_or(0)),
//! );
//!
//! let mut parser = Parser::new(&grammar);
//! assert_eq!(parser.parse("2+3")?, Some(Value::Integer(5)));
//! ```
//!
//! ## Failure model
//!
//! A mismatch is `Ok(None)` and always leaves the cursor where the failing construct
//! started. A grammar that references something that does not exist yields
//! `Err(Error::Grammar(..))` and aborts the parse.

pub mod config;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod resolver;
pub mod value;

// Re-exports
pub use config::ParserConfig;
pub use error::*;
pub use grammar::{
    Expression, Grammar, Lookahead, MatchContext, Pattern, Quantifier, Reference, Rule, Symbol,
    SymbolKind, Transform,
};
pub use parser::Parser;
pub use value::Value;
