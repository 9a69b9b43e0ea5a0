//! # Symbols
//!
//! A [`Symbol`] is one matching unit of a rule. Its [`SymbolKind`] decides *what* is
//! matched (a literal, a single-character pattern or another expression), while the
//! orthogonal [`Quantifier`] and [`Lookahead`] flags decide *how often* and whether the
//! match consumes input.
//!
//! ## Notation
//!
//! Strings convert into symbols the way grammar authors write them:
//!
//! ```text
//! ":numb"            reference to `numb` in the active grammar
//! ":nested:operator" reference to `operator` in the imported grammar `nested`
//! ":numb+"           reference, one or more
//! "!:gt"             reference, assert without consuming
//! "&:sign"           reference, absorbed on failure
//! "word"             literal (anything that is not reference notation)
//! ```
//!
//! Patterns are built with [`Symbol::pattern`], whose source is a character class with
//! an optional trailing quantifier (`\d+`, `s?`, `[a-z]*`).

use core::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::GrammarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
pub enum Quantifier {
    #[default]
    #[strum(serialize = "")]
    One,
    #[strum(serialize = "*")]
    ZeroOrMore,
    #[strum(serialize = "+")]
    OneOrMore,
    #[strum(serialize = "?")]
    Optional,
}

impl Quantifier {
    pub fn is_repeating(self) -> bool {
        matches!(self, Quantifier::ZeroOrMore | Quantifier::OneOrMore)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
pub enum Lookahead {
    /// Plain symbol: consumes input and fails the rule on mismatch.
    #[default]
    #[strum(serialize = "")]
    Consume,
    /// `!`: must match, but the consumed span is given back.
    #[strum(serialize = "!")]
    Assert,
    /// `&`: a mismatch is absorbed; a match consumes as usual.
    #[strum(serialize = "&")]
    Lenient,
}

/// A compiled single-character class.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(class: &str) -> Result<Self, GrammarError> {
        if class.is_empty() {
            return Err(GrammarError::InvalidPattern {
                pattern: class.to_string(),
                message: "empty character class".to_string(),
            });
        }
        let regex = Regex::new(&format!("^(?:{})$", class)).map_err(|e| {
            GrammarError::InvalidPattern {
                pattern: class.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            source: class.to_string(),
            regex,
        })
    }

    pub fn matches(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.regex.is_match(c.encode_utf8(&mut buf))
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pattern(/{}/)", self.source)
    }
}

/// Pointer to an expression, optionally inside an imported grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub grammar: Option<String>,
    pub expression: String,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.grammar {
            Some(grammar) => write!(f, ":{}:{}", grammar, self.expression),
            None => write!(f, ":{}", self.expression),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Literal(String),
    Pattern(Pattern),
    Reference(Reference),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    kind: SymbolKind,
    quantifier: Quantifier,
    lookahead: Lookahead,
}

impl Symbol {
    fn new(kind: SymbolKind) -> Self {
        Self {
            kind,
            quantifier: Quantifier::default(),
            lookahead: Lookahead::default(),
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(SymbolKind::Literal(text.into()))
    }

    /// Builds a pattern symbol from a character class with an optional trailing
    /// quantifier, e.g. `\d+` or `s?`.
    pub fn pattern(source: &str) -> Result<Self, GrammarError> {
        let (class, quantifier) = split_quantifier(source);
        Ok(Self::new(SymbolKind::Pattern(Pattern::new(class)?)).quantified(quantifier))
    }

    pub fn reference(expression: impl Into<String>) -> Self {
        Self::new(SymbolKind::Reference(Reference {
            grammar: None,
            expression: expression.into(),
        }))
    }

    pub fn qualified(grammar: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::new(SymbolKind::Reference(Reference {
            grammar: Some(grammar.into()),
            expression: expression.into(),
        }))
    }

    pub fn quantified(mut self, quantifier: Quantifier) -> Self {
        self.quantifier = quantifier;
        self
    }

    pub fn zero_or_more(self) -> Self {
        self.quantified(Quantifier::ZeroOrMore)
    }

    pub fn one_or_more(self) -> Self {
        self.quantified(Quantifier::OneOrMore)
    }

    pub fn optional(self) -> Self {
        self.quantified(Quantifier::Optional)
    }

    pub fn with_lookahead(mut self, lookahead: Lookahead) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// `!`: require a match without consuming it.
    pub fn assert(self) -> Self {
        self.with_lookahead(Lookahead::Assert)
    }

    /// `&`: let the rule continue when this symbol fails.
    pub fn lenient(self) -> Self {
        self.with_lookahead(Lookahead::Lenient)
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    pub fn lookahead(&self) -> Lookahead {
        self.lookahead
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match &self.kind {
            SymbolKind::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Parses reference notation (`[!&]?:(grammar:)?name[*+?]?`).
    fn parse_reference(s: &str) -> Option<Self> {
        let (lookahead, rest) = match s.chars().next() {
            Some(c @ ('!' | '&')) => (Lookahead::from_str(&c.to_string()).ok()?, &s[1..]),
            _ => (Lookahead::Consume, s),
        };
        let rest = rest.strip_prefix(':')?;
        let (body, quantifier) = match rest.chars().last() {
            Some(c @ ('*' | '+' | '?')) => (
                &rest[..rest.len() - 1],
                Quantifier::from_str(&c.to_string()).ok()?,
            ),
            _ => (rest, Quantifier::One),
        };

        let mut parts = body.split(':');
        let first = parts.next().filter(|p| is_name(p))?;
        let second = parts.next();
        if parts.next().is_some() {
            return None;
        }
        let symbol = match second {
            Some(name) if is_name(name) => Self::qualified(first, name),
            Some(_) => return None,
            None => Self::reference(first),
        };
        Some(symbol.quantified(quantifier).with_lookahead(lookahead))
    }
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Splits an unescaped trailing `*`, `+` or `?` off a pattern source.
fn split_quantifier(source: &str) -> (&str, Quantifier) {
    let Some(last) = source.chars().last() else {
        return (source, Quantifier::One);
    };
    let body = &source[..source.len() - last.len_utf8()];
    let escapes = body.chars().rev().take_while(|c| *c == '\\').count();
    if escapes % 2 == 1 || body.is_empty() {
        return (source, Quantifier::One);
    }
    match Quantifier::from_str(&last.to_string()) {
        Ok(quantifier) if quantifier != Quantifier::One => (body, quantifier),
        _ => (source, Quantifier::One),
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::parse_reference(s).unwrap_or_else(|| Self::literal(s))
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Reference> for Symbol {
    fn from(reference: Reference) -> Self {
        Self::new(SymbolKind::Reference(reference))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.lookahead)?;
        match &self.kind {
            SymbolKind::Literal(text) => write!(f, "{:?}", text)?,
            SymbolKind::Pattern(pattern) => write!(f, "/{}/", pattern.source())?,
            SymbolKind::Reference(reference) => write!(f, "{}", reference)?,
        }
        write!(f, "{}", self.quantifier)
    }
}
