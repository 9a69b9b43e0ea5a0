use clap::Parser as _;
use descent::{Error, Grammar, GrammarError, Parser, ParserConfig, Symbol, Value};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Evaluate integer arithmetic with a grammar built on descent.
#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Expressions to evaluate, e.g. "2 * (3 + 4)"
    #[arg(required = true)]
    expressions: Vec<String>,

    /// Path to a JSON parser config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Operators live in their own grammar and are referenced as `:ops:addop`.
fn operators() -> Grammar {
    let mut ops = Grammar::new("ops");
    ops.expression("addop").rule(["+"]).rule(["-"]);
    ops.expression("mulop").rule(["*"]).rule(["/"]);
    ops
}

fn calculator() -> Result<Grammar, GrammarError> {
    let mut grammar = Grammar::new("calc");
    grammar.use_grammar(operators());

    grammar
        .expression("calc")
        .rule_map([":ws", ":sum", ":ws"], |args| args[1].clone());
    grammar
        .expression("sum")
        .rule_map([":product", ":sum_tail*"], fold);
    grammar
        .expression("sum_tail")
        .rule_map([":ws", ":ops:addop", ":ws", ":product"], |args| {
            Value::List(vec![args[1].clone(), args[3].clone()])
        });
    grammar
        .expression("product")
        .rule_map([":factor", ":product_tail*"], fold);
    grammar
        .expression("product_tail")
        .rule_map([":ws", ":ops:mulop", ":ws", ":factor"], |args| {
            Value::List(vec![args[1].clone(), args[3].clone()])
        });
    grammar
        .expression("factor")
        .rule_map(["(", ":ws", ":sum", ":ws", ")"], |args| args[2].clone())
        .rule_map([":number"], |args| args[0].clone());
    grammar.expression("number").rule_map(
        [Symbol::literal("-").lenient(), Symbol::pattern(r"\d+")?],
        |args| {
            let digits = args[1].text();
            let magnitude: Option<i64> = digits.parse().ok();
            match (args[0].is_null(), magnitude) {
                (true, Some(n)) => Value::Integer(n),
                (false, Some(n)) => Value::Integer(-n),
                (_, None) => Value::Null,
            }
        },
    );
    grammar.expression("ws").rule([Symbol::pattern(r"\s*")?]);
    Ok(grammar)
}

/// Folds `first (op operand)*` left to right. Overflow and division by zero yield
/// `Null`, which poisons the rest of the fold.
fn fold(args: Vec<Value>) -> Value {
    let mut acc = args[0].as_integer();
    for pair in args[1].as_list().unwrap_or_default() {
        let Some([op, operand]) = pair.as_list().map(|p| [&p[0], &p[1]]) else {
            return Value::Null;
        };
        acc = match (acc, operand.as_integer()) {
            (Some(a), Some(b)) => match op.as_str() {
                Some("+") => a.checked_add(b),
                Some("-") => a.checked_sub(b),
                Some("*") => a.checked_mul(b),
                Some("/") => a.checked_div(b),
                _ => None,
            },
            _ => None,
        };
    }
    acc.map_or(Value::Null, Value::Integer)
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => ParserConfig::from_file(path)?,
        None => ParserConfig::default().with_full_match(true),
    };
    info!("config loaded.");
    debug!("config: {:?}", config);

    let grammar = calculator()?;
    let mut parser = Parser::with_config(&grammar, config);

    for expression in &cli.expressions {
        match parser.parse(expression)? {
            Some(Value::Integer(n)) => println!("{} = {}", expression, n),
            Some(_) => println!("{} = undefined", expression),
            None => println!("{}: no match", expression),
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> Option<Value> {
        let grammar = calculator().unwrap();
        let mut parser =
            Parser::with_config(&grammar, ParserConfig::default().with_full_match(true));
        parser.parse(input).unwrap()
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(eval("2+3*4"), Some(Value::Integer(14)));
        assert_eq!(eval("10 - 4 - 3"), Some(Value::Integer(3)));
        assert_eq!(eval(" 2 * (3 + 4) "), Some(Value::Integer(14)));
        assert_eq!(eval("-6/3"), Some(Value::Integer(-2)));
    }

    #[test]
    fn test_rejects_garbage_and_division_by_zero() {
        assert_eq!(eval("2+"), None);
        assert_eq!(eval("abc"), None);
        assert_eq!(eval("1/0"), Some(Value::Null));
    }
}
