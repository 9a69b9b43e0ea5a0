use descent::Value;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[allow(dead_code)]
pub fn value(args: Vec<Value>) -> Value {
    args.into_iter().next().unwrap_or_default()
}

#[allow(dead_code)]
pub fn int(value: &Value) -> i64 {
    value.to_integer().unwrap_or_default()
}

#[allow(dead_code)]
pub fn addition(args: Vec<Value>) -> Value {
    Value::Integer(int(&args[0]) + int(&args[2]))
}

#[allow(dead_code)]
pub fn subtraction(args: Vec<Value>) -> Value {
    Value::Integer(int(&args[0]) - int(&args[2]))
}

#[allow(dead_code)]
pub fn concat(args: Vec<Value>) -> Value {
    Value::String(args.iter().map(Value::text).collect())
}
