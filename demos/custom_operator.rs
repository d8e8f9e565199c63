use condex::{Compound, Context, EvalError, Registry, Value};

fn main() {
    pretty_env_logger::init();

    // extend the built-in set with a domain-specific comparison
    let registry = Registry::default();
    registry
        .register("contains", |left, right| match (left, right) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Bool(a.contains(b.as_str()))),
            _ => Err(EvalError::TypeMismatch {
                left: left.type_name(),
                symbol: "contains".to_string(),
                right: right.type_name(),
            }),
        })
        .expect("symbol is free");

    let mut ctx = Context::new();
    ctx.set("subject", "alert: disk almost full");

    let compound =
        Compound::parse_with("subject contains 'disk'", &registry).expect("failed to parse");
    match compound.eval(&ctx) {
        Ok(result) => println!("-> {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
