use condex::{Compound, Context};

fn main() {
    pretty_env_logger::init();

    let mut ctx = Context::new();
    ctx.set("price", 120.0);
    ctx.set("volume", 3000_i64);

    let expression = "(price > 50) && (volume < 5000)";
    let compound = Compound::parse(expression).expect("failed to parse");

    // the parsed tree is immutable; re-evaluate it against changing contexts
    match compound.eval(&ctx) {
        Ok(result) => println!("{} -> {}", expression, result),
        Err(err) => println!("Error: {}", err),
    }

    ctx.set("volume", 9000_i64);
    match compound.eval(&ctx) {
        Ok(result) => println!("{} -> {}", expression, result),
        Err(err) => println!("Error: {}", err),
    }
}
