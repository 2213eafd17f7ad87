use std::io::{self, Write};

mod calc;
mod error;
mod stack;

use calc::Calculator;

fn main() {
    loop {
        let mut input = String::new();

        print!("> ");
        io::stdout().flush().unwrap();

        match io::stdin().read_line(&mut input) {
            Ok(count) if count == 0 => {
                break;
            }
            Ok(_) => {
                let line = input.trim();
                if line.is_empty() {
                    continue;
                }
                // no dictionary persists between lines
                match Calculator::new().evaluate(line) {
                    Ok(stack) => {
                        println!("{:?} ok", stack);
                    }
                    Err(msg) => {
                        println!("error: {}", msg);
                    }
                }
            }
            Err(msg) => {
                println!("error: {}", msg);
                break;
            }
        }
    }
}
