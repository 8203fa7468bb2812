mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod parser;
mod value;

use config::{WELCOME_MESSAGE, WELCOME_SUBTITLE};
use env::Environment;
use eval::eval;
use parser::parse;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

const HISTORY_FILE: &str = ".lissp_history";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = Environment::new();
    builtins::register_builtins(&env);

    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), rustyline::history::DefaultHistory> = Editor::with_config(config)
        .map_err(|e| format!("Failed to initialize REPL: {}", e))?;
    let _ = rl.load_history(HISTORY_FILE);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_SUBTITLE);

    loop {
        let readline = rl.readline("lissp> ");

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                match parse(&line) {
                    Ok(None) => continue,
                    Ok(Some(expr)) => {
                        let result = eval(&env, expr);
                        println!("{}", result);
                    }
                    Err(e) => {
                        eprintln!("{}", e);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);

    Ok(())
}
