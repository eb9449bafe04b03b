//! Command-line deductive theorem prover

use std::env;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use verily::{latex, proof_to_ast, Session, SessionConfig, SessionSummaryJson};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!(
        "+--------------------------------------------------+\n\
         |                     Verily                       |\n\
         +--------------------------------------------------+\n\
         A deductive theorem prover. MIT License, 2025-2026. \n\
         \n \
         CLI flag       | Default | Meaning                 \n\
         ----------------|---------|-------------------------\n \
         --help         |         | Prints this text        \n \
         --debug        | false   | Toggles debug mode      \n \
         --alternate    | false   | Toggles alternation     \n \
         --pass_limit N | 64      | Sets the depth limit    \n \
         --latex        | false   | Prints latex to file    \n \
         --json         | false   | Prints proofs as JSON   \n\
         \n\
         You can give it a filepath as an argument, in which \n\
         case that file will be analyzed. If no filepath is  \n\
         provided, it will read from stdin in a REPL         \n\
         interface.                                          \n\
         \n\
         Version {}",
        VERSION
    );
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut config = SessionConfig::default();
    let mut time = false;
    let mut print_latex = false;
    let mut print_json = false;
    let mut file: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--debug" => config.debug = !config.debug,
            "--alternate" => config.enable_alternation = !config.enable_alternation,
            "--pass_limit" => {
                i += 1;
                let value = match args.get(i) {
                    Some(v) => v,
                    None => {
                        eprintln!("--pass_limit needs a value");
                        process::exit(2);
                    }
                };
                match value.parse::<usize>() {
                    Ok(n) => config.pass_limit = n,
                    Err(_) => {
                        eprintln!("Invalid pass limit '{}'", value);
                        process::exit(2);
                    }
                }
            }
            "--time" => time = !time,
            "--latex" => print_latex = !print_latex,
            "--json" => print_json = !print_json,
            "--help" => {
                print_help();
                process::exit(2);
            }
            other => file = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    let debug = config.debug;
    let mut session = Session::new(config);
    let mut elapsed = None;

    if let Some(path) = &file {
        let start = Instant::now();
        if let Err(e) = session.run_file(path) {
            eprintln!("ERROR: {}", e);
            process::exit(2);
        }
        if time {
            elapsed = Some(start.elapsed());
        }
    } else {
        if time {
            eprintln!("WARNING: Cannot time in CLI mode");
        }
        println!("Verily CLI mode: CTL+D / EOF to exit.");
        repl(&mut session, debug);
    }

    if debug {
        println!("All {} rules:", session.engine().rules().len());
        for (i, rule) in session.engine().rules().iter().enumerate() {
            println!(" {} {}", i, rule);
        }
        println!("\nAll {} theorems:", session.engine().known().len());
        for thm in session.engine().known() {
            println!(" {} {}", thm.index, thm);
        }
    }

    for &index in &session.proven_theorems {
        match proof_to_ast(session.engine(), index) {
            Ok(ast) => println!("{}\n", ast),
            Err(e) => {
                eprintln!("ERROR: {}", e);
                process::exit(2);
            }
        }
    }

    if let Some(elapsed) = elapsed {
        let n_theorems = session.engine().known().len();
        println!("Took {}ms", elapsed.as_secs_f64() * 1_000.0);
        println!("Total theorems: {}", n_theorems);
        println!(
            "Mean theorems per second: {}",
            n_theorems as f64 / elapsed.as_secs_f64()
        );
    }

    if print_latex {
        let tex_path = match &file {
            Some(path) => format!("{}.tex", path.display()),
            None => "verily_repl.tex".to_string(),
        };
        let result = File::create(&tex_path)
            .map_err(verily::VerilyError::from)
            .and_then(|mut f| latex::write_latex(&mut f, &session));
        if let Err(e) = result {
            eprintln!("Failed to write latex file: {}", e);
            process::exit(2);
        }
    }

    if print_json {
        match SessionSummaryJson::from_session(&session)
            .map(|summary| serde_json::to_string_pretty(&summary))
        {
            Ok(Ok(text)) => println!("{}", text),
            Ok(Err(e)) => {
                eprintln!("Failed to serialize session: {}", e);
                process::exit(2);
            }
            Err(e) => {
                eprintln!("ERROR: {}", e);
                process::exit(2);
            }
        }
    }

    if session.saw_error {
        process::exit(1);
    }
}

/// Read statements from stdin, executing each once its terminating ';'
/// arrives. Fatal statement errors are reported and the session continues.
fn repl(session: &mut Session, debug: bool) {
    let stdin = io::stdin();
    let mut cur_statement = String::new();

    print!("> ");
    let _ = io::stdout().flush();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if !cur_statement.is_empty() {
            cur_statement.push('\n');
        }
        cur_statement.push_str(&line);

        if cur_statement.trim_end().ends_with(';') {
            if debug {
                println!("Processing CLI statement {}", cur_statement);
            }
            if let Err(e) = session.run_text(&cur_statement, Path::new("")) {
                eprintln!("ERROR: {}", e);
            }
            cur_statement.clear();
        }

        print!("> ");
        let _ = io::stdout().flush();
    }

    if !cur_statement.is_empty() {
        eprintln!("WARNING: Discarding partial statement {}", cur_statement);
    }
}
