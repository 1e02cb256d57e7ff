//! Read an MPS file and solve it.
//!
//! ```text
//! cargo run --example read_mps -- path/to/model.mps
//! ```
//!
//! Without an argument a small built-in model is used. Set `RUST_LOG=debug`
//! to see the parser and solver events.

use std::env;

use lpcanon::prelude::*;
use tracing_subscriber::EnvFilter;

const BUILTIN: &str = "\
NAME          TESTLP
ROWS
 N  COST
 G  LIM1
 L  LIM2
COLUMNS
    X1        COST         1.0   LIM1         1.0
    X1        LIM2         1.0
    X2        COST         2.0   LIM1         1.0
RHS
    RHS       LIM1         2.0   LIM2         1.5
ENDATA
";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let model = match env::args().nth(1) {
        Some(path) => read_mps(path)?,
        None => parse_str(BUILTIN)?,
    };
    println!(
        "Read {} rows and {} columns",
        model.num_constraints(),
        model.num_variables()
    );

    let lp = model.into_linear_program()?;
    println!("{lp}\n");

    match lp.solve() {
        Ok(solution) => {
            println!("Status: {}", solution.status);
            println!("Objective: {:.6}", solution.value);
            for (name, value) in lp.variable_names().iter().zip(&solution.x) {
                println!("  {name} = {value:.6}");
            }
        }
        Err(LpError::Solver(status)) => {
            println!("Solver stopped with {status} (code {})", status.code());
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
