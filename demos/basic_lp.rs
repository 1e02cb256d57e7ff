//! Basic Linear Programming Example
//!
//! Builds a production-mix problem from expressions, prints its canonical
//! form and solves it:
//!
//! maximize    3a + 2b + 5c
//! subject to  2a + b + 3c <= 100
//!             a + 2b + c  <= 80
//!             a, b, c >= 0

use lpcanon::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Basic Linear Program ===\n");

    let a = variable("a");
    let b = variable("b");
    let c = variable("c");

    let profit = dot(&[3.0, 2.0, 5.0], &[a.clone(), b.clone(), c.clone()]);
    let problem = Problem::maximize(profit).subject_to([
        (2.0 * &a + &b + 3.0 * &c).leq(100.0),
        (&a + 2.0 * &b + &c).leq(80.0),
    ]);

    let lp = problem.clone().build()?;
    println!("{lp}\n");

    println!("Solving...");
    let solution = problem.solve()?;

    println!("\nResults:");
    println!("  Status: {}", solution.status);
    println!("  Optimal profit: {:.4}", solution.value);
    for v in [&a, &b, &c] {
        if let Some(value) = solution.value_of(v) {
            println!("  {v} = {value:.4}");
        }
    }

    Ok(())
}
