//! Full demo of all seven drills.
//!
//! Run with: `cargo run --example demo`
//! Add `RUST_LOG=math_drill_gen=debug` to see rejected candidates.
//!
//! 1. **All drills**: one problem per drill at every tier with fixed seeds,
//!    so the output is deterministic and reproducible.
//!
//! 2. **A session**: one stepped-feedback drill answered wrong, close, and
//!    right, showing the Hot/Warm messages and the streak.

use math_drill_gen::{
    client_adapter::to_client_problem, generate_problem, DifficultyTier, DrillKind,
    DrillRequest, DrillSession,
};

fn print_problem(drill: DrillKind, tier: DifficultyTier, seed: u64) {
    let problem = match generate_problem(DrillRequest::new(drill).with_difficulty(tier).with_seed(seed)) {
        Ok(p) => p,
        Err(e) => {
            println!("  [{drill} / {tier}] generation failed: {e}");
            return;
        }
    };

    println!("  [{} / {}]  ID: {}", problem.drill, problem.difficulty, problem.problem_id);
    println!("    Q:    {}", problem.display_text);
    println!("    HTML: {}", problem.display_html);
    if !problem.choices.is_empty() {
        let choices: Vec<String> = problem.choices.iter().map(|c| c.to_string()).collect();
        println!("    Choices: {}", choices.join(" / "));
    }
    println!("    A:    {}", problem.reveal_text);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("math_drill_gen=info".parse().unwrap()),
        )
        .init();

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  All drills");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (i, drill) in DrillKind::ALL.into_iter().enumerate() {
        for tier in DifficultyTier::ALL {
            print_problem(drill, tier, 1000 * (i as u64 + 1));
        }
        println!();
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Session");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let problem = generate_problem(DrillRequest::new(DrillKind::SignedArithmetic).with_seed(7))
        .unwrap();
    println!("  Client payload: {}", to_client_problem(&problem));
    let truth = problem.ground_truth as i64;
    let mut session = DrillSession::new(problem);
    for guess in [String::new(), (truth + 2).to_string(), (truth - 1).to_string(), truth.to_string()] {
        if let Some(result) = session.submit(&guess) {
            println!("  {guess:>4} → {:?}: {}", result.verdict, result.message);
        }
    }
    println!("  Streak: {}", session.streak());
}
