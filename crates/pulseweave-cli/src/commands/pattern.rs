use clap::Subcommand;
use pulseweave_core::pattern::sequence_ms;
use pulseweave_core::{Catalog, Config};

#[derive(Subcommand)]
pub enum PatternAction {
    /// List the built-in patterns in navigation order
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the step sequence of one pattern
    Show {
        /// Pattern name (see `pattern list`)
        name: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PatternAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut catalog = Catalog::builtin(&config.random);

    match action {
        PatternAction::List { json } => {
            let names: Vec<String> = catalog.names().map(str::to_string).collect();
            if json {
                let entries: Vec<serde_json::Value> = names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| {
                        let random = catalog.get(i).map(|p| p.is_random()).unwrap_or(false);
                        let steps = catalog.steps(i);
                        serde_json::json!({
                            "index": i,
                            "name": name,
                            "random": random,
                            "steps": steps.len(),
                            "cycle_ms": sequence_ms(steps),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for (i, name) in names.iter().enumerate() {
                    let random = catalog.get(i).map(|p| p.is_random()).unwrap_or(false);
                    let steps = catalog.steps(i);
                    let kind = if random { "random" } else { "static" };
                    println!(
                        "{i:>2}  {name:<12} {kind:<7} {:>2} steps  {:>5} ms/cycle",
                        steps.len(),
                        sequence_ms(steps)
                    );
                }
            }
        }
        PatternAction::Show { name, json } => {
            let index = catalog
                .position(&name)
                .ok_or_else(|| format!("unknown pattern '{name}'"))?;
            let steps = catalog.steps(index).to_vec();
            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
            } else {
                println!("{name}: {} steps, {} ms per cycle", steps.len(), sequence_ms(&steps));
                for (i, step) in steps.iter().enumerate() {
                    println!(
                        "{i:>2}  {:>4} ms @ {:>3}/255, pause {:>4} ms",
                        step.duration_ms, step.amplitude, step.pause_after_ms
                    );
                }
            }
        }
    }
    Ok(())
}
