use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "pulseweave", version, about = "Pulseweave haptic pattern player CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pattern catalog inspection
    Pattern {
        #[command(subcommand)]
        action: commands::pattern::PatternAction,
    },
    /// Play a pattern against a simulated vibrator
    Play(commands::play::PlayArgs),
    /// Interactive session: tap, swipe and drag via line commands
    Session(commands::play::SessionArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Pattern { action } => commands::pattern::run(action),
        Commands::Play(args) => commands::play::run(args),
        Commands::Session(args) => commands::play::run_session(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "pulseweave",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
