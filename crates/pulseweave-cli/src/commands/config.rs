use clap::Subcommand;
use pulseweave_core::config::{config_dir, Config};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value by dot-separated key
    Get {
        /// Key such as `playback.cycle_pause_ms`
        key: String,
    },
    /// Set a value by dot-separated key and persist
    Set { key: String, value: String },
    /// Print the whole configuration as TOML
    List,
    /// Print the configuration directory path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", config_dir()?.display());
        }
    }
    Ok(())
}
