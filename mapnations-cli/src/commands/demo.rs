//! Demo command - manage demo mode
//!
//! Demo mode swaps the REST Countries API for the embedded catalog and keeps
//! accounts and favorites in a separate demo.duckdb.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use mapnations_core::config::Config;
use mapnations_core::DEMO_DB_FILE;

use super::get_data_dir;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)?;
    let mut config = Config::load(&data_dir)?;

    match command {
        Some(DemoCommands::On) => {
            // Fresh start: drop accounts left over from an earlier demo
            for file in [DEMO_DB_FILE.to_string(), format!("{}.wal", DEMO_DB_FILE)] {
                let path = data_dir.join(file);
                if path.exists() {
                    std::fs::remove_file(&path)?;
                }
            }

            config.enable_demo_mode();
            config.save(&data_dir)?;
            println!("{}", "Demo mode enabled".green());
            println!("Countries now come from the offline catalog. Run 'mn signup' to create a demo account.");
        }
        Some(DemoCommands::Off) => {
            config.disable_demo_mode();
            config.save(&data_dir)?;
            println!("{}", "Demo mode disabled".yellow());
        }
        Some(DemoCommands::Status) | None => {
            if config.demo_mode {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
        }
    }

    Ok(())
}
