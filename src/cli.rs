use crate::output::colorize::{Colorize, ColorizeDevice, ColorizePrompt};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use syncmark::config::Config;
use syncmark::error::{Result, SyncmarkError};
use syncmark::sync::settings::DEVICES_HEADER;
use syncmark::sync::{
    decode_device_list, settings_rows, DeviceRemovalType, RemovalPrompt, SettingsRow, SyncDevice,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional custom configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable color output
    #[arg(long)]
    pub nc: bool,

    /// Show debug information
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the devices of a sync group from a device list JSON dump
    Devices {
        /// File holding the JSON array handed out by the sync service
        file: PathBuf,
    },

    /// Show how removing a device would be handled
    Removal {
        /// File holding the JSON array handed out by the sync service
        file: PathBuf,

        /// Position of the device in the list (starting at 1)
        index: usize,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration to the config path
        #[arg(long)]
        init: bool,
    },
}

fn load_devices(file: &Path) -> Result<Vec<SyncDevice>> {
    let json = std::fs::read_to_string(file)?;
    Ok(decode_device_list(Some(&json)))
}

fn render(item: &dyn Colorize, colored: bool) -> String {
    if colored {
        item.to_colored()
    } else {
        item.to_plain()
    }
}

/// The settings list as text: header, one line per device, then the button row
fn render_devices(devices: &[SyncDevice], colored: bool) -> String {
    let mut out = format!("{}\n", DEVICES_HEADER);
    for (i, row) in settings_rows(devices).iter().enumerate() {
        match (row, devices.get(i)) {
            (SettingsRow::Device(_), Some(device)) => {
                out.push_str(&render(&ColorizeDevice(i + 1, device), colored));
            }
            _ => out.push_str(&format!("+ {}\n", row.label())),
        }
    }
    out
}

pub fn handle_args(cli: Cli, config: &Config, config_path: &Path) -> Result<()> {
    let colored = !cli.nc;

    match cli.command {
        Commands::Devices { file } => {
            let devices = load_devices(&file)?;
            if devices.is_empty() {
                eprintln!("No sync devices found in {}", file.display());
                return Ok(());
            }

            print!("{}", render_devices(&devices, colored));
        }
        Commands::Removal { file, index } => {
            let devices = load_devices(&file)?;
            let device = index
                .checked_sub(1)
                .and_then(|i| devices.get(i))
                .ok_or_else(|| {
                    SyncmarkError::InvalidInput(format!(
                        "No device at index {} ({} device(s) in the list)",
                        index,
                        devices.len()
                    ))
                })?;

            let kind = DeviceRemovalType::classify(&devices, device);
            let prompt = RemovalPrompt::for_device(kind, device);
            println!("Removal type: {}", kind);
            if kind.leaves_group() {
                println!("Confirming leaves the sync group");
            }
            print!("{}", render(&ColorizePrompt(&prompt), colored));
        }
        Commands::Config { init } => {
            if init {
                config.save_to_path(config_path)?;
                eprintln!("Wrote configuration to {}", config_path.display());
            }
            println!("# {}", config_path.display());
            print!("{}", serde_yaml::to_string(config)?);
        }
    }

    Ok(())
}
