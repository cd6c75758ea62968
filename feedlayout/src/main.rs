// feedlayout - feed grid layout customizer
// Entry point and command-line setup

use clap::{Parser, Subcommand};
use feedlayout::app;
use feedlayout::commands::{self, LayoutFlag};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "feedlayout", about = "Inspect and edit feed layout settings")]
struct Cli {
    /// Directory holding the settings file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current settings
    Show,
    /// Set a numeric field (maxWidth, minWidth, rowMargin, itemMargin, itemsPerRow)
    Set { field: String, value: String },
    /// Switch a boolean setting
    Toggle {
        #[arg(value_enum)]
        flag: LayoutFlag,
        #[arg(value_parser = parse_switch, action = clap::ArgAction::Set)]
        state: bool,
    },
    /// Restore the site-native layout
    Reset,
    /// Print the inline styles the page script would write
    Css {
        #[arg(long, default_value = "/")]
        path: String,
    },
}

fn parse_switch(raw: &str) -> Result<bool, String> {
    match raw {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(format!("expected on or off, got {other}")),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedlayout=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => app::default_data_dir()?,
    };

    let mut state = app::setup(data_dir).await?;

    match cli.command {
        Command::Show => println!("{}", commands::show(&state)?),
        Command::Set { field, value } => {
            if !commands::set_field(&mut state, &field, &value).await? {
                println!("rejected, unchanged");
            }
            println!("{}", commands::show(&state)?);
        }
        Command::Toggle { flag, state: enabled } => {
            commands::toggle(&mut state, flag, enabled).await?;
            println!("{}", commands::show(&state)?);
        }
        Command::Reset => {
            commands::reset(&mut state).await?;
            println!("{}", commands::show(&state)?);
        }
        Command::Css { path } => print!("{}", commands::preview(&state, &path)),
    }

    Ok(())
}
