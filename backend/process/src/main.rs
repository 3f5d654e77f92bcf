use std::path::PathBuf;

use anyhow::anyhow;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use roster::{ROSTER_PATH, report::REPORT_FILE_NAME, time::DEFAULT_TIME_ZONE};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace the roster document with the rows of a spreadsheet
    Import {
        sheet: PathBuf,

        #[arg(long, default_value = ROSTER_PATH)]
        roster: PathBuf,
    },

    /// Write the check-in report for a roster document
    Export {
        #[arg(long, default_value = ROSTER_PATH)]
        roster: PathBuf,

        #[arg(long, default_value = REPORT_FILE_NAME)]
        out: PathBuf,

        #[arg(long, default_value = DEFAULT_TIME_ZONE.name())]
        time_zone: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Import { sheet, roster } => {
            process::import_sheet(&sheet, &roster)?;
        }
        Command::Export {
            roster,
            out,
            time_zone,
        } => {
            let zone: Tz = time_zone
                .parse()
                .map_err(|e| anyhow!("Invalid time zone {time_zone}: {e}"))?;

            process::export_report(&roster, &out, zone)?;
        }
    }

    Ok(())
}
