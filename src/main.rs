// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use rideledger::{cli, commands, config::Config, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::resolve(matches.get_one::<String>("db").map(String::as_str))?;
    let mut conn = db::open_or_init(&config)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", config.db_path.display());
        }
        Some(("record", sub)) => commands::records::handle(&mut conn, &config, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&conn, &config, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
