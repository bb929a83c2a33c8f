// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use jdk_provisioner::commands::check::CheckCommand;
use jdk_provisioner::commands::ensure::EnsureCommand;
use jdk_provisioner::commands::env::EnvCommand;
use jdk_provisioner::commands::register::RegisterCommand;
use jdk_provisioner::config::ProvisionerConfig;
use jdk_provisioner::error::{Result, format_error_chain, get_exit_code};
use jdk_provisioner::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jdk-provisioner")]
#[command(author, version, about = "Find or install a JDK for running sketches", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report usable JDKs without changing anything
    Check {
        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Make sure a usable JDK is registered, downloading one if needed
    Ensure {
        /// Download without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        #[arg(long)]
        no_progress: bool,
    },

    /// Register an existing JDK directory as JAVA_HOME
    Register { path: PathBuf },

    /// Print the persisted environment entries
    Env,
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let config = match ProvisionerConfig::load_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = (|| match cli.command {
        Commands::Check { json } => CheckCommand::new(&config)?.execute(json),
        Commands::Ensure { yes, no_progress } => {
            EnsureCommand::new(&config)?.execute(yes, no_progress)
        }
        Commands::Register { path } => RegisterCommand::new(&config)?.execute(&path),
        Commands::Env => EnvCommand::new(&config)?.execute(),
    })();

    if let Err(e) = result {
        eprintln!("{}", format_error_chain(&e));
        std::process::exit(get_exit_code(&e));
    }
}
