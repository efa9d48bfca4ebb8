//! `koperasi` entry-point: loads settings, opens the file store and runs one
//! command.

use std::ffi::OsString;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use koperasi::KoperasiSettings;
use koperasi::domain::RecordStore;
use koperasi::inbound::cli::{Cli, CliContext, run};
use koperasi::outbound::file_store::FileKeyValueStore;

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = match KoperasiSettings::load_from_iter([OsString::from("koperasi")]) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    let data_dir = settings.data_dir();
    let store = match FileKeyValueStore::open(&data_dir) {
        Ok(store) => store,
        Err(e) => {
            error!(path = %data_dir.display(), error = %e, "cannot open data directory");
            eprintln!("failed to open data directory '{}': {e}", data_dir.display());
            return ExitCode::FAILURE;
        }
    };

    let ctx = CliContext {
        records: Rc::new(RecordStore::new(store)),
        clock: Arc::new(DefaultClock),
        flash_ttl: settings.flash_ttl(),
    };
    match run(&cli.command, &ctx) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
