#[macro_use]
extern crate log;

#[macro_use]
mod localization;
use localization::config::set_lang;
mod config;
use config::{Cli, PatchConfig};
mod copier;
mod error;
use error::PatchError;
mod html;
mod js;
mod pipeline;
use pipeline::PatchReport;
mod report;
mod store;
use store::DiskStore;
mod translations;

use anyhow::Result;
use backtrace::Backtrace;
use clap::Parser;
use log::LevelFilter;
use std::io::Write;
use std::panic;
use std::process::ExitCode;
use std::time::Duration;
use tokio::task::JoinError;

fn apply_patch(cli: Cli) -> Result<PatchReport> {
    let store = DiskStore;
    let config = PatchConfig::resolve(&store, &cli)?;

    info!(
        "{}",
        t!(patch_source, patch_root = config.patch_root.display())
    );
    info!(
        "{}",
        t!(install_target, install_root = config.install_root.display())
    );

    Ok(pipeline::run(&store, &config)?)
}

/// Reports how the patch task ended and picks the exit status. A panic in the
/// task arrives here as a `JoinError` instead of tearing the process down.
fn finish(joined: Result<Result<PatchReport>, JoinError>) -> u8 {
    match joined {
        Ok(Ok(report)) => {
            report::print_completion(&report);
            report::exit_status(&report)
        }
        Ok(Err(e)) => {
            match e.downcast_ref::<PatchError>() {
                Some(PatchError::InstallRootMissing(path)) => {
                    error!("{}", t!(install_not_found, install_root = path.display()));
                }
                _ => error!("{}", t!(error_occurred, error = e)),
            }
            1
        }
        Err(_) => {
            error!("{}", t!(error_prompt));
            1
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format(|buf, record| {
            let level_style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{}] {}",
                level_style.value(record.level()),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();
    if let Some(lang) = cli.lang {
        set_lang(lang);
    }
    let wait = Duration::from_secs(cli.wait_secs);

    panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::new();
        error!("{}", t!(error_occurred, error = info.to_string()));
        debug!("{:?}", backtrace);
    }));

    let status = finish(tokio::task::spawn_blocking(move || apply_patch(cli)).await);

    report::hold(wait).await;
    ExitCode::from(status)
}
