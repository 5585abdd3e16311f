//! Core library entry for the `docstore` CLI.
//!
//! A collection is a directory; a record is one `.json` file inside it whose
//! name is derived from the insert time. See [`store`] for the storage
//! layout and [`config`] for the opt-in behaviors.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod store;
pub mod validate;

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::Parser;

pub use error::{Error, Result};

/// Run the CLI with the provided arguments against the live filesystem.
///
/// Configuration is read from the environment; results go to stdout.
///
/// # Errors
///
/// Returns an error when argument parsing, configuration, or command
/// execution fails.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if cli::is_info_request(&args) {
        return match cli::Cli::try_parse_from(&args) {
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                err.print()?;
                Ok(())
            }
            Err(err) => Err(Error::usage(err.to_string().trim_end())),
            Ok(_) => Ok(()),
        };
    }
    let cli = cli::Cli::from_args(&args)?;
    let config = config::Config::from_env()?;
    let ctx = context::ServiceContext::live();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::dispatch(&cli, &ctx, &config, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_errors_on_missing_operation() {
        let result = run(["docstore", "OnlyCollection"]);
        assert!(matches!(result, Err(Error::Usage(ref m)) if m.contains("Usage")));
    }

    #[test]
    fn run_accepts_help() {
        assert!(run(["docstore", "--help"]).is_ok());
    }
}
