//! Command dispatch and handlers.

pub mod insert;
pub mod select;

use std::io::Write;

use crate::cli::{Cli, Operation};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;

/// Dispatch a parsed command line to its handler, writing results to `out`.
///
/// The operation is validated before anything touches the filesystem, so a
/// usage error never creates a collection directory.
///
/// # Errors
///
/// Returns an error if the operation is malformed or the handler fails.
pub fn dispatch(
    cli: &Cli,
    ctx: &ServiceContext,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    match cli.operation()? {
        Operation::Select => select::run(ctx, config, &cli.collection, out),
        Operation::Insert { content } => insert::run(ctx, config, &cli.collection, &content, out),
    }
}
