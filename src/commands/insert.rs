//! `<collection> insert <content>` command.

use std::io::Write;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::store::{Collection, RecordStore};

/// Execute `insert`: validate, store, and report where the record went.
///
/// Validation runs before the collection is resolved, so rejected content
/// leaves no trace on disk.
///
/// # Errors
///
/// Returns an error if validation fails, the collection cannot be resolved,
/// the record cannot be written, or output cannot be written.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    collection: &str,
    content: &str,
    out: &mut dyn Write,
) -> Result<()> {
    config.validator.build().validate(content)?;

    let collection = Collection::resolve(ctx, &config.root, collection)?;
    let inserted = RecordStore::from_config(ctx, config).insert(&collection, content)?;

    tracing::debug!(record = %inserted.id, "reporting insert");
    writeln!(out, "Data inserted successfully into: {}", inserted.path.display())?;
    Ok(())
}
