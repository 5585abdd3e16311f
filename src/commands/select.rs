//! `<collection> select` command.

use std::io::Write;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::store::{Collection, Record, RecordStore};

/// Execute `select`: print every readable record in the collection.
///
/// Records are printed in directory order as they are read.
///
/// # Errors
///
/// Returns an error if the collection cannot be resolved or enumerated, or
/// if output cannot be written.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    collection: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let collection = Collection::resolve(ctx, &config.root, collection)?;
    let store = RecordStore::from_config(ctx, config);

    let mut records = store.list(&collection)?;
    for record in records.by_ref() {
        write_record(out, &record)?;
    }
    out.flush()?;

    if records.skipped() > 0 {
        tracing::debug!(skipped = records.skipped(), "some records could not be read");
    }
    Ok(())
}

/// Writes one record block: file line, `Content:` line, raw content, blank line.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_record(out: &mut dyn Write, record: &Record) -> std::io::Result<()> {
    write!(out, "File: {}\nContent:\n{}\n\n", record.file_name, record.content)
}
