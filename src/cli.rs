//! CLI argument definitions.
//!
//! Positionals are taken as given: collection names and record content may
//! start with `-` or be a literal `--`. clap only renders help, version, and
//! usage text.

use std::ffi::OsString;

use clap::{CommandFactory, Parser};

use crate::error::{Error, Result};

/// Top-level CLI definition for `docstore`.
#[derive(Debug, Parser)]
#[command(
    name = "docstore",
    version,
    about = "Store and list JSON records, one file per record",
    override_usage = "docstore <COLLECTION> select\n       docstore <COLLECTION> insert <CONTENT>"
)]
pub struct Cli {
    /// Collection name; used as a directory under the storage root.
    pub collection: String,
    /// `select` to list records, `insert` to add one.
    pub operation: String,
    /// Record content for `insert`, stored verbatim.
    pub content: Option<String>,
}

/// A validated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// List every record with its content.
    Select,
    /// Insert one record.
    Insert {
        /// Content to store.
        content: String,
    },
}

/// True when the only argument asks for help or version output.
#[must_use]
pub fn is_info_request(args: &[OsString]) -> bool {
    match args {
        [_, flag] => {
            flag.to_str().is_some_and(|f| matches!(f, "-h" | "--help" | "-V" | "--version"))
        }
        _ => false,
    }
}

impl Cli {
    /// Builds a `Cli` from raw arguments, program name first.
    ///
    /// Arguments after the content are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] if the collection or operation is missing or
    /// an argument is not valid UTF-8.
    pub fn from_args(args: &[OsString]) -> Result<Self> {
        let mut positionals = args.iter().skip(1).take(3).map(|arg| {
            arg.to_str()
                .map(String::from)
                .ok_or_else(|| usage_error(&format!("argument {arg:?} is not valid UTF-8")))
        });
        let (Some(collection), Some(operation)) = (positionals.next(), positionals.next()) else {
            return Err(usage_error("the collection and operation are required"));
        };
        Ok(Self {
            collection: collection?,
            operation: operation?,
            content: positionals.next().transpose()?,
        })
    }

    /// Interprets the operation keyword and its payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] for an unknown keyword or an `insert`
    /// without content.
    pub fn operation(&self) -> Result<Operation> {
        match self.operation.as_str() {
            "select" => Ok(Operation::Select),
            "insert" => match &self.content {
                Some(content) => Ok(Operation::Insert { content: content.clone() }),
                None => Err(Error::usage("Error: Missing JSON data for insert operation.")),
            },
            other => Err(Error::usage(format!(
                "Error: Unknown operation '{other}'. Use 'select' or 'insert'."
            ))),
        }
    }
}

fn usage_error(reason: &str) -> Error {
    let usage = Cli::command().render_usage().to_string();
    Error::usage(format!("error: {reason}\n\n{}", usage.trim_end()))
}
