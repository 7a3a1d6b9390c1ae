//! Schema command: JSON Schema of the machine-readable outputs.

use clap::{Args, ValueEnum};
use phrasemine_core::collocation::CollocationResult;
use phrasemine_core::export::ExportTables;
use phrasemine_core::pipeline::CorpusReport;
use tracing::{debug, instrument};

/// Which output to describe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SchemaKind {
    /// `analyze --json` output.
    #[default]
    Report,
    /// `collocations --json` output.
    Collocations,
    /// The three export tables.
    Tables,
}

/// Arguments for the `schema` subcommand.
#[derive(Args, Debug, Default)]
pub struct SchemaArgs {
    /// Output to describe.
    #[arg(value_enum, default_value_t)]
    pub kind: SchemaKind,
}

/// Print a JSON Schema document. Always JSON.
#[instrument(name = "cmd_schema", skip_all)]
pub fn cmd_schema(args: SchemaArgs) -> anyhow::Result<()> {
    debug!(kind = ?args.kind, "executing schema command");
    println!("{}", schema_json(args.kind)?);
    Ok(())
}

fn schema_json(kind: SchemaKind) -> serde_json::Result<String> {
    let schema = match kind {
        SchemaKind::Report => schemars::schema_for!(CorpusReport),
        SchemaKind::Collocations => schemars::schema_for!(CollocationResult),
        SchemaKind::Tables => schemars::schema_for!(ExportTables),
    };
    serde_json::to_string_pretty(&schema)
}
