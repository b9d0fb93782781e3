//! Filesystem adapters.

mod script_exporter;

pub use script_exporter::FsScriptExporter;
