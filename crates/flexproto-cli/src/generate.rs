//! Header generation command

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flexproto_codegen::naming::output_path_for;
use flexproto_codegen::{SchemaDocument, generate, loader};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Inputs of one generator run
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub schema: PathBuf,
    pub output: Option<PathBuf>,
    pub runtime_header: Option<String>,
    pub check: bool,
    pub quiet: bool,
}

/// Load the schema, render the header and commit it
///
/// The header is written to a temporary file next to the destination and
/// renamed over it only once generation has succeeded.
pub fn run(args: &GenerateArgs) -> Result<()> {
    let mut doc = loader::load_file(&args.schema)
        .with_context(|| format!("Failed to load schema: {}", args.schema.display()))?;
    apply_overrides(&mut doc, args);

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| output_path_for(&args.schema));
    let output_name = output_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .with_context(|| format!("Output path has no file name: {}", output_path.display()))?;

    let header = generate(&doc, &output_name)
        .with_context(|| format!("Failed to generate header for {}", args.schema.display()))?;

    if args.check {
        info!(output = %output_path.display(), "Check mode, header not written");
        if !args.quiet {
            println!(
                "Schema OK: {} ({} struct(s), {} enum(s), {} type enum(s))",
                args.schema.display(),
                doc.structs.len(),
                doc.enums.len(),
                doc.type_enums.len()
            );
        }
        return Ok(());
    }

    write_atomically(&output_path, &header)?;

    if !args.quiet {
        println!("Generated header: {}", output_path.display());
    }

    Ok(())
}

/// Command-line flags take precedence over the schema's `[generator]` table
fn apply_overrides(doc: &mut SchemaDocument, args: &GenerateArgs) {
    if let Some(header) = &args.runtime_header {
        debug!(runtime_header = %header, "Overriding runtime header");
        doc.options = doc.options.clone().with_runtime_header(header.clone());
    }
}

/// Replace `path` with `contents`, or leave it untouched on failure
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    file.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to write header file: {}", path.display()))?;

    debug!(path = %path.display(), bytes = contents.len(), "Committed header");
    Ok(())
}
