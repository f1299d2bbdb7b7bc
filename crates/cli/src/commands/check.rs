//! Directory smoke test: run the pipeline over every `.fgd` file and report
//! each outcome independently. One file's failure never aborts the sweep.

use std::path::{Path, PathBuf};
use std::process;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_check(dir: &Path, output: OutputFormat, quiet: bool) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            let msg = format!("error reading directory '{}': {}", dir.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "fgd"))
        .collect();
    files.sort();

    let mut failed = 0usize;
    for path in &files {
        match check_file(path) {
            Ok(includes) => {
                if !quiet {
                    for name in includes {
                        eprintln!("note: you may also want to include {}", name);
                    }
                    match output {
                        OutputFormat::Text => println!("{} passed", file_name(path)),
                        OutputFormat::Json => println!(
                            "{}",
                            serde_json::json!({ "file": file_name(path), "ok": true })
                        ),
                    }
                }
            }
            Err(msg) => {
                failed += 1;
                match output {
                    OutputFormat::Text => eprintln!("{}: {}", file_name(path), msg),
                    OutputFormat::Json => eprintln!(
                        "{}",
                        serde_json::json!({ "file": file_name(path), "ok": false, "error": msg })
                    ),
                }
            }
        }
    }

    if !quiet && output == OutputFormat::Text {
        println!("{} checked, {} failed", files.len(), failed);
    }

    if failed > 0 {
        process::exit(1);
    }
}

/// Parse one file; on success hand back its include names for reporting.
fn check_file(path: &Path) -> Result<Vec<String>, String> {
    let source = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let tokens = fgd_core::tokenize(&source).map_err(|e| e.to_string())?;
    let ast = fgd_core::parse(&tokens).map_err(|e| e.to_string())?;
    fgd_core::transform(&ast).map_err(|e| e.to_string())?;
    Ok(ast.includes().map(str::to_owned).collect())
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
