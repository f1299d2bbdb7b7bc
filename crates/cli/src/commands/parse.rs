use std::path::Path;
use std::process;

use crate::{report_error, OutputFormat};
use fgd_core::FgdError;

pub(crate) fn cmd_parse(file: &Path, output: OutputFormat, quiet: bool) {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let tokens = match fgd_core::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => fail(file, &e, output, quiet),
    };

    let ast = match fgd_core::parse(&tokens) {
        Ok(ast) => ast,
        Err(e) => fail(file, &e, output, quiet),
    };

    if !quiet {
        for name in ast.includes() {
            eprintln!("note: you may also want to include {}", name);
        }
    }

    let declarations = match fgd_core::transform(&ast) {
        Ok(declarations) => declarations,
        Err(e) => fail(file, &e, output, quiet),
    };

    let pretty = serde_json::to_string_pretty(&declarations)
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);
}

fn fail(file: &Path, err: &FgdError, output: OutputFormat, quiet: bool) -> ! {
    match output {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "file": file.display().to_string(),
                "error": err.to_string(),
            });
            eprintln!("{}", payload);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("{}: {}", file.display(), err);
            }
        }
    }
    process::exit(1);
}
