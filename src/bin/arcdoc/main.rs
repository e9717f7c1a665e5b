//! arcdoc CLI - Tool for inspecting legacy compound GIS documents.

use std::env;
use std::path::Path;
use std::process;

use arcdoc::prelude::*;

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut opts = DocOptions::default();
    let mut verbose = false;
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-t" | "--tolerant" => opts.tolerant = true,
            "-s" | "--structure" => opts.structure_only = true,
            "-v" | "--verbose" => {
                verbose = true;
                opts.trace = true;
            }
            _ => filtered_args.push(arg),
        }
    }

    init_tracing(verbose);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    match filtered_args[0] {
        // Info command - list container streams
        "info" | "i" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file argument");
                eprintln!("Usage: arcdoc-cli info <file>");
                process::exit(1);
            }
            cmd_info(filtered_args[1]);
        }

        // Dump command - decode and print the JSON projection
        "dump" | "d" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file argument");
                eprintln!("Usage: arcdoc-cli dump <file> [--tolerant]");
                process::exit(1);
            }
            cmd_dump(filtered_args[1], opts);
        }

        "help" | "-h" | "--help" => print_help(),

        other => {
            eprintln!("Error: unknown command '{other}'");
            print_help();
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    println!("arcdoc-cli - inspect legacy compound GIS documents");
    println!();
    println!("Usage: arcdoc-cli <command> [options] <file>");
    println!();
    println!("Commands:");
    println!("  info, i  <file>   List the container's named streams");
    println!("  dump, d  <file>   Decode the document and print its JSON projection");
    println!("  help              Show this help");
    println!();
    println!("Options:");
    println!("  -t, --tolerant    Downgrade size-accounting mismatches to warnings");
    println!("  -s, --structure   List extension kinds without decoding their payloads");
    println!("  -v, --verbose     Per-object decode logging on stderr");
}

fn cmd_info(path: &str) {
    let container = match CompoundFile::open(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    println!("{path}: {} streams", container.stream_count());
    for name in container.stream_names() {
        let size = container.stream(name).map(|s| s.len()).unwrap_or(0);
        println!("  {name}  ({size} bytes)");
    }
}

/// Pick a document reader from the file extension and dump the result.
fn cmd_dump(path: &str, opts: DocOptions) {
    let registry = ObjectRegistry::with_known_types();
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let result = match ext.as_str() {
        "mxd" | "mxt" => dump_map_document(path, &registry, opts),
        "sde" => dump_connection_file(path, &registry, opts),
        // Layer files, and the fallback for unknown extensions.
        _ => dump_layer_file(path, &registry, opts),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn dump_layer_file(path: &str, registry: &ObjectRegistry, opts: DocOptions) -> Result<()> {
    let layer = LayerFile::open(path, registry, opts)?;
    println!("{:#}", layer.document.project());
    Ok(())
}

fn dump_map_document(path: &str, registry: &ObjectRegistry, opts: DocOptions) -> Result<()> {
    let doc = MapDocument::open(path, registry, opts)?;
    let mut out = serde_json::Map::new();
    if let Some((major, minor)) = doc.format_version {
        out.insert("format_version".into(), format!("{major}.{minor}").into());
    }
    out.insert("maps".into(), doc.project_maps().into());
    if doc.skipped_maps > 0 {
        out.insert("skipped_maps".into(), doc.skipped_maps.into());
    }
    if let Some(metadata) = &doc.metadata {
        out.insert("metadata".into(), metadata.project());
    }
    if !doc.templates.is_empty() {
        out.insert("templates".into(), doc.templates.clone().into());
    }
    if let Some(layout) = &doc.page_layout {
        out.insert("page_layout".into(), layout.project());
    }
    println!("{:#}", serde_json::Value::Object(out));
    Ok(())
}

fn dump_connection_file(path: &str, registry: &ObjectRegistry, opts: DocOptions) -> Result<()> {
    let conn = ConnectionFile::open(path, registry, opts)?;
    println!("{:#}", conn.document.project());
    Ok(())
}
