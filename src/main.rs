use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use walkdir::WalkDir;

use triple_extract::{segment, Extraction, Triple, TripleExtractor};

const OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(
    name = "triple_extract",
    about = "Chinese news event-phrase and SPO-triple extractor"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run full corpus extraction → output/*.json
    Extract {
        /// Path to corpus root directory (*.txt files, recursively)
        #[arg(default_value = ".")]
        corpus: PathBuf,
        /// Keep only triples with a non-empty subject, predicate and object
        #[arg(long)]
        complete_only: bool,
    },
    /// Extract from a sentence given on the command line (or stdin)
    Parse {
        /// Text to analyze; reads stdin when absent
        text: Vec<String>,
        /// Keep only triples with a non-empty subject, predicate and object
        #[arg(long)]
        complete_only: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Extract {
            corpus,
            complete_only,
        }) => run_extract(&corpus, complete_only),
        Some(Command::Parse {
            text,
            complete_only,
        }) => run_parse(&text, complete_only),
        // Default: analyze stdin
        None => run_parse(&[], false),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  OUTPUT FILE HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn output_path(name: &str) -> PathBuf {
    Path::new(OUTPUT_DIR).join(name)
}

fn write_json<T: serde::Serialize>(name: &str, data: &T) {
    let path = output_path(name);
    let json = serde_json::to_string_pretty(data).expect("JSON serialization failed");
    std::fs::write(&path, &json).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
    eprintln!("  {} ({} bytes)", path.display(), json.len());
}

// ═══════════════════════════════════════════════════════════════════════
//  PARSE MODE: single text → pretty JSON on stdout
// ═══════════════════════════════════════════════════════════════════════

fn run_parse(text_args: &[String], complete_only: bool) {
    let text = if text_args.is_empty() {
        let mut buf = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
            eprintln!("cannot read stdin: {e}");
            std::process::exit(1);
        }
        buf
    } else {
        text_args.join(" ")
    };

    let extractor = TripleExtractor::new();
    let mut extraction = extractor.extract(&text);
    if complete_only {
        extraction.triples.retain(Triple::is_complete);
    }

    let json = serde_json::to_string_pretty(&extraction).expect("JSON serialization");
    println!("{json}");
}

// ═══════════════════════════════════════════════════════════════════════
//  EXTRACT MODE: full corpus processing → output/*.json
// ═══════════════════════════════════════════════════════════════════════

#[derive(serde::Serialize)]
struct DocumentSummary {
    path: String,
    titles: Vec<String>,
    event_count: usize,
    triple_count: usize,
}

fn run_extract(root: &Path, complete_only: bool) {
    eprintln!("Scanning corpus at: {}", root.display());

    // Phase 1: discover all .txt files
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    eprintln!("Found {} document files", files.len());

    // Phase 2: run extraction per document
    let extractor = TripleExtractor::new();
    let mut all_events: Vec<String> = Vec::new();
    let mut all_triples: Vec<Triple> = Vec::new();
    let mut documents: Vec<DocumentSummary> = Vec::new();
    let mut failed: Vec<String> = Vec::new();

    for path in &files {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("  cannot read {}: {e}", path.display());
                failed.push(path.display().to_string());
                continue;
            }
        };

        let titles = segment::extract_quoted_titles(&content);
        let mut extraction: Extraction = extractor.extract(&content);
        if complete_only {
            extraction.triples.retain(Triple::is_complete);
        }

        documents.push(DocumentSummary {
            path: path.display().to_string(),
            titles,
            event_count: extraction.events.len(),
            triple_count: extraction.triples.len(),
        });
        all_events.extend(extraction.events);
        all_triples.extend(extraction.triples);
    }

    // ── Print statistics ───────────────────────────────────────────
    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  CORPUS STATISTICS");
    eprintln!("══════════════════════════════════════════");

    let complete = all_triples.iter().filter(|t| t.is_complete()).count();
    eprintln!(
        "\nDocuments: {} ({} unreadable)",
        documents.len(),
        failed.len()
    );
    eprintln!("Events:    {}", all_events.len());
    eprintln!(
        "Triples:   {} ({} complete, {} partial)",
        all_triples.len(),
        complete,
        all_triples.len() - complete
    );

    let titled = documents.iter().filter(|d| !d.titles.is_empty()).count();
    eprintln!("Documents with quoted titles: {titled}");

    // Sample triples
    eprintln!("\nSample triples (first 10):");
    for t in all_triples.iter().take(10) {
        eprintln!("  [{}] — [{}] — [{}]", t.subject, t.predicate, t.object);
    }

    // ── Write split JSON files ──────────────────────────────────────
    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  WRITING OUTPUT FILES");
    eprintln!("══════════════════════════════════════════\n");

    std::fs::create_dir_all(OUTPUT_DIR).expect("cannot create output/");

    write_json("events.json", &all_events);
    write_json("triples.json", &all_triples);
    write_json("documents.json", &documents);

    eprintln!("\nDone. Inspect single sentences with:");
    eprintln!("  cargo run -- parse \"李克强总理今天来我家了\"");
}
