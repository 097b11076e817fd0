//! rag-chat: CLI for the RAG chat/knowledge-base backend.
//! Reads config, builds the API client, runs one operation, prints the
//! result to stdout. Errors go to stderr with exit code 1.
//!
//! Usage:
//!   rag-chat [--config <path>] [ask] [question...]   (question from args or stdin)
//!   rag-chat [--config <path>] stats
//!   rag-chat [--config <path>] list
//!   rag-chat [--config <path>] upload <path>
//!   rag-chat [--config <path>] delete <filename>
//!   rag-chat [--config <path>] rebuild

use rag_chat_client::{config, ApiClient};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

fn resolve_config_path(args: &[String]) -> PathBuf {
    // 1. --config <path> flag
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        if let Some(path) = args.get(pos + 1) {
            return PathBuf::from(path);
        }
    }
    // 2. RAG_CHAT_CONFIG env var
    if let Ok(val) = std::env::var("RAG_CHAT_CONFIG") {
        return PathBuf::from(val);
    }
    // 3. Default path (~/.rag-chat/config.yaml)
    config::default_config_path().unwrap_or_else(|| {
        eprintln!("Error: unable to determine config path (set --config or RAG_CHAT_CONFIG)");
        process::exit(1);
    })
}

/// Args with the `--config <path>` pair removed.
fn strip_config_flag(args: &[String]) -> Vec<String> {
    let mut rest = Vec::new();
    let mut skip = false;
    for (i, arg) in args.iter().enumerate() {
        if skip {
            skip = false;
            continue;
        }
        if arg == "--config" {
            skip = args.get(i + 1).is_some();
            continue;
        }
        rest.push(arg.clone());
    }
    rest
}

fn usage() -> ! {
    eprintln!("Usage: rag-chat [--config <path>] [ask [question]|stats|list|upload <path>|delete <filename>|rebuild]");
    process::exit(1);
}

fn read_question_from_stdin() -> String {
    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line).unwrap_or(0);
    line.trim().to_string()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = resolve_config_path(&args);

    let cfg = match config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "Error: failed to load config from {}: {}",
                config_path.display(),
                e
            );
            process::exit(1);
        }
    };

    let client = match ApiClient::with_timeout(&cfg.api_base_url(), cfg.api_timeout()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: failed to build API client: {}", e);
            process::exit(1);
        }
    };

    let rest = strip_config_flag(&args);
    let (command, operands) = match rest.split_first() {
        Some((cmd, operands)) => (cmd.as_str(), operands),
        None => ("ask", &[][..]),
    };

    // A bare question (no subcommand keyword) is treated as `ask`.
    let known = ["ask", "stats", "list", "upload", "delete", "rebuild"];
    let (command, operands) = if known.contains(&command) {
        (command, operands.to_vec())
    } else {
        ("ask", rest.clone())
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error: failed to create runtime: {}", e);
            process::exit(1);
        });

    rt.block_on(async {
        match command {
            "ask" => {
                let question = if operands.is_empty() {
                    read_question_from_stdin()
                } else {
                    operands.join(" ")
                };
                if question.is_empty() {
                    eprintln!("Error: no question provided");
                    process::exit(1);
                }
                match client.chat(&question).await {
                    Ok(reply) => {
                        println!("{}", reply.answer);
                        if !reply.sources.is_empty() {
                            println!("\nSources:");
                            for (i, src) in reply.sources.iter().enumerate() {
                                let first_line = src.text.lines().next().unwrap_or("");
                                println!("  {}. {}", i + 1, first_line);
                            }
                        }
                    }
                    Err(e) => fail("chat", e),
                }
            }
            "stats" => match client.get_stats().await {
                Ok(stats) => {
                    println!("Documents: {}", stats.total_documents);
                    println!("Vectorstore: {}", stats.vectorstore_path);
                }
                Err(e) => fail("stats", e),
            },
            "list" => match client.list_files().await {
                Ok(files) => {
                    for f in files {
                        println!("{}\t{} bytes\t{}", f.name, f.size, f.modified);
                    }
                }
                Err(e) => fail("list", e),
            },
            "upload" => {
                let path = operands.first().unwrap_or_else(|| usage());
                match client.upload_file(std::path::Path::new(path)).await {
                    Ok(receipt) => println!(
                        "Uploaded {}: {} entries added ({} total)",
                        receipt.filename, receipt.added_count, receipt.total_documents
                    ),
                    Err(e) => fail("upload", e),
                }
            }
            "delete" => {
                let filename = operands.first().unwrap_or_else(|| usage());
                match client.delete_file(filename).await {
                    Ok(message) => println!("{}", message),
                    Err(e) => fail("delete", e),
                }
            }
            "rebuild" => match client.rebuild_vectorstore().await {
                Ok(summary) => println!(
                    "Rebuilt vectorstore: {} entries from {} files",
                    summary.total_count,
                    summary.files_processed.len()
                ),
                Err(e) => fail("rebuild", e),
            },
            _ => usage(),
        }
    });
}

fn fail(operation: &str, err: rag_chat_client::ApiError) -> ! {
    eprintln!("Error: {} failed: {}", operation, err);
    process::exit(1);
}
