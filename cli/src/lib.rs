//! Batch ingestion and textual reports on top of `docsearch_core`.

use anyhow::{Context, Result};
use docsearch_core::{DocumentId, DocumentResult, DocumentStatus, SearchConfig, SearchServer};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputDoc {
    pub id: DocumentId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// `.json` / `.jsonl` files under `input`, or `input` itself when it is a file.
pub fn collect_input_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        let entries = WalkDir::new(input).sort_by_file_name().into_iter();
        for entry in entries.filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

/// Read every document under `input`, in file order.
pub fn load_documents(input: &Path) -> Result<Vec<InputDoc>> {
    let mut docs = Vec::new();
    for file in collect_input_files(input) {
        if extension(&file) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    tracing::info!(documents = docs.len(), input = %input.display(), "loaded input");
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for (n, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed document", file.display(), n + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for (n, v) in arr.into_iter().enumerate() {
                let doc = serde_json::from_value(v).with_context(|| {
                    format!("{}: element {}: malformed document", file.display(), n)
                })?;
                docs.push(doc);
            }
        }
        serde_json::Value::Object(_) => {
            let doc = serde_json::from_value(json)
                .with_context(|| format!("{}: malformed document", file.display()))?;
            docs.push(doc);
        }
        _ => tracing::warn!(file = %file.display(), "ignoring non-document JSON"),
    }
    Ok(())
}

/// Ranking parameters from an optional JSON file, then explicit overrides.
pub fn resolve_config(
    path: Option<&Path>,
    max_results: Option<usize>,
    epsilon: Option<f64>,
) -> Result<SearchConfig> {
    let mut config = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SearchConfig::from_json_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SearchConfig::default(),
    };
    if let Some(max_results) = max_results {
        config.max_results = max_results;
    }
    if let Some(epsilon) = epsilon {
        config.relevance_epsilon = epsilon;
    }
    Ok(config)
}

/// Accepts `actual`, `BANNED`, ... as well as the ordinals `0`..`3`.
pub fn parse_status(s: &str) -> Result<DocumentStatus, String> {
    let name = match s {
        "0" => "ACTUAL",
        "1" => "IRRELEVANT",
        "2" => "BANNED",
        "3" => "REMOVED",
        other => other,
    };
    serde_json::from_value(serde_json::Value::String(name.to_uppercase()))
        .map_err(|_| format!("unknown document status {s:?}"))
}

/// Add every document, reporting and skipping the ones the engine refuses.
/// Returns how many were added.
pub fn add_documents<W: Write>(
    out: &mut W,
    server: &mut SearchServer,
    docs: &[InputDoc],
) -> io::Result<usize> {
    let mut added = 0;
    for doc in docs {
        match server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
            Ok(()) => added += 1,
            Err(e) => {
                tracing::warn!(id = doc.id, error = %e, "skipping document");
                writeln!(out, "Error in adding document {}: {}", doc.id, e)?;
            }
        }
    }
    Ok(added)
}

pub fn write_document<W: Write>(out: &mut W, document: &DocumentResult) -> io::Result<()> {
    writeln!(
        out,
        "{{ document_id = {}, relevance = {:.6}, rating = {} }}",
        document.id, document.relevance, document.rating
    )
}

pub fn write_match<W: Write>(
    out: &mut W,
    id: DocumentId,
    words: &[String],
    status: DocumentStatus,
) -> io::Result<()> {
    write!(out, "{{ document_id = {}, status = {}, words =", id, status.ordinal())?;
    for word in words {
        write!(out, " {word}")?;
    }
    writeln!(out, "}}")
}

/// Print ranked results for `query`, restricted to `status` (ACTUAL by default).
pub fn find_top_documents<W: Write>(
    out: &mut W,
    server: &SearchServer,
    query: &str,
    status: Option<DocumentStatus>,
) -> io::Result<()> {
    writeln!(out, "Results for request: {query}")?;
    let status = status.unwrap_or_default();
    match server.find_top_documents_by_status(query, status) {
        Ok(results) => {
            for document in &results {
                write_document(out, document)?;
            }
        }
        Err(e) => writeln!(out, "Error in searching: {e}")?,
    }
    Ok(())
}

/// Print the match report of `query` for every document, in ingestion order.
pub fn match_documents<W: Write>(
    out: &mut W,
    server: &SearchServer,
    query: &str,
) -> io::Result<()> {
    writeln!(out, "Matching for request: {query}")?;
    for id in server.documents() {
        match server.match_document(query, id) {
            Ok((words, status)) => write_match(out, id, &words, status)?,
            Err(e) => {
                writeln!(out, "Error in matching request {query}: {e}")?;
                break;
            }
        }
    }
    Ok(())
}
