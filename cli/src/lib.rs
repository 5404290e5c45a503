use anyhow::{bail, Context, Result};
use serde::Deserialize;
use sift_core::{
    paginate, process_queries, remove_duplicates, DocumentId, DocumentStatus, RequestQueue, SearchServer, PAR, SEQ,
};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: DocumentId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Every `.json`/`.jsonl` file under `input`, or `input` itself if it is a file.
pub fn input_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
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

pub fn load_documents(input: &Path) -> Result<Vec<InputDoc>> {
    let files = input_files(input);
    if files.is_empty() {
        bail!("no input documents found at {}", input.display());
    }
    let mut docs = Vec::new();
    for file in files {
        let read = if extension(&file) == Some("jsonl") {
            read_jsonl(&file, &mut docs)
        } else {
            read_json(&file, &mut docs)
        };
        read.with_context(|| format!("reading {}", file.display()))?;
    }
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        docs.push(serde_json::from_str(&line).with_context(|| format!("line {}", n + 1))?);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        _ => bail!("expected a document object or an array of them"),
    }
    Ok(())
}

pub fn build_server(input: &Path, stop_words: &str) -> Result<SearchServer> {
    let server = SearchServer::new(stop_words)?;
    for doc in load_documents(input)? {
        server.add_document(doc.id, &doc.text, doc.status, &doc.ratings)?;
    }
    tracing::info!(num_docs = server.document_count(), num_words = server.interned_words(), "ingested documents");
    Ok(server)
}

/// Runs each query through a [`RequestQueue`] and prints the results page by page.
pub fn search(
    server: &SearchServer,
    queries: &[String],
    status: DocumentStatus,
    page_size: usize,
    out: &mut impl Write,
) -> Result<()> {
    let mut queue = RequestQueue::new(server);
    for query in queries {
        let found = queue.add_find_request_with_status(query, status)?;
        writeln!(out, "{query}: {} found", found.len())?;
        for (n, page) in paginate(&found, page_size).into_iter().enumerate() {
            writeln!(out, "  page {}: {page}", n + 1)?;
        }
    }
    writeln!(out, "no-result requests: {}", queue.no_result_requests())?;
    Ok(())
}

/// Runs all queries at once and prints one JSON array per query.
pub fn search_batch(server: &SearchServer, queries: &[String], out: &mut impl Write) -> Result<()> {
    for found in process_queries(server, queries)? {
        writeln!(out, "{}", serde_json::to_string(&found)?)?;
    }
    Ok(())
}

pub fn match_document(
    server: &SearchServer,
    query: &str,
    id: DocumentId,
    parallel: bool,
    out: &mut impl Write,
) -> Result<()> {
    let (words, status) = if parallel {
        server.match_document_in(PAR, query, id)?
    } else {
        server.match_document_in(SEQ, query, id)?
    };
    let words: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
    let json = serde_json::json!({ "id": id, "words": words, "status": status });
    writeln!(out, "{json}")?;
    Ok(())
}

pub fn dedup(server: &SearchServer, out: &mut impl Write) -> Result<()> {
    let removed = remove_duplicates(server);
    writeln!(out, "{}", serde_json::to_string(&removed)?)?;
    Ok(())
}
