use anyhow::{bail, Context, Result};
use docqa_chunker::{fingerprint, plan_embedding_batches, Chunk, Chunker, ChunkingReport};
use docqa_retrieval::{RetrievalGrader, ScoredCandidate, NO_ANSWER_MESSAGE};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::AppConfig;
use crate::{ChunkArgs, GradeArgs, InspectArgs};

/// Everything the persistence side needs for one document
#[derive(Debug, Serialize)]
struct IngestRecord {
    document: String,
    fingerprint: String,
    chunks: Vec<Chunk>,
    embedding_batches: Vec<Vec<String>>,
    report: ChunkingReport,
}

pub(crate) fn run_chunk(args: &ChunkArgs, config: &AppConfig) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let markdown = std::str::from_utf8(&bytes)
        .with_context(|| format!("{} is not valid UTF-8", args.file.display()))?;
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| document_name(&args.file));

    let chunker = Chunker::new(config.chunking.clone())?;
    let doc = chunker
        .chunk_document(markdown, &name)
        .with_context(|| format!("Failed to chunk {}", args.file.display()))?;
    if doc.chunks.is_empty() {
        bail!("{name}: no chunks produced");
    }

    let embedding_batches = plan_embedding_batches(&doc.chunks, args.max_batch_tokens)
        .into_iter()
        .map(|batch| {
            batch
                .into_iter()
                .map(|idx| doc.chunks[idx].chunk_id.clone())
                .collect()
        })
        .collect();

    let record = IngestRecord {
        document: doc.document,
        fingerprint: fingerprint(&bytes),
        chunks: doc.chunks,
        embedding_batches,
        report: doc.report,
    };
    write_json(&record, args.output.as_deref())
}

pub(crate) fn run_inspect(args: &InspectArgs, config: &AppConfig) -> Result<()> {
    let markdown = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let chunker = Chunker::new(config.chunking.clone())?;
    let inspections = chunker.inspect_sections(&markdown)?;

    let toc = inspections.iter().filter(|i| i.is_toc()).count();
    log::info!(
        "{}: {} sections, {toc} TOC candidates",
        args.file.display(),
        inspections.len()
    );
    write_json(&inspections, args.output.as_deref())
}

pub(crate) fn run_grade(args: &GradeArgs, config: &AppConfig) -> Result<()> {
    let raw = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let mut candidates: Vec<ScoredCandidate> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse candidates in {}", args.file.display()))?;

    let mut grader_config = config.retrieval;
    if let Some(primary) = args.primary {
        grader_config.primary_threshold = primary;
    }
    if let Some(secondary) = args.secondary {
        grader_config.secondary_threshold = secondary;
    }
    if let Some(max_context) = args.max_context {
        grader_config.max_context_chunks = max_context;
    }
    if let Some(top_k) = args.top_k {
        grader_config.top_k = top_k;
    }
    let grader = RetrievalGrader::new(grader_config)?;

    // Similarity search hands over descending scores; hand-written files may not
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    let result = grader.grade(&candidates)?;
    log::info!(
        "mode={} top_score={:.3} results={}",
        result.mode.as_str(),
        result.top_score,
        result.results.len()
    );

    if args.context {
        if result.is_answerable() {
            println!("{}", result.render_context());
        } else {
            println!("{NO_ANSWER_MESSAGE}");
        }
        return Ok(());
    }

    write_json(&result, None)
}

fn document_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
