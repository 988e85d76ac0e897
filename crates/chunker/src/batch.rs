use crate::types::Chunk;

/// Default token budget for one embedding request
pub const DEFAULT_BATCH_TOKENS: usize = 80_000;

/// Rough token estimate: ~4 characters per token
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    (text.chars().count() / 4).max(1)
}

/// Group chunk indices into embedding batches whose estimated token total stays
/// within `max_tokens`.
///
/// A chunk that alone exceeds the budget is emitted as its own batch at the
/// point it is encountered; the batch being filled stays open.
#[must_use]
pub fn plan_embedding_batches(chunks: &[Chunk], max_tokens: usize) -> Vec<Vec<usize>> {
    let mut batches = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_tokens = 0;

    for (idx, chunk) in chunks.iter().enumerate() {
        let tokens = estimate_tokens(&chunk.text);

        if tokens > max_tokens {
            log::warn!(
                "Chunk {} (~{tokens} tokens) exceeds the batch budget, embedding alone",
                chunk.chunk_id
            );
            batches.push(vec![idx]);
            continue;
        }

        if current_tokens + tokens > max_tokens {
            batches.push(std::mem::take(&mut current));
            current_tokens = 0;
        }

        current.push(idx);
        current_tokens += tokens;
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}
