use docqa_chunker::Chunk;
use docqa_retrieval::{GraderConfig, RetrievalGrader, RetrievalMode, ScoredCandidate};
use proptest::prelude::*;
use std::collections::HashSet;

const PRIMARY: f32 = 0.65;

fn grader(secondary: f32, max_context_chunks: usize) -> RetrievalGrader {
    RetrievalGrader::new(GraderConfig {
        primary_threshold: PRIMARY,
        secondary_threshold: secondary,
        max_context_chunks,
        top_k: 5,
    })
    .unwrap()
}

/// Descending scores over a handful of sections
fn candidates() -> impl Strategy<Value = Vec<ScoredCandidate>> {
    prop::collection::vec((0.0f32..1.0, 0usize..4), 1..16).prop_map(|mut raw| {
        raw.sort_by(|a, b| b.0.total_cmp(&a.0));
        raw.into_iter()
            .enumerate()
            .map(|(i, (score, section))| {
                let id = format!("guide__sec{section}__chunk_{i:03}");
                ScoredCandidate::new(score, Chunk::new(id, format!("body {i}"), "guide", "S"))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn mode_follows_top_score(
        cands in candidates(),
        secondary in prop::sample::select(vec![0.30f32, 0.40]),
    ) {
        let result = grader(secondary, 4).grade(&cands).unwrap();
        let top = cands[0].score;
        let expected = if top < secondary {
            RetrievalMode::None
        } else if top < PRIMARY {
            RetrievalMode::Partial
        } else {
            RetrievalMode::Full
        };
        prop_assert_eq!(result.mode, expected);
        prop_assert_eq!(result.top_score, top);
    }

    #[test]
    fn full_context_is_bounded_and_anchored(
        cands in candidates(),
        secondary in prop::sample::select(vec![0.30f32, 0.40]),
        max_context in 1usize..6,
    ) {
        let result = grader(secondary, max_context).grade(&cands).unwrap();
        if result.mode == RetrievalMode::Full {
            prop_assert!(result.results.len() <= max_context);
            prop_assert_eq!(result.results[0].chunk_id(), cands[0].chunk_id());

            let ids: HashSet<&str> = result.results.iter().map(|c| c.chunk_id()).collect();
            prop_assert_eq!(ids.len(), result.results.len());

            let top_section = cands[0].section_key();
            for c in &result.results {
                prop_assert!(c.score >= secondary || c.section_key() == top_section);
            }
        } else {
            prop_assert!(result.results.len() <= 5);
        }
    }
}
