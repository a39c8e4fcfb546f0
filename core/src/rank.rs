use crate::pagedir::Corpus;
use crate::DocId;
use serde::Serialize;
use std::io::{self, Write};

/// Printed after every results block.
pub const SEPARATOR: &str = "-----------------------------------------------";

/// Documents with a positive score, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    ranked: Vec<(DocId, u32)>,
}

impl Ranking {
    /// Rank a score vector where `scores[i]` belongs to docID `i + 1`.
    ///
    /// Pairs are stably sorted by ascending score and read back from the top,
    /// so documents with equal scores come out highest docID first.
    pub fn from_scores(scores: &[u32]) -> Self {
        let mut pairs: Vec<(DocId, u32)> = (1..).zip(scores.iter().copied()).collect();
        pairs.sort_by_key(|&(_, score)| score);
        let ranked = pairs.into_iter().rev().take_while(|&(_, score)| score > 0).collect();
        Self { ranked }
    }

    pub fn is_empty(&self) -> bool { self.ranked.is_empty() }

    pub fn len(&self) -> usize { self.ranked.len() }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, u32)> + '_ {
        self.ranked.iter().copied()
    }

    /// Attach URLs from the corpus. Documents whose page cannot be read are
    /// logged and left out.
    pub fn resolve(&self, corpus: &Corpus) -> Vec<RankedDoc> {
        self.iter()
            .filter_map(|(doc_id, score)| match corpus.page_url(doc_id) {
                Ok(url) => Some(RankedDoc { score, doc_id, url }),
                Err(err) => {
                    tracing::warn!(doc_id, path = %corpus.page_path(doc_id).display(), error = %err, "cannot resolve ranked document");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedDoc {
    pub score: u32,
    pub doc_id: DocId,
    pub url: String,
}

/// Write a results block in the plain text layout.
pub fn write_results<W: Write>(out: &mut W, docs: &[RankedDoc]) -> io::Result<()> {
    if docs.is_empty() {
        writeln!(out, "No documents match.")?;
    } else {
        writeln!(out, "Matches {} documents (ranked):", docs.len())?;
        for doc in docs {
            writeln!(out, "score {:>3} doc {:>3}: {}", doc.score, doc.doc_id, doc.url)?;
        }
    }
    writeln!(out, "{SEPARATOR}")
}
