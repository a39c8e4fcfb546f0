use crate::index::{IndexStore, PostingList};
use crate::query::{Query, Token};
use crate::DocId;

/// Resolved form of a query token.
enum Term<'a> {
    And,
    Or,
    Known(&'a PostingList),
    Unknown,
}

/// Score of the AND-clause being walked for one document.
#[derive(Clone, Copy)]
enum Clause {
    /// No word evaluated since the clause began.
    Empty,
    /// Minimum count over the words seen so far.
    Running(u32),
    /// An unknown word zeroed the clause; remaining words are skipped.
    Zeroed,
}

impl Clause {
    fn score(self) -> u32 {
        match self {
            Clause::Running(min) => min,
            Clause::Empty | Clause::Zeroed => 0,
        }
    }

    fn meet(self, count: u32) -> Self {
        match self {
            Clause::Empty => Clause::Running(count),
            Clause::Running(min) => Clause::Running(min.min(count)),
            Clause::Zeroed => Clause::Zeroed,
        }
    }
}

/// Score every document for `query`, adding into `scores`.
///
/// `scores[i]` belongs to docID `i + 1`. A clause scores the minimum count of
/// its words in the document (0 if any word is unknown to the index); clause
/// scores are summed across `or`, saturating at `u32::MAX`.
pub fn evaluate(query: &Query, store: &IndexStore, scores: &mut [u32]) {
    let terms: Vec<Term<'_>> = query
        .tokens()
        .iter()
        .map(|token| match token {
            Token::And => Term::And,
            Token::Or => Term::Or,
            Token::Word(w) => store.lookup(w).map_or(Term::Unknown, Term::Known),
        })
        .collect();

    for (slot, doc_id) in scores.iter_mut().zip(1..) {
        *slot = slot.saturating_add(score_document(&terms, doc_id));
    }
}

fn score_document(terms: &[Term<'_>], doc_id: DocId) -> u32 {
    let mut total: u32 = 0;
    let mut clause = Clause::Empty;
    for term in terms {
        clause = match (clause, term) {
            (_, Term::Or) => {
                total = total.saturating_add(clause.score());
                Clause::Empty
            }
            (_, Term::And) | (Clause::Zeroed, _) => clause,
            (_, Term::Unknown) => Clause::Zeroed,
            (_, Term::Known(postings)) => clause.meet(postings.count(doc_id)),
        };
    }
    total.saturating_add(clause.score())
}

/// Fresh score vector for a corpus of `num_docs` documents.
pub fn score(query: &Query, store: &IndexStore, num_docs: usize) -> Vec<u32> {
    let mut scores = vec![0; num_docs];
    evaluate(query, store, &mut scores);
    scores
}
