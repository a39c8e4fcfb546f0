use anyhow::Result;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tse_core::pagedir::Corpus;
use tse_core::persist::load_index;
use tse_core::rank::write_results;
use tse_core::{search, IndexStore, Query, RankedDoc, Ranking, SetupError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
pub struct SearchResponse<'a> {
    pub query: String,
    pub total_hits: usize,
    pub results: &'a [RankedDoc],
}

/// A loaded index bound to the corpus it was built from.
pub struct Querier {
    store: IndexStore,
    corpus: Corpus,
    num_docs: usize,
    format: OutputFormat,
}

impl Querier {
    pub fn new(store: IndexStore, corpus: Corpus, format: OutputFormat) -> Self {
        let num_docs = corpus.count_documents() as usize;
        Self { store, corpus, num_docs, format }
    }

    /// Validate the corpus directory and load the index file.
    pub fn open(corpus_dir: &str, index_file: &str, format: OutputFormat) -> Result<Self> {
        if corpus_dir.is_empty() {
            return Err(SetupError::NullArgument("corpus directory").into());
        }
        if index_file.is_empty() {
            return Err(SetupError::NullArgument("index file").into());
        }
        let corpus = Corpus::open(corpus_dir)?;
        let store = load_index(index_file)
            .map_err(|source| SetupError::UnreadableIndex { path: index_file.into(), source })?;
        let querier = Self::new(store, corpus, format);
        tracing::info!(num_docs = querier.num_docs, num_words = querier.store.len(), "querier ready");
        Ok(querier)
    }

    pub fn num_docs(&self) -> usize { self.num_docs }

    /// Answer queries from `input`, one per line, until end of input.
    /// Malformed queries are reported on `err` and skipped.
    pub fn run<R, W, E>(&self, mut input: R, out: &mut W, err: &mut E, prompt: bool) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut buf = Vec::new();
        loop {
            if prompt {
                write!(out, "Query? ")?;
                out.flush()?;
            }
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            if buf.is_empty() {
                continue;
            }
            // Invalid UTF-8 becomes U+FFFD and fails the letters-only rule.
            let line = String::from_utf8_lossy(&buf);
            match Query::parse(&line) {
                Ok(query) => self.answer(&query, out)?,
                Err(e) => {
                    tracing::debug!(line = %line, error = %e, "rejected query");
                    writeln!(err, "ERROR: {e}")?;
                }
            }
        }
        if prompt {
            writeln!(out)?;
        }
        Ok(())
    }

    /// Score, rank and print one query.
    pub fn answer<W: Write>(&self, query: &Query, out: &mut W) -> io::Result<()> {
        let scores = search::score(query, &self.store, self.num_docs);
        let ranking = Ranking::from_scores(&scores);
        tracing::debug!(query = %query, hits = ranking.len(), "evaluated query");
        let docs = ranking.resolve(&self.corpus);

        match self.format {
            OutputFormat::Text => {
                writeln!(out, "Query: {query}")?;
                write_results(out, &docs)
            }
            OutputFormat::Json => {
                let response = SearchResponse { query: query.to_string(), total_hits: docs.len(), results: &docs };
                serde_json::to_writer(&mut *out, &response)?;
                writeln!(out)
            }
        }
    }
}
