use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use tse_core::pagedir::Corpus;
use tse_core::persist::save_index;
use tse_core::{DocId, IndexStore, SetupError};

use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an inverted index from a crawler directory", long_about = None)]
struct Cli {
    /// Crawler output directory (must contain a .crawler marker)
    corpus_dir: String,
    /// Index file to write
    index_file: String,
    /// Expected number of distinct words
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..))]
    capacity: u32,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => return fail(&anyhow::Error::new(SetupError::Usage(e.render().to_string()))),
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(err: &anyhow::Error) -> ExitCode {
    eprintln!("ERROR: {err:#}");
    let code = err.downcast_ref::<SetupError>().map_or(1, SetupError::exit_code);
    ExitCode::from(code as u8)
}

fn run(cli: &Cli) -> Result<()> {
    if cli.corpus_dir.is_empty() {
        return Err(SetupError::NullArgument("corpus directory").into());
    }
    if cli.index_file.is_empty() {
        return Err(SetupError::NullArgument("index file").into());
    }
    let corpus = Corpus::open(&cli.corpus_dir)?;
    let store = build_index(&corpus, cli.capacity as usize)?;
    save_index(&store, &cli.index_file)
        .with_context(|| format!("writing index to {}", cli.index_file))?;
    Ok(())
}

/// Index every page of the corpus, docIDs 1.. up to the first missing page.
fn build_index(corpus: &Corpus, capacity: usize) -> Result<IndexStore> {
    let mut store = IndexStore::new(capacity)?;
    let mut doc_id: DocId = 1;
    while corpus.page_path(doc_id).is_file() {
        let page = corpus
            .load_page(doc_id)
            .with_context(|| format!("reading {}", corpus.page_path(doc_id).display()))?;
        let mut words = 0usize;
        for word in page.words() {
            store.increment(&word, doc_id)?;
            words += 1;
        }
        tracing::debug!(doc_id, url = %page.url, words, "indexed page");
        doc_id += 1;
    }
    tracing::info!(num_docs = doc_id - 1, num_words = store.len(), "indexed corpus");
    Ok(store)
}
