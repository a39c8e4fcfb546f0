//! Crawler output directory: a `.crawler` marker plus one file per document,
//! named by docID, holding the URL, the crawl depth and the page HTML.

use crate::error::SetupError;
use crate::tokenizer;
use crate::DocId;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const MARKER: &str = ".crawler";

/// Mark `dir` as a crawler directory.
pub fn init<P: AsRef<Path>>(dir: P) -> io::Result<()> {
    File::create(dir.as_ref().join(MARKER)).map(|_| ())
}

#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
}

impl Corpus {
    /// Open a corpus, checking the directory exists and carries the marker.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, SetupError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(SetupError::MissingDirectory(root));
        }
        if !root.join(MARKER).is_file() {
            return Err(SetupError::NotCrawlerDirectory(root));
        }
        Ok(Self { root })
    }

    pub fn page_path(&self, doc_id: DocId) -> PathBuf {
        self.root.join(doc_id.to_string())
    }

    /// Number of documents: files `1`, `2`, ... up to the first gap.
    pub fn count_documents(&self) -> u32 {
        let mut n: DocId = 0;
        while self.page_path(n + 1).is_file() {
            n += 1;
        }
        tracing::debug!(root = %self.root.display(), documents = n, "sized corpus");
        n
    }

    pub fn load_page(&self, doc_id: DocId) -> io::Result<Page> {
        let text = fs::read_to_string(self.page_path(doc_id))?;
        Page::parse(&text)
    }

    /// URL of a document: the first line of its page file.
    pub fn page_url(&self, doc_id: DocId) -> io::Result<String> {
        let file = File::open(self.page_path(doc_id))?;
        let mut url = String::new();
        BufReader::new(file).read_line(&mut url)?;
        let url = url.trim_end_matches(['\n', '\r']);
        if url.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "page file has no URL line"));
        }
        Ok(url.to_string())
    }
}

/// A stored page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    /// Crawl depth; `None` when the depth line is missing or not a number.
    pub depth: Option<u32>,
    pub html: String,
}

impl Page {
    /// Only the URL line is required. A bad depth line is logged and the
    /// page content is still returned.
    pub fn parse(text: &str) -> io::Result<Self> {
        let mut lines = text.lines();
        let url = lines
            .next()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "page file has no URL line"))?;
        let depth_line = lines.next().unwrap_or_default();
        let depth = depth_line.trim().parse().ok();
        if depth.is_none() {
            tracing::warn!(url, depth = depth_line, "page has no valid depth");
        }
        let html = lines.collect::<Vec<_>>().join("\n");
        Ok(Self { url: url.to_string(), depth, html })
    }

    /// Index-eligible words of the page content, in order.
    pub fn words(&self) -> impl Iterator<Item = String> + '_ {
        tokenizer::index_words(&self.html)
    }
}
