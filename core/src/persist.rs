use crate::error::IndexError;
use crate::index::{IndexStore, PostingList};
use crate::DocId;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Write `store` to `path`, one line per word:
/// `word docID count docID count ...`
///
/// Words are written in ascending order and each line's pairs are sorted by
/// docID, so the same index always produces the same bytes.
pub fn save_index<P: AsRef<Path>>(store: &IndexStore, path: P) -> Result<(), IndexError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| IndexError::Open { path: path.to_path_buf(), source })?;
    let mut out = BufWriter::new(file);
    write_index(store, &mut out).map_err(|source| IndexError::Io { path: path.to_path_buf(), source })?;
    tracing::info!(path = %path.display(), words = store.len(), "index saved");
    Ok(())
}

/// Serialize `store` in the index file format to any writer.
pub fn write_index<W: Write>(store: &IndexStore, out: &mut W) -> std::io::Result<()> {
    let mut words: Vec<(&String, &PostingList)> = store.iter().collect();
    words.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (word, postings) in words {
        let mut pairs: Vec<(DocId, u32)> = postings.iter().collect();
        pairs.sort_unstable_by_key(|(doc_id, _)| *doc_id);
        write!(out, "{word}")?;
        for (doc_id, count) in pairs {
            write!(out, " {doc_id} {count}")?;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Read an index file written by [`save_index`]. The store is sized from the
/// number of lines in the file.
pub fn load_index<P: AsRef<Path>>(path: P) -> Result<IndexStore, IndexError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IndexError::Open { path: path.to_path_buf(), source })?;
    let lines: Vec<String> = BufReader::new(file)
        .lines()
        .collect::<Result<_, _>>()
        .map_err(|source| IndexError::Io { path: path.to_path_buf(), source })?;
    let store = parse_index(lines.iter().map(String::as_str))?;
    tracing::info!(path = %path.display(), words = store.len(), "index loaded");
    Ok(store)
}

/// Parse index lines into a store. Counts are stored verbatim.
pub fn parse_index<'a, I>(lines: I) -> Result<IndexStore, IndexError>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: ExactSizeIterator,
{
    let lines = lines.into_iter();
    let mut store = IndexStore::new(lines.len().max(1))?;
    for (n, line) in lines.enumerate() {
        let line_no = n + 1;
        let malformed = |reason: String| IndexError::Malformed { line: line_no, reason };

        let mut tokens = line.split_ascii_whitespace();
        let word = tokens.next().ok_or_else(|| malformed("empty line".into()))?;
        let mut postings = PostingList::new();
        while let Some(doc) = tokens.next() {
            let count = tokens
                .next()
                .ok_or_else(|| malformed(format!("docID {doc} has no count")))?;
            let doc_id: DocId = doc.parse().map_err(|_| malformed(format!("bad docID '{doc}'")))?;
            let count: u32 = count.parse().map_err(|_| malformed(format!("bad count '{count}'")))?;
            if doc_id == 0 {
                return Err(malformed("docID 0".into()));
            }
            if count == 0 {
                return Err(malformed(format!("zero count for docID {doc_id}")));
            }
            if postings.set(doc_id, count).is_some() {
                return Err(malformed(format!("duplicate docID {doc_id}")));
            }
        }
        if postings.is_empty() {
            return Err(malformed(format!("word '{word}' has no postings")));
        }
        if !store.insert_postings(word.to_string(), postings) {
            return Err(malformed(format!("duplicate word '{word}'")));
        }
    }
    Ok(store)
}
