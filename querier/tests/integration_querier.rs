use querier::{OutputFormat, Querier};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use tse_core::pagedir::{self, Corpus};
use tse_core::persist::load_index;
use tse_core::rank::SEPARATOR;
use tse_core::SetupError;

// Counts per document:
//   dog: 1->3, 2->1, 4->5
//   cat: 1->5, 2->2
//   bird: 3->2
const INDEX: &str = "bird 3 2\ncat 1 5 2 2\ndog 1 3 2 1 4 5\n";

fn build_tiny_corpus() -> (TempDir, String, String) {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    fs::create_dir(&corpus).unwrap();
    pagedir::init(&corpus).unwrap();
    for doc_id in 1..=4 {
        fs::write(corpus.join(doc_id.to_string()), format!("http://pets.test/{doc_id}\n1\n<html></html>\n")).unwrap();
    }
    let index = dir.path().join("index");
    fs::write(&index, INDEX).unwrap();
    let s = |p: &Path| p.to_string_lossy().into_owned();
    let (c, i) = (s(&corpus), s(&index));
    (dir, c, i)
}

fn run(querier: &Querier, input: &str) -> (String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    querier.run(input.as_bytes(), &mut out, &mut err, false).unwrap();
    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

fn text_querier() -> (TempDir, Querier) {
    let (dir, corpus, index) = build_tiny_corpus();
    let q = Querier::open(&corpus, &index, OutputFormat::Text).unwrap();
    (dir, q)
}

#[test]
fn and_query_ranks_by_minimum() {
    let (_dir, q) = text_querier();
    assert_eq!(q.num_docs(), 4);
    let (out, err) = run(&q, "Dog AND cat\n");
    assert!(err.is_empty());
    assert_eq!(
        out,
        format!(
            "Query: dog and cat\nMatches 2 documents (ranked):\nscore   3 doc   1: http://pets.test/1\nscore   1 doc   2: http://pets.test/2\n{SEPARATOR}\n"
        )
    );
}

#[test]
fn or_query_sums_and_breaks_ties_by_higher_doc() {
    let (_dir, q) = text_querier();
    // doc1: 3+5=8, doc2: 1+2=3, doc3: 0, doc4: 5
    let (out, _) = run(&q, "dog or cat\n");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[1], "Matches 3 documents (ranked):");
    assert_eq!(lines[2], "score   8 doc   1: http://pets.test/1");
    assert_eq!(lines[3], "score   5 doc   4: http://pets.test/4");
    assert_eq!(lines[4], "score   3 doc   2: http://pets.test/2");

    // dog:1->3 or bird:3->2 ... doc1 3, doc3 2, doc2 1, doc4 5
    let (out, _) = run(&q, "bird or dog\n");
    let docs: Vec<&str> = out.lines().filter(|l| l.starts_with("score")).collect();
    assert_eq!(docs.len(), 4);
    assert!(docs[0].ends_with("/4"));
}

#[test]
fn unknown_word_zeroes_clause() {
    let (_dir, q) = text_querier();
    let (out, _) = run(&q, "dog zebra\n");
    assert_eq!(out, format!("Query: dog zebra\nNo documents match.\n{SEPARATOR}\n"));
    let (out, _) = run(&q, "dog zebra or bird\n");
    assert!(out.contains("score   2 doc   3: http://pets.test/3"));
}

#[test]
fn bad_queries_are_reported_and_skipped() {
    let (_dir, q) = text_querier();
    let (out, err) = run(&q, "and dog\n\ndog or\ndog2\ndog and or cat\n   \nbird\n");
    assert_eq!(
        err,
        "ERROR: 'and' cannot be first\nERROR: 'or' cannot be last\nERROR: bad character '2' in query\nERROR: 'and' and 'or' cannot be adjacent\nERROR: empty query\n"
    );
    assert_eq!(out.matches(SEPARATOR).count(), 1);
    assert!(out.starts_with("Query: bird\n"));
}

#[test]
fn invalid_utf8_line_is_rejected_and_session_continues() {
    let (_dir, q) = text_querier();
    let mut out = Vec::new();
    let mut err = Vec::new();
    q.run(&b"caf\xe9\nbird\n"[..], &mut out, &mut err, false).unwrap();
    let (out, err) = (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap());
    assert_eq!(err, "ERROR: bad character '\u{fffd}' in query\n");
    assert!(out.starts_with("Query: bird\n"));
    assert!(out.contains("score   2 doc   3: http://pets.test/3"));
}

#[test]
fn missing_page_is_skipped_in_results() {
    let (dir, q) = text_querier();
    fs::remove_file(dir.path().join("corpus").join("1")).unwrap();
    let (out, _) = run(&q, "cat\n");
    assert!(!out.contains("doc   1:"));
    assert!(out.contains("score   2 doc   2: http://pets.test/2"));
}

#[test]
fn json_format_emits_one_object_per_query() {
    let (_dir, corpus, index) = build_tiny_corpus();
    let q = Querier::open(&corpus, &index, OutputFormat::Json).unwrap();
    let (out, _) = run(&q, "dog\nzebra\n");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["query"], "dog");
    assert_eq!(first["total_hits"], 3);
    assert_eq!(first["results"][0]["doc_id"], 4);
    assert_eq!(first["results"][0]["score"], 5);
    assert_eq!(first["results"][0]["url"], "http://pets.test/4");

    let second: Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["total_hits"], 0);
    assert!(second["results"].as_array().unwrap().is_empty());
}

#[test]
fn index_file_round_trips_through_loader() {
    let (dir, _, index) = build_tiny_corpus();
    let store = load_index(&index).unwrap();
    let rewritten = dir.path().join("rewritten");
    tse_core::persist::save_index(&store, &rewritten).unwrap();
    assert_eq!(fs::read_to_string(rewritten).unwrap(), INDEX);
    assert_eq!(Corpus::open(dir.path().join("corpus")).unwrap().count_documents(), 4);
}

#[test]
fn setup_failures_map_to_exit_codes() {
    let (dir, corpus, index) = build_tiny_corpus();
    let code = |r: anyhow::Result<Querier>| r.err().and_then(|e| e.downcast_ref::<SetupError>().map(SetupError::exit_code));

    assert_eq!(code(Querier::open("", &index, OutputFormat::Text)), Some(2));
    let missing = dir.path().join("missing").to_string_lossy().into_owned();
    assert_eq!(code(Querier::open(&missing, &index, OutputFormat::Text)), Some(3));
    let not_crawled = dir.path().to_string_lossy().into_owned();
    assert_eq!(code(Querier::open(&not_crawled, &index, OutputFormat::Text)), Some(4));
    let no_index = dir.path().join("nope").to_string_lossy().into_owned();
    assert_eq!(code(Querier::open(&corpus, &no_index, OutputFormat::Text)), Some(5));

    fs::write(&index, "dog 1\n").unwrap();
    assert_eq!(code(Querier::open(&corpus, &index, OutputFormat::Text)), Some(5));
}
