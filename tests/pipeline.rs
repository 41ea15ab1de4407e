use std::fs;
use std::io::Write;
use std::path::PathBuf;

use lsi_search::config::{LsiConfig, SvdSolver};
use lsi_search::document::{FileSource, find_files};
use lsi_search::engine::LatentSemanticModel;
use lsi_search::{Error, SearchConfig, Session, search_documents};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn animals() -> Vec<(&'static str, &'static str)> {
    vec![("d1", "cat dog"), ("d2", "dog bird"), ("d3", "cat bird cat")]
}

fn check_animals(config: SearchConfig) {
    let session = Session::from_texts(animals(), config);
    let index = session.index().unwrap();
    assert_eq!(index.dictionary().len(), 3);

    let outcome = index.search("cat");
    assert_eq!(outcome.ranked.len(), 3);
    let (last, last_score) = outcome.ranked.last().unwrap();
    assert_eq!(last, &PathBuf::from("d2"));
    for (_, score) in &outcome.ranked {
        assert!(*score >= *last_score);
    }

    let relevant: Vec<PathBuf> = outcome.relevant.iter().map(|(_, p)| p.clone()).collect();
    assert!(relevant.contains(&PathBuf::from("d1")));
    assert!(relevant.contains(&PathBuf::from("d3")));
}

#[test]
fn animals_scenario_scaled() {
    check_animals(SearchConfig::default());
}

#[test]
fn animals_scenario_unscaled() {
    let config = SearchConfig {
        lsi: LsiConfig { scaled: false, ..LsiConfig::default() },
        ..SearchConfig::default()
    };
    check_animals(config);
}

#[test]
fn animals_scenario_lanczos() {
    let config = SearchConfig {
        lsi: LsiConfig { solver: SvdSolver::Lanczos, ..LsiConfig::default() },
        ..SearchConfig::default()
    };
    check_animals(config);
}

#[test]
fn punctuation_query_matches_nothing() {
    let outcome = search_documents(animals(), "...", SearchConfig::default()).unwrap();
    assert!(outcome.ranked.iter().all(|(_, score)| *score == 0.0));
    assert!(outcome.relevant.is_empty());
}

#[test]
fn single_document_matches_itself() {
    let outcome = search_documents(
        [("only", "alpha beta beta")],
        "alpha beta beta",
        SearchConfig::default(),
    )
    .unwrap();
    assert!((outcome.ranked[0].1 - 1.0).abs() < 1e-9);
    assert_eq!(outcome.relevant, vec![(1, PathBuf::from("only"))]);
}

#[test]
fn empty_directory_never_reaches_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let files = find_files(dir.path());
    assert!(files.is_empty());

    let mut session = Session::default();
    let report = session.ingest(&files, &FileSource);
    assert!(report.added.is_empty());
    assert!(matches!(session.search("anything"), Err(Error::EmptyCorpus)));
}

#[test]
fn directory_run_with_a_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "Rust borrows memory safely.").unwrap();
    fs::write(dir.path().join("b.txt"), "Python collects garbage.").unwrap();
    fs::write(dir.path().join("c.pdf"), "%PDF-1.4").unwrap();
    fs::write(dir.path().join("d.txt"), [0xffu8, 0xfe]).unwrap();

    let mut session = Session::default();
    let report = session.ingest(&find_files(dir.path()), &FileSource);
    assert_eq!(report.added.len(), 2);
    assert_eq!(report.failed.len(), 2);

    let outcome = session.search("memory").unwrap();
    assert_eq!(outcome.relevant, vec![(1, dir.path().join("a.txt"))]);
    let (_, other) = outcome
        .ranked
        .iter()
        .find(|(p, _)| p == &dir.path().join("b.txt"))
        .unwrap();
    assert_eq!(*other, 0.0);
}

#[test]
fn unrelated_document_is_not_relevant() {
    let docs = [("fruit", "apple banana"), ("berry", "cherry grape")];
    let outcome = search_documents(docs, "apple", SearchConfig::default()).unwrap();
    assert_eq!(
        outcome.ranked,
        vec![(PathBuf::from("fruit"), outcome.ranked[0].1), (PathBuf::from("berry"), 0.0)]
    );
    assert_eq!(outcome.relevant, vec![(1, PathBuf::from("fruit"))]);
}

fn disjoint_documents(solver: SvdSolver) {
    let docs = [
        ("a", "apple banana"),
        ("b", "cherry grape"),
        ("c", "kiwi lemon"),
        ("d", "mango olive"),
    ];
    let config = SearchConfig {
        lsi: LsiConfig { solver, ..LsiConfig::default() },
        ..SearchConfig::default()
    };
    let index = Session::from_texts(docs, config).index().unwrap();
    assert_eq!(index.model().num_topics(), 4);

    let outcome = index.search("apple");
    assert_eq!(outcome.ranked[0].0, PathBuf::from("a"));
    assert!((outcome.ranked[0].1 - 1.0).abs() < 1e-9);
    for (_, score) in &outcome.ranked[1..] {
        assert_eq!(*score, 0.0);
    }
    assert_eq!(outcome.relevant, vec![(1, PathBuf::from("a"))]);
}

#[test]
fn disjoint_documents_dense() {
    disjoint_documents(SvdSolver::Dense);
}

#[test]
fn disjoint_documents_lanczos() {
    disjoint_documents(SvdSolver::Lanczos);
}

const MEMO: &str = concat!(
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    "<w:body><w:p><w:r><w:t>budget meeting</w:t></w:r></w:p></w:body></w:document>",
);

#[test]
fn docx_files_are_indexed() {
    let dir = tempfile::tempdir().unwrap();
    let mut zip = ZipWriter::new(fs::File::create(dir.path().join("memo.docx")).unwrap());
    zip.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
    zip.write_all(MEMO.as_bytes()).unwrap();
    zip.finish().unwrap();
    fs::write(dir.path().join("notes.txt"), "holiday plans").unwrap();

    let mut session = Session::default();
    let report = session.ingest(&find_files(dir.path()), &FileSource);
    assert!(report.failed.is_empty());

    let outcome = session.search("budget").unwrap();
    assert_eq!(outcome.relevant, vec![(1, dir.path().join("memo.docx"))]);
}

#[test]
fn session_accumulates_across_directories() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    fs::write(first.path().join("x.txt"), "orange apple").unwrap();
    fs::write(second.path().join("y.txt"), "violet lilac").unwrap();

    let mut session = Session::default();
    session.ingest(&find_files(first.path()), &FileSource);
    session.ingest(&find_files(second.path()), &FileSource);
    session.ingest(&find_files(first.path()), &FileSource);
    assert_eq!(session.len(), 2);

    let outcome = session.search("apple").unwrap();
    assert_eq!(outcome.relevant[0].1, first.path().join("x.txt"));
}
