use std::sync::Arc;

use loader::{CorpusLoader, DelimitedFileSource, InMemorySource, JsonFileSource};
use quiz_core::model::RawRow;

fn valid_row(prompt: &str) -> RawRow {
    RawRow::new()
        .with("question", prompt)
        .with("option_a", "1")
        .with("option_b", "2")
        .with("option_c", "3")
        .with("option_d", "4")
        .with("correct_option", "d")
}

#[tokio::test]
async fn one_failing_source_does_not_block_the_others() {
    let loader = CorpusLoader::new()
        .with_source(Arc::new(JsonFileSource::new("broken", "/no/such/file.json")))
        .with_source(Arc::new(InMemorySource::new(
            "good",
            vec![valid_row("Q1"), valid_row("Q2")],
        )));

    let outcome = loader.load().await;

    assert_eq!(outcome.corpus.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].label, "broken");
    assert!(outcome.failures[0].to_string().contains("broken"));
}

#[tokio::test]
async fn mixed_file_sources_merge_in_registration_order() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("bank.json");
    std::fs::write(
        &json_path,
        r#"[
            {"question": "JSON question?", "option_a": "1", "option_b": "2",
             "option_c": "3", "option_d": "4", "correct_option": "A",
             "topic": "SQL"}
        ]"#,
    )
    .unwrap();

    let csv_path = dir.path().join("bank.csv");
    std::fs::write(
        &csv_path,
        "question,option_a,option_b,option_c,option_d,correct_option,topic\n\
         CSV question?,1,2,3,4,b,UML\n\
         ,1,2,3,4,b,UML\n",
    )
    .unwrap();

    let loader = CorpusLoader::new()
        .with_source(Arc::new(JsonFileSource::new("json-bank", &json_path)))
        .with_source(Arc::new(DelimitedFileSource::csv("csv-bank", &csv_path)));

    let outcome = loader.load().await;

    // The blank-prompt CSV row is rejected, the rest merge in order.
    assert_eq!(outcome.corpus.len(), 2);
    assert_eq!(outcome.rejected_rows, 1);
    assert!(outcome.failures.is_empty());

    let records = outcome.corpus.records();
    assert_eq!(records[0].id().as_str(), "json-bank-1");
    assert_eq!(records[0].topic(), "SQL");
    assert_eq!(records[1].id().as_str(), "csv-bank-1");
    assert_eq!(records[1].prompt(), "CSV question?");
}

#[tokio::test]
async fn stale_ticket_marks_result_for_discard() {
    let loader = CorpusLoader::new().with_source(Arc::new(InMemorySource::new(
        "bank",
        vec![valid_row("Q1")],
    )));

    let ticket = loader.begin();
    let outcome = loader.load().await;
    assert!(ticket.is_current());
    assert_eq!(outcome.corpus.len(), 1);

    // A reload begun before this outcome is consumed supersedes it.
    let _newer = loader.begin();
    assert!(!ticket.is_current());
}
