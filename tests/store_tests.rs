// tests/store_tests.rs

use std::{path::PathBuf, sync::Arc};

use exam_proctor::{
    models::exam_result::ExamResult,
    services::{
        question_bank::{BankError, QuestionBank},
        result_store::{ResultStore, ResultStoreError},
    },
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}_{}", uuid::Uuid::new_v4(), name))
}

fn result(student_id: &str, correct_count: usize) -> ExamResult {
    ExamResult {
        student_id: student_id.to_string(),
        score: 100.0 * correct_count as f64 / 5.0,
        correct_count,
        total_questions: 5,
        exam_time: "2024-09-01 10:15:00".to_string(),
        duration: "0:12:34".to_string(),
    }
}

#[tokio::test]
async fn absent_store_reads_as_empty() {
    let store = ResultStore::new(temp_path("exam_results.json"));
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn append_round_trip() {
    let store = ResultStore::new(temp_path("exam_results.json"));
    store.append(&result("20241315001", 2)).await.unwrap();
    let before = store.load().await.unwrap();

    let r = result("20241315002", 4);
    let count = store.append(&r).await.unwrap();

    let after = store.load().await.unwrap();
    assert_eq!(count, after.len());
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.last(), Some(&r));
    assert_eq!(after[..before.len()], before[..]);
}

#[tokio::test]
async fn store_uses_snake_case_field_names() {
    let path = temp_path("exam_results.json");
    let store = ResultStore::new(&path);
    store.append(&result("20241315003", 5)).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
    let record = &raw[0];
    for key in [
        "student_id",
        "score",
        "correct_count",
        "total_questions",
        "exam_time",
        "duration",
    ] {
        assert!(record.get(key).is_some(), "missing {}", key);
    }
}

#[tokio::test]
async fn corrupt_store_is_not_overwritten() {
    let path = temp_path("exam_results.json");
    tokio::fs::write(&path, b"{ definitely not an array").await.unwrap();
    let store = ResultStore::new(&path);

    let err = store.append(&result("20241315004", 1)).await.unwrap_err();
    assert!(matches!(err, ResultStoreError::Corrupt { .. }));

    let raw = tokio::fs::read(&path).await.unwrap();
    assert_eq!(raw, b"{ definitely not an array");
}

#[tokio::test]
async fn concurrent_appends_are_all_kept() {
    let store = Arc::new(ResultStore::new(temp_path("exam_results.json")));

    let mut tasks = Vec::new();
    for i in 0..16 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store
                .append(&result(&format!("20241315{:03}", i), i % 6))
                .await
                .unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(store.load().await.unwrap().len(), 16);
}

#[tokio::test]
async fn bank_loads_once_and_stays_identical() {
    let path = temp_path("questions.json");
    tokio::fs::write(
        &path,
        r#"[{"question": "2 ** 3?", "options": ["6", "8"], "correct_answer": "8"}]"#,
    )
    .await
    .unwrap();
    let bank = QuestionBank::new(&path);

    let first = bank.load().await.unwrap();
    // Later edits to the file are not picked up
    tokio::fs::write(&path, "[]").await.unwrap();
    let second = bank.load().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first[..], second[..]);
    assert_eq!(first[0].correct_answer, "8");
}

#[tokio::test]
async fn failed_bank_load_is_retried() {
    let path = temp_path("questions.json");
    let bank = QuestionBank::new(&path);
    assert!(matches!(bank.load().await, Err(BankError::Read { .. })));

    tokio::fs::write(
        &path,
        r#"[{"question": "bool(0)?", "options": ["True", "False"], "correct_answer": "False"}]"#,
    )
    .await
    .unwrap();
    assert_eq!(bank.load().await.unwrap().len(), 1);
}
