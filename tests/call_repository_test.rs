use chrono::{TimeZone, Utc};
use uuid::Uuid;

use callsight::application::ports::CallRepository;
use callsight::domain::CallRecord;
use callsight::infrastructure::persistence::InMemoryCallRepository;

fn record(call_type: &str, day: u32) -> CallRecord {
    CallRecord {
        id: Uuid::new_v4(),
        interaction_id: "int-1".to_string(),
        transcription: "Dispatcher: hello ".to_string(),
        summary: "Summary.".to_string(),
        dispatcher: "Unit 7".to_string(),
        call_type: call_type.to_string(),
        language: "en-us".to_string(),
        notes: String::new(),
        qa_answers: vec![],
        created_at: Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn given_inserted_records_when_listing_then_insertion_order_is_kept() {
    let repository = InMemoryCallRepository::new();
    let first = record("Police", 1);
    let second = record("Fire", 2);

    repository.insert(&first).await.unwrap();
    repository.insert(&second).await.unwrap();

    let records = repository.list().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, first.id);
    assert_eq!(records[1].id, second.id);
}

#[tokio::test]
async fn given_mixed_call_types_when_counting_by_type_then_empty_types_are_skipped() {
    let repository = InMemoryCallRepository::new();
    repository.insert(&record("Police", 1)).await.unwrap();
    repository.insert(&record("Police", 2)).await.unwrap();
    repository.insert(&record("Fire", 3)).await.unwrap();
    repository.insert(&record("", 4)).await.unwrap();

    let counts = repository.count_by_call_type().await.unwrap();

    assert_eq!(counts.len(), 2);
    let police = counts.iter().find(|c| c.key == "Police").unwrap();
    assert_eq!(police.count, 2);
    let fire = counts.iter().find(|c| c.key == "Fire").unwrap();
    assert_eq!(fire.count, 1);
}

#[tokio::test]
async fn given_records_across_days_when_counting_by_date_then_keys_are_sorted_days() {
    let repository = InMemoryCallRepository::new();
    repository.insert(&record("Police", 9)).await.unwrap();
    repository.insert(&record("Fire", 2)).await.unwrap();
    repository.insert(&record("Other", 9)).await.unwrap();

    let counts = repository.count_by_date().await.unwrap();

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].key, "2025-06-02");
    assert_eq!(counts[0].count, 1);
    assert_eq!(counts[1].key, "2025-06-09");
    assert_eq!(counts[1].count, 2);
}
