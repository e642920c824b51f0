use super::common::*;
use crate::workflows::achievements::domain::{
    AchievementLevel, AchievementRecord, AchievementStatus, Category,
};
use crate::workflows::achievements::visibility::{
    group_by_event, group_by_owner, review_queue, visible_to, DashboardSummary, RecordQuery,
};

fn mixed_records() -> Vec<AchievementRecord> {
    vec![
        stored_record(
            "e1",
            &arjun(),
            AchievementStatus::Approved,
            Category::Hackathon,
            AchievementLevel::National,
        ),
        stored_record(
            "e2",
            &priya(),
            AchievementStatus::Flagged,
            Category::Certification,
            AchievementLevel::International,
        ),
        stored_record(
            "e3",
            &kavya(),
            AchievementStatus::Flagged,
            Category::Workshop,
            AchievementLevel::State,
        ),
        stored_record(
            "e4",
            &arjun(),
            AchievementStatus::Rejected,
            Category::Internship,
            AchievementLevel::Industry,
        ),
    ]
}

fn ids(records: &[AchievementRecord]) -> Vec<&str> {
    records.iter().map(|record| record.id.0.as_str()).collect()
}

#[test]
fn administrators_see_everything_in_order() {
    let records = mixed_records();
    assert_eq!(ids(&visible_to(&ramesh(), &records)), vec!["e1", "e2", "e3", "e4"]);
}

#[test]
fn faculty_see_their_department() {
    let records = mixed_records();
    assert_eq!(ids(&visible_to(&meera(), &records)), vec!["e1", "e2", "e4"]);
    assert_eq!(ids(&visible_to(&suresh(), &records)), vec!["e3"]);
}

#[test]
fn students_see_only_their_own_records() {
    let records = mixed_records();
    assert_eq!(ids(&visible_to(&arjun(), &records)), vec!["e1", "e4"]);
    assert_eq!(ids(&visible_to(&priya(), &records)), vec!["e2"]);
}

#[test]
fn review_queue_is_scoped_and_flagged_only() {
    let records = mixed_records();
    assert_eq!(ids(&review_queue(&ramesh(), &records)), vec!["e2", "e3"]);
    assert_eq!(ids(&review_queue(&meera(), &records)), vec!["e2"]);
    assert_eq!(ids(&review_queue(&suresh(), &records)), vec!["e3"]);
    assert!(review_queue(&priya(), &records).is_empty());
}

#[test]
fn filtering_never_mutates_records() {
    let records = mixed_records();
    let before = records.clone();
    let _ = visible_to(&meera(), &records);
    let _ = review_queue(&ramesh(), &records);
    assert_eq!(records, before);
}

#[test]
fn query_narrows_by_fields_and_search() {
    let records = visible_to(&ramesh(), &mixed_records());

    let flagged = RecordQuery {
        status: Some(AchievementStatus::Flagged),
        ..RecordQuery::default()
    };
    assert_eq!(ids(&flagged.apply(records.clone())), vec!["e2", "e3"]);

    let ece = RecordQuery {
        department: Some("ECE".to_string()),
        ..RecordQuery::default()
    };
    assert_eq!(ids(&ece.apply(records.clone())), vec!["e3"]);

    let by_roll = RecordQuery {
        search: Some("21cs001".to_string()),
        ..RecordQuery::default()
    };
    assert_eq!(ids(&by_roll.apply(records.clone())), vec!["e1", "e4"]);

    let combined = RecordQuery {
        category: Some(Category::Certification),
        level: Some(AchievementLevel::International),
        search: Some("priya".to_string()),
        ..RecordQuery::default()
    };
    assert_eq!(ids(&combined.apply(records.clone())), vec!["e2"]);

    assert!(RecordQuery::default().is_empty());
    assert_eq!(RecordQuery::default().apply(records.clone()), records);
}

#[test]
fn dashboard_counts_visible_records() {
    let mut records = mixed_records();
    records.push(stored_record(
        "e5",
        &priya(),
        AchievementStatus::Pending,
        Category::Project,
        AchievementLevel::Institutional,
    ));
    let summary = DashboardSummary::from_records(&visible_to(&meera(), &records));

    assert_eq!(summary.total, 4);
    assert_eq!(summary.approved, 1);
    assert_eq!(summary.flagged, 1);
    assert_eq!(summary.pending, 1);
    assert_eq!(summary.international, 1);
    assert_eq!(summary.by_category.get(&Category::Internship), Some(&1));
    assert_eq!(summary.by_category.get(&Category::Workshop), None);
}

#[test]
fn grouping_preserves_first_seen_order() {
    let mut records = mixed_records();
    records[3].title = records[0].title.clone();

    let owners = group_by_owner(&records);
    assert_eq!(owners.len(), 3);
    assert_eq!(owners[0].owner_name, "Arjun Sharma");
    assert_eq!(ids(&owners[0].records), vec!["e1", "e4"]);

    let events = group_by_event(&records);
    assert_eq!(events.len(), 3);
    assert_eq!(ids(&events[0].records), vec!["e1", "e4"]);
    assert_eq!(events[0].category, Category::Hackathon);
}
