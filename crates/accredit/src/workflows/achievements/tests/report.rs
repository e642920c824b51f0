use super::common::*;
use crate::workflows::achievements::domain::{AchievementLevel, AchievementStatus, Category};
use crate::workflows::achievements::report::{aggregate, ComplianceBucket};

#[test]
fn empty_input_yields_zero_counts_everywhere() {
    let report = aggregate(&[]);

    assert_eq!(report.approved_records, 0);
    assert_eq!(report.category_counts.len(), Category::ordered().len());
    assert!(report.category_counts.values().all(|count| *count == 0));
    assert_eq!(report.buckets.len(), 6);
    assert!(report.buckets.iter().all(|bucket| bucket.actual == 0 && !bucket.compliant));
    assert_eq!(report.level_breakdown.len(), Category::ordered().len());
    assert_eq!(report.level_totals.total, 0);
}

#[test]
fn conference_counts_towards_two_buckets() {
    let records = vec![
        approved("c1", Category::Conference, AchievementLevel::International),
        approved("c2", Category::Conference, AchievementLevel::National),
        approved("w1", Category::Workshop, AchievementLevel::State),
    ];

    let report = aggregate(&records);

    let society = report
        .bucket(ComplianceBucket::SocietyActivities)
        .expect("bucket present");
    assert_eq!(society.actual, 3);
    assert!(!society.compliant);

    let papers = report
        .bucket(ComplianceBucket::ResearchPapers)
        .expect("bucket present");
    assert_eq!(papers.actual, 2);
    assert_eq!(papers.target, 2);
    assert!(papers.compliant);
}

#[test]
fn only_approved_records_are_counted() {
    let records = vec![
        approved("h1", Category::Hackathon, AchievementLevel::National),
        stored_record(
            "h2",
            &arjun(),
            AchievementStatus::Flagged,
            Category::Hackathon,
            AchievementLevel::National,
        ),
        stored_record(
            "h3",
            &priya(),
            AchievementStatus::Rejected,
            Category::Hackathon,
            AchievementLevel::National,
        ),
        stored_record(
            "h4",
            &priya(),
            AchievementStatus::Pending,
            Category::Competition,
            AchievementLevel::National,
        ),
    ];

    let report = aggregate(&records);

    assert_eq!(report.approved_records, 1);
    assert_eq!(report.category_count(Category::Hackathon), 1);
    assert_eq!(report.category_count(Category::Competition), 0);
    assert_eq!(
        report
            .bucket(ComplianceBucket::Hackathons)
            .map(|bucket| bucket.actual),
        Some(1)
    );
}

#[test]
fn state_industry_and_institutional_fold_into_other() {
    let records = vec![
        approved("i1", Category::Internship, AchievementLevel::Industry),
        approved("i2", Category::Internship, AchievementLevel::State),
        approved("i3", Category::Internship, AchievementLevel::Institutional),
        approved("i4", Category::Internship, AchievementLevel::International),
    ];

    let report = aggregate(&records);
    let internship = report
        .level_breakdown
        .iter()
        .find(|row| row.category == Category::Internship)
        .expect("row present");

    assert_eq!(internship.counts.other, 3);
    assert_eq!(internship.counts.international, 1);
    assert_eq!(internship.counts.national, 0);
    assert_eq!(internship.counts.total, 4);
    assert_eq!(report.level_totals, internship.counts);
}

#[test]
fn aggregation_ignores_input_order() {
    let mut records = vec![
        approved("a", Category::Certification, AchievementLevel::International),
        approved("b", Category::Workshop, AchievementLevel::National),
        approved("c", Category::Project, AchievementLevel::Institutional),
        approved("d", Category::Certification, AchievementLevel::National),
    ];
    let forward = aggregate(&records);
    records.reverse();

    assert_eq!(aggregate(&records), forward);
}

#[test]
fn full_compliance_requires_every_bucket() {
    let mut records = Vec::new();
    let plan = [
        (Category::Workshop, 3),
        (Category::Conference, 2),
        (Category::Hackathon, 5),
        (Category::Certification, 3),
        (Category::Internship, 4),
        (Category::ResearchMentorship, 2),
    ];
    for (category, count) in plan {
        for index in 0..count {
            records.push(approved(
                &format!("{}-{index}", category.label()),
                category,
                AchievementLevel::National,
            ));
        }
    }

    let report = aggregate(&records);
    assert!(report.is_fully_compliant());

    records.pop();
    assert!(!aggregate(&records).is_fully_compliant());
}

#[test]
fn csv_export_lists_categories_then_totals() {
    let records = vec![
        approved("h1", Category::Hackathon, AchievementLevel::International),
        approved("h2", Category::Hackathon, AchievementLevel::National),
        approved("p1", Category::Project, AchievementLevel::State),
    ];

    let mut buffer = Vec::new();
    aggregate(&records)
        .write_csv(&mut buffer)
        .expect("csv written");
    let text = String::from_utf8(buffer).expect("utf8 csv");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "category,international,national,other,total");
    assert_eq!(lines[1], "Hackathon,1,1,0,2");
    assert!(lines.contains(&"Research Mentorship,0,0,0,0"));
    assert!(lines.contains(&"Project,0,0,1,1"));
    assert_eq!(lines.last().copied(), Some("Total,1,1,1,3"));
    assert_eq!(lines.len(), Category::ordered().len() + 2);
}
