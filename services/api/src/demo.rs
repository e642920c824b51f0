use crate::infra::{build_service, seed_demo_entries, InMemoryService};
use accredit::config::AppConfig;
use accredit::error::AppError;
use accredit::workflows::achievements::{
    ActorId, Clock, ComplianceReport, FixedClock, RecordQuery, ReviewOutcome, SystemClock,
};
use chrono::NaiveDate;
use clap::Args;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Override the evaluation date used by the future-date check (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Stop after intake and skip the reviewer decisions
    #[arg(long)]
    pub(crate) skip_review: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Actor whose visibility scopes the report
    #[arg(long, default_value = "d1")]
    pub(crate) actor: String,
    /// Override the evaluation date used by the future-date check (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Write the level breakdown as CSV to this path instead of printing the report
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

fn clock_for(today: Option<NaiveDate>) -> Arc<dyn Clock> {
    match today {
        Some(date) => Arc::new(FixedClock::on(date)),
        None => Arc::new(SystemClock),
    }
}

fn seeded_service(today: Option<NaiveDate>) -> Result<InMemoryService, AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config.registry.extra_organizers, clock_for(today));
    seed_demo_entries(&service)?;
    Ok(service)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, skip_review } = args;
    let service = seeded_service(today)?;
    let head = ActorId("d1".to_string());
    let reviewer = ActorId("f1".to_string());

    println!("Achievement verification demo");
    println!("\nIntake");
    for record in service.list_visible(&head)? {
        println!(
            "- {} | {} | {} ({}) -> {} (trust {})",
            record.id,
            record.owner_name,
            record.title,
            record.category.label(),
            record.status,
            record.trust_score
        );
        for issue in &record.issues {
            println!("    ! {}", issue);
        }
    }

    println!("\nReviewer inbox for {}", reviewer);
    let inbox = service.list_notifications(&reviewer)?;
    if inbox.is_empty() {
        println!("- empty");
    }
    for notification in &inbox {
        println!("- [{}] {}", notification.id.0, notification.message);
    }
    service.mark_all_read(&reviewer)?;

    if !skip_review {
        println!("\nReview decisions");
        let queue = service.list_review_queue(&reviewer)?;
        for (index, record) in queue.iter().enumerate() {
            let (outcome, note) = if index == 0 {
                (ReviewOutcome::Approved, "certificate verified against the issuer portal")
            } else {
                (ReviewOutcome::Rejected, "event date cannot be in the future; resubmit")
            };
            match service.decide(&record.id, &reviewer, outcome, Some(note.to_string())) {
                Ok(decided) => println!("- {} -> {} ({})", decided.title, decided.status, note),
                Err(err) => println!("- {} could not be decided: {}", record.title, err),
            }
        }

        if let Some(record) = queue.first() {
            match service.decide(&record.id, &head, ReviewOutcome::Rejected, None) {
                Ok(_) => println!("- unexpected second decision on {}", record.id),
                Err(err) => println!("- second decision refused: {}", err),
            }
        }
    }

    println!("\nBy student ({})", reviewer);
    for group in service.owner_groups(&reviewer, &RecordQuery::default())? {
        println!(
            "- {} ({}, {}): {} record(s)",
            group.owner_name,
            group.roll_number,
            group.department,
            group.records.len()
        );
    }

    let report = service.generate_report(&head)?;
    println!();
    render_report(&report);
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs { actor, today, csv } = args;
    let service = seeded_service(today)?;
    let report = service.generate_report(&ActorId(actor))?;

    match csv {
        Some(path) => {
            let file = File::create(&path)?;
            report.write_csv(file)?;
            println!("Level breakdown written to {}", path.display());
        }
        None => render_report(&report),
    }
    Ok(())
}

pub(crate) fn render_report(report: &ComplianceReport) {
    println!("Accreditation compliance ({} approved records)", report.approved_records);
    for bucket in &report.buckets {
        println!(
            "- {:<45} {:>3} / {:<3} {}",
            bucket.label,
            bucket.actual,
            bucket.target,
            if bucket.compliant { "met" } else { "short" }
        );
    }

    println!("\nLevel breakdown");
    println!(
        "  {:<22} {:>13} {:>8} {:>6} {:>6}",
        "Category", "International", "National", "Other", "Total"
    );
    for row in &report.level_breakdown {
        println!(
            "  {:<22} {:>13} {:>8} {:>6} {:>6}",
            row.category_label,
            row.counts.international,
            row.counts.national,
            row.counts.other,
            row.counts.total
        );
    }
    let totals = &report.level_totals;
    println!(
        "  {:<22} {:>13} {:>8} {:>6} {:>6}",
        "Total", totals.international, totals.national, totals.other, totals.total
    );

    if report.is_fully_compliant() {
        println!("\nAll accreditation targets met");
    }
}
