use crate::infra::InMemoryLifeAreaStore;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::Args;
use std::sync::Arc;
use wisdom_score::config::ScoringConfig;
use wisdom_score::error::AppError;
use wisdom_score::scoring::{
    Boundary, Commitment, CommitmentStatus, Event, EventType, FulfillmentService, LifeArea,
    LifeAreaId, LifeAreaStore, RecalculationSummary, StoreError,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Score as of this date (YYYY-MM-DD, midnight UTC). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print the per-factor breakdown for each life area.
    #[arg(long)]
    pub(crate) list_components: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        as_of,
        list_components,
    } = args;

    let now = as_of
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_else(Utc::now);

    let store = Arc::new(InMemoryLifeAreaStore::default());
    seed_demo_store(&store, now)?;
    let service = FulfillmentService::new(store, ScoringConfig::default());

    println!(
        "Fulfillment scoring demo (as of {})",
        now.format("%Y-%m-%d %H:%M UTC")
    );
    let summary = service.recalculate_all(now)?;
    render_summary(&service, &summary, now, list_components)?;

    Ok(())
}

fn area(raw: &str) -> LifeAreaId {
    LifeAreaId(raw.to_string())
}

fn demo_event(
    life_area: &str,
    event_type: EventType,
    emotional_charge: i32,
    occurred_at: DateTime<Utc>,
) -> Event {
    Event {
        life_area_id: area(life_area),
        event_type,
        emotional_charge,
        occurred_at,
    }
}

/// Four life areas spread across the status bands.
pub(crate) fn seed_demo_store(
    store: &InMemoryLifeAreaStore,
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    let ago = |days: i64| now - Duration::days(days);

    for (id, name) in [
        ("career", "Career & Purpose"),
        ("health", "Health & Vitality"),
        ("finances", "Finances"),
        ("relationships", "Relationships"),
    ] {
        store.insert_life_area(LifeArea::new(area(id), name));
    }

    store.record_event(demo_event("career", EventType::Breakthrough, 4, ago(3)))?;
    store.record_event(demo_event("career", EventType::Insight, 2, ago(21)))?;
    store.record_event(demo_event("career", EventType::Milestone, 5, ago(60)))?;
    for status in [
        CommitmentStatus::Completed,
        CommitmentStatus::Integrated,
        CommitmentStatus::Active,
    ] {
        store.record_commitment(Commitment {
            life_area_id: area("career"),
            status,
        })?;
    }

    for age in [1, 4, 9] {
        store.record_event(demo_event("health", EventType::Upset, -3, ago(age)))?;
    }
    store.record_event(demo_event("health", EventType::Setback, -4, ago(30)))?;
    store.record_boundary(Boundary {
        life_area_id: area("health"),
        violation_count: 2,
    })?;
    store.record_commitment(Commitment {
        life_area_id: area("health"),
        status: CommitmentStatus::Broken,
    })?;

    store.record_event(demo_event("finances", EventType::Reflection, 1, ago(12)))?;
    store.record_event(demo_event("finances", EventType::Upset, -2, ago(140)))?;
    for status in [CommitmentStatus::Active, CommitmentStatus::Paused] {
        store.record_commitment(Commitment {
            life_area_id: area("finances"),
            status,
        })?;
    }

    store.record_event(demo_event("relationships", EventType::Gratitude, 3, ago(2)))?;
    store.record_event(demo_event("relationships", EventType::Upset, -2, ago(45)))?;
    store.record_boundary(Boundary {
        life_area_id: area("relationships"),
        violation_count: 1,
    })?;

    Ok(())
}

fn render_summary<S>(
    service: &FulfillmentService<S>,
    summary: &RecalculationSummary,
    now: DateTime<Utc>,
    list_components: bool,
) -> Result<(), AppError>
where
    S: LifeAreaStore + 'static,
{
    println!("\nLife areas");
    for entry in &summary.recalculated {
        let life_area = service.life_area(&entry.life_area_id)?;
        println!(
            "- {} ({}): {:.1} {}",
            life_area.name, life_area.id, entry.score, entry.status
        );

        if list_components {
            let result = service.preview(&entry.life_area_id, now)?;
            for component in result.breakdown.components() {
                println!("    {:+6.1}  {}", component.contribution, component.notes);
            }
        }
    }

    if summary.failures.is_empty() {
        println!("\nFailures: none");
    } else {
        println!("\nFailures");
        for failure in &summary.failures {
            println!("- {}: {}", failure.life_area_id, failure.error);
        }
    }

    Ok(())
}
