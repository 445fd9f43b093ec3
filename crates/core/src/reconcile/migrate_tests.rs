// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use crate::memory::FailPoint;
use crate::model::{Association, Comment, Ticket};
use crate::reconcile::test_helpers::{Fixture, MapFetcher};

/// Source space with taxonomies, three linked tickets and a comment thread.
fn populated() -> Fixture {
    let mut fx = Fixture::new();
    let src = fx.source.clone();
    fx.status(&src, "New");
    fx.custom_field(&src, "Severity");
    let ui = fx.component(&src, "ui");
    let v1 = fx.milestone(&src, "v1.0");

    let ticket = Ticket::new("Login broken")
        .with_number(10)
        .with_description("Blocks #11, unlike #42")
        .with_component(&ui.id)
        .with_milestone(&v1.id);
    let t10 = fx.remote.create_ticket(&src.id, &ticket).unwrap();
    let t11 = fx.source_ticket(11, "Session expiry");
    fx.source_ticket(12, "Docs");

    fx.remote
        .create_comment(&src.id, 10, &Comment::text("Repro on #12"))
        .unwrap();
    fx.remote
        .create_comment(&src.id, 10, &Comment::changelog("---\n- - status\n  - New\n  - Test\n"))
        .unwrap();
    fx.remote
        .create_association(&src.id, 10, &Association::new(&t10.id, &t11.id, 0))
        .unwrap();
    fx.seeded()
}

fn run(fx: &mut Fixture, options: &MigrateOptions) -> Result<MigrationOutcome> {
    migrate(&mut fx.remote, &fx.source, &fx.dest, options, None)
}

fn migrated(outcome: MigrationOutcome) -> MigrationReport {
    match outcome {
        MigrationOutcome::Migrated(report) => report,
        MigrationOutcome::Collision { numbers } => panic!("unexpected collision: {numbers:?}"),
    }
}

#[test]
fn full_migration_copies_everything() {
    let mut fx = populated();

    let report = migrated(run(&mut fx, &MigrateOptions::default()).unwrap());

    assert_eq!(report.tickets, 3);
    assert_eq!(report.comments, 2);
    assert_eq!(report.associations, 1);
    assert!(report.numbers.is_identity());
    assert_eq!(report.ids.len(), 3);
    assert_eq!(
        report.created,
        TaxonomyCounts {
            statuses: 1,
            custom_fields: 1,
            components: 1,
            milestones: 1,
        }
    );

    let copied = fx.remote.get_ticket(&fx.dest.id, 10).unwrap();
    assert_eq!(
        copied.description.as_deref(),
        Some("Blocks #11, unlike #not-copied")
    );
    let dest_ui = fx.remote.list_components(&fx.dest.id).unwrap();
    assert_eq!(copied.component_id.as_deref(), Some(dest_ui[0].id.as_str()));
    let dest_v1 = fx.remote.list_milestones(&fx.dest.id).unwrap();
    assert_eq!(copied.milestone_id.as_deref(), Some(dest_v1[0].id.as_str()));
    assert_eq!(fx.remote.associations(&fx.dest.id).unwrap().len(), 1);
}

#[test]
fn rerun_without_renumber_aborts_at_collision() {
    let mut fx = populated();
    migrated(run(&mut fx, &MigrateOptions::default()).unwrap());
    fx.remote.clear_writes();

    let outcome = run(&mut fx, &MigrateOptions::default()).unwrap();

    match outcome {
        MigrationOutcome::Collision { numbers } => assert_eq!(numbers, vec![10, 11, 12]),
        MigrationOutcome::Migrated(_) => panic!("expected collision"),
    }
    assert!(fx.remote.writes().is_empty());
    assert_eq!(fx.dest_summaries().len(), 3);
}

#[test]
fn renumbered_migration_rewrites_references() {
    let mut fx = populated();
    fx.dest_ticket(499, "existing");
    let mut fx = fx.seeded();
    let options = MigrateOptions {
        renumber: true,
        ..MigrateOptions::default()
    };

    let report = migrated(run(&mut fx, &options).unwrap());

    let pairs: Vec<_> = report.numbers.iter().collect();
    assert_eq!(pairs, vec![(10, 500), (11, 501), (12, 502)]);
    let copied = fx.remote.get_ticket(&fx.dest.id, 500).unwrap();
    assert_eq!(
        copied.description.as_deref(),
        Some("Blocks #501, unlike #not-copied")
    );
    let comments = fx.remote.list_comments(&fx.dest.id, 500).unwrap();
    assert_eq!(comments[0].comment.as_deref(), Some("Repro on #502"));
    assert_eq!(report.associations, 1);
}

#[test]
fn selected_tickets_only() {
    let mut fx = populated();
    let options = MigrateOptions {
        ticket_numbers: Some(vec![11, 10]),
        renumber: false,
    };

    let report = migrated(run(&mut fx, &options).unwrap());

    assert_eq!(report.tickets, 2);
    let mut numbers: Vec<_> = fx.dest_summaries().into_keys().collect();
    numbers.sort_unstable();
    assert_eq!(numbers, vec![10, 11]);
    let copied = fx.remote.get_ticket(&fx.dest.id, 10).unwrap();
    let comments = fx.remote.list_comments(&fx.dest.id, copied.number).unwrap();
    assert_eq!(comments[0].comment.as_deref(), Some("Repro on #not-copied"));
}

#[test]
fn repeated_ticket_numbers_copy_once() {
    let mut fx = populated();
    let options = MigrateOptions {
        ticket_numbers: Some(vec![12, 11, 12]),
        renumber: false,
    };

    let report = migrated(run(&mut fx, &options).unwrap());

    assert_eq!(report.tickets, 2);
    assert_eq!(report.numbers.len(), 2);
    assert_eq!(fx.dest_summaries().len(), 2);
}

#[test]
fn ticket_failure_keeps_earlier_tickets() {
    let mut fx = populated();
    // #12 has no comments; the first comment copied for #10 fails.
    let options = MigrateOptions {
        ticket_numbers: Some(vec![12, 10]),
        renumber: false,
    };
    fx.remote.fail_next(FailPoint::CreateComment, 500, "Internal error");

    let err = run(&mut fx, &options).unwrap_err();

    assert_eq!(err.reason(), "Internal error");
    let summaries = fx.dest_summaries();
    assert!(summaries.contains_key(&12));
    assert!(!summaries.contains_key(&10));
    assert!(fx.remote.associations(&fx.dest.id).unwrap().is_empty());
}

#[test]
fn taxonomy_failure_aborts_before_tickets() {
    let mut fx = populated();
    fx.remote.fail_next(FailPoint::CreateMilestone, 403, "Forbidden");

    let err = run(&mut fx, &MigrateOptions::default()).unwrap_err();

    assert_eq!(err.reason(), "Forbidden");
    assert!(fx.dest_summaries().is_empty());
    // Earlier taxonomy creations are left in place.
    assert_eq!(fx.remote.list_statuses(&fx.dest.id).unwrap().len(), 1);
}

#[test]
fn collision_after_taxonomy_leaves_taxonomy_in_place() {
    let mut fx = populated();
    fx.dest_ticket(11, "squatter");
    let mut fx = fx.seeded();

    let outcome = run(&mut fx, &MigrateOptions::default()).unwrap();

    assert!(matches!(outcome, MigrationOutcome::Collision { ref numbers } if numbers == &[11]));
    assert_eq!(fx.remote.list_components(&fx.dest.id).unwrap().len(), 1);
    assert_eq!(fx.dest_summaries().len(), 1);
}

#[test]
fn attachments_flow_through_fetcher() {
    let mut fx = Fixture::new();
    let src = fx.source.id.clone();
    fx.source_ticket(1, "With file");
    let document = crate::model::Document {
        name: "log.txt".into(),
        url: Some("https://files.example/log.txt".into()),
        ..Default::default()
    };
    let document = fx
        .remote
        .add_document(&src, document, b"log".to_vec())
        .unwrap();
    fx.remote
        .create_comment(&src, 1, &Comment::text(format!("[[file:{}]]", document.id)))
        .unwrap();
    let mut fx = fx.seeded();
    let mut fetcher = MapFetcher::default();
    fetcher
        .files
        .insert("https://files.example/log.txt".into(), b"log".to_vec());

    let outcome = migrate(
        &mut fx.remote,
        &fx.source,
        &fx.dest,
        &MigrateOptions::default(),
        Some(&mut fetcher),
    )
    .unwrap();

    assert_eq!(migrated(outcome).attachments, 1);
}

#[test]
fn report_serializes_number_map_as_object() {
    let mut fx = populated();
    let report = migrated(run(&mut fx, &MigrateOptions::default()).unwrap());

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["numbers"]["10"], 10);
    assert_eq!(json["source"], "source");
    assert_eq!(json["destination"], "dest");
    assert_eq!(json["created"]["components"], 1);
}
