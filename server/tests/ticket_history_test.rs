//! Ticket update flow: change detection, history append, attribution

use chrono::Utc;
use streamline_server::audit::Actor;
use streamline_server::db::DbService;
use streamline_server::db::models::{
    Department, IssueType, Ticket, TicketPriority, TicketStatus, TicketUpdate,
};
use streamline_server::db::repository::{RepoError, TicketRepository, record_id};
use streamline_server::db::sequence::HumanIdGenerator;

fn actor() -> Actor {
    Actor {
        id: "user_data:agent1".to_string(),
        email: "agent@streamline.local".to_string(),
        name: "Agent Smith".to_string(),
    }
}

async fn seeded_ticket(db: &surrealdb::Surreal<surrealdb::engine::local::Db>) -> Ticket {
    let now = Utc::now();
    let repo = TicketRepository::new(db.clone());
    let generator = HumanIdGenerator::new(db.clone());
    repo.create(
        Ticket {
            id: None,
            ticket_id: 0,
            user_id: record_id("user_data", "reporter").unwrap(),
            issue_type: IssueType::Bug,
            department: Department::Support,
            subject: "Login page broken".to_string(),
            description: "500 on submit".to_string(),
            priority: TicketPriority::Low,
            status: TicketStatus::Open,
            assigned_to: None,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        },
        &generator,
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn effective_update_appends_one_history_entry() {
    let db = DbService::memory().await.unwrap().db;
    let repo = TicketRepository::new(db.clone());
    let ticket = seeded_ticket(&db).await;
    let id = ticket.id.clone().unwrap();

    let update = TicketUpdate {
        priority: Some(TicketPriority::High),
        status: Some(TicketStatus::InProgress),
        ..Default::default()
    };
    let updated = repo.update_with_history(&id, &update, &actor()).await.unwrap();

    assert_eq!(updated.priority, TicketPriority::High);
    assert_eq!(updated.status, TicketStatus::InProgress);
    assert_eq!(updated.history.len(), 1);

    let entry = &updated.history[0];
    assert_eq!(entry.action, "Updated ticket");
    assert_eq!(entry.updated_by_email, "agent@streamline.local");
    assert_eq!(entry.updated_by_name, "Agent Smith");
    assert_eq!(entry.changes.len(), 2);
}

#[tokio::test]
async fn noop_update_is_rejected_and_leaves_no_trace() {
    let db = DbService::memory().await.unwrap().db;
    let repo = TicketRepository::new(db.clone());
    let ticket = seeded_ticket(&db).await;
    let id = ticket.id.clone().unwrap();

    // Same values the ticket already holds
    let update = TicketUpdate {
        subject: Some("Login page broken".to_string()),
        priority: Some(TicketPriority::Low),
        ..Default::default()
    };
    let err = repo
        .update_with_history(&id, &update, &actor())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NoChanges));

    // Nothing persisted: history still empty
    let reread = repo.find_by_id(&id).await.unwrap().unwrap();
    assert!(reread.history.is_empty());
}

#[tokio::test]
async fn k_effective_updates_leave_k_entries_in_order() {
    let db = DbService::memory().await.unwrap().db;
    let repo = TicketRepository::new(db.clone());
    let ticket = seeded_ticket(&db).await;
    let id = ticket.id.clone().unwrap();

    let steps = [
        TicketUpdate {
            status: Some(TicketStatus::InProgress),
            ..Default::default()
        },
        TicketUpdate {
            priority: Some(TicketPriority::Critical),
            ..Default::default()
        },
        TicketUpdate {
            status: Some(TicketStatus::Resolved),
            ..Default::default()
        },
    ];
    for step in &steps {
        repo.update_with_history(&id, step, &actor()).await.unwrap();
    }

    let result = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(result.history.len(), 3);

    // Insertion order is chronological order
    for pair in result.history.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
    assert_eq!(result.history[2].changes[0].field, "status");
}

#[tokio::test]
async fn omitted_fields_stay_untouched() {
    let db = DbService::memory().await.unwrap().db;
    let repo = TicketRepository::new(db.clone());
    let ticket = seeded_ticket(&db).await;
    let id = ticket.id.clone().unwrap();

    let update = TicketUpdate {
        description: Some("500 on submit, reproduced on staging".to_string()),
        ..Default::default()
    };
    let updated = repo.update_with_history(&id, &update, &actor()).await.unwrap();

    assert_eq!(updated.subject, "Login page broken");
    assert_eq!(updated.priority, TicketPriority::Low);
    assert_eq!(updated.history[0].changes.len(), 1);
    assert_eq!(updated.history[0].changes[0].field, "description");
}

#[tokio::test]
async fn assigning_a_ticket_diffs_the_record_link() {
    let db = DbService::memory().await.unwrap().db;
    let repo = TicketRepository::new(db.clone());
    let ticket = seeded_ticket(&db).await;
    let id = ticket.id.clone().unwrap();

    let update = TicketUpdate {
        assigned_to: Some("user_data:agent1".to_string()),
        ..Default::default()
    };
    let updated = repo.update_with_history(&id, &update, &actor()).await.unwrap();
    assert!(updated.assigned_to.is_some());
    assert_eq!(updated.history.len(), 1);

    // Re-sending the same assignee is a no-op
    let err = repo
        .update_with_history(&id, &update, &actor())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NoChanges));
}

#[tokio::test]
async fn bare_key_assignment_is_applied_and_recorded() {
    let db = DbService::memory().await.unwrap().db;
    let repo = TicketRepository::new(db.clone());
    let ticket = seeded_ticket(&db).await;
    let id = ticket.id.clone().unwrap();

    // A bare user key, not the full table:key form
    let update = TicketUpdate {
        assigned_to: Some("agent1".to_string()),
        ..Default::default()
    };
    let updated = repo.update_with_history(&id, &update, &actor()).await.unwrap();

    // The merge and the history entry agree: the assignment actually landed
    assert_eq!(
        updated.assigned_to.as_ref().unwrap().to_string(),
        "user_data:agent1"
    );
    assert_eq!(updated.history.len(), 1);

    // The full form of the same user is recognized as no change
    let err = repo
        .update_with_history(
            &id,
            &TicketUpdate {
                assigned_to: Some("user_data:agent1".to_string()),
                ..Default::default()
            },
            &actor(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NoChanges));
}
