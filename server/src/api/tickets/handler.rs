//! Tickets API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use surrealdb::RecordId;

use crate::audit::Actor;
use crate::core::ServerState;
use crate::db::models::{Ticket, TicketCreate, TicketStatus, TicketUpdate};
use crate::db::repository::{TicketRepository, record_id};
use crate::notify::{NotificationRequest, templates};
use crate::query::{Filter, JoinSpec, PagedQuery};
use crate::utils::{ApiResponse, AppError, AppResult, PageResponse, ValidJson, ok, ok_with_message};

const TICKET_FIELDS: &[&str] = &[
    "id",
    "ticket_id",
    "user_id",
    "issue_type",
    "department",
    "subject",
    "description",
    "priority",
    "status",
    "assigned_to",
    "history",
    "created_at",
    "updated_at",
];

/// Assignee email joined onto the ticket detail view
const ASSIGNEE_JOIN: JoinSpec = JoinSpec {
    foreign_table: "user_data",
    local_field: "assigned_to",
    alias: "assignee_info",
    fields: &["email"],
};

/// POST /api/tickets - create a ticket and notify the support inbox
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<TicketCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Ticket>>)> {
    if payload.subject.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(AppError::validation("All fields are required."));
    }

    let now = Utc::now();
    let ticket = Ticket {
        id: None,
        ticket_id: 0, // assigned by the repository
        user_id: record_id("user_data", &payload.user_id)?,
        issue_type: payload.issue_type,
        department: payload.department,
        subject: payload.subject,
        description: payload.description,
        priority: payload.priority,
        status: TicketStatus::Open,
        assigned_to: None,
        history: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    let repo = TicketRepository::new(state.get_db());
    let created = repo
        .create(ticket, &state.id_generator)
        .await
        .map_err(AppError::from)?;

    let (subject, body) = templates::ticket_created_message(
        created.ticket_id,
        &created.subject,
        &created.description,
        created.priority.as_str(),
    );
    state.notify.enqueue(NotificationRequest {
        recipient: state.config.support_inbox.clone(),
        subject,
        body,
    });

    tracing::info!(ticket_id = created.ticket_id, "Ticket created");

    Ok((
        StatusCode::CREATED,
        ok_with_message(created, "Ticket created successfully."),
    ))
}

/// GET /api/tickets - all tickets plus the total count
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<PageResponse<Ticket>>> {
    let repo = TicketRepository::new(state.get_db());
    let tickets = repo.find_all().await.map_err(AppError::from)?;
    let total = repo.count().await.map_err(AppError::from)?;

    Ok(Json(PageResponse::new(tickets, total)))
}

#[derive(Debug, Deserialize)]
pub struct AssigneeQuery {
    pub search: Option<String>,
}

#[derive(Debug, serde::Serialize, Deserialize)]
pub struct Assignee {
    pub id: RecordId,
    pub email: String,
}

/// GET /api/tickets/assignees - users matching a case-insensitive email search
pub async fn assignees(
    State(state): State<ServerState>,
    Query(params): Query<AssigneeQuery>,
) -> AppResult<Json<ApiResponse<Vec<Assignee>>>> {
    let search = params.search.unwrap_or_default();
    let mut result = state
        .db
        .query(
            "SELECT id, email FROM user_data \
             WHERE string::contains(string::lowercase(email), string::lowercase($search)) \
             ORDER BY email",
        )
        .bind(("search", search))
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let users: Vec<Assignee> = result
        .take(0)
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(ok(users))
}

/// GET /api/tickets/{id} - fetch by human id with the assignee email resolved
pub async fn get_by_ticket_id(
    State(state): State<ServerState>,
    Path(ticket_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let ticket = PagedQuery::new("tickets", TICKET_FIELDS)
        .filter(Filter::eq("ticket_id", ticket_id))
        .join(ASSIGNEE_JOIN)
        .run_single(&state.db)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Ticket not found."))?;

    Ok(ok(ticket))
}

/// PUT /api/tickets/{id} - partial update by internal id, with audit history
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    ValidJson(payload): ValidJson<TicketUpdate>,
) -> AppResult<Json<ApiResponse<Ticket>>> {
    let actor = actor_from_headers(&headers)?;
    let rid = record_id("tickets", &id)?;

    let repo = TicketRepository::new(state.get_db());
    let updated = repo
        .update_with_history(&rid, &payload, &actor)
        .await
        .map_err(AppError::from)?;

    tracing::info!(ticket = %rid, updated_by = %actor.email, "Ticket updated");

    Ok(ok_with_message(updated, "Ticket updated successfully."))
}

/// Actor identity travels in request headers; all three are required
fn actor_from_headers(headers: &HeaderMap) -> AppResult<Actor> {
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
    };

    match (get("user_id"), get("user_email"), get("user_name")) {
        (Some(id), Some(email), Some(name)) => Ok(Actor { id, email, name }),
        _ => Err(AppError::validation(
            "Missing user identification headers.",
        )),
    }
}
