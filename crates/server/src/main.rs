// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod identity;
mod roster;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use fee_ledger_api::{
    ApiError, BulkCreateFeesRequest, BulkCreateFeesResponse, CreateFeeRequest, DeleteFeeResponse,
    FeeCapabilities, FeeInfo, FeeStatsRequest, FeeStatsResponse, ListFeesRequest,
    ListFeesResponse, MarkFeePaidRequest, Role, bulk_create_fees, create_fee, delete_fee,
    fee_capabilities, fee_stats, get_fee, list_fees, mark_fee_paid,
};
use fee_ledger_persistence::Persistence;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::identity::FamilyActor;

/// Fee Ledger Server - HTTP server for the college fee ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "FEE_LEDGER_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1", env = "FEE_LEDGER_BIND")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000, env = "FEE_LEDGER_PORT")]
    port: u16,

    /// JSON roster used to seed departments, batches, students, users and
    /// teaching assignments at startup.
    #[arg(short, long, env = "FEE_LEDGER_ROSTER")]
    roster: Option<PathBuf>,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The fee record store.
    persistence: Arc<Mutex<Persistence>>,
}

/// State for one role-scoped endpoint family.
#[derive(Clone)]
struct FamilyState {
    app: AppState,
    /// The only role admitted to this family's routes.
    family: Role,
}

/// Query parameters for listing fees.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct ListFeesQuery {
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
    status: Option<String>,
    #[serde(alias = "feeType")]
    fee_type: Option<String>,
    #[serde(alias = "departmentId")]
    department_id: Option<i64>,
    #[serde(alias = "batchId")]
    batch_id: Option<i64>,
    #[serde(alias = "academicYear")]
    academic_year: Option<String>,
}

impl From<ListFeesQuery> for ListFeesRequest {
    fn from(query: ListFeesQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            search: query.search,
            status: query.status,
            fee_type: query.fee_type,
            department_id: query.department_id,
            batch_id: query.batch_id,
            academic_year: query.academic_year,
        }
    }
}

/// Query parameters for fee statistics.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct FeeStatsQuery {
    #[serde(alias = "academicYear")]
    academic_year: Option<String>,
}

/// API request for creating a fee.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateFeeApiRequest {
    #[serde(alias = "studentId")]
    student_id: i64,
    /// The amount owed. Accepts a JSON number or string.
    amount: Decimal,
    /// Due date (`YYYY-MM-DD`).
    #[serde(alias = "dueDate")]
    due_date: String,
    #[serde(alias = "feeType")]
    fee_type: String,
    #[serde(alias = "academicYear")]
    academic_year: String,
    #[serde(default)]
    description: Option<String>,
}

impl From<CreateFeeApiRequest> for CreateFeeRequest {
    fn from(req: CreateFeeApiRequest) -> Self {
        Self {
            student_id: req.student_id,
            amount: req.amount,
            due_date: req.due_date,
            fee_type: req.fee_type,
            academic_year: req.academic_year,
            description: req.description,
        }
    }
}

/// API request for creating a fee for every active student of a cohort.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct BulkCreateFeesApiRequest {
    #[serde(default, alias = "departmentId")]
    department_id: Option<i64>,
    #[serde(default, alias = "batchId")]
    batch_id: Option<i64>,
    amount: Decimal,
    #[serde(alias = "dueDate")]
    due_date: String,
    #[serde(alias = "feeType")]
    fee_type: String,
    #[serde(alias = "academicYear")]
    academic_year: String,
    #[serde(default)]
    description: Option<String>,
}

impl From<BulkCreateFeesApiRequest> for BulkCreateFeesRequest {
    fn from(req: BulkCreateFeesApiRequest) -> Self {
        Self {
            department_id: req.department_id,
            batch_id: req.batch_id,
            amount: req.amount,
            due_date: req.due_date,
            fee_type: req.fee_type,
            academic_year: req.academic_year,
            description: req.description,
        }
    }
}

/// API request for recording a payment status.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct MarkFeePaidApiRequest {
    status: String,
    #[serde(default, alias = "amountPaid")]
    amount_paid: Option<Decimal>,
    #[serde(default, alias = "paymentMode")]
    payment_mode: Option<String>,
    #[serde(default)]
    remarks: Option<String>,
}

impl From<MarkFeePaidApiRequest> for MarkFeePaidRequest {
    fn from(req: MarkFeePaidApiRequest) -> Self {
        Self {
            status: req.status,
            amount_paid: req.amount_paid,
            payment_mode: req.payment_mode,
            remarks: req.remarks,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } | ApiError::OutOfScope { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for GET `/fees`.
///
/// Lists one page of the fees visible to the actor.
async fn handle_list_fees(
    AxumState(state): AxumState<FamilyState>,
    FamilyActor(actor): FamilyActor,
    Query(query): Query<ListFeesQuery>,
) -> Result<Json<ListFeesResponse>, HttpError> {
    info!(user_id = actor.user_id, family = %state.family, "Handling list_fees request");

    let request: ListFeesRequest = query.into();
    let today = OffsetDateTime::now_utc().date();
    let mut persistence = state.app.persistence.lock().await;
    let response: ListFeesResponse = list_fees(&mut persistence, &actor, &request, today)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/fees/stats`.
async fn handle_fee_stats(
    AxumState(state): AxumState<FamilyState>,
    FamilyActor(actor): FamilyActor,
    Query(query): Query<FeeStatsQuery>,
) -> Result<Json<FeeStatsResponse>, HttpError> {
    info!(user_id = actor.user_id, family = %state.family, "Handling fee_stats request");

    let request = FeeStatsRequest {
        academic_year: query.academic_year,
    };
    let today = OffsetDateTime::now_utc().date();
    let mut persistence = state.app.persistence.lock().await;
    let response: FeeStatsResponse = fee_stats(&mut persistence, &actor, &request, today)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/fees/capabilities`.
async fn handle_fee_capabilities(FamilyActor(actor): FamilyActor) -> Json<FeeCapabilities> {
    Json(fee_capabilities(&actor))
}

/// Handler for GET `/fees/{fee_id}`.
async fn handle_get_fee(
    AxumState(state): AxumState<FamilyState>,
    FamilyActor(actor): FamilyActor,
    Path(fee_id): Path<i64>,
) -> Result<Json<FeeInfo>, HttpError> {
    info!(user_id = actor.user_id, fee_id, "Handling get_fee request");

    let today = OffsetDateTime::now_utc().date();
    let mut persistence = state.app.persistence.lock().await;
    let fee: FeeInfo = get_fee(&mut persistence, &actor, fee_id, today)?;
    drop(persistence);

    Ok(Json(fee))
}

/// Handler for POST `/fees`.
///
/// Creates one pending fee for a student.
async fn handle_create_fee(
    AxumState(state): AxumState<FamilyState>,
    FamilyActor(actor): FamilyActor,
    Json(req): Json<CreateFeeApiRequest>,
) -> Result<Json<FeeInfo>, HttpError> {
    info!(
        user_id = actor.user_id,
        student_id = req.student_id,
        "Handling create_fee request"
    );

    let request: CreateFeeRequest = req.into();
    let mut persistence = state.app.persistence.lock().await;
    let fee: FeeInfo = create_fee(
        &mut persistence,
        &actor,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(fee))
}

/// Handler for POST `/fees/bulk`.
///
/// Creates the same fee for every active student of a batch or department.
/// Individual failures are reported in the response, not as an error.
async fn handle_bulk_create_fees(
    AxumState(state): AxumState<FamilyState>,
    FamilyActor(actor): FamilyActor,
    Json(req): Json<BulkCreateFeesApiRequest>,
) -> Result<Json<BulkCreateFeesResponse>, HttpError> {
    info!(
        user_id = actor.user_id,
        department_id = ?req.department_id,
        batch_id = ?req.batch_id,
        "Handling bulk_create_fees request"
    );

    let request: BulkCreateFeesRequest = req.into();
    let mut persistence = state.app.persistence.lock().await;
    let response: BulkCreateFeesResponse = bulk_create_fees(
        &mut persistence,
        &actor,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/fees/{fee_id}/mark-paid`.
async fn handle_mark_fee_paid(
    AxumState(state): AxumState<FamilyState>,
    FamilyActor(actor): FamilyActor,
    Path(fee_id): Path<i64>,
    Json(req): Json<MarkFeePaidApiRequest>,
) -> Result<Json<FeeInfo>, HttpError> {
    info!(
        user_id = actor.user_id,
        fee_id,
        status = %req.status,
        "Handling mark_fee_paid request"
    );

    let request: MarkFeePaidRequest = req.into();
    let mut persistence = state.app.persistence.lock().await;
    let fee: FeeInfo = mark_fee_paid(
        &mut persistence,
        &actor,
        fee_id,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(fee))
}

/// Handler for DELETE `/fees/{fee_id}`.
async fn handle_delete_fee(
    AxumState(state): AxumState<FamilyState>,
    FamilyActor(actor): FamilyActor,
    Path(fee_id): Path<i64>,
) -> Result<Json<DeleteFeeResponse>, HttpError> {
    info!(user_id = actor.user_id, fee_id, "Handling delete_fee request");

    let mut persistence = state.app.persistence.lock().await;
    let response: DeleteFeeResponse = delete_fee(&mut persistence, &actor, fee_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the fee routes for one endpoint family.
///
/// Every family gets the same routes; write handlers reject roles that may
/// not write fees.
fn fee_routes(app_state: AppState, family: Role) -> Router {
    Router::new()
        .route("/fees", get(handle_list_fees))
        .route("/fees", post(handle_create_fee))
        .route("/fees/bulk", post(handle_bulk_create_fees))
        .route("/fees/stats", get(handle_fee_stats))
        .route("/fees/capabilities", get(handle_fee_capabilities))
        .route("/fees/{fee_id}", get(handle_get_fee))
        .route("/fees/{fee_id}", delete(handle_delete_fee))
        .route("/fees/{fee_id}/mark-paid", post(handle_mark_fee_paid))
        .with_state(FamilyState {
            app: app_state,
            family,
        })
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .nest(
            "/api/admin",
            fee_routes(app_state.clone(), Role::Administrator),
        )
        .nest(
            "/api/hod",
            fee_routes(app_state.clone(), Role::DepartmentHead),
        )
        .nest("/api/faculty", fee_routes(app_state, Role::Faculty))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Fee Ledger Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(roster_path) = &args.roster {
        info!("Seeding roster from: {}", roster_path.display());
        let roster: roster::Roster = roster::load_roster(roster_path)?;
        roster::seed_roster(&mut persistence, &roster)?;
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let listener = tokio::net::TcpListener::bind((args.bind.as_str(), args.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
