//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, Query, State},
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::AccountRepository;
use crate::domain::{Bill, DomainError, OperationContext, Transaction, YearMonth};
use crate::error::AppError;
use crate::handlers::{
    AddBillCommand, AddBillHandler, AddTransactionCommand, AddTransactionHandler, LoginCommand,
    LoginHandler, LogoutHandler, RegisterCommand, RegisterHandler,
};
use crate::reporting::{export, Dashboard, ReportService, SummaryReport};

use super::middleware::auth_middleware;
use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Amounts are accepted as JSON strings or numbers and validated downstream
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    Text(String),
    Number(serde_json::Number),
}

impl From<AmountField> for String {
    fn from(field: AmountField) -> Self {
        match field {
            AmountField::Text(text) => text,
            AmountField::Number(number) => number.to_string(),
        }
    }
}

/// Category and amount stay raw text so bad values surface as domain errors
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub date: NaiveDate,
    pub category: String,
    pub amount: AmountField,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BillRequest {
    pub due_date: NaiveDate,
    pub category: String,
    pub amount: AmountField,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize)]
pub struct BillsResponse {
    pub bills: Vec<Bill>,
}

#[derive(Debug, Serialize)]
pub struct MonthsResponse {
    pub months: Vec<YearMonth>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    #[serde(default)]
    pub month: Option<String>,
}

impl MonthQuery {
    fn parse(&self) -> Result<Option<YearMonth>, DomainError> {
        self.month.as_deref().map(str::parse::<YearMonth>).transpose()
    }
}

#[derive(Debug, Deserialize)]
pub struct DueFromQuery {
    #[serde(default)]
    pub from: Option<String>,
}

impl DueFromQuery {
    fn parse(&self) -> Result<Option<NaiveDate>, DomainError> {
        self.from
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| DomainError::InvalidDate(s.to_string()))
            })
            .transpose()
    }
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router.
///
/// Registration and login are public; everything else requires a session.
pub fn create_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let protected = Router::new()
        .route("/auth/logout", post(logout))
        .route("/me", get(me))
        .route("/transactions", post(add_transaction).get(list_transactions))
        .route("/bills", post(add_bill).get(list_bills))
        .route("/summary", get(summary))
        .route("/months", get(months))
        .route("/dashboard", get(dashboard))
        .route("/export/transactions.csv", get(export_transactions))
        .route("/export/bills.csv", get(export_bills))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

fn require_user(context: &OperationContext) -> Result<Uuid, AppError> {
    context.user_id.ok_or(AppError::Unauthorized)
}

// =========================================================================
// POST /auth/register
// =========================================================================

async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let result = RegisterHandler::new(state.pool)
        .execute(RegisterCommand::new(request.username, request.password))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: result.user_id,
            username: result.username,
        }),
    ))
}

// =========================================================================
// POST /auth/login
// =========================================================================

async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let result = LoginHandler::new(state.pool, state.session_ttl)
        .execute(LoginCommand::new(request.username, request.password))
        .await?;

    Ok(Json(LoginResponse {
        user_id: result.user_id,
        username: result.username,
        token: result.token,
        expires_at: result.expires_at,
    }))
}

// =========================================================================
// POST /auth/logout
// =========================================================================

async fn logout(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
) -> Result<StatusCode, AppError> {
    LogoutHandler::new(state.pool).execute(&context).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// GET /me
// =========================================================================

async fn me(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = require_user(&context)?;
    let user = AccountRepository::new(state.pool)
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
        created_at: user.created_at,
    }))
}

// =========================================================================
// /transactions
// =========================================================================

async fn add_transaction(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Json(request): Json<TransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let command = AddTransactionCommand::new(request.date, request.category, request.amount);
    let command = match request.description {
        Some(description) => command.with_description(description),
        None => command,
    };

    let transaction = AddTransactionHandler::new(state.pool)
        .execute(command, &context)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn list_transactions(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<TransactionsResponse>, AppError> {
    let user_id = require_user(&context)?;
    let month = query.parse()?;

    let transactions = ReportService::new(state.pool)
        .transactions(user_id, month)
        .await?;

    Ok(Json(TransactionsResponse { transactions }))
}

// =========================================================================
// /bills
// =========================================================================

async fn add_bill(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Json(request): Json<BillRequest>,
) -> Result<(StatusCode, Json<Bill>), AppError> {
    let command = AddBillCommand::new(request.due_date, request.category, request.amount);
    let command = match request.description {
        Some(description) => command.with_description(description),
        None => command,
    };

    let bill = AddBillHandler::new(state.pool).execute(command, &context).await?;

    Ok((StatusCode::CREATED, Json(bill)))
}

async fn list_bills(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Query(query): Query<DueFromQuery>,
) -> Result<Json<BillsResponse>, AppError> {
    let user_id = require_user(&context)?;
    let from = query.parse()?;

    let bills = ReportService::new(state.pool).bills(user_id, from).await?;

    Ok(Json(BillsResponse { bills }))
}

// =========================================================================
// Reports
// =========================================================================

async fn summary(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<SummaryReport>, AppError> {
    let user_id = require_user(&context)?;
    let month = query.parse()?;

    let report = ReportService::new(state.pool).summary(user_id, month).await?;

    Ok(Json(report))
}

async fn months(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
) -> Result<Json<MonthsResponse>, AppError> {
    let user_id = require_user(&context)?;
    let months = ReportService::new(state.pool).months(user_id).await?;

    Ok(Json(MonthsResponse { months }))
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
) -> Result<Json<Dashboard>, AppError> {
    let user_id = require_user(&context)?;
    let dashboard = ReportService::new(state.pool).dashboard(user_id).await?;

    Ok(Json(dashboard))
}

// =========================================================================
// CSV export
// =========================================================================

fn csv_attachment(filename: &str, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

async fn export_transactions(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = require_user(&context)?;
    let transactions = ReportService::new(state.pool).transactions(user_id, None).await?;
    let body = export::transactions_csv(&transactions)?;

    Ok(csv_attachment("transactions.csv", body))
}

async fn export_bills(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = require_user(&context)?;
    let bills = ReportService::new(state.pool).bills(user_id, None).await?;
    let body = export::bills_csv(&bills)?;

    Ok(csv_attachment("bills.csv", body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_query_parse() {
        let query = MonthQuery { month: None };
        assert_eq!(query.parse().unwrap(), None);

        let query = MonthQuery { month: Some("2024-01".to_string()) };
        assert_eq!(query.parse().unwrap().unwrap().to_string(), "2024-01");

        let query = MonthQuery { month: Some("January".to_string()) };
        assert!(matches!(query.parse(), Err(DomainError::InvalidDate(_))));
    }

    #[test]
    fn test_due_from_query_parse() {
        let query = DueFromQuery { from: Some("2024-02-29".to_string()) };
        assert_eq!(
            query.parse().unwrap(),
            Some(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );

        let query = DueFromQuery { from: Some("2023-02-29".to_string()) };
        assert!(query.parse().is_err());
    }
}
