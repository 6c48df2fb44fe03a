use axum::http::header;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::core::result::{ReconciliationResult, ResultSummary};
use crate::core::types::{Category, ReportFilter};
use crate::history::{History, HistoryError, MemoryHistoryStore};
use crate::matching::engine::Reconciler;
use crate::parsing::decode_text;
use crate::report::format::format_report;
use crate::report::template::TemplateKind;
use crate::utils::validation::{validate_upload, ValidationError};
use crate::workflow::{
    BoardSummary, FormDetails, Role, Submission, SubmissionType, WorkflowBoard, WorkflowError,
};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_MULTIPART_FIELDS: usize = 10;
pub const MAX_FILE_FIELD_SIZE: usize = 16 * 1024 * 1024; // 16MB
pub const MAX_TEXT_FIELD_SIZE: usize = 1024; // 1KB
/// Two files plus multipart overhead
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * MAX_FILE_FIELD_SIZE + 1024 * 1024;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Multipart field carrying the IT extract
pub const IT_FILE_FIELD: &str = "it_file";
/// Multipart field carrying the master extract
pub const MASTER_FILE_FIELD: &str = "master_file";
/// Optional multipart field naming the run category
pub const CATEGORY_FIELD: &str = "category";

/// Shared application state
///
/// History and the workflow board live for the lifetime of the server; no
/// reconciliation work runs while either lock is held.
#[derive(Debug)]
pub struct AppState {
    pub history: RwLock<History>,
    pub workflow: RwLock<WorkflowBoard>,
}

impl AppState {
    /// State with an empty in-memory history and an empty board.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the history store cannot be loaded.
    pub fn in_memory() -> Result<Self, HistoryError> {
        Ok(Self {
            history: RwLock::new(History::open(Box::new(MemoryHistoryStore::new()))?),
            workflow: RwLock::new(WorkflowBoard::new()),
        })
    }
}

/// One uploaded extract
#[derive(Debug)]
struct Upload {
    filename: String,
    content: Vec<u8>,
}

/// Inputs extracted from the reconcile form
#[derive(Debug, Default)]
struct ReconcileForm {
    it_file: Option<Upload>,
    master_file: Option<Upload>,
    category: Category,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

#[derive(Serialize)]
struct ReconcileResponse<'a> {
    history_id: u64,
    category: Category,
    it_file_name: &'a str,
    master_file_name: &'a str,
    summary: ResultSummary,
    result: &'a ReconciliationResult,
}

#[derive(Deserialize)]
struct ReportQuery {
    filter: Option<String>,
}

#[derive(Deserialize)]
struct WorkflowQuery {
    #[serde(rename = "type")]
    submission_type: Option<String>,
}

#[derive(Serialize)]
struct WorkflowListResponse<'a> {
    submission_type: SubmissionType,
    summary: BoardSummary,
    submissions: Vec<&'a Submission>,
}

#[derive(Deserialize)]
struct CreateSubmissionRequest {
    submission_type: SubmissionType,
    requester_name: String,
    details: FormDetails,
}

#[derive(Deserialize)]
struct ApproveRequest {
    role: Role,
}

#[derive(Deserialize)]
struct CompleteRequest {
    role: Role,
    #[serde(default)]
    result_link: String,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

fn error_response(
    status: StatusCode,
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> Response {
    (
        status,
        Json(create_safe_error_response(
            error_type,
            user_message,
            internal_error,
        )),
    )
        .into_response()
}

fn lock_failed() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "state_unavailable",
        "Server state is unavailable",
        Some("session state lock poisoned"),
    )
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Routes and handlers over `state`, without the network-facing middleware.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/template/{kind}", get(template_handler))
        .route("/api/reconcile", post(reconcile_handler))
        .route("/api/report/{id}", get(report_handler))
        .route("/api/history", get(history_list_handler))
        .route(
            "/api/history/{id}",
            get(history_show_handler).delete(history_delete_handler),
        )
        .route(
            "/api/workflow",
            get(workflow_list_handler).post(workflow_create_handler),
        )
        .route("/api/workflow/{id}/approve", post(workflow_approve_handler))
        .route("/api/workflow/{id}/complete", post(workflow_complete_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE))
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the session state or the rate limiter cannot be set up.
pub fn create_router() -> anyhow::Result<Router> {
    let state = Arc::new(AppState::in_memory()?);

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limiter configuration"))?;

    let app = routes(state).layer(
        ServiceBuilder::new()
            // Security headers for browser protection
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                REQUEST_TIMEOUT,
            ))
            .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS)),
    );

    Ok(app)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let app = create_router()?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting recon-desk web server at http://{addr}");

    if args.open {
        if let Err(e) = open::that(format!("http://{addr}")) {
            tracing::warn!("could not open browser: {}", e);
        }
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

fn csv_download(file_name: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Blank input template download
async fn template_handler(Path(kind): Path<String>) -> Response {
    match TemplateKind::from_name(&kind) {
        Some(kind) => csv_download(kind.file_name(), kind.content().to_string()),
        None => error_response(
            StatusCode::NOT_FOUND,
            "unknown_template",
            "Template must be 'it' or 'master'",
            None,
        ),
    }
}

/// Reconcile two uploaded extracts and file the run in the session history
async fn reconcile_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, Response> {
    let start_time = std::time::Instant::now();
    let form = extract_reconcile_form(&mut multipart).await?;

    let (Some(it_file), Some(master_file)) = (form.it_file, form.master_file) else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "missing_input",
            "Both the IT file and the master file are required.",
            None,
        ));
    };

    let it_text = decode_text(it_file.content, &it_file.filename);
    let master_text = decode_text(master_file.content, &master_file.filename);

    let result = Reconciler::default().reconcile(&it_text, &master_text);

    let history_id = {
        let mut history = state.history.write().map_err(|_| lock_failed())?;
        history
            .record(
                &it_file.filename,
                &master_file.filename,
                form.category,
                result.clone(),
            )
            .map_err(|e| {
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "history_failed",
                    "Failed to save the run to history",
                    Some(&e.to_string()),
                )
            })?
    };

    tracing::info!(
        "reconciled {} against {}: {} rows in {:?}",
        it_file.filename,
        master_file.filename,
        result.total_rows,
        start_time.elapsed()
    );

    Ok(Json(ReconcileResponse {
        history_id,
        category: form.category,
        it_file_name: &it_file.filename,
        master_file_name: &master_file.filename,
        summary: result.summary(),
        result: &result,
    })
    .into_response())
}

async fn extract_reconcile_form(multipart: &mut Multipart) -> Result<ReconcileForm, Response> {
    let mut form = ReconcileForm::default();
    let mut fields_received = 0usize;

    loop {
        if fields_received >= MAX_MULTIPART_FIELDS {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "field_limit_exceeded",
                "Too many form fields",
                None,
            ));
        }

        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_upload",
                    "Failed to parse upload. Please check the files.",
                    Some(&e.to_string()),
                ))
            }
        };
        fields_received += 1;

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            IT_FILE_FIELD | MASTER_FILE_FIELD => {
                let filename = field.file_name().map(std::string::ToString::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        "file_read_failed",
                        "Uploaded file could not be read",
                        Some(&e.to_string()),
                    )
                })?;

                if bytes.len() > MAX_FILE_FIELD_SIZE {
                    return Err(error_response(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "file_too_large",
                        "File size exceeds limit",
                        None,
                    ));
                }

                let validated = validate_upload(filename.as_deref(), &bytes)
                    .map_err(|e| validation_error_response(&e))?;

                let upload = Upload {
                    filename: validated.unwrap_or_else(|| format!("{name}.csv")),
                    content: bytes.to_vec(),
                };
                if name == IT_FILE_FIELD {
                    form.it_file = Some(upload);
                } else {
                    form.master_file = Some(upload);
                }
            }
            CATEGORY_FIELD => {
                let text = field.text().await.unwrap_or_default();
                if text.len() > MAX_TEXT_FIELD_SIZE {
                    return Err(error_response(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "text_too_large",
                        "Text field size exceeds limit",
                        None,
                    ));
                }
                form.category = Category::from_name(&text).ok_or_else(|| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        "invalid_category",
                        "Category must be 'tarif' or 'biaya'",
                        None,
                    )
                })?;
            }
            _ => {} // Ignore unknown fields
        }
    }

    Ok(form)
}

fn validation_error_response(error: &ValidationError) -> Response {
    let (error_type, message) = match error {
        ValidationError::FilenameTooLong => {
            ("filename_too_long", "Filename exceeds maximum length limit")
        }
        ValidationError::InvalidFilename | ValidationError::EmptyFilename => (
            "invalid_filename",
            "Filename contains invalid or dangerous characters",
        ),
        ValidationError::UnsupportedExtension => (
            "unsupported_file_type",
            "Only .csv, .txt and .tsv files are accepted",
        ),
        ValidationError::InvalidFileContent => (
            "invalid_content",
            "File content appears malformed or corrupted",
        ),
    };
    error_response(
        StatusCode::BAD_REQUEST,
        error_type,
        message,
        Some(&error.to_string()),
    )
}

/// CSV export of a stored run
async fn report_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, Response> {
    let filter = ReportFilter::from_name(query.filter.as_deref().unwrap_or_default())
        .ok_or_else(|| {
            error_response(
                StatusCode::BAD_REQUEST,
                "invalid_filter",
                "Filter must be 'all', 'matched' or 'mismatched'",
                None,
            )
        })?;

    let report = {
        let history = state.history.read().map_err(|_| lock_failed())?;
        let entry = history.get(id).ok_or_else(|| run_not_found(id))?;
        format_report(&entry.result, filter)
    };

    Ok(csv_download(filter.file_name(), report))
}

fn run_not_found(id: u64) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "not_found",
        &format!("Run {id} not found in history"),
        None,
    )
}

async fn history_list_handler(State(state): State<Arc<AppState>>) -> Result<Response, Response> {
    let history = state.history.read().map_err(|_| lock_failed())?;
    Ok(Json(history.summaries()).into_response())
}

async fn history_show_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Response, Response> {
    let history = state.history.read().map_err(|_| lock_failed())?;
    let entry = history.get(id).ok_or_else(|| run_not_found(id))?;
    Ok(Json(entry).into_response())
}

async fn history_delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Response, Response> {
    let mut history = state.history.write().map_err(|_| lock_failed())?;
    match history.remove(id) {
        Ok(true) => Ok(StatusCode::NO_CONTENT.into_response()),
        Ok(false) => Err(run_not_found(id)),
        Err(e) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "history_failed",
            "Failed to update history",
            Some(&e.to_string()),
        )),
    }
}

fn workflow_error_response(error: &WorkflowError) -> Response {
    let (status, error_type) = match error {
        WorkflowError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        WorkflowError::NotAllowed { .. } => (StatusCode::CONFLICT, "transition_not_allowed"),
        WorkflowError::WrongForm(_) => (StatusCode::BAD_REQUEST, "invalid_form"),
    };
    error_response(status, error_type, &error.to_string(), None)
}

async fn workflow_list_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkflowQuery>,
) -> Result<Response, Response> {
    let submission_type = query
        .submission_type
        .as_deref()
        .and_then(SubmissionType::from_name)
        .ok_or_else(|| {
            error_response(
                StatusCode::BAD_REQUEST,
                "invalid_type",
                "Query parameter 'type' must be harga_jual, biaya, routing or data_request",
                None,
            )
        })?;

    let board = state.workflow.read().map_err(|_| lock_failed())?;
    Ok(Json(WorkflowListResponse {
        submission_type,
        summary: board.summary(submission_type),
        submissions: board.list(submission_type).collect(),
    })
    .into_response())
}

async fn workflow_create_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSubmissionRequest>,
) -> Result<Response, Response> {
    let requester_name = request.requester_name.trim();
    if requester_name.is_empty() || requester_name.len() > MAX_TEXT_FIELD_SIZE {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "invalid_requester",
            "Requester name is required",
            None,
        ));
    }

    let mut board = state.workflow.write().map_err(|_| lock_failed())?;
    let submission = board
        .submit(request.submission_type, requester_name, request.details)
        .map_err(|e| workflow_error_response(&e))?;

    Ok((StatusCode::CREATED, Json(submission)).into_response())
}

async fn workflow_approve_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<ApproveRequest>,
) -> Result<Response, Response> {
    let mut board = state.workflow.write().map_err(|_| lock_failed())?;
    let submission = board
        .approve(&id, request.role)
        .map_err(|e| workflow_error_response(&e))?;
    Ok(Json(submission).into_response())
}

async fn workflow_complete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<CompleteRequest>,
) -> Result<Response, Response> {
    let mut board = state.workflow.write().map_err(|_| lock_failed())?;
    let notification = board
        .complete(&id, request.role, &request.result_link)
        .map_err(|e| workflow_error_response(&e))?;
    let submission = board.get(&id);
    Ok(Json(serde_json::json!({
        "notification": notification,
        "submission": submission,
    }))
    .into_response())
}
