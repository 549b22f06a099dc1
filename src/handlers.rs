// region:    --- Imports
use crate::account::{Credentials, ProfileUpdate, Registration};
use crate::bidding::{BidDraft, BidStatus};
use crate::error::TenderError;
use crate::notification::{NewNotification, Notification};
use crate::state::AppState;
use crate::tender::{EffectiveStatus, TenderDraft, TenderPatch};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tenders", get(handle_get_tenders).post(handle_create_tender))
        .route("/tenders/active", get(handle_get_active_tenders))
        .route("/tenders/completed", get(handle_get_completed_tenders))
        .route(
            "/tenders/:id",
            get(handle_get_tender)
                .patch(handle_patch_tender)
                .delete(handle_delete_tender),
        )
        .route("/tenders/:id/cancel", post(handle_cancel_tender))
        .route("/tenders/:id/complete", post(handle_complete_tender))
        .route("/tenders/:id/extend", post(handle_extend_tender))
        .route("/tenders/:id/bids", get(handle_get_tender_bids))
        .route("/tenders/:id/lowest-bid", get(handle_get_lowest_bid))
        .route("/tenders/:id/bid-stats", get(handle_get_bid_stats))
        .route("/bids", post(handle_create_bid))
        .route("/bids/:id", get(handle_get_bid).delete(handle_delete_bid))
        .route("/bids/:id/status", put(handle_update_bid_status))
        .route("/bids/:id/accept", post(handle_accept_bid))
        .route("/bids/:id/reject", post(handle_reject_bid))
        .route("/users/:id/bids", get(handle_get_user_bids))
        .route("/users/:id/tenders", get(handle_get_user_tender_summaries))
        .route("/users/:id/favorites", get(handle_get_favorites))
        .route(
            "/users/:id/favorites/:tender_id",
            get(handle_is_favorite)
                .post(handle_add_favorite)
                .delete(handle_remove_favorite),
        )
        .route(
            "/notifications",
            get(handle_get_notifications).post(handle_add_notification),
        )
        .route("/notifications/unread", get(handle_get_unread_notifications))
        .route("/notifications/read-all", post(handle_mark_all_read))
        .route("/notifications/:id/read", post(handle_mark_read))
        .route("/accounts/register", post(handle_register))
        .route("/accounts/login", post(handle_login))
        .route("/accounts/logout", post(handle_logout))
        .route("/accounts/me", get(handle_current_user).patch(handle_update_profile))
        .layer(cors)
        .with_state(state)
}
// endregion: --- Router

// region:    --- Error Response
impl IntoResponse for TenderError {
    fn into_response(self) -> Response {
        let status = match &self {
            TenderError::Validation(_) => StatusCode::BAD_REQUEST,
            TenderError::NotFound { .. } => StatusCode::NOT_FOUND,
            TenderError::TenderClosed(_) => StatusCode::CONFLICT,
            TenderError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{:<12} --> 요청 처리 실패: {:?}", "Handler", self);
        }
        (
            status,
            Json(json!({ "error": self.to_string(), "code": self.code() })),
        )
            .into_response()
    }
}
// endregion: --- Error Response

// region:    --- Request Bodies
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderListParams {
    pub status: Option<EffectiveStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidListParams {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendRequest {
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptRequest {
    pub tender_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: BidStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationParams {
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}
// endregion: --- Request Bodies

// region:    --- Tender Handlers

/// 입찰 공고 목록 (status 파라미터로 유효 상태 필터)
pub async fn handle_get_tenders(
    State(state): State<AppState>,
    Query(params): Query<TenderListParams>,
) -> impl IntoResponse {
    info!("{:<12} --> 입찰 공고 목록 조회: {:?}", "HandlerQuery", params);
    match params.status {
        Some(status) => Json(state.queries.get_tenders_by_status(status).await),
        None => Json(state.queries.get_all_tenders().await),
    }
}

pub async fn handle_get_active_tenders(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.queries.get_active_tenders().await)
}

pub async fn handle_get_completed_tenders(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.queries.get_completed_tenders().await)
}

/// 입찰 공고 조회
pub async fn handle_get_tender(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 입찰 공고 조회 id: {}", "HandlerQuery", tender_id);
    match state.queries.get_tender_by_id(&tender_id).await {
        Some(tender) => Json(tender).into_response(),
        None => TenderError::not_found("tender", tender_id).into_response(),
    }
}

/// 입찰 공고 생성
pub async fn handle_create_tender(
    State(state): State<AppState>,
    Json(draft): Json<TenderDraft>,
) -> impl IntoResponse {
    match state.tenders.create_tender(draft).await {
        Ok(tender) => (StatusCode::CREATED, Json(tender)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 입찰 공고 병합 패치
pub async fn handle_patch_tender(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
    Json(patch): Json<TenderPatch>,
) -> impl IntoResponse {
    match state.tenders.apply_tender_patch(&tender_id, patch).await {
        Ok(tender) => Json(tender).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_cancel_tender(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
) -> impl IntoResponse {
    match state.tenders.cancel_tender(&tender_id).await {
        Ok(tender) => Json(tender).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_complete_tender(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
) -> impl IntoResponse {
    match state.tenders.complete_tender(&tender_id).await {
        Ok(tender) => Json(tender).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 입찰 공고 삭제
pub async fn handle_delete_tender(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
) -> impl IntoResponse {
    match state.tenders.delete_tender(&tender_id).await {
        Ok(_) => Json(json!({ "success": true })).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 마감 연장
pub async fn handle_extend_tender(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
    Json(request): Json<ExtendRequest>,
) -> impl IntoResponse {
    match state
        .tenders
        .extend_tender_deadline(&tender_id, request.end_time)
        .await
    {
        Ok(tender) => Json(tender).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 공고별 입찰 목록 (userId 파라미터로 사용자 입찰만 조회)
pub async fn handle_get_tender_bids(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
    Query(params): Query<BidListParams>,
) -> impl IntoResponse {
    match params.user_id {
        Some(user_id) => Json(
            state
                .bids
                .get_user_bids_by_tender(&tender_id, &user_id)
                .await,
        ),
        None => Json(state.bids.get_bids_by_tender(&tender_id).await),
    }
}

/// 최저 입찰 조회 (입찰이 없으면 null)
pub async fn handle_get_lowest_bid(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 최저 입찰 조회 id: {}", "HandlerQuery", tender_id);
    Json(state.bids.get_lowest_bid(&tender_id).await)
}

pub async fn handle_get_bid_stats(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
) -> impl IntoResponse {
    Json(state.bids.get_tender_bid_stats(&tender_id).await)
}

// endregion: --- Tender Handlers

// region:    --- Bid Handlers

/// 입찰 요청 처리
pub async fn handle_create_bid(
    State(state): State<AppState>,
    Json(draft): Json<BidDraft>,
) -> impl IntoResponse {
    match state.bids.create_bid(draft).await {
        Ok(bid) => (StatusCode::CREATED, Json(bid)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_get_bid(
    State(state): State<AppState>,
    Path(bid_id): Path<String>,
) -> impl IntoResponse {
    match state.bids.get_bid_by_id(&bid_id).await {
        Some(bid) => Json(bid).into_response(),
        None => TenderError::not_found("bid", bid_id).into_response(),
    }
}

pub async fn handle_update_bid_status(
    State(state): State<AppState>,
    Path(bid_id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> impl IntoResponse {
    match state.bids.update_bid_status(&bid_id, request.status).await {
        Ok(bid) => Json(bid).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 낙찰 처리
pub async fn handle_accept_bid(
    State(state): State<AppState>,
    Path(bid_id): Path<String>,
    Json(request): Json<AcceptRequest>,
) -> impl IntoResponse {
    match state.bids.accept_bid(&bid_id, &request.tender_id).await {
        Ok(bid) => Json(bid).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_reject_bid(
    State(state): State<AppState>,
    Path(bid_id): Path<String>,
) -> impl IntoResponse {
    match state.bids.reject_bid(&bid_id).await {
        Ok(bid) => Json(bid).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_delete_bid(
    State(state): State<AppState>,
    Path(bid_id): Path<String>,
) -> impl IntoResponse {
    match state.bids.delete_bid(&bid_id).await {
        Ok(_) => Json(json!({ "success": true })).into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- Bid Handlers

// region:    --- User Handlers

pub async fn handle_get_user_bids(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    Json(state.bids.get_user_bids(&user_id).await)
}

pub async fn handle_get_user_tender_summaries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    Json(state.queries.get_user_tender_summaries(&user_id).await)
}

/// 관심 공고 조회
pub async fn handle_get_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.queries.get_user_favorites(&user_id).await {
        Ok(tenders) => Json(tenders).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_is_favorite(
    State(state): State<AppState>,
    Path((user_id, tender_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.queries.is_favorite(&user_id, &tender_id).await {
        Ok(favorite) => Json(json!({ "favorite": favorite })).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_add_favorite(
    State(state): State<AppState>,
    Path((user_id, tender_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.tenders.add_favorite(&user_id, &tender_id).await {
        Ok(added) => Json(json!({ "success": true, "changed": added })).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_remove_favorite(
    State(state): State<AppState>,
    Path((user_id, tender_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.tenders.remove_favorite(&user_id, &tender_id).await {
        Ok(removed) => Json(json!({ "success": true, "changed": removed })).into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- User Handlers

// region:    --- Notification Handlers

/// 알림 조회 (userId 가 없으면 전체)
pub async fn handle_get_notifications(
    State(state): State<AppState>,
    Query(params): Query<NotificationParams>,
) -> impl IntoResponse {
    match params.user_id {
        Some(user_id) => Json(
            state
                .queries
                .get_user_notifications(&user_id, params.is_admin)
                .await,
        ),
        None => Json(state.repository.snapshot::<Notification>().await),
    }
}

pub async fn handle_get_unread_notifications(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.notifications.get_unread_notifications().await)
}

pub async fn handle_add_notification(
    State(state): State<AppState>,
    Json(new): Json<NewNotification>,
) -> impl IntoResponse {
    match state.notifications.add_notification(new).await {
        Ok(notification) => (StatusCode::CREATED, Json(notification)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_mark_read(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> impl IntoResponse {
    match state
        .notifications
        .mark_notification_as_read(&notification_id)
        .await
    {
        Ok(notification) => Json(notification).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_mark_all_read(State(state): State<AppState>) -> impl IntoResponse {
    match state.notifications.mark_all_notifications_as_read().await {
        Ok(changed) => Json(json!({ "success": true, "changed": changed })).into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- Notification Handlers

// region:    --- Account Handlers

pub async fn handle_register(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> impl IntoResponse {
    match state.accounts.register(registration).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> impl IntoResponse {
    match state.accounts.login(credentials).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_logout(State(state): State<AppState>) -> impl IntoResponse {
    match state.accounts.logout().await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_current_user(State(state): State<AppState>) -> impl IntoResponse {
    match state.accounts.current_user().await {
        Ok(user) => Json(user).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> impl IntoResponse {
    match state.accounts.update_profile(update).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- Account Handlers
