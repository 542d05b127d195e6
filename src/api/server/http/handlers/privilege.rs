//! 权限管理端点
//!
//! 所有端点都返回 200 和 `{ code, result }`，请求体解析失败也按该端点的失败消息返回

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::Json as JsonResponse,
};
use serde_json::Value;

use crate::api::core::Endpoint;
use crate::api::server::http::state::AppState;
use crate::connector::Connector;
use crate::core::OperationResult;

async fn handle<C: Connector>(
    endpoint: Endpoint,
    state: AppState<C>,
    payload: Result<Json<Value>, JsonRejection>,
) -> JsonResponse<OperationResult> {
    let result = match payload {
        Ok(Json(body)) => {
            endpoint
                .dispatch(state.server.get_privilege_api(), body)
                .await
        }
        Err(rejection) => {
            log::warn!("{} 请求体无效: {}", endpoint, rejection.body_text());
            OperationResult::failure(endpoint.failure_message())
        }
    };
    JsonResponse(result)
}

pub async fn connection_check<C: Connector>(
    State(state): State<AppState<C>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> JsonResponse<OperationResult> {
    handle(Endpoint::ConnectionCheck, state, payload).await
}

pub async fn target_user_list<C: Connector>(
    State(state): State<AppState<C>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> JsonResponse<OperationResult> {
    handle(Endpoint::TargetUserList, state, payload).await
}

pub async fn database_list<C: Connector>(
    State(state): State<AppState<C>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> JsonResponse<OperationResult> {
    handle(Endpoint::DatabaseList, state, payload).await
}

pub async fn table_list<C: Connector>(
    State(state): State<AppState<C>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> JsonResponse<OperationResult> {
    handle(Endpoint::TableList, state, payload).await
}

pub async fn check_authority<C: Connector>(
    State(state): State<AppState<C>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> JsonResponse<OperationResult> {
    handle(Endpoint::CheckAuthority, state, payload).await
}

pub async fn authority_list<C: Connector>(
    State(state): State<AppState<C>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> JsonResponse<OperationResult> {
    handle(Endpoint::AuthorityList, state, payload).await
}

pub async fn add_authority<C: Connector>(
    State(state): State<AppState<C>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> JsonResponse<OperationResult> {
    handle(Endpoint::AddAuthority, state, payload).await
}

pub async fn remove_authority<C: Connector>(
    State(state): State<AppState<C>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> JsonResponse<OperationResult> {
    handle(Endpoint::RemoveAuthority, state, payload).await
}
