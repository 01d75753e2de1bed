//! 用户端点

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::info;

use crate::services::{CreateUserRequest, UserService};

use super::helpers::{ApiResponse, json_response, success_response};

/// GET /users
pub async fn list_users(service: web::Data<Arc<UserService>>) -> ActixResult<HttpResponse> {
    let users = service.list().await?;
    Ok(success_response(users, "Users retrieved successfully"))
}

/// POST /users
pub async fn create_user(
    service: web::Data<Arc<UserService>>,
    body: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    let user = service.create(body.into_inner()).await?;
    info!("Created user {} <{}>", user.id, user.email);

    Ok(json_response(
        StatusCode::CREATED,
        &ApiResponse::ok(user, "User created successfully"),
    ))
}
