// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::feature_extractor::FeatureExtractor;
use crate::presentation::handlers::feature_handler;
use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `extractor` - 所有请求共享的特征提取器
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(extractor: Arc<FeatureExtractor>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let feature_routes = Router::new()
        .route(
            "/v1/features",
            get(feature_handler::get_features).post(feature_handler::post_features),
        )
        .route("/v1/schema", get(feature_handler::schema));

    Router::new()
        .merge(public_routes)
        .merge(feature_routes)
        .layer(Extension(extractor))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
