// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Query, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::domain::models::feature::{FeatureVector, SCHEMA_VERSION};
use crate::domain::services::feature_extractor::{ExtractionReport, FeatureExtractor};
use crate::presentation::errors::AppError;

/// 特征提取请求
#[derive(Debug, Deserialize)]
pub struct FeatureRequest {
    /// 待分析的URL
    pub url: String,
}

/// 特征模式响应
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub version: &'static str,
    pub columns: Vec<&'static str>,
}

/// 通过查询参数提取特征
///
/// `GET /v1/features?url=...`
pub async fn get_features(
    Extension(extractor): Extension<Arc<FeatureExtractor>>,
    Query(request): Query<FeatureRequest>,
) -> Result<Json<ExtractionReport>, AppError> {
    extract(extractor, request).await
}

/// 通过JSON请求体提取特征
///
/// `POST /v1/features`
pub async fn post_features(
    Extension(extractor): Extension<Arc<FeatureExtractor>>,
    Json(request): Json<FeatureRequest>,
) -> Result<Json<ExtractionReport>, AppError> {
    extract(extractor, request).await
}

async fn extract(
    extractor: Arc<FeatureExtractor>,
    request: FeatureRequest,
) -> Result<Json<ExtractionReport>, AppError> {
    info!("Feature extraction requested for {}", request.url);
    let report = extractor.extract(&request.url).await?;
    Ok(Json(report))
}

/// 返回当前特征列及其顺序
pub async fn schema() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        version: SCHEMA_VERSION,
        columns: FeatureVector::columns(),
    })
}
