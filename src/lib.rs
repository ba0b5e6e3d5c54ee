// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含特征模型、特征计算与聚合服务
pub mod domain;

/// 引擎模块
///
/// 实现TLS、DNS、WHOIS探测与页面抓取
pub mod engines;

/// 基础设施模块
///
/// 提供Prometheus指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

use crate::config::settings::ProbeSettings;
use crate::domain::models::feature::FeatureVector;
use crate::domain::services::feature_extractor::FeatureExtractor;
use crate::utils::errors::ExtractionError;

/// 使用默认探测配置提取URL的特征向量
///
/// 只有输入完全无法解析为URL时返回错误；需要复用客户端或自定义超时时请直接构造
/// [`FeatureExtractor`]
pub async fn extract_all_features(url: &str) -> Result<FeatureVector, ExtractionError> {
    FeatureExtractor::new(ProbeSettings::default())?
        .extract_all_features(url)
        .await
}
