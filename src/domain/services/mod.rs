// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 内容特征（content_features）：基于抓取文档的HTML特征
/// - 域名解析（domain_resolver）：按公共后缀列表拆分可注册域名
/// - 特征聚合（feature_extractor）：调度探测并合并为固定顺序的特征向量
/// - 词法分析（lexical_analyzer）：只依赖URL字符串的特征
pub mod content_features;
pub mod domain_resolver;
pub mod feature_extractor;
pub mod lexical_analyzer;
