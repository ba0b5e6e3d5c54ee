// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了特征提取的核心数据结构，包括：
/// - 特征（feature）：固定顺序的特征名称、特征值和特征向量
/// - 探测（probe）：网络探测的成功/不可用结果
/// - 可注册域名（registrable_domain）：按公共后缀列表计算的域名
/// - WHOIS记录（whois_record）：解析后的注册信息
/// - 抓取文档（fetched_document）：单次提取共享的页面和 DOM 树
pub mod feature;
pub mod fetched_document;
pub mod probe;
pub mod registrable_domain;
pub mod whois_record;
