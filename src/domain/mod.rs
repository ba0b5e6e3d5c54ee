// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// - 领域模型（models）：特征、探测结果、WHOIS记录等数据结构
/// - 服务（services）：特征计算与聚合
///
/// 领域层通过 `engines::traits` 中的能力接口使用网络，不直接依赖具体实现。
pub mod models;
pub mod services;
