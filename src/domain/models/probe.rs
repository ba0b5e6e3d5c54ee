// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

/// 探测不可用原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// 可注册域名为空，探测未发起
    EmptyDomain,
    /// 超出探测自身超时或整体截止时间
    Timeout,
    /// 传输或协议错误
    Failed(String),
}

/// 探测结果
///
/// 失败不会越过探测边界，而是以 `Unavailable` 的形式返回
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeResult<T> {
    Success(T),
    Unavailable(UnavailableReason),
}

impl<T> ProbeResult<T> {
    pub fn as_success(&self) -> Option<&T> {
        match self {
            ProbeResult::Success(value) => Some(value),
            ProbeResult::Unavailable(_) => None,
        }
    }

    pub fn status(&self) -> ProbeStatus {
        match self {
            ProbeResult::Success(_) => ProbeStatus {
                available: true,
                reason: None,
            },
            ProbeResult::Unavailable(reason) => ProbeStatus {
                available: false,
                reason: Some(reason.clone()),
            },
        }
    }
}

/// 探测状态摘要，用于报告和日志
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeStatus {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnavailableReason>,
}
