// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 可注册域名（按公共后缀列表计算的有效域名）
///
/// 例如 `a.b.example.co.uk` 的可注册域名是 `example.co.uk`，
/// 标签为 `example`，后缀为 `co.uk`，子域名为 `a.b`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrableDomain {
    domain: String,
    label: String,
    suffix: String,
    subdomain: String,
}

impl RegistrableDomain {
    pub fn new(
        domain: impl Into<String>,
        label: impl Into<String>,
        suffix: impl Into<String>,
        subdomain: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            label: label.into(),
            suffix: suffix.into(),
            subdomain: subdomain.into(),
        }
    }

    /// 完整的可注册域名
    pub fn as_str(&self) -> &str {
        &self.domain
    }

    /// 后缀左侧的注册标签
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    /// 子域名标签数量
    pub fn subdomain_label_count(&self) -> usize {
        if self.subdomain.is_empty() {
            0
        } else {
            self.subdomain.split('.').count()
        }
    }
}

impl fmt::Display for RegistrableDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.domain)
    }
}
