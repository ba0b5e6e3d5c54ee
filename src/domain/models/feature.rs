// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::SchemaMismatch;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// 特征模式版本，特征名称或顺序变化时必须递增
pub const SCHEMA_VERSION: &str = "1";

/// 特征数量
pub const FEATURE_COUNT: usize = 30;

/// 哨兵值：特征无法确定
pub const SENTINEL: i64 = -1;

/// 特征名称
///
/// 枚举顺序即分类器训练时的列顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureName {
    HavingIpAddress,
    UrlLength,
    ShortiningService,
    HavingAtSymbol,
    DoubleSlashRedirecting,
    PrefixSuffix,
    HavingSubDomain,
    SslFinalState,
    DomainRegisterationLength,
    Favicon,
    Port,
    HttpsToken,
    RequestUrl,
    UrlOfAnchor,
    LinksInTags,
    Sfh,
    SubmittingToEmail,
    AbnormalUrl,
    Redirect,
    OnMouseover,
    RightClick,
    PopUpWidnow,
    Iframe,
    AgeOfDomain,
    DnsRecord,
    WebTraffic,
    PageRank,
    GoogleIndex,
    LinksPointingToPage,
    StatisticalReport,
}

impl FeatureName {
    /// 按训练列顺序排列的全部特征
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::HavingIpAddress,
        FeatureName::UrlLength,
        FeatureName::ShortiningService,
        FeatureName::HavingAtSymbol,
        FeatureName::DoubleSlashRedirecting,
        FeatureName::PrefixSuffix,
        FeatureName::HavingSubDomain,
        FeatureName::SslFinalState,
        FeatureName::DomainRegisterationLength,
        FeatureName::Favicon,
        FeatureName::Port,
        FeatureName::HttpsToken,
        FeatureName::RequestUrl,
        FeatureName::UrlOfAnchor,
        FeatureName::LinksInTags,
        FeatureName::Sfh,
        FeatureName::SubmittingToEmail,
        FeatureName::AbnormalUrl,
        FeatureName::Redirect,
        FeatureName::OnMouseover,
        FeatureName::RightClick,
        FeatureName::PopUpWidnow,
        FeatureName::Iframe,
        FeatureName::AgeOfDomain,
        FeatureName::DnsRecord,
        FeatureName::WebTraffic,
        FeatureName::PageRank,
        FeatureName::GoogleIndex,
        FeatureName::LinksPointingToPage,
        FeatureName::StatisticalReport,
    ];

    /// 分类器中使用的列名
    pub const fn as_str(&self) -> &'static str {
        match self {
            FeatureName::HavingIpAddress => "having_IP_Address",
            FeatureName::UrlLength => "URL_Length",
            FeatureName::ShortiningService => "Shortining_Service",
            FeatureName::HavingAtSymbol => "having_At_Symbol",
            FeatureName::DoubleSlashRedirecting => "double_slash_redirecting",
            FeatureName::PrefixSuffix => "Prefix_Suffix",
            FeatureName::HavingSubDomain => "having_Sub_Domain",
            FeatureName::SslFinalState => "SSLfinal_State",
            FeatureName::DomainRegisterationLength => "Domain_registeration_length",
            FeatureName::Favicon => "Favicon",
            FeatureName::Port => "port",
            FeatureName::HttpsToken => "HTTPS_token",
            FeatureName::RequestUrl => "Request_URL",
            FeatureName::UrlOfAnchor => "URL_of_Anchor",
            FeatureName::LinksInTags => "Links_in_tags",
            FeatureName::Sfh => "SFH",
            FeatureName::SubmittingToEmail => "Submitting_to_email",
            FeatureName::AbnormalUrl => "Abnormal_URL",
            FeatureName::Redirect => "Redirect",
            FeatureName::OnMouseover => "on_mouseover",
            FeatureName::RightClick => "RightClick",
            FeatureName::PopUpWidnow => "popUpWidnow",
            FeatureName::Iframe => "Iframe",
            FeatureName::AgeOfDomain => "age_of_domain",
            FeatureName::DnsRecord => "DNSRecord",
            FeatureName::WebTraffic => "web_traffic",
            FeatureName::PageRank => "Page_Rank",
            FeatureName::GoogleIndex => "Google_Index",
            FeatureName::LinksPointingToPage => "Links_pointing_to_page",
            FeatureName::StatisticalReport => "Statistical_report",
        }
    }

    /// 根据列名查找特征
    pub fn from_column(column: &str) -> Option<FeatureName> {
        FeatureName::ALL.into_iter().find(|name| name.as_str() == column)
    }
}

// ALL must list the variants in declaration order
const _: () = {
    let mut i = 0;
    while i < FEATURE_COUNT {
        assert!(FeatureName::ALL[i] as usize == i);
        i += 1;
    }
};

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 特征值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
}

impl FeatureValue {
    /// 哨兵值
    pub const fn sentinel() -> Self {
        FeatureValue::Int(SENTINEL)
    }

    /// 是否为哨兵值
    pub fn is_sentinel(&self) -> bool {
        matches!(self, FeatureValue::Int(SENTINEL))
    }

    /// 非零且不是哨兵值
    pub fn is_suspicious(&self) -> bool {
        match *self {
            FeatureValue::Int(v) => v != 0 && v != SENTINEL,
            FeatureValue::Float(v) => v != 0.0 && v != SENTINEL as f64,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            FeatureValue::Int(v) => v as f64,
            FeatureValue::Float(v) => v,
        }
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Int(v)
    }
}

impl From<bool> for FeatureValue {
    fn from(v: bool) -> Self {
        FeatureValue::Int(i64::from(v))
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Float(v)
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            FeatureValue::Int(v) => serializer.serialize_i64(v),
            FeatureValue::Float(v) => serializer.serialize_f64(v),
        }
    }
}

/// 特征向量
///
/// 固定长度、固定顺序；每个槽位对应 [`FeatureName::ALL`] 中同一位置的特征
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [FeatureValue; FEATURE_COUNT],
}

impl FeatureVector {
    /// 为每个特征调用一次 `f` 构造向量
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(FeatureName) -> FeatureValue,
    {
        Self {
            values: FeatureName::ALL.map(&mut f),
        }
    }

    pub fn get(&self, name: FeatureName) -> FeatureValue {
        self.values[name as usize]
    }

    /// 按列顺序遍历 (名称, 值)
    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, FeatureValue)> + '_ {
        FeatureName::ALL.into_iter().zip(self.values.iter().copied())
    }

    /// 列名列表
    pub fn columns() -> Vec<&'static str> {
        FeatureName::ALL.iter().map(|n| n.as_str()).collect()
    }

    /// 校验分类器期望的列与本向量完全一致
    ///
    /// 不一致时调用方应视为致命的集成错误
    pub fn ensure_columns<S: AsRef<str>>(expected: &[S]) -> Result<(), SchemaMismatch> {
        if expected.len() != FEATURE_COUNT {
            return Err(SchemaMismatch::LengthMismatch {
                expected: expected.len(),
                actual: FEATURE_COUNT,
            });
        }

        for (position, (column, name)) in expected.iter().zip(FeatureName::ALL).enumerate() {
            if column.as_ref() != name.as_str() {
                return Err(SchemaMismatch::ColumnMismatch {
                    position,
                    expected: column.as_ref().to_string(),
                    actual: name.as_str().to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name.as_str(), &value)?;
        }
        map.end()
    }
}
