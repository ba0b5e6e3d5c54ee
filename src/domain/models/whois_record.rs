// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};

/// WHOIS 记录
///
/// 注册商可能对同一字段返回多个值，按出现顺序保存
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhoisRecord {
    pub domain_names: Vec<String>,
    pub creation_dates: Vec<DateTime<Utc>>,
    pub expiration_dates: Vec<DateTime<Utc>>,
}

impl WhoisRecord {
    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_dates.first().copied()
    }

    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_dates.first().copied()
    }

    /// 记录中是否登记了与查询域名一致的域名
    pub fn registers(&self, domain: &str) -> bool {
        let wanted = domain.trim_end_matches('.');
        self.domain_names
            .iter()
            .any(|name| name.trim_end_matches('.').eq_ignore_ascii_case(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_first_dates_win() {
        let first = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();
        let record = WhoisRecord {
            creation_dates: vec![first, second],
            ..Default::default()
        };
        assert_eq!(record.creation_date(), Some(first));
        assert_eq!(record.expiration_date(), None);
    }

    #[test]
    fn test_registers_ignores_case() {
        let record = WhoisRecord {
            domain_names: vec!["EXAMPLE.COM".to_string()],
            ..Default::default()
        };
        assert!(record.registers("example.com"));
        assert!(!record.registers("example.org"));
    }
}
