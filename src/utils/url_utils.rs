// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 尽力解析用户输入的URL
///
/// 缺少协议的输入（如 `example.com/login`）会以 `http://` 前缀重试一次
pub fn parse_lenient(input: &str) -> Result<Url, ParseError> {
    let trimmed = input.trim();
    match Url::parse(trimmed) {
        Ok(url) => Ok(url),
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{}", trimmed)),
        Err(e) => Err(e),
    }
}

/// 取出 `scheme://` 之后、第一个 `/` 之前的原始主机片段（可能包含用户信息和端口）
pub fn raw_authority(url: &str) -> &str {
    let after_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    after_scheme.split('/').next().unwrap_or("")
}
