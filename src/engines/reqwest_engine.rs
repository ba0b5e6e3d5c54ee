// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::ProbeSettings;
use crate::domain::models::fetched_document::FetchedPage;
use crate::engines::traits::{ContentFetcher, ProbeError};
use crate::utils::url_utils;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use std::time::Instant;
use tracing::debug;

/// 抓取引擎
///
/// 基于reqwest实现的内容抓取，手动跟随重定向以记录跳数
pub struct ReqwestEngine {
    client: reqwest::Client,
    max_redirects: usize,
}

impl ReqwestEngine {
    /// 创建抓取引擎
    ///
    /// # 参数
    ///
    /// * `settings` - 探测配置（超时、User-Agent、最大重定向次数）
    pub fn new(settings: &ProbeSettings) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.fetch_timeout())
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            max_redirects: settings.max_redirects,
        })
    }
}

#[async_trait]
impl ContentFetcher for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchedPage)` - 最终响应（含重定向跳数）
    /// * `Err(ProbeError)` - 网络错误、超时或重定向过多
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ProbeError> {
        let mut current = url_utils::parse_lenient(url)
            .map_err(|e| ProbeError::Other(format!("Invalid URL: {}", e)))?;
        let mut redirect_count = 0usize;
        let start = Instant::now();

        loop {
            let response = self.client.get(current.clone()).send().await?;
            let status = response.status();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);

                if let Some(location) = location {
                    if redirect_count >= self.max_redirects {
                        return Err(ProbeError::TooManyRedirects(self.max_redirects));
                    }
                    current = url_utils::resolve_url(&current, &location).map_err(|e| {
                        ProbeError::Other(format!("Invalid redirect target {}: {}", location, e))
                    })?;
                    redirect_count += 1;
                    debug!(hop = redirect_count, target = %current, "Following redirect");
                    continue;
                }
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let final_url = response.url().clone();
            let body = response.text().await?;

            debug!(
                status = status.as_u16(),
                redirects = redirect_count,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Fetched page"
            );

            return Ok(FetchedPage {
                status_code: status.as_u16(),
                final_url,
                redirect_count,
                content_type,
                body,
            });
        }
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
