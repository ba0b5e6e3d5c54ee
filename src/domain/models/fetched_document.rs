// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::Html;
use url::Url;

/// 抓取到的页面
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP状态码
    pub status_code: u16,
    /// 跟随重定向后的最终地址
    pub final_url: Url,
    /// 重定向跳数
    pub redirect_count: usize,
    /// 内容类型
    pub content_type: Option<String>,
    /// 响应正文
    pub body: String,
}

impl FetchedPage {
    /// 响应是否可按 HTML 解析
    ///
    /// 未声明内容类型时按 HTML 处理
    pub fn is_html(&self) -> bool {
        match &self.content_type {
            None => true,
            Some(ct) => {
                let ct = ct.to_ascii_lowercase();
                ct.trim().is_empty()
                    || ct.contains("text/html")
                    || ct.contains("application/xhtml")
            }
        }
    }
}

/// 单次提取共享的只读文档
///
/// 持有原始响应和解析后的 DOM 树，所有内容特征都基于同一份文档计算
pub struct FetchedDocument {
    page: FetchedPage,
    html: Html,
}

impl FetchedDocument {
    /// 解析页面；非 HTML 内容返回 `None`
    pub fn parse(page: FetchedPage) -> Option<Self> {
        if !page.is_html() {
            return None;
        }
        let html = Html::parse_document(&page.body);
        Some(Self { page, html })
    }

    pub fn page(&self) -> &FetchedPage {
        &self.page
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn body(&self) -> &str {
        &self.page.body
    }
}
