// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 页面内容特征
//!
//! 全部基于同一份 [`FetchedDocument`] 计算；没有文档时返回各自的“无内容”值。

use crate::domain::models::fetched_document::FetchedDocument;
use crate::domain::models::registrable_domain::RegistrableDomain;
use crate::domain::services::domain_resolver;
use crate::utils::url_utils;
use once_cell::sync::Lazy;
use scraper::Selector;
use url::Url;

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css}: {e}"))
}

static LINK_WITH_REL: Lazy<Selector> = Lazy::new(|| selector("link[rel]"));
static RESOURCES: Lazy<Selector> = Lazy::new(|| selector("img, script, link"));
static ANCHORS: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static TAGS_WITH_HREF: Lazy<Selector> =
    Lazy::new(|| selector("link[href], meta[href], script[href]"));
static FORMS_WITH_ACTION: Lazy<Selector> = Lazy::new(|| selector("form[action]"));
static MAILTO: Lazy<Selector> = Lazy::new(|| selector(r#"[href^="mailto:"]"#));
static ON_MOUSEOVER: Lazy<Selector> = Lazy::new(|| selector("[onmouseover]"));
static ON_CONTEXTMENU: Lazy<Selector> = Lazy::new(|| selector("[oncontextmenu]"));
static IFRAMES: Lazy<Selector> = Lazy::new(|| selector("iframe"));

/// 内容特征集合
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentFeatures {
    pub favicon: i64,
    pub request_url: f64,
    pub url_of_anchor: f64,
    pub links_in_tags: i64,
    pub sfh: i64,
    pub submitting_to_email: i64,
    pub on_mouseover: i64,
    pub right_click: i64,
    pub pop_up_window: i64,
    pub iframe: i64,
}

impl ContentFeatures {
    /// 抓取失败或非HTML内容时的取值
    pub const NO_CONTENT: ContentFeatures = ContentFeatures {
        favicon: 0,
        request_url: 0.0,
        url_of_anchor: 0.0,
        links_in_tags: 0,
        sfh: 0,
        submitting_to_email: 0,
        on_mouseover: 0,
        right_click: 0,
        pop_up_window: 0,
        iframe: 0,
    };

    /// 计算全部内容特征
    ///
    /// `page_domain` 是输入URL的可注册域名，跨域判断都以它为准
    pub fn analyze(
        document: Option<&FetchedDocument>,
        page_domain: Option<&RegistrableDomain>,
    ) -> Self {
        let Some(doc) = document else {
            return Self::NO_CONTENT;
        };

        Self {
            favicon: favicon(doc, page_domain),
            request_url: request_url(doc, page_domain),
            url_of_anchor: url_of_anchor(doc, page_domain),
            links_in_tags: links_in_tags(doc),
            sfh: sfh(doc, page_domain),
            submitting_to_email: submitting_to_email(doc),
            on_mouseover: on_mouseover(doc),
            right_click: right_click(doc),
            pop_up_window: pop_up_window(doc),
            iframe: iframe(doc),
        }
    }
}

/// 目标是否指向另一个可注册域名
///
/// 相对地址永远算同域（页面可能已被重定向到别的站点）；协议相对地址按页面地址补全。
/// 没有可注册域名的目标（IP、mailto 等）不计为跨域
fn is_cross_domain(base: &Url, target: &str, page_domain: Option<&RegistrableDomain>) -> bool {
    let target = target.trim();
    let absolute = if target.starts_with("//") {
        url_utils::resolve_url(base, target).ok()
    } else {
        Url::parse(target).ok()
    };

    absolute
        .and_then(|resolved| domain_resolver::resolve_parsed(&resolved))
        .is_some_and(|target_domain| {
            page_domain.map_or(true, |page| target_domain.as_str() != page.as_str())
        })
}

/// 第一个 `rel` 含 icon 的 `<link>` 指向其他域名时为 1
pub fn favicon(doc: &FetchedDocument, page_domain: Option<&RegistrableDomain>) -> i64 {
    let icon = doc.html().select(&LINK_WITH_REL).find(|link| {
        link.value()
            .attr("rel")
            .is_some_and(|rel| rel.to_ascii_lowercase().contains("icon"))
    });

    match icon.and_then(|link| link.value().attr("href")) {
        Some(href) if !href.trim().is_empty() => {
            i64::from(is_cross_domain(&doc.page().final_url, href, page_domain))
        }
        _ => 0,
    }
}

/// img/script/link 资源中跨域目标的比例
pub fn request_url(doc: &FetchedDocument, page_domain: Option<&RegistrableDomain>) -> f64 {
    let base = &doc.page().final_url;
    let targets: Vec<&str> = doc
        .html()
        .select(&RESOURCES)
        .filter_map(|el| {
            let value = el.value();
            value
                .attr("src")
                .filter(|v| !v.is_empty())
                .or_else(|| value.attr("href").filter(|v| !v.is_empty()))
        })
        .collect();

    if targets.is_empty() {
        return 0.0;
    }

    let external = targets
        .iter()
        .filter(|target| is_cross_domain(base, target, page_domain))
        .count();
    external as f64 / targets.len() as f64
}

/// 空、`#`、`javascript` 或跨域锚点的比例
pub fn url_of_anchor(doc: &FetchedDocument, page_domain: Option<&RegistrableDomain>) -> f64 {
    let base = &doc.page().final_url;
    let mut total = 0usize;
    let mut suspicious = 0usize;

    for anchor in doc.html().select(&ANCHORS) {
        total += 1;
        let href = anchor.value().attr("href").unwrap_or("").trim();
        if href.is_empty()
            || href.starts_with('#')
            || href.to_ascii_lowercase().starts_with("javascript")
            || is_cross_domain(base, href, page_domain)
        {
            suspicious += 1;
        }
    }

    if total == 0 {
        0.0
    } else {
        suspicious as f64 / total as f64
    }
}

/// 带 `href` 的 link/meta/script 元素数量
pub fn links_in_tags(doc: &FetchedDocument) -> i64 {
    doc.html().select(&TAGS_WITH_HREF).count() as i64
}

/// action 为空或跨域的表单数量
pub fn sfh(doc: &FetchedDocument, page_domain: Option<&RegistrableDomain>) -> i64 {
    let base = &doc.page().final_url;
    doc.html()
        .select(&FORMS_WITH_ACTION)
        .filter(|form| {
            let action = form.value().attr("action").unwrap_or("").trim();
            action.is_empty() || is_cross_domain(base, action, page_domain)
        })
        .count() as i64
}

pub fn submitting_to_email(doc: &FetchedDocument) -> i64 {
    i64::from(doc.html().select(&MAILTO).next().is_some())
}

pub fn on_mouseover(doc: &FetchedDocument) -> i64 {
    i64::from(doc.html().select(&ON_MOUSEOVER).next().is_some())
}

/// 页面禁用右键时为 1
pub fn right_click(doc: &FetchedDocument) -> i64 {
    if doc.html().select(&ON_CONTEXTMENU).next().is_some() {
        return 1;
    }
    let body = doc.body().to_lowercase();
    i64::from(
        body.contains("event.button==2")
            || (body.contains("preventdefault") && body.contains("contextmenu")),
    )
}

pub fn pop_up_window(doc: &FetchedDocument) -> i64 {
    i64::from(doc.body().contains("window.open"))
}

pub fn iframe(doc: &FetchedDocument) -> i64 {
    i64::from(doc.html().select(&IFRAMES).next().is_some())
}
