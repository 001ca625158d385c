//! 外部募捐页面的预览图提取
//!
//! 从 HTML 的 `<meta>` 标签中找出 Open Graph / Twitter 预览图。

use crate::error::{GivingError, GivingResult};
use regex::Regex;
use std::sync::LazyLock;
use url::{Host, Url};

static META_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid meta regex"));

static META_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z:_-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid attr regex")
});

/// 按优先级排列的预览图属性名
const IMAGE_PROPERTIES: [&str; 5] = [
    "og:image:secure_url",
    "og:image",
    "og:image:url",
    "twitter:image",
    "twitter:image:src",
];

fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// 提取页面的预览图，相对地址基于 `page_url` 解析
pub fn extract_preview_image(html: &str, page_url: &Url) -> Option<String> {
    let mut found: [Option<String>; IMAGE_PROPERTIES.len()] = Default::default();

    for tag in META_TAG.find_iter(html) {
        let mut key = None;
        let mut content = None;
        for cap in META_ATTR.captures_iter(tag.as_str()) {
            let value = cap.get(2).or_else(|| cap.get(3)).map(|m| m.as_str());
            match cap[1].to_ascii_lowercase().as_str() {
                "property" | "name" => key = value.map(str::to_ascii_lowercase),
                "content" => content = value.map(str::trim),
                _ => {}
            }
        }

        let (Some(key), Some(content)) = (key, content) else {
            continue;
        };
        if content.is_empty() {
            continue;
        }
        if let Some(rank) = IMAGE_PROPERTIES.iter().position(|p| *p == key) {
            found[rank].get_or_insert_with(|| decode_entities(content));
        }
    }

    found
        .into_iter()
        .flatten()
        .find_map(|raw| {
            page_url
                .join(&raw)
                .ok()
                .filter(|u| matches!(u.scheme(), "http" | "https"))
        })
        .map(String::from)
}

/// 只允许解析公网 https 页面
pub fn validate_external_url(raw: &str) -> GivingResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        GivingError::invalid_input(format!("Invalid url: {}", e)).with_source(e)
    })?;

    if url.scheme() != "https" {
        return Err(GivingError::invalid_input("Only https pages can be resolved"));
    }

    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.to_ascii_lowercase();
            let private = domain == "localhost"
                || domain.ends_with(".localhost")
                || domain.ends_with(".local")
                || domain.ends_with(".internal")
                || !domain.contains('.');
            if private {
                return Err(GivingError::invalid_input("Host is not public"));
            }
            Ok(url)
        }
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {
            Err(GivingError::invalid_input("IP addresses are not allowed"))
        }
        None => Err(GivingError::invalid_input("Url has no host")),
    }
}
