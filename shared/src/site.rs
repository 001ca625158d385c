//! 站点路由与静态元数据
//!
//! 这是纯粹的领域层，不依赖 DOM。前端路由器和静态导出工具共用这里的定义：
//! - 路由 ↔ 路径（导出为带尾斜杠的目录）
//! - Web App Manifest、robots.txt、sitemap.xml

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Write};

/// Trunk 输出 WASM/JS 的子目录（`index.html` 中的 `data-target-path`）
pub const ASSET_DIR: &str = "pkg";

/// 爬虫不应访问的内部路径（构建产物与后端 API）
pub const INTERNAL_PATHS: [&str; 2] = ["/pkg/", "/api/"];

// =========================================================
// 路由
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SiteRoute {
    #[default]
    Home,
    Donate,
    Campaigns,
    About,
    NotFound,
}

impl SiteRoute {
    /// 需要导出为独立页面的公开路由
    pub const PUBLIC: [SiteRoute; 4] = [
        SiteRoute::Home,
        SiteRoute::Donate,
        SiteRoute::Campaigns,
        SiteRoute::About,
    ];

    /// 将 URL path 解析为路由；`/donate`、`/donate/`、`/donate/index.html` 等价
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path.strip_suffix("/index.html").unwrap_or(path);
        match path.trim_end_matches('/') {
            "" => Self::Home,
            "/donate" => Self::Donate,
            "/campaigns" => Self::Campaigns,
            "/about" => Self::About,
            _ => Self::NotFound,
        }
    }

    /// 规范路径（静态托管启用了尾斜杠）
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Donate => "/donate/",
            Self::Campaigns => "/campaigns/",
            Self::About => "/about/",
            Self::NotFound => "/404.html",
        }
    }

    /// 导出目录中的相对文件路径
    pub fn export_file(&self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::Donate => "donate/index.html",
            Self::Campaigns => "campaigns/index.html",
            Self::About => "about/index.html",
            Self::NotFound => "404.html",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Ramadan Giving",
            Self::Donate => "Donate | Ramadan Giving",
            Self::Campaigns => "Campaigns | Ramadan Giving",
            Self::About => "About us | Ramadan Giving",
            Self::NotFound => "Page not found | Ramadan Giving",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Donate => "Donate",
            Self::Campaigns => "Campaigns",
            Self::About => "About",
            Self::NotFound => "Not found",
        }
    }
}

impl Display for SiteRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 站点配置
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub short_name: String,
    pub description: String,
    /// 不带尾斜杠的站点根地址
    pub base_url: String,
    pub theme_color: String,
    pub background_color: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Ramadan Giving".to_string(),
            short_name: "RGiving".to_string(),
            description: "Feed families, support orphans and share the blessings of Ramadan."
                .to_string(),
            base_url: "https://ramadangiving.org".to_string(),
            theme_color: "#0f766e".to_string(),
            background_color: "#fdfaf3".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn absolute_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

// =========================================================
// Web App Manifest
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

impl WebManifest {
    pub fn for_site(config: &SiteConfig) -> Self {
        let icon = |src: &str, sizes: &str, purpose: Option<&str>| ManifestIcon {
            src: src.to_string(),
            sizes: sizes.to_string(),
            mime_type: "image/png".to_string(),
            purpose: purpose.map(str::to_string),
        };

        Self {
            name: config.name.clone(),
            short_name: config.short_name.clone(),
            description: config.description.clone(),
            start_url: SiteRoute::Home.to_path().to_string(),
            display: "standalone".to_string(),
            background_color: config.background_color.clone(),
            theme_color: config.theme_color.clone(),
            icons: vec![
                icon("/icons/icon-192.png", "192x192", None),
                icon("/icons/icon-512.png", "512x512", None),
                icon("/icons/maskable-512.png", "512x512", Some("maskable")),
            ],
        }
    }
}

// =========================================================
// robots.txt / sitemap.xml
// =========================================================

/// 允许全部，内部路径除外
pub fn robots_txt(config: &SiteConfig) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\n");
    for path in INTERNAL_PATHS {
        let _ = writeln!(out, "Disallow: {}", path);
    }
    let _ = write!(out, "\nSitemap: {}\n", config.absolute_url("/sitemap.xml"));
    out
}

pub fn sitemap_xml(config: &SiteConfig, last_modified: NaiveDate) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for route in SiteRoute::PUBLIC {
        let priority = if route == SiteRoute::Home { "1.0" } else { "0.8" };
        let _ = write!(
            out,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <priority>{}</priority>\n  </url>\n",
            config.absolute_url(route.to_path()),
            last_modified.format("%Y-%m-%d"),
            priority
        );
    }
    out.push_str("</urlset>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_normalize_trailing_slash() {
        assert_eq!(SiteRoute::from_path("/"), SiteRoute::Home);
        assert_eq!(SiteRoute::from_path(""), SiteRoute::Home);
        assert_eq!(SiteRoute::from_path("/index.html"), SiteRoute::Home);
        assert_eq!(SiteRoute::from_path("/donate"), SiteRoute::Donate);
        assert_eq!(SiteRoute::from_path("/donate/"), SiteRoute::Donate);
        assert_eq!(SiteRoute::from_path("/donate/index.html"), SiteRoute::Donate);
        assert_eq!(SiteRoute::from_path("/donate/?campaign=zakat"), SiteRoute::Donate);
        assert_eq!(SiteRoute::from_path("/about/#team"), SiteRoute::About);
        assert_eq!(SiteRoute::from_path("/wp-admin"), SiteRoute::NotFound);
        assert_eq!(SiteRoute::from_path("/donateindex.html"), SiteRoute::NotFound);
        assert_eq!(SiteRoute::from_path("/aboutindex.html"), SiteRoute::NotFound);
    }

    #[test]
    fn test_public_routes_round_trip() {
        for route in SiteRoute::PUBLIC {
            assert_eq!(SiteRoute::from_path(route.to_path()), route);
            assert!(route.to_path().ends_with('/'));
        }
    }

    #[test]
    fn test_manifest_fields() {
        let manifest = WebManifest::for_site(&SiteConfig::default());
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["name"], "Ramadan Giving");
        assert_eq!(json["start_url"], "/");
        assert_eq!(json["display"], "standalone");
        assert_eq!(json["icons"][0]["type"], "image/png");
        assert!(json["icons"][0].get("purpose").is_none());
        assert_eq!(json["icons"][2]["purpose"], "maskable");
    }

    #[test]
    fn test_robots_allows_all_except_internal_paths() {
        let config = SiteConfig::default().with_base_url("https://example.org/");
        let robots = robots_txt(&config);
        assert!(robots.starts_with("User-agent: *\nAllow: /\n"));
        assert!(robots.contains("Disallow: /pkg/\n"));
        assert!(INTERNAL_PATHS.contains(&format!("/{}/", ASSET_DIR).as_str()));
        assert!(robots.contains("Disallow: /api/\n"));
        assert!(robots.ends_with("Sitemap: https://example.org/sitemap.xml\n"));
    }

    #[test]
    fn test_sitemap_lists_public_routes() {
        let config = SiteConfig::default().with_base_url("https://example.org");
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let xml = sitemap_xml(&config, date);

        assert_eq!(xml.matches("<url>").count(), SiteRoute::PUBLIC.len());
        assert!(xml.contains("<loc>https://example.org/donate/</loc>"));
        assert!(xml.contains("<lastmod>2026-03-01</lastmod>"));
        assert!(!xml.contains("404"));
    }
}
