//! 静态导出
//!
//! 静态托管没有请求期运行时：每个公开路由都需要一份 `index.html`（尾斜杠目录），
//! 另加 `404.html`。页面内容由前端在浏览器中渲染，这里只复制外壳并改写标题，
//! 同时生成 `manifest.webmanifest`、`robots.txt` 与 `sitemap.xml`。

pub mod cli;
pub mod logging;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use ramadan_giving_shared::site::{
    ASSET_DIR, SiteConfig, SiteRoute, WebManifest, robots_txt, sitemap_xml,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const SHELL_FILE: &str = "index.html";
pub const MANIFEST_FILE: &str = "manifest.webmanifest";
pub const ROBOTS_FILE: &str = "robots.txt";
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// 导出的全部路由（公开路由 + 404）
pub fn export_routes() -> impl Iterator<Item = SiteRoute> {
    SiteRoute::PUBLIC
        .into_iter()
        .chain(std::iter::once(SiteRoute::NotFound))
}

/// 外壳是否从 `/pkg/` 加载构建产物（robots.txt 按此屏蔽）
pub fn shell_uses_asset_dir(shell: &str) -> bool {
    shell.contains(&format!("/{}/", ASSET_DIR))
}

/// 把外壳中的 `<title>` 替换为路由标题；没有 `<title>` 时原样返回
pub fn with_title(shell: &str, title: &str) -> String {
    let Some(start) = shell.find("<title>") else {
        return shell.to_string();
    };
    let Some(len) = shell[start..].find("</title>") else {
        return shell.to_string();
    };
    let end = start + len + "</title>".len();
    format!("{}<title>{}</title>{}", &shell[..start], title, &shell[end..])
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
}

fn write_file(report: &mut ExportReport, path: PathBuf, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote");
    report.written.push(path);
    Ok(())
}

/// 在 `dist` 中就地导出
pub fn export_site(dist: &Path, config: &SiteConfig, today: NaiveDate) -> Result<ExportReport> {
    let shell_path = dist.join(SHELL_FILE);
    if !shell_path.is_file() {
        bail!(
            "{} not found; build the frontend first (trunk build --release)",
            shell_path.display()
        );
    }
    let shell = fs::read_to_string(&shell_path)
        .with_context(|| format!("failed to read {}", shell_path.display()))?;

    if !shell_uses_asset_dir(&shell) {
        warn!(
            "{} does not load assets from /{}/; robots.txt will not cover them",
            shell_path.display(),
            ASSET_DIR
        );
    }

    let mut report = ExportReport::default();

    for route in export_routes() {
        let page = with_title(&shell, route.title());
        write_file(&mut report, dist.join(route.export_file()), &page)?;
    }

    let manifest = serde_json::to_string_pretty(&WebManifest::for_site(config))
        .context("failed to serialize web manifest")?;
    write_file(&mut report, dist.join(MANIFEST_FILE), &manifest)?;
    write_file(&mut report, dist.join(ROBOTS_FILE), &robots_txt(config))?;
    write_file(&mut report, dist.join(SITEMAP_FILE), &sitemap_xml(config, today))?;

    info!(
        files = report.written.len(),
        base_url = %config.base_url,
        "static export complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SHELL: &str = "<!DOCTYPE html><html><head><title>Ramadan Giving</title></head><body></body></html>";

    fn dist_with_shell() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SHELL_FILE), SHELL).unwrap();
        dir
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_with_title() {
        let page = with_title(SHELL, "Donate | Ramadan Giving");
        assert!(page.contains("<title>Donate | Ramadan Giving</title>"));
        assert!(!page.contains("<title>Ramadan Giving</title>"));
        assert!(page.ends_with("</html>"));

        assert_eq!(with_title("<html></html>", "x"), "<html></html>");
        assert_eq!(with_title("<title>open", "x"), "<title>open");
    }

    #[test]
    fn test_trunk_shell_emits_assets_under_pkg() {
        let source = include_str!("../../frontend/index.html");
        assert!(source.contains(&format!("data-target-path=\"{}\"", ASSET_DIR)));

        let built = r#"<script type="module">import init from '/pkg/ramadan-giving-frontend-3f2a.js';</script>"#;
        assert!(shell_uses_asset_dir(built));
        assert!(!shell_uses_asset_dir(SHELL));
    }

    #[test]
    fn test_export_writes_every_route() {
        let dist = dist_with_shell();
        let report = export_site(dist.path(), &SiteConfig::default(), today()).unwrap();

        for route in export_routes() {
            let page = fs::read_to_string(dist.path().join(route.export_file())).unwrap();
            assert!(page.contains(&format!("<title>{}</title>", route.title())));
        }
        assert!(dist.path().join("donate/index.html").is_file());
        assert!(dist.path().join("404.html").is_file());
        // 5 个页面 + manifest + robots + sitemap
        assert_eq!(report.written.len(), 8);
    }

    #[test]
    fn test_export_metadata_files() {
        let dist = dist_with_shell();
        let config = SiteConfig::default().with_base_url("https://example.org/");
        export_site(dist.path(), &config, today()).unwrap();

        let manifest: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dist.path().join(MANIFEST_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest["name"], "Ramadan Giving");

        let robots = fs::read_to_string(dist.path().join(ROBOTS_FILE)).unwrap();
        assert!(robots.contains("Sitemap: https://example.org/sitemap.xml"));

        let sitemap = fs::read_to_string(dist.path().join(SITEMAP_FILE)).unwrap();
        assert!(sitemap.contains("<loc>https://example.org/donate/</loc>"));
        assert!(sitemap.contains("<lastmod>2025-03-01</lastmod>"));
        assert!(!sitemap.contains("404"));
    }

    #[test]
    fn test_missing_shell_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = export_site(dir.path(), &SiteConfig::default(), today()).unwrap_err();
        assert!(err.to_string().contains("index.html"));
    }
}
