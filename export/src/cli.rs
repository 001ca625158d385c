use crate::logging::Verbosity;
use clap::Parser;
use std::path::PathBuf;

/// 将构建好的单页应用外壳导出为可静态托管的站点
#[derive(Debug, Parser)]
#[command(name = "giving-export", version, about, long_about = None)]
pub struct Cli {
    /// Trunk 的输出目录（需包含 index.html）
    #[arg(long, env = "GIVING_DIST", default_value = "frontend/dist", value_name = "DIR")]
    pub dist: PathBuf,

    /// 站点根地址，用于 sitemap 与 robots.txt
    #[arg(long, env = "GIVING_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// -v 输出 debug 日志
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// 只输出错误
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        match (self.quiet, self.verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            _ => Verbosity::Verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::parse_from(["giving-export"]);
        assert_eq!(cli.verbosity(), Verbosity::Normal);
        assert_eq!(cli.dist, PathBuf::from("frontend/dist"));

        let cli = Cli::parse_from(["giving-export", "-v", "--dist", "out"]);
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
        assert_eq!(cli.dist, PathBuf::from("out"));

        let cli = Cli::parse_from(["giving-export", "-q"]);
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["giving-export", "-q", "-v"]).is_err());
    }
}
