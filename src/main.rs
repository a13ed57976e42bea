// ==========================================
// 联系人导入系统 - CLI 主入口
// ==========================================
// 用法: contact-import <csv_path> [--overwrite]
// 输出: ImportResult 的 JSON（stdout）；日志走 stderr
// 退出码: success=true 为 0，否则为 1
// ==========================================

use anyhow::{bail, Context};
use contact_import::app::AppState;
use contact_import::config::AppConfig;
use contact_import::{logging, APP_NAME, VERSION};

const OVERWRITE_FLAG: &str = "--overwrite";

/// 命令行参数
struct CliArgs {
    csv_path: String,
    overwrite: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<CliArgs> {
    let mut csv_path = None;
    let mut overwrite = false;

    for arg in args {
        if arg == OVERWRITE_FLAG {
            overwrite = true;
        } else if arg.starts_with("--") {
            bail!("unknown option: {}", arg);
        } else if csv_path.is_none() {
            csv_path = Some(arg);
        } else {
            bail!("unexpected argument: {}", arg);
        }
    }

    match csv_path {
        Some(csv_path) => Ok(CliArgs { csv_path, overwrite }),
        None => bail!("usage: {} <csv_path> [{}]", APP_NAME, OVERWRITE_FLAG),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args = parse_args(std::env::args().skip(1))?;

    tracing::info!(version = VERSION, "{} 启动", APP_NAME);

    let config = AppConfig::from_env();
    let state = AppState::new(config).map_err(anyhow::Error::msg)?;

    let result = state
        .import_api
        .import_contacts(&args.csv_path, args.overwrite)
        .await
        .context("import failed")?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(args(&["contacts.csv", "--overwrite"])).unwrap();
        assert_eq!(parsed.csv_path, "contacts.csv");
        assert!(parsed.overwrite);

        let parsed = parse_args(args(&["contacts.csv"])).unwrap();
        assert!(!parsed.overwrite);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["a.csv", "b.csv"])).is_err());
        assert!(parse_args(args(&["a.csv", "--force"])).is_err());
    }
}
