use clap::Parser;
use snapcheck::{cli, config, error, image_file, classifier, session};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, SnapcheckError};
use image_file::LocalImage;
use snapcheck_common::{Event, Phase};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze { image, endpoint, no_progress } => {
            println!("🔍 snapcheck - 画像分類\n");
            let config = load_config()?;

            let endpoint = config.resolve_endpoint(endpoint.as_deref())?;
            let classifier = classifier::HttpClassifier::new(endpoint)?;
            println!("送信先: {}", classifier.endpoint());

            let mut session = session::Session::new(config.messages.clone(), classifier);
            if no_progress || !std::io::stderr().is_terminal() {
                session = session.without_progress();
            }

            // 1. 画像選択
            let selection = match image {
                Some(path) => Some(LocalImage::load(&path)?),
                None => prompt_image()?,
            };
            session.dispatch(Event::FileSelected(selection)).await;
            if let Some(image) = session.controller().selected() {
                println!(
                    "✔ {} ({}, {} bytes)",
                    image.file_name,
                    image.mime_type,
                    image.bytes.len()
                );
            }

            // 2. 解析
            session.dispatch(Event::AnalyzeRequested).await;

            let controller = session.controller();
            match controller.phase() {
                Phase::Succeeded => {
                    println!("{}", controller.result_text());
                }
                Phase::Failed => {
                    println!("{}", controller.result_text());
                    if let Some(err) = controller.last_error() {
                        return Err(SnapcheckError::Analysis(err.clone()));
                    }
                }
                _ => return Err(SnapcheckError::NoSelection),
            }
        }

        Commands::Config { show, set_endpoint, reset } => {
            let show = show || (!reset && set_endpoint.is_none());

            // 初期化時は壊れた設定ファイルでも読み込まない
            let mut config = if reset {
                let config = Config::reset()?;
                println!("✔ 設定を初期化しました");
                config
            } else {
                load_config()?
            };

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(&endpoint)?;
                println!("✔ 送信先を保存: {}", config.endpoint);
            }

            if show {
                println!("{}", serde_json::to_string_pretty(&config)?);
                println!("\n設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn load_config() -> Result<Config> {
    let config = Config::load()?;
    log::debug!("config loaded: endpoint={}", config.endpoint);
    Ok(config)
}

/// `log` のレコードも tracing-subscriber 経由で stderr に出す
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 画像パスを対話入力で受け取る（空入力・非端末は未選択扱い）
fn prompt_image() -> Result<Option<LocalImage>> {
    if !std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let input: String = dialoguer::Input::new()
        .with_prompt("画像ファイルのパス")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| SnapcheckError::Prompt(e.to_string()))?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    LocalImage::load(&PathBuf::from(input)).map(Some)
}
