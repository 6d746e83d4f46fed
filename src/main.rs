use anyhow::{Context, Result};
use clap::Parser;
use front_helpers::config::{CheckKind, Command, StoreAction};
use front_helpers::core::{date, file, number, query, text};
use front_helpers::utils::{logger, validation::Validate};
use front_helpers::{validation, CliConfig, FileStore, HelperConfig, JsonStorage, LocalDownloads};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let config = match HelperConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(&config.logging.format, cli.verbose);
    tracing::debug!("CLI args: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(2);
    }
}

async fn run(command: Command, config: &HelperConfig) -> Result<()> {
    match command {
        Command::Date { input, pattern } => {
            let pattern = pattern.as_deref().unwrap_or(config.date_pattern());
            println!("{}", date::format_date_str(&input, pattern)?);
        }
        Command::Ago { input } => {
            println!("{}", date::time_ago(&date::parse_date(&input)?));
        }
        Command::Currency { amount, currency } => {
            let currency = currency.as_deref().unwrap_or(config.currency());
            println!("{}", number::format_currency(amount, currency));
        }
        Command::Compact { value } => println!("{}", number::format_large_number(value)),
        Command::Size { bytes } => println!("{}", file::format_size(bytes)),
        Command::Truncate { text: input, length } => {
            let length = length.unwrap_or(config.truncate_length());
            println!("{}", text::truncate(&input, length));
        }
        Command::Phone { phone } => println!("{}", text::format_phone(&phone)),
        Command::StripHtml { html } => println!("{}", text::strip_html(&html)),
        Command::Id { prefix } => println!("{}", text::generate_id(&prefix)),
        Command::Check { kind, value } => {
            let valid = match kind {
                CheckKind::Email => validation::is_email(&value),
                CheckKind::Phone => validation::is_phone(&value),
                CheckKind::Number => validation::is_number(&value),
            };
            println!("{}", valid);
            if !valid {
                std::process::exit(1);
            }
        }
        Command::Url { base, params } => {
            let origin = url::Url::parse(config.origin())?;
            let pairs = params
                .iter()
                .map(|p| {
                    p.split_once('=')
                        .with_context(|| format!("parameter '{}' is not key=value", p))
                })
                .collect::<Result<Vec<_>>>()?;
            let pairs: Vec<(&str, Option<&str>)> =
                pairs.into_iter().map(|(k, v)| (k, Some(v))).collect();
            println!("{}", query::build_url(&base, &origin, &pairs)?);
        }
        Command::Store { action } => run_store(action, config)?,
        Command::Download { input, name, mime } => {
            let data = tokio::fs::read(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let filename = match name {
                Some(name) => name,
                None => input
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .context("input has no file name")?,
            };

            let target = LocalDownloads::new(&config.downloads.dir);
            file::download(&target, data, &filename, mime.as_deref()).await?;
            println!("📁 {}", target.path_for(&filename).display());
        }
    }

    Ok(())
}

fn run_store(action: StoreAction, config: &HelperConfig) -> Result<()> {
    let store = FileStore::open(&config.storage.dir, config.origin())?;
    tracing::debug!("Using store {}", store.path().display());
    let storage = JsonStorage::new(store);

    match action {
        StoreAction::Get { key, default } => {
            let default: serde_json::Value =
                serde_json::from_str(&default).unwrap_or(serde_json::Value::String(default));
            let value = storage.get(&key, default);
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        StoreAction::Set { key, value } => {
            let value: serde_json::Value =
                serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
            if !storage.set(&key, &value) {
                anyhow::bail!("failed to store '{}'", key);
            }
            println!("✅ {}", key);
        }
        StoreAction::Remove { key } => storage.remove(&key),
        StoreAction::Keys => {
            for key in storage.store().keys()? {
                println!("{}", key);
            }
        }
        StoreAction::Clear => {
            storage.clear();
            // clear 失敗只會記錄；這裡再確認一次
            if !storage.store().keys()?.is_empty() {
                anyhow::bail!("store was not cleared");
            }
        }
    }

    Ok(())
}
