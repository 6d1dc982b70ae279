use std::process::ExitCode;

// Import our library components
use zeek_sorter::{
    application::cli::RunnerArgs,
    application::pipeline::{run_engine_pipeline, EngineRunSummary},
    config::AppConfig,
    domain::ports::notification::UserNotification,
    infrastructure::factories::create_container_with_config,
    infrastructure::logging::init_tracing,
    infrastructure::notification::ConsoleUserNotification,
    Result,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse command line arguments
    let args = RunnerArgs::parse_normalized();

    let mut config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let _ = ConsoleUserNotification::new().show_error(&e.to_string()).await;
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_level, args.verbose);

    if args.init_config {
        let notifier = ConsoleUserNotification::new()
            .with_colors(config.enable_colors)
            .with_emoji(config.enable_emoji);
        return match handle_init_config(&notifier).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                let _ = notifier.show_error(&e.to_string()).await;
                ExitCode::FAILURE
            }
        };
    }

    args.apply_overrides(&mut config);

    // Create dependency container from the loaded configuration
    let mut container = create_container_with_config(config.factory_config());
    let notifier = container.user_notification();

    let Some(capture) = args.pcap.as_deref() else {
        let _ = notifier.show_error("no capture file given (use -pcap FILE)").await;
        return ExitCode::FAILURE;
    };

    match run_engine_pipeline(capture, &config, &mut container).await {
        Ok(summary) => {
            let _ = report_summary(notifier.as_ref(), &summary).await;
            ExitCode::SUCCESS
        }
        Err(e) => {
            let _ = notifier.show_error(&e.to_string()).await;
            ExitCode::FAILURE
        }
    }
}

// Write the default configuration unless one is already there
async fn handle_init_config(notifier: &(dyn UserNotification + Send + Sync)) -> Result<()> {
    let path = AppConfig::default_path().ok_or("no user configuration directory on this platform")?;
    if path.exists() {
        return Err(format!("{} already exists", path.display()).into());
    }

    AppConfig::default().save(&path)?;
    notifier
        .show_success(&format!("Default configuration written to {}", path.display()))
        .await?;
    Ok(())
}

async fn report_summary(
    notifier: &(dyn UserNotification + Send + Sync),
    summary: &EngineRunSummary,
) -> Result<()> {
    let report = &summary.report;

    let mut categories: Vec<&str> = Vec::new();
    for moved in &report.moved {
        if !categories.contains(&moved.category.as_str()) {
            categories.push(&moved.category);
        }
    }
    for category in categories {
        notifier
            .show_info(&format!("{}: {} log(s)", category, report.moved_into(category)))
            .await?;
    }

    if !report.uncategorized.is_empty() {
        notifier
            .show_info(&format!(
                "{} uncategorized log(s) left in {}: {}",
                report.uncategorized.len(),
                summary.log_root.display(),
                report.uncategorized.join(", ")
            ))
            .await?;
    }

    notifier
        .show_success(&format!("Logs written to {}", summary.log_root.display()))
        .await?;
    Ok(())
}
