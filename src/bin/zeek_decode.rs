use clap::Parser;
use std::process::ExitCode;

use zeek_sorter::{
    application::cli::DecodeArgs,
    application::pipeline::{run_decode_pipeline, DecodeSummary},
    config::AppConfig,
    domain::ports::notification::UserNotification,
    infrastructure::factories::create_container_with_config,
    infrastructure::logging::init_tracing,
    infrastructure::notification::ConsoleUserNotification,
    Result,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = DecodeArgs::parse();

    let mut config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let _ = ConsoleUserNotification::new().show_error(&e.to_string()).await;
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_level, args.verbose);
    args.apply_overrides(&mut config);

    let mut container = create_container_with_config(config.factory_config());
    let notifier = container.user_notification();

    match run_decode_pipeline(&args.file, &config, container.directory_operations()).await {
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

async fn report_summary(
    notifier: &(dyn UserNotification + Send + Sync),
    summary: &DecodeSummary,
) -> Result<()> {
    if summary.truncated {
        notifier
            .show_warning(&format!(
                "{} ended early; kept the {} packet(s) read before the damage",
                summary.capture.display(),
                summary.stats.packets_read
            ))
            .await?;
    }

    notifier
        .show_info(&format!(
            "{} packet(s) read, {} record(s) written, {} skipped",
            summary.stats.packets_read, summary.stats.records_emitted, summary.stats.packets_skipped
        ))
        .await?;
    notifier
        .show_success(&format!("Connection log written to {}", summary.output.display()))
        .await?;
    Ok(())
}
