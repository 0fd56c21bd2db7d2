use asyarrange::{
    ArrangeError, ArrangeReport, ArrangeStatus, AsyArrange, Cli, OutputFormatter, OutputMode,
    UserFriendlyError,
};
use clap::Parser;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match AsyArrange::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    let folder = match cli.folder {
        Some(ref folder) => folder,
        None => {
            app.output_formatter().error("No figure folder given");
            return 1;
        }
    };

    match app.arrange_folder(folder) {
        Ok(report) => {
            app.output_formatter().print_arrange_report(&report);
            exit_code_for(&report)
        }
        Err(e) => {
            app.handle_error(&e);
            1
        }
    }
}

fn exit_code_for(report: &ArrangeReport) -> i32 {
    match report.status {
        ArrangeStatus::FolderUnavailable => 3,
        ArrangeStatus::Completed if report.has_errors() => 2, // Completed with per-file failures
        ArrangeStatus::Completed => 0,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "asyarrange.toml".to_string());

    match AsyArrange::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  asyarrange <folder> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &ArrangeError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
