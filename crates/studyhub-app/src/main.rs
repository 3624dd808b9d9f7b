//! Main application entry point.

use std::process::ExitCode;
use studyhub_app::{App, AppConfig, AppResult, CliArgs, RunOptions, Session, ShortcutRegistry, USAGE};

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("studyhub: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }
    if args.shortcuts {
        ShortcutRegistry::print_all();
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let options = RunOptions {
        session: args.session.as_deref().map(Session::load).transpose()?,
        persist: args.save,
        export_name: args.export,
    };

    let mut app = App::new(config)?;
    let summary = pollster::block_on(app.run(&options))?;
    log::info!(
        "Board has {} elements (restored: {}, events: {}, saved: {}, grid: {}, zoom: {}%)",
        app.board().scene().len(),
        summary.restored,
        summary.replay.events,
        summary.saved,
        app.config().grid_style().name(),
        app.board().zoom_percent()
    );
    if let Some(outcome) = summary.export {
        println!("{outcome:?}");
    }
    Ok(())
}
