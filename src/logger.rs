use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

const ENCODER_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";

/// Configure logging globally for the process. Safe to call more than once;
/// a second initialization is ignored.
/// - `dir`: base directory for the log file; if `None`, logs go to the console.
/// - `level`: error|warn|info|debug|trace (defaults to info).
pub fn configure_logging(dir: Option<&Path>, level: Option<&str>) {
    let lvl = match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    let encoder = Box::new(PatternEncoder::new(ENCODER_PATTERN));
    let config = match dir {
        Some(base) => {
            if std::fs::create_dir_all(base).is_err() {
                return;
            }
            let logfile = base.join("readthrough.log");
            let Ok(appender) = FileAppender::builder().encoder(encoder).build(logfile) else {
                return;
            };
            Config::builder()
                .appender(Appender::builder().build("file", Box::new(appender)))
                .build(Root::builder().appender("file").build(lvl))
        }
        None => {
            let stdout = ConsoleAppender::builder().encoder(encoder).build();
            Config::builder()
                .appender(Appender::builder().build("stdout", Box::new(stdout)))
                .build(Root::builder().appender("stdout").build(lvl))
        }
    };
    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}

/// Configure logging from environment variables if present:
/// - `READTHROUGH_LOG_DIR`
/// - `READTHROUGH_LOG_LEVEL`
pub fn configure_from_env() {
    let dir = std::env::var("READTHROUGH_LOG_DIR").ok().map(std::path::PathBuf::from);
    let level = std::env::var("READTHROUGH_LOG_LEVEL").ok();
    configure_logging(dir.as_deref(), level.as_deref());
}
