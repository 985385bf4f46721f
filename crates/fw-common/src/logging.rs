use std::panic;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const LOG_DIR_ENV: &str = "FW_LOG_DIR";
const BACKTRACE_ENV: &str = "FW_LOG_INCLUDE_BACKTRACE";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn flag_enabled(raw: Option<&str>) -> bool {
    raw.map(str::trim)
        .is_some_and(|value| value == "1" || value.eq_ignore_ascii_case("true"))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic payload not string".into())
}

/// Route panics through `tracing`. Installed once per process; when
/// `FW_LOG_INCLUDE_BACKTRACE` is set the default hook runs as well.
pub fn install_tracing_panic_hook(app_name: &'static str) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let default_hook = panic::take_hook();
        let include_backtrace = flag_enabled(std::env::var(BACKTRACE_ENV).ok().as_deref());

        panic::set_hook(Box::new(move |info| {
            let thread = std::thread::current();
            let location = info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));

            tracing::error!(
                application = app_name,
                thread_name = thread.name().unwrap_or("unknown"),
                location = location.as_deref().unwrap_or("unknown"),
                panic_message = %panic_message(info.payload()),
                "panic captured"
            );

            if include_backtrace {
                default_hook(info);
            }
        }));
    });
}

fn rotating_file_writer(app_name: &'static str) -> Option<BoxMakeWriter> {
    let dir = PathBuf::from(std::env::var_os(LOG_DIR_ENV)?);
    if let Err(err) = std::fs::create_dir_all(&dir) {
        tracing::warn!(error = %err, "failed to create FW_LOG_DIR; falling back to stdout");
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(BoxMakeWriter::new(non_blocking))
}

/// Fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// With `FW_LOG_DIR` set, output goes to `<FW_LOG_DIR>/<app>.log` rotated daily.
pub fn init_tracing_subscriber(app_name: &'static str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    match rotating_file_writer(app_name) {
        Some(writer) => {
            let _ = builder.with_writer(writer).with_ansi(false).try_init();
        }
        None => {
            let _ = builder.try_init();
        }
    }
}
