//! Logger setup for applications that do not install their own.

/// Installs `env_logger`, honoring `RUST_LOG` and falling back to `warn`.
///
/// Calling this more than once, or after another logger was installed, is
/// harmless.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .try_init();
}
