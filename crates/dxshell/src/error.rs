/// The underlying cause reported by the OS or the graphics API.
pub type PlatformError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Recoverable failures. Fatal conditions (no device, double initialization)
/// abort the process instead of producing one of these.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to create window \"{title}\"")]
    Window {
        title: String,
        #[source]
        source: PlatformError,
    },

    #[error("failed to create swap chain")]
    SwapChain(#[source] PlatformError),

    #[error("failed to create render target view")]
    RenderTarget(#[source] PlatformError),

    #[error("failed to resize swap chain buffers")]
    Resize(#[source] PlatformError),

    #[error("failed to present")]
    Present(#[source] PlatformError),
}

/// Logs the message and aborts. Used where the toolkit cannot continue
/// without the resource that failed to materialize.
pub(crate) fn fatal(message: std::fmt::Arguments) -> ! {
    if log::log_enabled!(log::Level::Error) {
        log::error!("fatal: {message}");
    } else {
        eprintln!("dxshell fatal error: {message}");
    }
    std::process::abort()
}

/// Formats an error together with its chain of sources.
pub(crate) fn report(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
