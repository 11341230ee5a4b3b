use geometry::{Extent, ScreenPx};

bitflags::bitflags! {
    /// Presentation options requested for windows created after the mode is
    /// set. An empty set means a single-buffered RGBA window.
    pub struct DisplayMode: u32 {
        const DOUBLE = 0x1;
        const DEPTH = 0x2;
        const STENCIL = 0x4;
        const STEREO = 0x8;
        const MULTISAMPLE = 0x10;
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::empty()
    }
}

/// Options consulted when the toolkit is initialized and whenever a window is
/// created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Outer size of the next window to be created.
    pub window_size: Extent<u32, ScreenPx>,
    pub display_mode: DisplayMode,
    /// Enables the Direct3D debug layer. Only read at initialization.
    pub debug_mode: bool,
    /// The process argument vector. Carried for the application's benefit,
    /// the toolkit does not interpret it.
    pub args: Vec<String>,
}

impl Config {
    pub const DEFAULT_WINDOW_SIZE: Extent<u32, ScreenPx> = Extent {
        width: 640,
        height: 480,
        _unit: std::marker::PhantomData,
    };

    /// Setting this environment variable to anything but `0` or an empty
    /// string enables the debug layer.
    pub const DEBUG_ENV: &'static str = "DXSHELL_DEBUG";

    /// The defaults, with `debug_mode` taken from [`Config::DEBUG_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        let debug_mode = std::env::var(Self::DEBUG_ENV)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);

        Self {
            debug_mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args = args.into_iter().collect();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: Self::DEFAULT_WINDOW_SIZE,
            display_mode: DisplayMode::default(),
            debug_mode: false,
            args: Vec::new(),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    !(value.is_empty() || value == "0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.window_size, Extent::new(640, 480));
        assert!(config.display_mode.is_empty());
        assert!(!config.debug_mode);
        assert!(config.args.is_empty());
    }

    #[test]
    fn unknown_mode_bits_are_dropped() {
        let mode = DisplayMode::from_bits_truncate(0x1 | 0x10 | 0x8000);
        assert_eq!(mode, DisplayMode::DOUBLE | DisplayMode::MULTISAMPLE);
    }

    #[test]
    fn args_are_passed_through() {
        let config = Config::default().with_args(["app".to_string(), "-x".to_string()]);
        assert_eq!(config.args, vec!["app", "-x"]);
    }

    #[test]
    fn debug_env_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
