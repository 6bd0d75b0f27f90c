use console::Term;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for one run. The binary always uses the defaults; tests override fields directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Users listing endpoint.
    pub endpoint: String,
    /// Total time allowed for the fetch, connection included.
    pub timeout: Duration,
    /// Apply ANSI styles to menus and messages.
    pub use_color: bool,
    /// Clear the screen between views.
    pub clear_screen: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            use_color: Term::stdout().features().colors_supported(),
            clear_screen: true,
        }
    }
}

impl SessionConfig {
    /// Plain output, no screen clearing. What scripted sessions want.
    pub fn plain() -> Self {
        Self {
            use_color: false,
            clear_screen: false,
            ..Self::default()
        }
    }
}
