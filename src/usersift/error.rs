use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The request timed out. Please check your internet connection and try again.")]
    FetchTimeout,

    #[error("Could not connect to the server. Please check your internet connection.")]
    FetchConnection(String),

    #[error("{}", http_message(.0))]
    FetchHttp(u16),

    #[error("Received invalid JSON response from the server.")]
    InvalidResponse(String),

    #[error("No valid user records were returned ({rejected} rejected).")]
    NoValidRecords { rejected: usize },

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short category label for HTTP failures, `None` for every other kind.
    pub fn category(&self) -> Option<&'static str> {
        match self {
            Error::FetchHttp(404) => Some("resource not found"),
            Error::FetchHttp(403) => Some("forbidden"),
            Error::FetchHttp(_) => Some("server error"),
            _ => None,
        }
    }

    /// Whether the error came from the startup fetch (as opposed to validation or the session).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::FetchTimeout
                | Error::FetchConnection(_)
                | Error::FetchHttp(_)
                | Error::InvalidResponse(_)
        )
    }

    /// Whether a failed session start has already shown this error to the operator.
    pub fn reported_at_startup(&self) -> bool {
        self.is_fetch_failure() || matches!(self, Error::NoValidRecords { .. })
    }
}

fn http_message(status: &u16) -> String {
    match *status {
        404 => "The requested resource was not found.".to_string(),
        403 => "Access to the resource is forbidden.".to_string(),
        other => format!("Server returned an error (Status code: {})", other),
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(err.to_string())
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::Render(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
