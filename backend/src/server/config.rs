//! HTTP server configuration object and helpers.

use std::io;
use std::net::SocketAddr;

use survey_backend::settings::ServerSettings;

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) settings: ServerSettings,
}

impl ServerConfig {
    /// Validate loaded settings and capture the listener address.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the bind address does not
    /// parse.
    pub fn from_settings(settings: ServerSettings) -> io::Result<Self> {
        let bind_addr = settings
            .bind_addr()
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        Ok(Self {
            bind_addr,
            settings,
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
