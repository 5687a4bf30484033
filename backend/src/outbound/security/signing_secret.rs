//! Loading and fingerprinting the token signing secret.
//!
//! The secret is read from a file. Debug builds, or deployments that opt in
//! explicitly, fall back to a random ephemeral secret so local runs work
//! without provisioning; tokens signed with it do not survive a restart.

use std::path::{Path, PathBuf};

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

/// Minimum secret length accepted in release builds.
pub const SIGNING_SECRET_MIN_LEN: usize = 32;

/// Length of generated ephemeral secrets.
const EPHEMERAL_SECRET_LEN: usize = 64;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing secret file.
    Debug,
    /// Release builds require a readable secret of sufficient length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while loading the signing secret.
#[derive(thiserror::Error, Debug)]
pub enum SigningSecretError {
    /// Reading the secret file failed.
    #[error("failed to read signing secret at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file is too short for release builds.
    #[error("signing secret at {path} too short: need >= {min_len} bytes, got {length}")]
    TooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// HMAC key material for access tokens. Zeroed on drop.
pub struct SigningSecret {
    bytes: Zeroizing<Vec<u8>>,
    ephemeral: bool,
}

impl SigningSecret {
    /// Wrap existing key material.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.into()),
            ephemeral: false,
        }
    }

    /// Generate a random secret for development use.
    pub fn generate() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self {
            bytes: Zeroizing::new(bytes),
            ephemeral: true,
        }
    }

    /// Load the secret from `path`.
    ///
    /// Falls back to [`SigningSecret::generate`] when the file cannot be read
    /// and either `mode` is [`BuildMode::Debug`] or `allow_ephemeral` is set.
    ///
    /// # Examples
    /// ```
    /// use survey_backend::outbound::security::signing_secret::{BuildMode, SigningSecret};
    ///
    /// let secret = SigningSecret::load(
    ///     std::path::Path::new("/nonexistent/secret"),
    ///     BuildMode::Debug,
    ///     false,
    /// )
    /// .expect("debug builds fall back");
    /// assert!(secret.is_ephemeral());
    /// ```
    pub fn load(
        path: &Path,
        mode: BuildMode,
        allow_ephemeral: bool,
    ) -> Result<Self, SigningSecretError> {
        match std::fs::read(path) {
            Ok(mut bytes) => {
                let length = bytes.len();
                if mode == BuildMode::Release && length < SIGNING_SECRET_MIN_LEN {
                    bytes.zeroize();
                    return Err(SigningSecretError::TooShort {
                        path: path.to_path_buf(),
                        length,
                        min_len: SIGNING_SECRET_MIN_LEN,
                    });
                }
                Ok(Self::from_bytes(bytes))
            }
            Err(error) => {
                if mode.is_debug() || allow_ephemeral {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "using temporary signing secret (dev only)"
                    );
                    Ok(Self::generate())
                } else {
                    Err(SigningSecretError::Read {
                        path: path.to_path_buf(),
                        source: error,
                    })
                }
            }
        }
    }

    /// Raw key material.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Whether the secret was generated rather than loaded.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Truncated SHA-256 fingerprint, safe to log.
    ///
    /// Returns the first 8 bytes of the digest as 16 hex characters.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSecret")
            .field("fingerprint", &self.fingerprint())
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}
