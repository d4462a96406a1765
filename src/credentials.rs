use std::sync::{PoisonError, RwLock};

pub const DEFAULT_PORT: u16 = 6420;

/// Connection parameters for the node's control interface.
#[derive(Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub identity: String,
    pub secret: String,
    pub use_tls: bool,
}

impl Credentials {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        identity: impl Into<String>,
        secret: impl Into<String>,
        use_tls: bool,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            identity: identity.into(),
            secret: secret.into(),
            use_tls,
        }
    }

    /// Port and TLS flag have usable defaults and are not checked. Port 0 is
    /// accepted here and fails later as a transport error.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.identity.is_empty() && !self.secret.is_empty()
    }

    /// The bare authority; the RPC endpoint has no path. IPv6 literals get
    /// their brackets added.
    pub fn url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("{}://[{}]:{}", scheme, self.host, self.port)
        } else {
            format!("{}://{}:{}", scheme, self.host, self.port)
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            identity: String::new(),
            secret: String::new(),
            use_tls: false,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .field("use_tls", &self.use_tls)
            .finish()
    }
}

/// Shared, reconfigurable credentials. Readers always get a whole snapshot.
#[derive(Debug, Default)]
pub struct CredentialStore {
    current: RwLock<Credentials>,
}

impl CredentialStore {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            current: RwLock::new(credentials),
        }
    }

    pub fn configure(&self, credentials: Credentials) {
        // Credentials are plain data, a poisoned lock still holds a whole value.
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = credentials;
    }

    pub fn snapshot(&self) -> Credentials {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_configured(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unconfigured() {
        let creds = Credentials::default();
        assert_eq!(creds.port, DEFAULT_PORT);
        assert!(!creds.use_tls);
        assert!(!creds.is_configured());
    }

    #[test]
    fn readiness_needs_host_identity_and_secret() {
        assert!(Credentials::new("127.0.0.1", 6420, "user", "pass", false).is_configured());
        assert!(!Credentials::new("", 6420, "user", "pass", false).is_configured());
        assert!(!Credentials::new("127.0.0.1", 6420, "", "pass", false).is_configured());
        assert!(!Credentials::new("127.0.0.1", 6420, "user", "", false).is_configured());
        assert!(Credentials::new("node", 0, "user", "pass", true).is_configured());
    }

    #[test]
    fn url_follows_tls_flag() {
        let plain = Credentials::new("127.0.0.1", 6420, "u", "p", false);
        assert_eq!(plain.url(), "http://127.0.0.1:6420");
        let tls = Credentials::new("node.example", 443, "u", "p", true);
        assert_eq!(tls.url(), "https://node.example:443");
    }

    #[test]
    fn url_brackets_ipv6_hosts() {
        let bare = Credentials::new("::1", 6420, "u", "p", false);
        assert_eq!(bare.url(), "http://[::1]:6420");
        let bracketed = Credentials::new("[fe80::1]", 8332, "u", "p", true);
        assert_eq!(bracketed.url(), "https://[fe80::1]:8332");
    }

    #[test]
    fn debug_hides_secret() {
        let creds = Credentials::new("h", 1, "user", "hunter2", false);
        let text = format!("{:?}", creds);
        assert!(!text.contains("hunter2"));
        assert!(text.contains("user"));
    }

    #[test]
    fn configure_replaces_previous_state() {
        let store = CredentialStore::default();
        assert!(!store.is_configured());
        store.configure(Credentials::new("a", 1, "u", "p", false));
        store.configure(Credentials::new("b", 2, "v", "q", true));
        let snap = store.snapshot();
        assert_eq!(snap, Credentials::new("b", 2, "v", "q", true));
        assert!(store.is_configured());
    }

    #[test]
    fn deserialize_fills_defaults() {
        let creds: Credentials =
            serde_json::from_str(r#"{"host": "10.0.0.2", "identity": "rpc", "secret": "s"}"#).unwrap();
        assert_eq!(creds.port, DEFAULT_PORT);
        assert!(!creds.use_tls);
        assert!(creds.is_configured());
    }
}
