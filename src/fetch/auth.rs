// src/fetch/auth.rs
//
// OAuth installed-app flow against Google: stored credentials are used as-is
// while valid; missing or expired ones trigger a browser login through a
// loopback redirect.

use std::{fs, io::IsTerminal, path::Path, process::Command};

use chrono::{DateTime, Duration, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::consts::{DEFAULT_AUTH_URI, DEFAULT_TOKEN_URI, DRIVE_SCOPE, REDIRECT_PORT_FALLBACK_OFFSET};
use crate::config::options::FetchOptions;
use crate::core::net::{accept_redirect, bind_loopback, check_status, http_client};
use crate::store;

use super::FetchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl Credentials {
    /// No recorded expiry counts as not expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.token_expiry.is_some_and(|t| t <= now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Missing,
    Expired,
    Valid,
}

impl AuthState {
    pub fn classify(creds: Option<&Credentials>, now: DateTime<Utc>) -> Self {
        match creds {
            None => AuthState::Missing,
            Some(c) if c.is_expired(now) => AuthState::Expired,
            Some(_) => AuthState::Valid,
        }
    }

    pub fn needs_login(self) -> bool {
        !matches!(self, AuthState::Valid)
    }
}

/// OAuth client registration, as downloaded from the Google console.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_auth_uri() -> String { s!(DEFAULT_AUTH_URI) }
fn default_token_uri() -> String { s!(DEFAULT_TOKEN_URI) }

#[derive(Deserialize)]
struct SecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

pub fn load_client_secrets(path: &Path) -> Result<ClientSecrets, FetchError> {
    let secrets_err = |reason: String| FetchError::Secrets { path: path.to_path_buf(), reason };

    let txt = fs::read_to_string(path).map_err(|e| secrets_err(e.to_string()))?;
    let file: SecretsFile = serde_json::from_str(&txt).map_err(|e| secrets_err(e.to_string()))?;
    file.installed
        .or(file.web)
        .ok_or_else(|| secrets_err(s!("expected an \"installed\" or \"web\" client")))
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
    scope: Option<String>,
}

/// Load stored credentials, log in again if needed, and persist the result.
pub fn authenticate(opts: &FetchOptions) -> Result<Credentials, FetchError> {
    let stored = store::load_credentials(&opts.credentials_path);
    let state = AuthState::classify(stored.as_ref(), Utc::now());
    logf!("Auth: stored credentials {:?}", state);

    let creds = match stored {
        Some(c) if !state.needs_login() => c,
        _ => interactive_login(opts)?,
    };

    store::save_credentials(&opts.credentials_path, &creds)?;
    Ok(creds)
}

/// True when a person can complete a browser login for this process.
pub fn terminal_attached() -> bool {
    std::io::stdin().is_terminal()
}

fn interactive_login(opts: &FetchOptions) -> Result<Credentials, FetchError> {
    if !opts.interactive {
        loge!("Auth: login needed but session is not interactive");
        return Err(FetchError::InteractiveUnavailable);
    }
    let secrets = load_client_secrets(&opts.client_secrets_path)?;

    let (listener, port) = bind_loopback(opts.redirect_port, REDIRECT_PORT_FALLBACK_OFFSET)?;
    let redirect_uri = format!("http://127.0.0.1:{port}/");
    let url = consent_url(&secrets, &redirect_uri).map_err(|e| FetchError::Secrets {
        path: opts.client_secrets_path.clone(),
        reason: format!("bad auth_uri: {e}"),
    })?;

    println!("Your browser has been opened to visit:\n\n    {url}\n");
    open_browser(url.as_str());

    let params = accept_redirect(&listener)?;
    if let Some(err) = params.get("error") {
        return Err(FetchError::AuthDenied(err.clone()));
    }
    let code = params
        .get("code")
        .ok_or_else(|| FetchError::AuthDenied(s!("redirect carried no code")))?;

    let creds = exchange_code(&secrets, code, &redirect_uri)?;
    println!("Authentication successful.");
    logf!("Auth: obtained new token, expiry {:?}", creds.token_expiry);
    Ok(creds)
}

pub fn consent_url(secrets: &ClientSecrets, redirect_uri: &str) -> Result<Url, String> {
    Url::parse_with_params(
        &secrets.auth_uri,
        &[
            ("client_id", secrets.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", DRIVE_SCOPE),
            ("access_type", "offline"),
        ],
    )
    .map_err(|e| e.to_string())
}

fn exchange_code(secrets: &ClientSecrets, code: &str, redirect_uri: &str) -> Result<Credentials, FetchError> {
    let client = http_client()?;
    let resp = client
        .post(&secrets.token_uri)
        .form(&[
            ("code", code),
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ])
        .send()?;
    let token: TokenResponse = check_status(resp)?.json()?;

    Ok(Credentials {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        token_expiry: token.expires_in.map(|s| Utc::now() + Duration::seconds(s)),
        scope: token.scope,
    })
}

fn open_browser(url: &str) {
    let spawned = if cfg!(target_os = "windows") {
        Command::new("rundll32").args(["url.dll,FileProtocolHandler", url]).spawn()
    } else if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()
    } else {
        Command::new("xdg-open").arg(url).spawn()
    };
    if let Err(e) = spawned {
        logd!("Auth: could not launch browser ({})", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn creds(expiry: Option<DateTime<Utc>>) -> Credentials {
        Credentials {
            access_token: s!("tok"),
            refresh_token: None,
            token_expiry: expiry,
            scope: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn classify_covers_three_outcomes() {
        let past = Some(now() - Duration::minutes(1));
        let future = Some(now() + Duration::hours(1));

        assert_eq!(AuthState::classify(None, now()), AuthState::Missing);
        assert_eq!(AuthState::classify(Some(&creds(past)), now()), AuthState::Expired);
        assert_eq!(AuthState::classify(Some(&creds(future)), now()), AuthState::Valid);
        assert_eq!(AuthState::classify(Some(&creds(None)), now()), AuthState::Valid);

        assert!(AuthState::Missing.needs_login());
        assert!(AuthState::Expired.needs_login());
        assert!(!AuthState::Valid.needs_login());
    }

    #[test]
    fn installed_secrets_parse_with_default_uris() {
        let dir = tmp_dir("secrets");
        let p = dir.join("client_secrets.json");
        fs::write(&p, r#"{"installed": {"client_id": "id", "client_secret": "sh"}}"#).unwrap();
        let s = load_client_secrets(&p).unwrap();
        assert_eq!(s.client_id, "id");
        assert_eq!(s.auth_uri, DEFAULT_AUTH_URI);
        assert_eq!(s.token_uri, DEFAULT_TOKEN_URI);
    }

    #[test]
    fn secrets_without_client_block_fail() {
        let dir = tmp_dir("secrets_bad");
        let p = dir.join("client_secrets.json");
        fs::write(&p, r#"{"other": {}}"#).unwrap();
        assert!(matches!(load_client_secrets(&p), Err(FetchError::Secrets { .. })));
    }

    #[test]
    fn consent_url_carries_client_and_redirect() {
        let secrets = ClientSecrets {
            client_id: s!("abc.apps"),
            client_secret: s!("shh"),
            auth_uri: s!(DEFAULT_AUTH_URI),
            token_uri: s!(DEFAULT_TOKEN_URI),
        };
        let url = consent_url(&secrets, "http://127.0.0.1:8080/").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&(s!("client_id"), s!("abc.apps"))));
        assert!(pairs.contains(&(s!("redirect_uri"), s!("http://127.0.0.1:8080/"))));
        assert!(pairs.contains(&(s!("response_type"), s!("code"))));
        assert!(!url.as_str().contains("shh"));
    }

    #[test]
    fn missing_credentials_without_terminal_fail() {
        let dir = tmp_dir("noninteractive");
        let opts = FetchOptions {
            credentials_path: dir.join("mycreds.txt"),
            client_secrets_path: dir.join("client_secrets.json"),
            interactive: false,
            ..FetchOptions::default()
        };
        assert!(matches!(authenticate(&opts), Err(FetchError::InteractiveUnavailable)));
        assert!(!opts.credentials_path.exists());
    }

    #[test]
    fn valid_credentials_are_used_and_persisted() {
        let dir = tmp_dir("valid");
        let opts = FetchOptions {
            credentials_path: dir.join("mycreds.txt"),
            interactive: false,
            ..FetchOptions::default()
        };
        let stored = creds(Some(Utc::now() + Duration::hours(1)));
        store::save_credentials(&opts.credentials_path, &stored).unwrap();

        let got = authenticate(&opts).unwrap();
        assert_eq!(got, stored);
        assert_eq!(store::load_credentials(&opts.credentials_path), Some(stored));
    }

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("bg_auth_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(&p).unwrap();
        p
    }
}
