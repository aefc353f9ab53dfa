use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use reqwest::Client;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use url::Url;

use crate::{
    Error, Result, config,
    management::TokenManager,
    server::start_callback_server,
    success,
    types::{PkceToken, Token, TokenResponse},
    warning,
};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Authorization URL the user is sent to.
pub fn authorize_url(code_challenge: &str) -> Result<String> {
    let url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", config::spotify_client_id()?.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config::spotify_redirect_uri().as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", config::spotify_scope().as_str()),
        ],
    )
    .map_err(|e| Error::InvalidInput(format!("bad authorization url: {}", e)))?;
    Ok(url.to_string())
}

/// Runs the OAuth 2.0 PKCE flow and stores the resulting token.
///
/// Starts the local callback server, opens the authorization URL in the
/// browser and waits up to a minute for the callback to deliver a token.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<()> {
    let code_verifier = generate_code_verifier();
    let code_challenge = generate_code_challenge(&code_verifier);
    let auth_url = authorize_url(&code_challenge)?;

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_callback_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state)
        .await
        .ok_or_else(|| Error::Auth("authentication failed or timed out".to_string()))?;

    TokenManager::new(token).persist().await?;
    success!("Authentication successful!");
    Ok(())
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    let start = std::time::Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        {
            let lock = shared_state.lock().await;
            if let Some(token) = lock.as_ref().and_then(|p| p.token.as_ref()) {
                return Some(token.clone());
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

pub async fn refresh_token(refresh_token: &str) -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let response = request_token(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", &client_id),
    ])
    .await?;

    // Spotify may omit the refresh token when it does not rotate it
    let refresh = response
        .refresh_token
        .clone()
        .unwrap_or_else(|| refresh_token.to_string());
    Ok(into_token(response, refresh))
}

pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();

    let response = request_token(&[
        ("grant_type", "authorization_code"),
        ("client_id", &client_id),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", &redirect_uri),
    ])
    .await?;

    let refresh = response.refresh_token.clone().unwrap_or_default();
    Ok(into_token(response, refresh))
}

async fn request_token(form: &[(&str, &str)]) -> Result<TokenResponse> {
    let res = Client::new()
        .post(config::spotify_apitoken_url())
        .form(form)
        .send()
        .await?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(Error::Auth(format!("{}: {}", status, body)));
    }

    Ok(res.json::<TokenResponse>().await?)
}

fn into_token(response: TokenResponse, refresh_token: String) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token,
        scope: response.scope,
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
