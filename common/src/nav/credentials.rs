use std::sync::Arc;

use reqwest::{header, RequestBuilder, Url};

use crate::{
    error::{NavError, NavResult},
    models::Endpoint,
};

/// Credential type of the transport, NAV only accepts credentials on the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSettings {
    /// Integrated authentication: the process identity is forwarded as a Negotiate token.
    /// A configured token replaces the one the platform would issue.
    Windows { negotiate_token: Option<String> },
    Basic { username: String, password: String },
    None,
}

pub trait ICredentialProvider: Send + Sync {
    /// Called once per call handle, right before its single request is sent.
    fn authorize(&self, request: RequestBuilder, endpoint: &Endpoint) -> NavResult<RequestBuilder>;
    fn kind(&self) -> &'static str;
}

/// Issues the SPNEGO token sent in `Authorization: Negotiate`.
pub trait INegotiateTokenSource: Send + Sync {
    fn token(&self, service_principal: &str) -> NavResult<String>;
}

/// Operator supplied token, sent as is.
pub struct StaticNegotiateToken(pub String);

impl INegotiateTokenSource for StaticNegotiateToken {
    fn token(&self, _service_principal: &str) -> NavResult<String> {
        Ok(self.0.clone())
    }
}

/// Tokens for the identity the process runs as: SSPI on Windows, GSSAPI elsewhere.
pub struct SystemTokenSource;

impl INegotiateTokenSource for SystemTokenSource {
    #[cfg(feature = "kerberos")]
    fn token(&self, service_principal: &str) -> NavResult<String> {
        use base64::{engine::general_purpose, Engine};
        use cross_krb5::{ClientCtx, InitiateFlags};

        // NAV does not send a mutual authentication reply, the pending context is dropped.
        let (_pending, token) = ClientCtx::new(InitiateFlags::empty(), None, service_principal, None)
            .map_err(|err| NavError::RemoteInvocation(format!("Could not get a Negotiate token for {}: {}", service_principal, err)))?;
        Ok(general_purpose::STANDARD.encode(&*token))
    }

    #[cfg(not(feature = "kerberos"))]
    fn token(&self, service_principal: &str) -> NavResult<String> {
        Err(NavError::Configuration(format!(
            "No integrated authentication for {}: build with the kerberos feature or set NAV_NEGOTIATE_TOKEN",
            service_principal
        )))
    }
}

pub struct WindowsCredentials {
    pub tokens: Arc<dyn INegotiateTokenSource>,
}

/// `HTTP/<host>` of the endpoint, the principal NAV's web service runs under.
pub fn service_principal(url: &str) -> NavResult<String> {
    let url = Url::parse(url).map_err(|err| NavError::Configuration(format!("Invalid NAV url '{}': {}", url, err)))?;
    match url.host_str() {
        Some(host) => Ok(format!("HTTP/{}", host)),
        None => Err(NavError::Configuration(format!("NAV url '{}' has no host", url))),
    }
}

impl ICredentialProvider for WindowsCredentials {
    fn authorize(&self, request: RequestBuilder, endpoint: &Endpoint) -> NavResult<RequestBuilder> {
        let token = self.tokens.token(&service_principal(&endpoint.url)?)?;
        Ok(request.header(header::AUTHORIZATION, format!("Negotiate {}", token)))
    }

    fn kind(&self) -> &'static str {
        "windows"
    }
}

pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl ICredentialProvider for BasicCredentials {
    fn authorize(&self, request: RequestBuilder, _endpoint: &Endpoint) -> NavResult<RequestBuilder> {
        Ok(request.basic_auth(&self.username, Some(&self.password)))
    }

    fn kind(&self) -> &'static str {
        "basic"
    }
}

pub struct AnonymousCredentials;

impl ICredentialProvider for AnonymousCredentials {
    fn authorize(&self, request: RequestBuilder, _endpoint: &Endpoint) -> NavResult<RequestBuilder> {
        Ok(request)
    }

    fn kind(&self) -> &'static str {
        "none"
    }
}

impl CredentialSettings {
    pub fn build(&self) -> Arc<dyn ICredentialProvider> {
        match self {
            CredentialSettings::Windows { negotiate_token } => {
                let tokens: Arc<dyn INegotiateTokenSource> = match negotiate_token.clone().filter(|token| !token.is_empty()) {
                    Some(token) => Arc::new(StaticNegotiateToken(token)),
                    None => Arc::new(SystemTokenSource),
                };
                Arc::new(WindowsCredentials { tokens })
            }
            CredentialSettings::Basic { username, password } => Arc::new(BasicCredentials {
                username: username.clone(),
                password: password.clone(),
            }),
            CredentialSettings::None => Arc::new(AnonymousCredentials),
        }
    }

    pub fn parse(mode: &str, username: Option<String>, password: Option<String>, negotiate_token: Option<String>) -> Result<Self, &'static str> {
        match mode.to_ascii_lowercase().as_str() {
            "windows" | "negotiate" => Ok(CredentialSettings::Windows { negotiate_token }),
            "basic" | "navuserpassword" => Ok(CredentialSettings::Basic {
                username: username.unwrap_or_default(),
                password: password.unwrap_or_default(),
            }),
            "none" | "anonymous" => Ok(CredentialSettings::None),
            _ => Err("NAV_AUTH must be one of windows, basic or none"),
        }
    }
}
