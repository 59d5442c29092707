use std::path::PathBuf;
use std::time::Duration;

use boxportal_core::domain::common::{
    CacheConfig, DEFAULT_API_BASE_URL, DEFAULT_AUTHORIZE_URL, DEFAULT_TOKEN_URL,
    OAuthClientConfig, PortalConfig, ServiceAccountConfig, UpstreamConfig,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "boxportal-api", version, about = "Box document portal backend")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub session: SessionArgs,

    #[command(flatten)]
    pub oauth: OAuthArgs,

    #[command(flatten)]
    pub service_account: ServiceAccountArgs,

    #[command(flatten)]
    pub upstream: UpstreamArgs,

    #[command(flatten)]
    pub cache: CacheArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", name = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "PORT", name = "PORT", default_value_t = 3001)]
    pub port: u16,

    #[arg(
        long = "server-root-path",
        env = "SERVER_ROOT_PATH",
        name = "SERVER_ROOT_PATH",
        default_value = "/api"
    )]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        name = "ALLOWED_ORIGINS",
        num_args = 0..,
        value_delimiter = ',',
        default_value = "https://localhost:3000,http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// PEM certificate; HTTPS is served when both this and the key are set.
    #[arg(long = "tls-cert", env = "TLS_CERT", name = "TLS_CERT")]
    pub tls_cert: Option<PathBuf>,

    #[arg(long = "tls-key", env = "TLS_KEY", name = "TLS_KEY")]
    pub tls_key: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SessionArgs {
    /// Answer 401 on /files routes when the caller has no user token.
    #[arg(
        long = "require-login",
        env = "REQUIRE_LOGIN",
        name = "REQUIRE_LOGIN",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub require_login: bool,

    #[arg(
        long = "session-ttl-secs",
        env = "SESSION_TTL_SECS",
        name = "SESSION_TTL_SECS",
        default_value_t = 3600
    )]
    pub ttl_secs: u64,

    #[arg(
        long = "session-cookie-secure",
        env = "SESSION_COOKIE_SECURE",
        name = "SESSION_COOKIE_SECURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub cookie_secure: bool,

    /// Where the browser lands after a successful login.
    #[arg(
        long = "frontend-url",
        env = "FRONTEND_URL",
        name = "FRONTEND_URL",
        default_value = "https://localhost:3000/"
    )]
    pub frontend_url: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct OAuthArgs {
    #[arg(long = "box-client-id", env = "BOX_CLIENT_ID", name = "BOX_CLIENT_ID", default_value = "")]
    pub client_id: String,

    #[arg(
        long = "box-client-secret",
        env = "BOX_CLIENT_SECRET",
        name = "BOX_CLIENT_SECRET",
        default_value = "",
        hide_env_values = true
    )]
    pub client_secret: String,

    #[arg(
        long = "box-redirect-uri",
        env = "BOX_REDIRECT_URI",
        name = "BOX_REDIRECT_URI",
        default_value = "https://localhost:3001/api/auth/callback"
    )]
    pub redirect_uri: String,

    #[arg(long = "box-scope", env = "BOX_SCOPE", name = "BOX_SCOPE", default_value = "root_readwrite")]
    pub scope: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServiceAccountArgs {
    #[arg(
        long = "box-enterprise-id",
        env = "BOX_ENTERPRISE_ID",
        name = "BOX_ENTERPRISE_ID",
        default_value = ""
    )]
    pub enterprise_id: String,

    #[arg(
        long = "box-service-client-id",
        env = "BOX_SERVICE_CLIENT_ID",
        name = "BOX_SERVICE_CLIENT_ID",
        default_value = ""
    )]
    pub client_id: String,

    #[arg(
        long = "box-service-client-secret",
        env = "BOX_SERVICE_CLIENT_SECRET",
        name = "BOX_SERVICE_CLIENT_SECRET",
        default_value = "",
        hide_env_values = true
    )]
    pub client_secret: String,

    /// Encrypted PKCS#8 PEM; literal `\n` sequences are accepted.
    #[arg(
        long = "box-jwt-private-key",
        env = "BOX_JWT_PRIVATE_KEY",
        name = "BOX_JWT_PRIVATE_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub private_key: String,

    #[arg(
        long = "box-jwt-passphrase",
        env = "BOX_JWT_PASSPHRASE",
        name = "BOX_JWT_PASSPHRASE",
        default_value = "",
        hide_env_values = true
    )]
    pub passphrase: String,

    #[arg(long = "box-public-key-id", env = "BOX_PUBLIC_KEY_ID", name = "BOX_PUBLIC_KEY_ID")]
    pub public_key_id: Option<String>,

    /// Act as this user instead of the enterprise service account.
    #[arg(long = "box-user-id", env = "BOX_USER_ID", name = "BOX_USER_ID")]
    pub impersonate_user_id: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct UpstreamArgs {
    #[arg(
        long = "box-api-base-url",
        env = "BOX_API_BASE_URL",
        name = "BOX_API_BASE_URL",
        default_value = DEFAULT_API_BASE_URL
    )]
    pub api_base_url: String,

    #[arg(
        long = "box-token-url",
        env = "BOX_TOKEN_URL",
        name = "BOX_TOKEN_URL",
        default_value = DEFAULT_TOKEN_URL
    )]
    pub token_url: String,

    #[arg(
        long = "box-authorize-url",
        env = "BOX_AUTHORIZE_URL",
        name = "BOX_AUTHORIZE_URL",
        default_value = DEFAULT_AUTHORIZE_URL
    )]
    pub authorize_url: String,

    #[arg(
        long = "upstream-timeout-secs",
        env = "UPSTREAM_TIMEOUT_SECS",
        name = "UPSTREAM_TIMEOUT_SECS",
        default_value_t = 30
    )]
    pub timeout_secs: u64,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CacheArgs {
    #[arg(
        long = "folder-info-ttl-secs",
        env = "FOLDER_INFO_TTL_SECS",
        name = "FOLDER_INFO_TTL_SECS",
        default_value_t = 60
    )]
    pub folder_info_ttl_secs: u64,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", name = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", name = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for PortalConfig {
    fn from(args: Args) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        PortalConfig {
            upstream: UpstreamConfig {
                api_base_url: args.upstream.api_base_url,
                token_url: args.upstream.token_url,
                authorize_url: args.upstream.authorize_url,
                timeout: Duration::from_secs(args.upstream.timeout_secs),
            },
            oauth: OAuthClientConfig {
                client_id: args.oauth.client_id,
                client_secret: args.oauth.client_secret,
                redirect_uri: args.oauth.redirect_uri,
                scope: args.oauth.scope,
            },
            service_account: ServiceAccountConfig {
                enterprise_id: args.service_account.enterprise_id,
                client_id: args.service_account.client_id,
                client_secret: args.service_account.client_secret,
                private_key: args.service_account.private_key,
                passphrase: args.service_account.passphrase,
                public_key_id: non_empty(args.service_account.public_key_id),
                impersonate_user_id: non_empty(args.service_account.impersonate_user_id),
            },
            cache: CacheConfig {
                folder_info_ttl: Duration::from_secs(args.cache.folder_info_ttl_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_portal_defaults() {
        let args = Args::parse_from(["boxportal-api"]);

        assert_eq!(args.server.root_path, "/api");
        assert!(args.session.require_login);
        assert_eq!(args.session.ttl_secs, 3600);

        let config = PortalConfig::from(args);
        assert_eq!(config.upstream.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.upstream.timeout, Duration::from_secs(30));
        assert_eq!(config.cache.folder_info_ttl, Duration::from_secs(60));
        assert_eq!(config.oauth.scope, "root_readwrite");
        assert!(config.service_account.public_key_id.is_none());
    }

    #[test]
    fn test_require_login_can_be_disabled() {
        let args = Args::parse_from(["boxportal-api", "--require-login", "false"]);

        assert!(!args.session.require_login);
    }

    #[test]
    fn test_allowed_origins_are_comma_separated() {
        let args = Args::parse_from([
            "boxportal-api",
            "--allowed-origins",
            "https://portal.example.com,https://other.example.com",
        ]);

        assert_eq!(
            args.server.allowed_origins,
            vec!["https://portal.example.com", "https://other.example.com"]
        );
    }
}
