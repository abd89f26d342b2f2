//! Application configuration loaded from environment variables

use std::env;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Read the deployment environment from `APP_ENV` (default: development)
    pub fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// JWT configuration
///
/// Access and refresh tokens are signed with *different* secrets so a
/// leaked refresh secret cannot be used to forge access tokens and
/// vice versa.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret for signing/verifying access tokens
    pub access_secret: String,
    /// Secret for signing/verifying refresh tokens
    pub refresh_secret: String,
    /// Access token expiration time in seconds (default: 7 days)
    pub access_token_expiry: u64,
    /// Refresh token expiration time in seconds (default: 30 days)
    pub refresh_token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Access token secret
    /// - `JWT_REFRESH_SECRET`: Refresh token secret
    /// - `JWT_ACCESS_TOKEN_EXPIRY`: Access token expiry in seconds (default: 604800)
    /// - `JWT_REFRESH_TOKEN_EXPIRY`: Refresh token expiry in seconds (default: 2592000)
    pub fn from_env() -> Self {
        let access_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "dev-access-secret".to_string());
        let refresh_secret =
            env::var("JWT_REFRESH_SECRET").unwrap_or_else(|_| "dev-refresh-secret".to_string());

        let access_token_expiry = env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string()) // 7 days
            .parse()
            .unwrap_or(604_800);

        let refresh_token_expiry = env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "2592000".to_string()) // 30 days
            .parse()
            .unwrap_or(2_592_000);

        JwtConfig {
            access_secret,
            refresh_secret,
            access_token_expiry,
            refresh_token_expiry,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Origins allowed to call the API with credentials
    pub allowed_origins: Vec<String>,
    /// JWT settings
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PORT`: HTTP port (default: 5000)
    /// - `APP_ENV`: `development` or `production`
    /// - `ALLOWED_ORIGINS`: comma-separated CORS origins
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:3001".to_string(),
                ]
            });

        AppConfig {
            port,
            environment: Environment::from_env(),
            allowed_origins,
            jwt: JwtConfig::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_when_env_is_empty() {
        unsafe {
            std::env::remove_var("PORT");
            std::env::remove_var("APP_ENV");
            std::env::remove_var("JWT_SECRET");
            std::env::remove_var("JWT_REFRESH_SECRET");
            std::env::remove_var("JWT_ACCESS_TOKEN_EXPIRY");
            std::env::remove_var("JWT_REFRESH_TOKEN_EXPIRY");
        }

        let config = AppConfig::from_env();
        assert_eq!(config.port, 5000);
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.allowed_origins.is_empty());
        assert_eq!(config.jwt.access_token_expiry, 604_800);
        assert_eq!(config.jwt.refresh_token_expiry, 2_592_000);
        assert_ne!(config.jwt.access_secret, config.jwt.refresh_secret);
    }

    #[test]
    #[serial]
    fn test_production_environment() {
        unsafe {
            std::env::set_var("APP_ENV", "production");
        }
        assert!(Environment::from_env().is_production());
        unsafe {
            std::env::remove_var("APP_ENV");
        }
    }

    #[test]
    #[serial]
    fn test_non_numeric_expiry_falls_back() {
        unsafe {
            std::env::set_var("JWT_ACCESS_TOKEN_EXPIRY", "one-week");
        }
        let config = JwtConfig::from_env();
        assert_eq!(config.access_token_expiry, 604_800);
        unsafe {
            std::env::remove_var("JWT_ACCESS_TOKEN_EXPIRY");
        }
    }
}
