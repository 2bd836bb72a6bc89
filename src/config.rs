use {crate::adapters::midtrans_client::Environment, std::env};

/// Environment-sourced configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Provider server key: signs notifications and authenticates the
    /// status-API calls.
    pub server_key: String,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let environment = env::var("MIDTRANS_ENVIRONMENT")
            .map(|v| Environment::from_str_lenient(&v))
            .unwrap_or(Environment::Sandbox);

        Self {
            host,
            port,
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_key: env::var("MIDTRANS_SERVER_KEY").expect("MIDTRANS_SERVER_KEY must be set"),
            environment,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
