#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Daily intake target used for the consumed-percentage figure.
    pub daily_calorie_goal: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://lifebalance.db".to_string());
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let daily_calorie_goal = std::env::var("DAILY_CALORIE_GOAL")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(2200);
        Ok(Self {
            database_url,
            host,
            port,
            daily_calorie_goal,
        })
    }
}
