use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging bootstrap: a console fmt layer always, plus a Loki shipping
/// layer when LOKI_ENABLED is set and the crate is built with `loki`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_enabled: bool,
    pub loki_url: Option<String>,
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            loki_enabled: std::env::var("LOKI_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            loki_url: std::env::var("LOKI_URL").ok(),
            service_name: std::env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "papertrader".to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer());

    #[cfg(feature = "loki")]
    if config.loki_enabled {
        let loki_url = config
            .loki_url
            .as_deref()
            .ok_or("LOKI_ENABLED is true but LOKI_URL is not set")?;

        let (loki_layer, task) = tracing_loki::builder()
            .label("service", &config.service_name)?
            .label("environment", &config.environment)?
            .build_url(url::Url::parse(loki_url)?)?;

        // The background task ships buffered log lines to Loki.
        tokio::spawn(task);

        registry.with(loki_layer).init();
        tracing::info!("✅ Loki logging initialized ({})", loki_url);
        return Ok(());
    }

    #[cfg(not(feature = "loki"))]
    if config.loki_enabled {
        return Err("LOKI_ENABLED is true but the loki feature is compiled out".into());
    }

    registry.init();
    Ok(())
}
