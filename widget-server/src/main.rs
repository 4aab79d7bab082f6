use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use widget_common::format_number;
use widget_core::{
    create_router, Catalog, ConfigError, FavoritesStore, FixedDelay, ParamPolicy, ServerConfig,
    SimulatedFavoritesApi, WidgetRouteState,
};

/// widget-server — serves the widget catalog and favorites API.
#[derive(Parser, Debug)]
#[command(name = "widget-server")]
struct Args {
    /// Path to a YAML config file. Flags below override its values.
    #[arg(long, env = "WIDGET_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog JSON file (`{"widgets": [...]}`). Defaults to the built-in fixture.
    #[arg(long, env = "WIDGET_CATALOG")]
    catalog: Option<PathBuf>,

    /// Port for the HTTP server.
    #[arg(long, default_value = "4540", env = "WIDGET_PORT")]
    port: u16,

    /// Address to bind the server to.
    #[arg(long, default_value = "0.0.0.0", env = "WIDGET_BIND")]
    bind: String,

    /// Simulated latency of catalog responses, in milliseconds.
    #[arg(long, env = "WIDGET_LATENCY_MS")]
    latency_ms: Option<u64>,

    /// Simulated latency of favorite toggles, in milliseconds.
    #[arg(long, env = "WIDGET_FAVORITE_LATENCY_MS")]
    favorite_latency_ms: Option<u64>,

    /// Answer 400 to unusable page, pageSize or sort values instead of
    /// falling back to defaults.
    #[arg(long)]
    strict_params: bool,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Config file (if any) with command-line overrides applied.
fn resolve_config(args: &Args) -> Result<ServerConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(catalog) = &args.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    if let Some(ms) = args.latency_ms {
        config.response_latency_ms = ms;
    }
    if let Some(ms) = args.favorite_latency_ms {
        config.favorite_latency_ms = ms;
    }
    if args.strict_params {
        config.param_policy = ParamPolicy::Strict;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();

    info!("widget-server starting");

    let config = resolve_config(&args).unwrap_or_else(|e| {
        error!("Invalid configuration: {e}");
        std::process::exit(1);
    });

    let catalog = match &config.catalog_path {
        Some(path) => {
            info!("Loading catalog from {}", path.display());
            Catalog::load(path)
        }
        None => {
            info!("Using built-in catalog");
            Catalog::builtin()
        }
    }
    .unwrap_or_else(|e| {
        error!("Failed to load catalog: {e}");
        std::process::exit(1);
    });

    info!(
        "Catalog has {} widgets, {} tags, {} total views",
        catalog.len(),
        catalog.available_tags().len(),
        format_number(catalog.total_views())
    );

    let favorites_api =
        SimulatedFavoritesApi::new(Arc::new(FixedDelay::from_millis(config.favorite_latency_ms)));

    let state = WidgetRouteState {
        catalog: Arc::new(catalog),
        favorites: FavoritesStore::new(Arc::new(favorites_api)),
        latency: Arc::new(FixedDelay::from_millis(config.response_latency_ms)),
        default_page_size: config.default_page_size,
        param_policy: config.param_policy,
    };

    info!(
        "Response latency {}ms, favorite latency {}ms, page size {}, params {:?}",
        config.response_latency_ms,
        config.favorite_latency_ms,
        config.default_page_size,
        config.param_policy
    );

    let app = create_router(Arc::new(state));
    let addr = format!("{}:{}", args.bind, args.port);

    info!("Binding to {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to bind to {addr}: {e}");
            std::process::exit(1);
        });

    info!("widget-server listening on http://{addr}");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Built by hand so WIDGET_* variables in the test environment can't leak in
    fn bare_args() -> Args {
        Args {
            config: None,
            catalog: None,
            port: 4540,
            bind: "0.0.0.0".to_string(),
            latency_ms: None,
            favorite_latency_ms: None,
            strict_params: false,
        }
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = resolve_config(&bare_args()).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args {
            catalog: Some(PathBuf::from("/tmp/widgets.json")),
            latency_ms: Some(0),
            favorite_latency_ms: Some(20),
            strict_params: true,
            ..bare_args()
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/widgets.json")));
        assert_eq!(config.response_latency_ms, 0);
        assert_eq!(config.favorite_latency_ms, 20);
        assert_eq!(config.param_policy, ParamPolicy::Strict);
        assert_eq!(config.default_page_size, 10);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let args = Args {
            config: Some(PathBuf::from("/nonexistent/widget.yaml")),
            ..bare_args()
        };
        assert!(matches!(resolve_config(&args), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_args_declare_valid_flags() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
