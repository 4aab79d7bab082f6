pub mod catalog;
pub mod config;
pub mod delay;
pub mod favorites;
pub mod query;
pub mod routes;

pub use catalog::{Catalog, CatalogError, ExampleOutput, Shop, Widget};
pub use config::{ConfigError, ParamPolicy, ServerConfig};
pub use delay::{Delay, FixedDelay, NoDelay};
pub use favorites::{
    FavoritesApi, FavoritesError, FavoritesStore, SimulatedFavoritesApi, ToggleOutcome,
};
pub use query::{find_by_id, query, QueryError, QueryParams, QueryResult};
pub use routes::{create_router, WidgetRouteState};
