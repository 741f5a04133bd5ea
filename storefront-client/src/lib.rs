pub mod api;
pub mod cart;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod storage;

pub use cart::CartStore;
pub use client::{StorefrontClient, ROUTE_ADMIN, ROUTE_CATALOG, ROUTE_LOGIN};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{AuthInterceptor, HttpPipeline, Navigator, Next, RequestHook};
pub use session::{Session, SessionStore};
pub use storage::{JsonFileStorage, MemoryStorage, SessionStorage};
