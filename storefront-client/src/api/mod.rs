pub mod auth;
pub mod cart;
pub mod categories;
pub mod orders;
pub mod products;
pub mod types;

pub use auth::AuthApi;
pub use cart::CartApi;
pub use categories::CategoriesApi;
pub use orders::OrdersApi;
pub use products::ProductsApi;
