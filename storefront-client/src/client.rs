use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use common_claims::{decode_roles, ROLE_ADMIN};

use crate::api::types::{LoginResponse, OrderDetail, PaymentMethod, RegisterResponse};
use crate::api::{AuthApi, CartApi, CategoriesApi, OrdersApi, ProductsApi};
use crate::cart::CartStore;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::{AuthInterceptor, HttpPipeline, Navigator};
use crate::session::SessionStore;
use crate::storage::SessionStorage;

pub const ROUTE_LOGIN: &str = "/login";
pub const ROUTE_CATALOG: &str = "/";
pub const ROUTE_ADMIN: &str = "/admin";

/// Facade wiring the session store, cart store, and typed API modules over a
/// single authenticated pipeline. One instance per running client process;
/// nothing outside the stores constructs a `Session` or `Cart` value.
pub struct StorefrontClient {
    session: SessionStore,
    cart: CartStore,
    auth: AuthApi,
    products: ProductsApi,
    categories: CategoriesApi,
    orders: OrdersApi,
}

impl StorefrontClient {
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build HTTP client")?;

        let session = SessionStore::new(storage);
        let pipeline = Arc::new(
            HttpPipeline::new(http_client, config.base_url.clone())
                .with_hook(Arc::new(AuthInterceptor::new(session.clone(), navigator))),
        );

        Ok(Self {
            session,
            cart: CartStore::new(CartApi::new(pipeline.clone())),
            auth: AuthApi::new(pipeline.clone()),
            products: ProductsApi::new(pipeline.clone()),
            categories: CategoriesApi::new(pipeline.clone()),
            orders: OrdersApi::new(pipeline),
        })
    }

    /// Authenticate and populate the session store. Roles come from the
    /// returned token's claims payload; a token whose roles cannot be decoded
    /// still signs in, with no role-gated navigation.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let response = self.auth.login(email, password).await?;
        let roles = decode_roles(&response.token);
        self.session
            .set_authenticated(&response.token, &response.user_id, &response.email, roles);
        Ok(response)
    }

    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<RegisterResponse> {
        self.auth.register(full_name, email, password).await
    }

    /// User-initiated sign-out: clears the session and resets the local cart.
    pub fn logout(&self) {
        self.session.clear();
        self.cart.reset();
        info!("signed out");
    }

    /// Create an order from the current cart. The server clears its cart as a
    /// side effect, so the local store resets to match.
    pub async fn place_order(
        &self,
        shipping_address: &str,
        payment_method: PaymentMethod,
    ) -> ClientResult<OrderDetail> {
        let order = self.orders.create(shipping_address, payment_method).await?;
        self.cart.reset();
        Ok(order)
    }

    /// Post-login destination: admins land on the console, everyone else on
    /// the catalog.
    pub fn landing_route(&self) -> &'static str {
        if self.session.has_role(ROLE_ADMIN) {
            ROUTE_ADMIN
        } else {
            ROUTE_CATALOG
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn products(&self) -> &ProductsApi {
        &self.products
    }

    pub fn categories(&self) -> &CategoriesApi {
        &self.categories
    }

    pub fn orders(&self) -> &OrdersApi {
        &self.orders
    }
}
