use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::api::cart::CartApi;
use crate::api::types::Cart;
use crate::error::ClientResult;

/// Single source of truth for the signed-in user's cart.
///
/// The value is `None` until first fetched. Every mutation issues exactly one
/// network call and, on success, adopts the server's returned snapshot
/// wholesale; there is no optimistic local increment and no partial patching,
/// so the displayed count can never diverge from the server total. A failed
/// mutation leaves the last-known-good value untouched and never retries.
///
/// Responses are applied in the order the underlying calls resolve; a slow
/// mutation resolving after a faster later fetch overwrites it with its own,
/// now-stale, snapshot. Known limitation, no request sequencing is attempted.
#[derive(Clone)]
pub struct CartStore {
    api: CartApi,
    cart: Arc<watch::Sender<Option<Cart>>>,
    pending: Arc<watch::Sender<BTreeSet<String>>>,
}

impl CartStore {
    pub fn new(api: CartApi) -> Self {
        let (cart, _) = watch::channel(None);
        let (pending, _) = watch::channel(BTreeSet::new());
        Self {
            api,
            cart: Arc::new(cart),
            pending: Arc::new(pending),
        }
    }

    /// Load the current cart; the server auto-creates an empty one if needed.
    pub async fn fetch(&self) -> ClientResult<Cart> {
        let cart = self.api.fetch().await?;
        self.cart.send_replace(Some(cart.clone()));
        Ok(cart)
    }

    pub async fn add_item(&self, product_id: &str, quantity: u32) -> ClientResult<Cart> {
        let cart = self.api.add_item(product_id, quantity).await?;
        debug!(product_id, quantity, "added cart line");
        self.cart.send_replace(Some(cart.clone()));
        Ok(cart)
    }

    pub async fn update_item(&self, line_id: &str, quantity: u32) -> ClientResult<Cart> {
        self.begin_line(line_id);
        let result = self.api.update_item(line_id, quantity).await;
        self.finish_line(line_id);
        let cart = result?;
        self.cart.send_replace(Some(cart.clone()));
        Ok(cart)
    }

    /// The delete endpoint returns no body, so the fresh snapshot comes from
    /// a follow-up fetch instead of a locally-assembled cart.
    pub async fn remove_item(&self, line_id: &str) -> ClientResult<Cart> {
        self.begin_line(line_id);
        let result = self.api.remove_item(line_id).await;
        self.finish_line(line_id);
        result?;
        self.fetch().await
    }

    /// The desired end state is already known, so no re-fetch is needed.
    pub async fn clear(&self) -> ClientResult<()> {
        self.api.clear().await?;
        self.cart.send_replace(None);
        Ok(())
    }

    /// Local-only reset, used on logout and after order creation (the server
    /// clears its copy as a side effect of both).
    pub fn reset(&self) {
        self.cart.send_replace(None);
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Cart>> {
        self.cart.subscribe()
    }

    pub fn current(&self) -> Option<Cart> {
        self.cart.borrow().clone()
    }

    /// Sum of line quantities over the current value, 0 while `None`.
    pub fn item_count(&self) -> u32 {
        self.cart
            .borrow()
            .as_ref()
            .map(Cart::item_count)
            .unwrap_or(0)
    }

    /// Line ids with an in-flight mutation, so a view can disable just the
    /// control being changed without blocking unrelated lines.
    pub fn pending_lines(&self) -> watch::Receiver<BTreeSet<String>> {
        self.pending.subscribe()
    }

    pub fn is_line_pending(&self, line_id: &str) -> bool {
        self.pending.borrow().contains(line_id)
    }

    fn begin_line(&self, line_id: &str) {
        self.pending.send_modify(|set| {
            set.insert(line_id.to_owned());
        });
    }

    fn finish_line(&self, line_id: &str) {
        self.pending.send_modify(|set| {
            set.remove(line_id);
        });
    }
}
