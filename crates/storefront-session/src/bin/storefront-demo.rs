//! # Storefront Demo
//!
//! Runs a scripted shopping session against the real stores and timers.
//!
//! ## Usage
//! ```bash
//! # Default config (storefront.toml in the platform config dir, if any)
//! cargo run -p storefront-session --bin storefront-demo
//!
//! # Keep cart and orders between runs
//! STOREFRONT_PERSIST=true cargo run -p storefront-session --bin storefront-demo
//!
//! # See every store dispatch
//! RUST_LOG=trace cargo run -p storefront-session --bin storefront-demo
//! ```

use std::sync::Arc;
use std::time::Duration;

use storefront_core::toast::EXIT_ANIMATION;
use storefront_core::{Money, Product, ProductId, User};
use storefront_session::{
    init_tracing, CheckoutOutcome, Storefront, StorefrontConfig, TracingNavigator,
};
use tracing::info;

fn catalog() -> Vec<Product> {
    vec![
        Product::new(ProductId(1), "Canvas Tote", Money::from_cents(1800))
            .with_image("https://cdn.example.com/tote.jpg")
            .with_description("Heavy cotton, fits a laptop"),
        Product::new(ProductId(2), "Enamel Mug", Money::from_cents(1250)),
        Product::new(ProductId(3), "Sticker Pack", Money::from_cents(499)),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = StorefrontConfig::load_or_default(None);
    let checkout_toast = Duration::from_millis(config.toast.checkout_duration_ms);

    let storefront = Storefront::builder(config)
        .navigator(Arc::new(TracingNavigator))
        .build()?;

    if storefront.resume()? {
        info!(
            orders = storefront.order_count(),
            cart_items = storefront.cart_quantity(),
            "Resumed previous session"
        );
    }

    storefront.set_user(User {
        name: "Demo Shopper".to_string(),
        email: "demo@example.com".to_string(),
    });

    let products = catalog();
    storefront.open_product_detail(products[0].clone());
    storefront.add_product_to_cart(&products[0]);
    storefront.close_product_detail();

    storefront.add_product_to_cart(&products[1]);
    storefront.increment_item(products[1].id);
    storefront.add_product_to_cart(&products[2]);
    storefront.decrement_item(products[2].id);

    storefront.open_cart();
    info!(
        units = storefront.cart_quantity(),
        total = %storefront.cart_total(),
        "Cart ready"
    );

    match storefront.checkout() {
        CheckoutOutcome::Placed(placed) => {
            if let Some(order) = storefront.order(placed.index) {
                info!(
                    order = %format!("Order #{}", order.short_id()),
                    date = %order.date,
                    total = %order.total,
                    lines = order.item_count(),
                    "Order details"
                );
            }

            // Let the confirmation toast run its full lifecycle.
            tokio::time::sleep(checkout_toast + EXIT_ANIMATION).await;
            info!(
                phase = ?storefront.toast_phase(placed.toast_id),
                "Confirmation toast finished"
            );
        }
        CheckoutOutcome::EmptyCart => info!("Nothing to check out"),
    }

    storefront.persist()?;
    storefront.logout();
    storefront.shutdown();
    Ok(())
}
