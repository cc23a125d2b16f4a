//! # Modal Flags
//!
//! Visibility of the two overlay panels: the cart drawer and the
//! product-detail panel.
//!
//! The flags are independent. The UI renders a single overlay container, but
//! both panels may be open at the same time, and closing one never touches
//! the other. "Close all" (backdrop click, checkout) is two separate actions.
//!
//! The detail panel is stored as `Option<Product>`, so "open without a
//! product" cannot be represented. On the wire it keeps the
//! `{ open, product }` shape the UI expects.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::reducer::Reducer;
use crate::types::Product;

/// Intents accepted by [`ModalState`].
#[derive(Debug, Clone, PartialEq)]
pub enum ModalAction {
    OpenCart,
    CloseCart,
    OpenProductDetail(Product),
    CloseProductDetail,
}

impl ModalAction {
    /// The two independent actions behind "close all".
    pub fn close_all() -> [ModalAction; 2] {
        [ModalAction::CloseCart, ModalAction::CloseProductDetail]
    }
}

/// Overlay visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "ModalStateWire", from = "ModalStateWire")]
pub struct ModalState {
    cart_open: bool,
    product_detail: Option<Product>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn is_product_detail_open(&self) -> bool {
        self.product_detail.is_some()
    }

    /// The product shown in the detail panel, if it is open.
    pub fn product_detail(&self) -> Option<&Product> {
        self.product_detail.as_ref()
    }

    /// Whether the overlay container has anything to render.
    pub fn is_any_open(&self) -> bool {
        self.cart_open || self.product_detail.is_some()
    }
}

impl Reducer for ModalState {
    type Action = ModalAction;

    fn reduce(mut self, action: ModalAction) -> Self {
        match action {
            ModalAction::OpenCart => self.cart_open = true,
            ModalAction::CloseCart => self.cart_open = false,
            ModalAction::OpenProductDetail(product) => self.product_detail = Some(product),
            ModalAction::CloseProductDetail => self.product_detail = None,
        }
        self
    }
}

// =============================================================================
// Wire Shape
// =============================================================================

/// `{ cartOpen, productDetail: { open, product } }` as seen by the UI.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, rename = "ModalState")]
#[serde(rename_all = "camelCase")]
struct ModalStateWire {
    cart_open: bool,
    product_detail: ProductDetailWire,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, rename = "ProductDetail")]
struct ProductDetailWire {
    open: bool,
    product: Option<Product>,
}

impl From<ModalState> for ModalStateWire {
    fn from(state: ModalState) -> Self {
        ModalStateWire {
            cart_open: state.cart_open,
            product_detail: ProductDetailWire {
                open: state.product_detail.is_some(),
                product: state.product_detail,
            },
        }
    }
}

impl From<ModalStateWire> for ModalState {
    /// `open: true` without a product decodes as closed.
    fn from(wire: ModalStateWire) -> Self {
        let ProductDetailWire { open, product } = wire.product_detail;
        ModalState {
            cart_open: wire.cart_open,
            product_detail: if open { product } else { None },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::ProductId;

    fn lamp() -> Product {
        Product::new(ProductId(7), "Lamp", Money::from_cents(1999))
    }

    #[test]
    fn test_starts_closed() {
        let state = ModalState::new();
        assert!(!state.is_cart_open());
        assert!(!state.is_product_detail_open());
        assert!(!state.is_any_open());
    }

    #[test]
    fn test_flags_are_independent() {
        let state = ModalState::new()
            .reduce(ModalAction::OpenCart)
            .reduce(ModalAction::OpenProductDetail(lamp()));
        assert!(state.is_cart_open());
        assert!(state.is_product_detail_open());

        let state = state.reduce(ModalAction::CloseCart);
        assert!(!state.is_cart_open());
        assert_eq!(state.product_detail().map(|p| p.id), Some(ProductId(7)));
    }

    #[test]
    fn test_close_all_closes_both() {
        let state = ModalState::new()
            .reduce(ModalAction::OpenCart)
            .reduce(ModalAction::OpenProductDetail(lamp()));

        let state = ModalAction::close_all()
            .into_iter()
            .fold(state, |s, a| s.reduce(a));

        assert!(!state.is_any_open());
        assert!(state.product_detail().is_none());
    }

    #[test]
    fn test_open_detail_replaces_product() {
        let other = Product::new(ProductId(8), "Rug", Money::from_cents(4999));
        let state = ModalState::new()
            .reduce(ModalAction::OpenProductDetail(lamp()))
            .reduce(ModalAction::OpenProductDetail(other));

        assert_eq!(state.product_detail().map(|p| p.id), Some(ProductId(8)));
    }

    #[test]
    fn test_wire_shape() {
        let state = ModalState::new().reduce(ModalAction::OpenProductDetail(lamp()));
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["cartOpen"], false);
        assert_eq!(json["productDetail"]["open"], true);
        assert_eq!(json["productDetail"]["product"]["title"], "Lamp");
    }

    #[test]
    fn test_open_without_product_decodes_closed() {
        let json = r#"{"cartOpen":true,"productDetail":{"open":true,"product":null}}"#;
        let state: ModalState = serde_json::from_str(json).unwrap();

        assert!(state.is_cart_open());
        assert!(!state.is_product_detail_open());
    }
}
