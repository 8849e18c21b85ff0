//! Checkout submission.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use jiff::Timestamp;
use thiserror::Error;
use tracing::info;

use tokri::{
    address::{AddressError, DeliveryAddress},
    delivery::DeliveryLocation,
    order::{OrderError, OrderRecord},
};

use crate::{
    api::{ApiError, OrdersApi},
    cart_store::{CartStore, CartStoreError},
};

/// Errors from order submission.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Another submission has not settled yet; try again once it has.
    #[error("an order submission is already in progress")]
    SubmissionInFlight,

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Order(#[from] OrderError),

    /// The backend rejected the order or was unreachable. The cart is
    /// untouched and the user may retry.
    #[error("order submission failed")]
    Api(#[source] ApiError),

    /// The order was created server-side, but the local cart blob could not
    /// be cleared.
    #[error("order placed, but clearing the saved cart failed")]
    Storage(#[source] CartStoreError),
}

/// Hands a validated cart + address to the backend and reconciles local state
/// with the outcome.
pub struct CheckoutService {
    orders: Arc<dyn OrdersApi>,
    in_flight: AtomicBool,
}

impl CheckoutService {
    /// Create a service posting to the given orders endpoint.
    pub fn new(orders: Arc<dyn OrdersApi>) -> Self {
        Self {
            orders,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submit the cart as an order.
    ///
    /// The address is validated before any network call. Only HTTP 201 counts
    /// as success; the cart and its persisted copy are then cleared and the
    /// stored order returned for invoice display. On any failure the cart is
    /// left exactly as it was and retry is manual — no idempotency key is
    /// sent, so retrying after an ambiguous network failure can create a
    /// duplicate order.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] describing which step failed.
    pub async fn submit(
        &self,
        cart: &mut CartStore,
        customer: DeliveryAddress,
        location: DeliveryLocation,
    ) -> Result<OrderRecord, CheckoutError> {
        let _guard =
            InFlight::acquire(&self.in_flight).ok_or(CheckoutError::SubmissionInFlight)?;

        customer.validate()?;

        let mut rng = rand::thread_rng();
        let record = OrderRecord::build(cart.cart(), customer, location, Timestamp::now(), &mut rng)?;

        let stored = self
            .orders
            .create_order(&record)
            .await
            .map_err(CheckoutError::Api)?;

        info!(order_number = %stored.order_number, "order placed");

        cart.clear().map_err(CheckoutError::Storage)?;

        Ok(stored)
    }
}

/// Single-submission flag, released when dropped so failures cannot wedge the
/// checkout.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use testresult::TestResult;

    use tokri::{
        ids::TypedId,
        products::{ColorOption, Product, ProductId},
    };

    use crate::{api::MockOrdersApi, storage::MockCartStorage};

    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Panjabi".to_string(),
            price: 500_00,
            stock: 10,
            colors: vec![ColorOption::new("navy", "Navy")],
            image_url: None,
            description: None,
            category: None,
        }
    }

    fn customer() -> DeliveryAddress {
        DeliveryAddress {
            name: "Farhana Akter".to_string(),
            phone: "01712345678".to_string(),
            district: "Dhaka".to_string(),
            sub_district: "Dhanmondi".to_string(),
            house_number: "12/B".to_string(),
            street: None,
        }
    }

    fn loaded_cart(expect_clear: usize) -> TestResult<CartStore> {
        let mut storage = MockCartStorage::new();
        storage.expect_load().returning(|| Ok(None));
        storage.expect_save().returning(|_| Ok(()));
        storage
            .expect_clear()
            .times(expect_clear)
            .returning(|| Ok(()));

        let mut cart = CartStore::load(Arc::new(storage));
        cart.add_or_merge(
            product(),
            2,
            ColorOption::new("navy", "Navy"),
            Timestamp::UNIX_EPOCH,
        )?;

        Ok(cart)
    }

    #[tokio::test]
    async fn created_order_clears_the_cart_and_its_blob() -> TestResult {
        let mut orders = MockOrdersApi::new();
        orders
            .expect_create_order()
            .times(1)
            .returning(|record| {
                let mut stored = record.clone();
                stored.id = Some(TypedId::new("ord-1"));
                Ok(stored)
            });

        let service = CheckoutService::new(Arc::new(orders));
        let mut cart = loaded_cart(1)?;

        let stored = service
            .submit(&mut cart, customer(), DeliveryLocation::Dhaka)
            .await?;

        assert!(stored.id.is_some());
        assert_eq!(stored.grand_total, 1100_00);
        assert!(cart.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn backend_failure_leaves_the_cart_untouched() -> TestResult {
        let mut orders = MockOrdersApi::new();
        orders
            .expect_create_order()
            .times(1)
            .returning(|_| Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)));

        let service = CheckoutService::new(Arc::new(orders));
        let mut cart = loaded_cart(0)?;

        let result = service
            .submit(&mut cart, customer(), DeliveryLocation::Dhaka)
            .await;

        assert!(
            matches!(result, Err(CheckoutError::Api(_))),
            "expected Api error, got an Ok or different error"
        );
        assert_eq!(cart.cart().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_address_never_reaches_the_backend() -> TestResult {
        // No create_order expectation: a call would fail the test.
        let orders = MockOrdersApi::new();

        let service = CheckoutService::new(Arc::new(orders));
        let mut cart = loaded_cart(0)?;

        let short_phone = DeliveryAddress {
            phone: "0171234567".to_string(),
            ..customer()
        };

        let result = service
            .submit(&mut cart, short_phone, DeliveryLocation::Dhaka)
            .await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::Address(AddressError::PhoneTooShort))
            ),
            "expected PhoneTooShort"
        );
        assert_eq!(cart.cart().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_locally() -> TestResult {
        let orders = MockOrdersApi::new();
        let service = CheckoutService::new(Arc::new(orders));

        let mut storage = MockCartStorage::new();
        storage.expect_load().returning(|| Ok(None));
        let mut cart = CartStore::load(Arc::new(storage));

        let result = service
            .submit(&mut cart, customer(), DeliveryLocation::Dhaka)
            .await;

        assert!(
            matches!(result, Err(CheckoutError::Order(OrderError::EmptyCart))),
            "expected EmptyCart"
        );

        Ok(())
    }

    #[tokio::test]
    async fn second_submission_is_rejected_while_one_is_in_flight() -> TestResult {
        let orders = MockOrdersApi::new();
        let service = CheckoutService::new(Arc::new(orders));
        let mut cart = loaded_cart(0)?;

        service.in_flight.store(true, Ordering::Release);

        let result = service
            .submit(&mut cart, customer(), DeliveryLocation::Dhaka)
            .await;

        assert!(
            matches!(result, Err(CheckoutError::SubmissionInFlight)),
            "expected SubmissionInFlight"
        );

        Ok(())
    }

    #[tokio::test]
    async fn flag_is_released_after_a_failed_submission() -> TestResult {
        let mut orders = MockOrdersApi::new();
        let mut responses = vec![
            Ok(()),
            Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
        ];
        orders.expect_create_order().times(2).returning(move |record| {
            match responses.pop().unwrap_or(Ok(())) {
                Ok(()) => Ok(record.clone()),
                Err(error) => Err(error),
            }
        });

        let service = CheckoutService::new(Arc::new(orders));
        let mut cart = loaded_cart(1)?;

        let first = service
            .submit(&mut cart, customer(), DeliveryLocation::Dhaka)
            .await;
        assert!(matches!(first, Err(CheckoutError::Api(_))), "first attempt should fail");

        // The retry must not be blocked by a stale in-flight flag.
        let second = service
            .submit(&mut cart, customer(), DeliveryLocation::Dhaka)
            .await?;

        assert_eq!(second.subtotal, 1000_00);

        Ok(())
    }

    #[test]
    fn in_flight_flag_is_exclusive_until_dropped() {
        let flag = AtomicBool::new(false);

        let guard = InFlight::acquire(&flag);
        assert!(guard.is_some(), "first acquire should succeed");
        assert!(InFlight::acquire(&flag).is_none(), "second acquire should fail");

        drop(guard);

        assert!(InFlight::acquire(&flag).is_some(), "release should allow reacquire");
    }
}
