//! Payments API endpoint

use http::Method;

use super::Resource;
use crate::{
    error::Result,
    http::ApiProvider,
    types::{CreatePayment, Id, Payment, Receipt},
};

/// Payments API resource.
///
/// Payments cannot be edited or deleted through the API.
#[derive(Clone)]
pub struct Payments {
    provider: ApiProvider,
}

impl Payments {
    /// Create a new Payments resource.
    pub(crate) fn new(provider: ApiProvider) -> Self {
        Self { provider }
    }

    /// List all payments.
    pub async fn list(&self) -> Result<Vec<Payment>> {
        self.provider
            .request(Method::GET, "/payments")
            .send()
            .await?
            .parse_result()
    }

    /// Record a payment.
    pub async fn create(&self, payment: &CreatePayment) -> Result<Payment> {
        self.provider
            .request(Method::POST, "/payments")
            .json(payment)?
            .send()
            .await?
            .parse_result()
    }

    /// Get a payment by id.
    pub async fn get(&self, id: Id) -> Result<Payment> {
        self.provider
            .request(Method::GET, &format!("/payments/{id}"))
            .send()
            .await?
            .parse_result()
    }

    /// Generate the receipt of a payment.
    pub async fn receipt(&self, id: Id) -> Result<Receipt> {
        self.provider
            .request(Method::GET, &format!("/payments/{id}/receipt"))
            .send()
            .await?
            .parse_result()
    }

    /// Payments of the signed-in member.
    pub async fn mine(&self) -> Result<Vec<Payment>> {
        self.provider
            .request(Method::GET, "/payments/my-payments")
            .send()
            .await?
            .parse_result()
    }
}

impl Resource for Payments {
    fn provider(&self) -> &ApiProvider {
        &self.provider
    }
}
