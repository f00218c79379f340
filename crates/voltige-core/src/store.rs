//! Per-visitor session state: the cart plus, when logged in, the customer
//! account handle.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::cart::Cart;

/// A logged-in customer. The access token is the opaque credential a real
/// Storefront customer API would hand back; it never appears in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct CustomerAccount {
    pub email: String,
    pub access_token: String,
    pub logged_in_at: DateTime<Utc>,
}

impl fmt::Debug for CustomerAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomerAccount")
            .field("email", &self.email)
            .field("access_token", &"***")
            .field("logged_in_at", &self.logged_in_at)
            .finish()
    }
}

/// One visitor's server-side state.
#[derive(Debug, Clone, Default)]
pub struct StoreSession {
    pub cart: Cart,
    customer: Option<CustomerAccount>,
}

impl StoreSession {
    /// Signs the session in, replacing any previous account.
    pub fn login(
        &mut self,
        email: impl Into<String>,
        access_token: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.customer = Some(CustomerAccount {
            email: email.into(),
            access_token: access_token.into(),
            logged_in_at: now,
        });
    }

    /// Signs out. Returns false when nobody was logged in. The cart
    /// survives a logout.
    pub fn logout(&mut self) -> bool {
        self.customer.take().is_some()
    }

    #[must_use]
    pub fn customer(&self) -> Option<&CustomerAccount> {
        self.customer.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.customer.is_some()
    }
}
