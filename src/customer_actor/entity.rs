//! [`ActorEntity`] implementation for [`Customer`].

use super::error::CustomerError;
use crate::framework::ActorEntity;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = (); // No custom actions
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    /// Creates a new Customer, rejecting a blank name or an email without `@`.
    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(CustomerError::ValidationError("name must not be empty".into()));
        }
        if !params.email.contains('@') {
            return Err(CustomerError::ValidationError(format!(
                "invalid email: {}",
                params.email
            )));
        }
        Ok(Self::new(id, params.name, params.email))
    }

    async fn on_update(&mut self, update: CustomerUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(name: &str, email: &str) -> CustomerCreate {
        CustomerCreate {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_from_create_params() {
        let customer =
            Customer::from_create_params(CustomerId::from(1), params("Alice", "alice@example.com"))
                .unwrap();
        assert_eq!(customer.id, CustomerId::from("customer_1"));
        assert_eq!(customer.name, "Alice");
    }

    #[test]
    fn test_rejects_blank_name_and_bad_email() {
        let blank = Customer::from_create_params(CustomerId::from(1), params("  ", "a@b.c"));
        assert!(matches!(blank, Err(CustomerError::ValidationError(_))));

        let bad_email = Customer::from_create_params(CustomerId::from(1), params("Bob", "bob"));
        assert!(matches!(bad_email, Err(CustomerError::ValidationError(_))));
    }
}
