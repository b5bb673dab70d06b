//! Custom actions for the Product actor.
//!
//! Stock operations on a [`Product`](crate::model::Product) beyond plain CRUD, handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action).

/// Custom actions for Product entities.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Removes units from stock.
    ///
    /// # Errors
    /// Fails with `InsufficientStock` if the amount exceeds the units in stock; stock is
    /// left unchanged in that case.
    DecrementStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock level
    CheckStock(u32),
    /// Stock level after the decrement
    DecrementStock(u32),
}
