//! # Generic Actor Server
//!
//! The `ResourceActor` owns the store for one resource type and processes its messages
//! one at a time, so the store needs no locking.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This is the "server" half: it owns the `store` and the receiving end of the channel.
/// Every actor runs in its own Tokio task and handles one request at a time, which gives
/// exclusive access to the store without a `Mutex`. Note that exclusivity is per request:
/// a caller that reads in one request and writes in a later one can interleave with other
/// callers.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ## Operations
///
/// * **Create**: allocates the next id from the counter, builds the entity with
///   `T::from_create_params`, runs `on_create`, stores it and returns the id.
/// * **Get**: returns a clone of the entity, or `None`.
/// * **FindMany**: returns clones of the entities that exist, in the order asked for.
/// * **Update**: runs `on_update` on the stored entity and returns the new state.
/// * **Delete**: runs `on_delete`, then removes the entity.
/// * **Action**: runs `handle_action` on the stored entity and returns its result.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. When it is full, client calls
    /// wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    pub async fn run(mut self, context: T::Context) {
        // "Product" rather than "order_service::model::product::Product"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::FindMany { ids, respond_to } => {
                    let items: Vec<T> = ids
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    debug!(entity_type, requested = ids.len(), found = items.len(), "FindMany");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Bin {
        id: u32,
        label: String,
        items: u32,
    }

    #[derive(Debug)]
    struct BinCreate {
        label: String,
        items: u32,
    }

    #[derive(Debug)]
    struct BinUpdate {
        label: Option<String>,
    }

    #[derive(Debug)]
    enum BinAction {
        Take(u32),
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum BinError {
        #[error("empty label")]
        EmptyLabel,
        #[error("only {0} items left")]
        TooFew(u32),
    }

    #[async_trait]
    impl ActorEntity for Bin {
        type Id = u32;
        type Create = BinCreate;
        type Update = BinUpdate;
        type Action = BinAction;
        type ActionResult = u32;
        type Context = ();
        type Error = BinError;

        fn from_create_params(id: u32, params: BinCreate) -> Result<Self, Self::Error> {
            if params.label.is_empty() {
                return Err(BinError::EmptyLabel);
            }
            Ok(Self {
                id,
                label: params.label,
                items: params.items,
            })
        }

        async fn on_update(&mut self, update: BinUpdate, _ctx: &()) -> Result<(), Self::Error> {
            if let Some(label) = update.label {
                self.label = label;
            }
            Ok(())
        }

        async fn handle_action(&mut self, action: BinAction, _ctx: &()) -> Result<u32, Self::Error> {
            match action {
                BinAction::Take(n) if n > self.items => Err(BinError::TooFew(self.items)),
                BinAction::Take(n) => {
                    self.items -= n;
                    Ok(self.items)
                }
            }
        }
    }

    fn bin(label: &str, items: u32) -> BinCreate {
        BinCreate {
            label: label.to_string(),
            items,
        }
    }

    #[tokio::test]
    async fn test_crud_and_actions() {
        let (actor, client) = ResourceActor::<Bin>::new(10);
        tokio::spawn(actor.run(()));

        let id = client.create(bin("screws", 10)).await.unwrap();
        assert_eq!(id, 1);

        let left = client.perform_action(id, BinAction::Take(4)).await.unwrap();
        assert_eq!(left, 6);

        let updated = client
            .update(id, BinUpdate { label: Some("bolts".into()) })
            .await
            .unwrap();
        assert_eq!(updated.label, "bolts");
        assert_eq!(updated.items, 6);

        client.delete(id).await.unwrap();
        assert!(client.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let (actor, client) = ResourceActor::<Bin>::new(10);
        tokio::spawn(actor.run(()));

        let first = client.create(bin("a", 1)).await.unwrap();
        let second = client.create(bin("b", 1)).await.unwrap();
        assert_eq!((first, second), (1, 2));
    }

    #[tokio::test]
    async fn test_find_many_skips_unknown_ids_and_keeps_order() {
        let (actor, client) = ResourceActor::<Bin>::new(10);
        tokio::spawn(actor.run(()));

        let a = client.create(bin("a", 1)).await.unwrap();
        let b = client.create(bin("b", 2)).await.unwrap();

        let found = client.find_many(vec![b, 99, a]).await.unwrap();
        let labels: Vec<_> = found.iter().map(|bin| bin.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);

        let none = client.find_many(vec![42]).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_entity_errors_are_recoverable() {
        let (actor, client) = ResourceActor::<Bin>::new(10);
        tokio::spawn(actor.run(()));

        let err = client.create(bin("", 1)).await.unwrap_err();
        assert_eq!(err.into_entity_error::<BinError>().unwrap(), BinError::EmptyLabel);

        let id = client.create(bin("nails", 3)).await.unwrap();
        let err = client.perform_action(id, BinAction::Take(5)).await.unwrap_err();
        assert_eq!(err.into_entity_error::<BinError>().unwrap(), BinError::TooFew(3));

        // failed action leaves state untouched
        assert_eq!(client.get(id).await.unwrap().unwrap().items, 3);
    }

    #[tokio::test]
    async fn test_missing_entity_reports_not_found() {
        let (actor, client) = ResourceActor::<Bin>::new(10);
        tokio::spawn(actor.run(()));

        let err = client.perform_action(7, BinAction::Take(1)).await.unwrap_err();
        assert!(matches!(err, FrameworkError::NotFound(ref id) if id == "7"));
    }

    #[tokio::test]
    async fn test_closed_actor() {
        let (actor, client) = ResourceActor::<Bin>::new(10);
        drop(actor);

        let err = client.get(1).await.unwrap_err();
        assert!(matches!(err, FrameworkError::ActorClosed));
    }
}
