use async_trait::async_trait;
use std::any::Any;

use super::DomainEvent;
use crate::shared::DomainError;

/// Event bus trait for publishing domain events
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError>;
}

/// Handler for one concrete event type
#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    async fn handle(&self, event: &E) -> Result<(), DomainError>;
}

/// Type-erased event handler for storage in collections
#[async_trait]
pub trait DynamicEventHandler: Send + Sync {
    async fn handle_dynamic(&self, event: &(dyn Any + Send + Sync)) -> Result<(), DomainError>;

    /// Type name this handler handles
    fn event_type_name(&self) -> &'static str;
}

/// Adapts a typed `EventHandler` into a `DynamicEventHandler`
pub struct TypedEventHandlerWrapper<E: DomainEvent + 'static, H: EventHandler<E>> {
    handler: H,
    _phantom: std::marker::PhantomData<E>,
}

impl<E: DomainEvent + 'static, H: EventHandler<E>> TypedEventHandlerWrapper<E, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<E: DomainEvent + 'static, H: EventHandler<E>> DynamicEventHandler
    for TypedEventHandlerWrapper<E, H>
{
    async fn handle_dynamic(&self, event: &(dyn Any + Send + Sync)) -> Result<(), DomainError> {
        match event.downcast_ref::<E>() {
            Some(typed_event) => self.handler.handle(typed_event).await,
            None => Err(DomainError::Infrastructure(format!(
                "Event type mismatch, expected {}",
                std::any::type_name::<E>()
            ))),
        }
    }

    fn event_type_name(&self) -> &'static str {
        std::any::type_name::<E>()
    }
}
