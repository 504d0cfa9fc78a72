use std::any::Any;

pub mod event_bus;
pub mod loop_events;
pub mod user_events;

pub use event_bus::{DynamicEventHandler, EventBus, EventHandler, TypedEventHandlerWrapper};

/// Base trait for all domain events
pub trait DomainEvent: Send + Sync + Any {
    /// Convert to Any for type-safe downcasting
    fn as_any(&self) -> &(dyn Any + Send + Sync);

    /// Key handlers are registered under
    fn event_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Implement `DomainEvent` for plain event structs
#[macro_export]
macro_rules! impl_domain_event {
    ($($event:ty),+ $(,)?) => {
        $(
            impl $crate::events::DomainEvent for $event {
                fn as_any(&self) -> &(dyn std::any::Any + Send + Sync) {
                    self
                }
            }
        )+
    };
}
