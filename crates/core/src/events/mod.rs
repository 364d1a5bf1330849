pub mod events_model;
pub mod events_publisher;
pub mod events_traits;

pub use events_model::ConversionEvent;
pub use events_publisher::EventPublisher;
pub use events_traits::EventTransport;
