pub mod conversions_model;
pub mod conversions_repository;
pub mod conversions_service;
pub mod conversions_traits;

#[cfg(test)]
mod conversions_service_tests;

pub use conversions_model::{round_money, ConversionRecord, ConversionRequest, ConversionResponse};
pub use conversions_repository::InMemoryConversionHistoryRepository;
pub use conversions_service::ConversionService;
pub use conversions_traits::{ConversionHistoryRepositoryTrait, ConversionServiceTrait};
