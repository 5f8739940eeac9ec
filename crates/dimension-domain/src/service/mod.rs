//! Domain Services - Business logic layered over the persister port

pub mod dimension_service;
