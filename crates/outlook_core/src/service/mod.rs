//! Use-case services over the resolution engine.

pub mod notification;
pub mod outlook_service;
