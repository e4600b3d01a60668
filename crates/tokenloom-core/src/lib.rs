//! Tokenloom Core Types and Definitions
//!
//! This crate provides the foundational types for the Tokenloom design-token
//! pipeline. It includes:
//!
//! - **Paths**: Dot-delimited token addresses ([`path::TokenPath`])
//! - **Colors**: CSS color parsing and color-space math ([`color::Color`])
//! - **Values**: Concrete token values ([`value::TokenValue`])
//! - **Tree**: The classified token tree ([`tree::Node`])
//! - **Platforms**: Build targets and themes ([`platform::Platform`])

pub mod color;
pub mod path;
pub mod platform;
pub mod tree;
pub mod value;
