//! Traceflow Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Traceflow layout
//! and rendering pipeline. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Graph**: The validated node/edge document model ([`graph`] module)
//! - **Escaping**: Markup escaping and identifier sanitization ([`escape`] module)
//! - **Themes**: Theme tokens, the theme registry and resolver ([`theme`] module)

pub mod color;
pub mod escape;
pub mod geometry;
pub mod graph;
pub mod theme;
