//! HTML responses for browser-facing routes.
//!
//! Uses Askama templates for server-side rendering.

pub mod pages;
