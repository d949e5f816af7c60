//! Request extractors whose rejections render as [`ErrorResponse`](crate::ErrorResponse).

pub mod json_body;

pub use json_body::JsonBody;
