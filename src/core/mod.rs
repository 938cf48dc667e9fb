// src/core/mod.rs

/// Typed upstream payloads and the JSON envelopes returned to callers.
pub mod models;

/// Errors raised while validating a target or talking to an upstream service.
pub mod error;

/// Normalization of the caller-supplied `url` parameter.
pub mod target;

/// One module per upstream service, plus the two-stage submit/fetch pipeline.
pub mod scanner;
