// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (admin access, security headers).

pub mod admin;
pub mod security;

pub use admin::require_admin;
