//! # IO Module
//!
//! Interface layer that exposes the domain services to callers. The only
//! surface is the JSON REST API in [`rest`]; rendering is left entirely to
//! whatever client sits in front of it.

pub mod rest;
