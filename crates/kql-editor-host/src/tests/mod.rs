//! Test modules for the lifecycle controller.

mod support;
