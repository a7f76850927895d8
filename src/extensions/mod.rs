//! Extensions bundled with this operator.
//!
//! Exactly one today: the placeholder hello-world extension.

pub mod helloworld;
