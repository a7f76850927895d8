//! Placeholder hello-world extension.
//!
//! Demonstrates the registration path only; real behaviour belongs to the
//! manager framework, not this repository.

use crate::manager::Extension;

pub const NAME: &str = "helloworld";

pub struct HelloWorld;

/// Zero-argument factory, mirroring how the manager expects extensions to be
/// constructed.
pub fn new() -> HelloWorld {
    HelloWorld
}

impl Extension for HelloWorld {
    fn name(&self) -> &str {
        NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_named_extension() {
        let ext = new();
        assert_eq!(ext.name(), "helloworld");
    }
}
