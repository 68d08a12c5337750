pub mod bridge;
pub mod build;
pub mod codec;
pub mod error;
pub mod routing;
pub mod settings;

#[cfg(test)]
mod tests;

/// Name of the object the bridge installs into the page's `window`.
pub const CONNECTOR_NAMESPACE: &str = "orionBuildConnector";
pub const CONNECTOR_GLOBAL: &str = const_format::concatcp!("window.", CONNECTOR_NAMESPACE);

/// Instructions payload the platform sends when an instructor page first opens.
pub const TEMPLATE_SENTINEL: &str = "TEMPLATE";
