mod overlay_server;
pub use overlay_server::{OverlayServer, TickReport};

mod providers;
pub use providers::Providers;

mod server_config;
pub use server_config::{AppearanceConfig, ServerConfig, TimingConfig};
