//! Configuration model

pub mod config;

pub use config::{
    AspectRatioConfig, AudioConfig, Config, CorePathsConfig, CoresConfig, EmulatorConfig,
    EncoderConfig, Environment, H264Config, IcePortsConfig, IceServerConfig, LibretroConfig,
    MonitoringConfig, NetworkConfig, ServerConfig, VideoConfig, VpxConfig, WebrtcConfig,
    WorkerConfig,
};
