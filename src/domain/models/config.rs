//! Worker configuration sections

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Fully resolved worker configuration.
///
/// Every section deserializes with `#[serde(default)]`, so a document only
/// needs to carry the keys it overrides. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Media encoder settings
    pub encoder: EncoderConfig,

    /// Emulator runtime settings, including the ROM storage path
    pub emulator: EmulatorConfig,

    /// Deployment environment of the process
    pub environment: Environment,

    /// Worker process settings (monitoring, network, HTTP server)
    pub worker: WorkerConfig,

    /// WebRTC transport settings
    pub webrtc: WebrtcConfig,

    /// Set only after the configuration was parsed from external bytes.
    #[serde(skip)]
    pub(crate) loaded: bool,
}

impl Config {
    /// Zero-valued configuration that was not populated from any source.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this configuration came from a successfully parsed file or wire payload.
    ///
    /// Only resolution and decoding set the flag:
    ///
    /// ```compile_fail
    /// let mut config = worker_config::domain::models::Config::empty();
    /// config.loaded = true;
    /// ```
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Render the zero configuration as a YAML document, useful to bootstrap a file.
    pub fn sample_yaml() -> String {
        serde_yaml::to_string(&Self::default()).unwrap_or_default()
    }
}

/// Audio and video encoder settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncoderConfig {
    /// Audio encoder settings
    pub audio: AudioConfig,
    /// Video encoder settings
    pub video: VideoConfig,
    /// Stream encoded frames even when no game is running
    pub without_game: bool,
}

/// Audio encoder settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioConfig {
    /// Number of audio channels
    pub channels: u32,
    /// Frame duration in milliseconds
    pub frame: u32,
    /// Sample rate in Hz
    pub frequency: u32,
}

/// Video encoder settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoConfig {
    /// Codec name, e.g. `h264` or `vp8`
    pub codec: String,
    /// Settings used when the codec is `h264`
    pub h264: H264Config,
    /// Settings used when the codec is `vp8`
    pub vpx: VpxConfig,
}

/// H.264 encoder settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct H264Config {
    /// Constant rate factor
    pub crf: u8,
    /// x264 speed preset
    pub preset: String,
    /// H.264 profile name
    pub profile: String,
    /// x264 tuning name
    pub tune: String,
    /// x264 log verbosity
    pub log_level: i32,
}

/// VP8 encoder settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VpxConfig {
    /// Target bitrate in kbit/s
    pub bitrate: u32,
    /// Frames between forced keyframes
    pub keyframe_interval: u32,
}

/// Emulator runtime settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmulatorConfig {
    /// Output frame scale factor
    pub scale: u32,
    /// Output aspect ratio override
    pub aspect_ratio: AspectRatioConfig,
    /// Save-state and ROM storage directory. May contain the `{user}` tag.
    pub storage: String,
    /// Libretro core settings
    pub libretro: LibretroConfig,
}

/// Output aspect ratio
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AspectRatioConfig {
    /// Keep the aspect ratio instead of the core output
    pub keep: bool,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

/// Libretro settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LibretroConfig {
    /// Where cores are loaded from
    pub cores: CoresConfig,
}

/// Libretro core locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoresConfig {
    /// Local core directories
    pub paths: CorePathsConfig,
    /// Remote repository the cores are downloaded from
    pub repo: String,
}

/// Local core directories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorePathsConfig {
    /// Directory holding the core libraries
    pub libs: String,
    /// Directory holding per-core option files
    pub configs: String,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Dev,
    /// Pre-production deployment
    Staging,
    /// Production deployment
    Prod,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dev => write!(f, "dev"),
            Self::Staging => write!(f, "staging"),
            Self::Prod => write!(f, "prod"),
        }
    }
}

/// Worker process settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkerConfig {
    /// Monitoring server settings
    pub monitoring: MonitoringConfig,
    /// Coordinator connection settings
    pub network: NetworkConfig,
    /// HTTP(S) server settings
    pub server: ServerConfig,
}

/// Monitoring server settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitoringConfig {
    /// Monitoring server port
    pub port: u16,
    /// Path prefix for monitoring endpoints
    pub url_prefix: String,
    /// Expose metrics
    pub metric_enabled: bool,
    /// Expose profiling endpoints
    pub profiling_enabled: bool,
}

/// Coordinator connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Address of the coordinator the worker registers with
    pub coordinator_address: String,
    /// Network zone identifier, e.g. `us` or `eu`
    pub zone: String,
}

/// HTTP(S) server settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// Plain HTTP listen address (host:port)
    pub address: String,
    /// Serve HTTPS instead of plain HTTP
    pub https: bool,
    /// HTTPS listen port
    pub https_port: u16,
    /// Path to the TLS private key
    pub https_key: String,
    /// Path to the TLS certificate chain
    pub https_chain: String,
}

/// WebRTC transport settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebrtcConfig {
    /// Skip the default WebRTC interceptors
    pub disable_default_interceptors: bool,
    /// DTLS role, 0 lets the stack decide
    pub dtls_role: u8,
    /// STUN and TURN servers offered to peers
    pub ice_servers: Vec<IceServerConfig>,
    /// Ephemeral UDP port range for ICE
    pub ice_ports: IcePortsConfig,
    /// Public IP announced in ICE candidates
    pub ice_ip_map: String,
    /// Multiplex all peers over one UDP port when non-zero
    pub single_port: u16,
    /// WebRTC stack log verbosity
    pub log_level: i32,
}

/// One ICE (STUN or TURN) server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IceServerConfig {
    /// Server URL, e.g. `stun:stun.l.google.com:19302`
    pub urls: String,
    /// TURN username
    pub username: String,
    /// TURN credential
    pub credential: String,
}

/// Inclusive UDP port range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IcePortsConfig {
    /// Lowest port
    pub min: u16,
    /// Highest port
    pub max: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_not_loaded() {
        let config = Config::empty();
        assert!(!config.is_loaded());
        assert_eq!(config, Config::default());
        assert!(config.emulator.storage.is_empty());
        assert_eq!(config.environment, Environment::Dev);
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
emulator:
  scale: 2
  storage: /data/roms
  aspectRatio:
    keep: true
    width: 320
    height: 240
environment: staging
worker:
  monitoring:
    port: 6601
  network:
    coordinatorAddress: coordinator.local:8000
    zone: eu
  server:
    address: ":9000"
    httpsPort: 443
webrtc:
  iceServers:
    - urls: stun:stun.l.google.com:19302
  icePorts:
    min: 8000
    max: 8100
"#;

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.emulator.scale, 2);
        assert_eq!(config.emulator.storage, "/data/roms");
        assert!(config.emulator.aspect_ratio.keep);
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.worker.monitoring.port, 6601);
        assert_eq!(
            config.worker.network.coordinator_address,
            "coordinator.local:8000"
        );
        assert_eq!(config.worker.network.zone, "eu");
        assert_eq!(config.worker.server.https_port, 443);
        assert_eq!(config.webrtc.ice_servers.len(), 1);
        assert_eq!(config.webrtc.ice_ports.max, 8100);
        assert!(!config.loaded, "parsing alone never marks a config loaded");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let yaml = "coordinator:\n  port: 8000\nworker:\n  network:\n    zone: us\n";
        let config: Config = serde_yaml::from_str(yaml).expect("unknown keys should be ignored");
        assert_eq!(config.worker.network.zone, "us");
    }

    #[test]
    fn test_loaded_key_in_document_is_ignored() {
        let config: Config = serde_yaml::from_str("loaded: true").expect("YAML should parse");
        assert!(!config.loaded);
    }

    #[test]
    fn test_sample_yaml_parses_back_to_default() {
        let sample = Config::sample_yaml();
        assert!(sample.contains("coordinatorAddress"));

        let config: Config = serde_yaml::from_str(&sample).expect("sample should parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Dev.to_string(), "dev");
        assert_eq!(Environment::Staging.to_string(), "staging");
        assert_eq!(Environment::Prod.to_string(), "prod");
    }
}
