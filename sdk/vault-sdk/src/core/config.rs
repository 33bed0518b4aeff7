use crate::core::constants::{DEFAULT_PROGRAM_ID, DEFAULT_RPC_URL};
use crate::error::{Result, VaultSdkError};
use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const ENV_RPC_URL: &str = "VAULT_RPC_URL";
pub const ENV_PROGRAM_ID: &str = "VAULT_PROGRAM_ID";
pub const ENV_KEYPAIR: &str = "VAULT_KEYPAIR";
pub const ENV_COMMITMENT: &str = "VAULT_COMMITMENT";

/// Everything a vault client needs to reach one deployed program instance.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    pub program_id: Pubkey,
    pub rpc_url: String,
    pub keypair_path: PathBuf,
    pub commitment: CommitmentConfig,
    /// Delay between signature status polls
    pub poll_interval: Duration,
    /// Upper bound on confirmation polling
    pub confirm_timeout: Duration,
}

/// On-disk form of [`VaultConfig`]. Every field is optional; missing fields
/// keep their defaults.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VaultConfigFile {
    pub program_id: Option<String>,
    pub rpc_url: Option<String>,
    pub keypair_path: Option<PathBuf>,
    pub commitment: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub confirm_timeout_ms: Option<u64>,
}

fn default_keypair_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config/solana/id.json")
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            program_id: DEFAULT_PROGRAM_ID,
            rpc_url: DEFAULT_RPC_URL.to_string(),
            keypair_path: default_keypair_path(),
            commitment: CommitmentConfig::confirmed(),
            poll_interval: Duration::from_millis(500),
            confirm_timeout: Duration::from_secs(60),
        }
    }
}

impl VaultConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            VaultSdkError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: VaultConfigFile =
            toml::from_str(raw).map_err(|e| VaultSdkError::Config(e.to_string()))?;
        Self::default().merge(file)
    }

    /// Overlays the values present in `file` onto `self`.
    pub fn merge(mut self, file: VaultConfigFile) -> Result<Self> {
        if let Some(program_id) = file.program_id {
            self.program_id = parse_program_id(&program_id)?;
        }
        if let Some(rpc_url) = file.rpc_url {
            self.rpc_url = rpc_url;
        }
        if let Some(keypair_path) = file.keypair_path {
            self.keypair_path = keypair_path;
        }
        if let Some(commitment) = file.commitment {
            self.commitment = parse_commitment(&commitment)?;
        }
        if let Some(ms) = file.poll_interval_ms {
            self.poll_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = file.confirm_timeout_ms {
            self.confirm_timeout = Duration::from_millis(ms);
        }
        Ok(self)
    }

    /// Applies `VAULT_*` environment overrides.
    pub fn apply_env(self) -> Result<Self> {
        let file = VaultConfigFile {
            program_id: std::env::var(ENV_PROGRAM_ID).ok(),
            rpc_url: std::env::var(ENV_RPC_URL).ok(),
            keypair_path: std::env::var(ENV_KEYPAIR).ok().map(PathBuf::from),
            commitment: std::env::var(ENV_COMMITMENT).ok(),
            ..Default::default()
        };
        self.merge(file)
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    pub fn with_keypair_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.keypair_path = path.into();
        self
    }
}

pub fn parse_program_id(raw: &str) -> Result<Pubkey> {
    Pubkey::from_str(raw.trim())
        .map_err(|e| VaultSdkError::Config(format!("invalid program id '{}': {}", raw, e)))
}

pub fn parse_commitment(raw: &str) -> Result<CommitmentConfig> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(VaultSdkError::Config(format!(
            "unknown commitment level '{}'",
            other
        ))),
    }
}
