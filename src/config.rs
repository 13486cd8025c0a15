/*!
Layered client settings.

Precedence (highest first):
  1. CLI flags        (--server, --whatsapp, -H KEY=VALUE)
  2. Environment      (DRIVECMD_SERVER, DRIVECMD_WHATSAPP; blank values ignored)
  3. Config file      (--config / DRIVECMD_CONFIG; YAML by extension, else JSON)
  4. Defaults         (server = http://localhost:5000)

Headers merge: file entries first, CLI `-H` entries override by name.
*/

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::executor::{self, DEFAULT_SERVER, HttpExecutor, ServerSpec};

pub const ENV_SERVER: &str = "DRIVECMD_SERVER";
pub const ENV_WHATSAPP: &str = "DRIVECMD_WHATSAPP";
pub const ENV_CONFIG: &str = "DRIVECMD_CONFIG";

/// Contents of a config file. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub server: Option<String>,
    pub whatsapp_number: Option<String>,
    pub headers: Vec<String>,
    pub config_path: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSpec,
    pub whatsapp_number: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl Settings {
    /// Resolve from CLI overrides and the process environment.
    pub fn resolve(cli: CliOverrides) -> Result<Self> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    /// Resolve with an injectable environment lookup.
    pub fn resolve_with(cli: CliOverrides, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let config_path = cli.config_path.clone().or_else(|| env(ENV_CONFIG));
        let file = match &config_path {
            Some(p) => load_file(Path::new(p))?,
            None => FileSettings::default(),
        };

        let server_raw = cli
            .server
            .or_else(|| env(ENV_SERVER))
            .or(file.server)
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());
        let server = executor::parse_server(&server_raw)
            .with_context(|| format!("Failed to parse server: '{server_raw}'"))?;

        let whatsapp_number = cli
            .whatsapp_number
            .or_else(|| env(ENV_WHATSAPP))
            .or(file.whatsapp_number)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let mut headers = file.headers;
        for kv in &cli.headers {
            let (k, v) = parse_header_kv(kv)?;
            headers.insert(k, v);
        }

        tracing::debug!(
            server = %server,
            identity = whatsapp_number.is_some(),
            headers = headers.len(),
            config = config_path.as_deref().unwrap_or("-"),
            "settings resolved"
        );

        Ok(Settings {
            server,
            whatsapp_number,
            headers,
        })
    }

    /// HTTP executor carrying this identity and header set.
    pub fn executor(&self) -> Result<HttpExecutor> {
        let mut exec = HttpExecutor::new(self.server.clone());
        if let Some(n) = &self.whatsapp_number {
            exec = exec.with_identity(n.clone());
        }
        Ok(exec.with_headers(&self.headers)?)
    }
}

/// Split `KEY=VALUE`; key must be non-empty.
pub fn parse_header_kv(kv: &str) -> Result<(String, String)> {
    let Some((k, v)) = kv.split_once('=') else {
        bail!("invalid --header (expected KEY=VALUE): {kv}");
    };
    let key = k.trim();
    if key.is_empty() {
        bail!("invalid --header (empty key): {kv}");
    }
    Ok((key.to_string(), v.trim().to_string()))
}

/// Read a YAML (`.yaml`/`.yml`) or JSON config file.
pub fn load_file(path: &Path) -> Result<FileSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&raw).context("failed to parse YAML config file")
    } else {
        serde_json::from_str(&raw).context("failed to parse JSON config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    fn config_file(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_apply() {
        let s = Settings::resolve_with(CliOverrides::default(), env_of(&[])).unwrap();
        assert_eq!(s.server.base().as_str(), "http://localhost:5000/");
        assert!(s.whatsapp_number.is_none());
        assert!(s.headers.is_empty());
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let f = config_file(
            ".yaml",
            "server: http://file.example\nwhatsapp_number: '+3'\nheaders:\n  X-A: file\n  X-B: file\n",
        );
        let path = f.path().to_str().unwrap().to_string();

        let env = env_of(&[
            (ENV_SERVER, "http://env.example"),
            (ENV_WHATSAPP, "+2"),
            (ENV_CONFIG, path.as_str()),
        ]);
        let cli = CliOverrides {
            server: Some("http://cli.example".into()),
            headers: vec!["X-A=cli".into()],
            ..Default::default()
        };
        let s = Settings::resolve_with(cli, env).unwrap();
        assert_eq!(s.server.base().host_str(), Some("cli.example"));
        assert_eq!(s.whatsapp_number.as_deref(), Some("+2"));
        assert_eq!(s.headers.get("X-A").map(String::as_str), Some("cli"));
        assert_eq!(s.headers.get("X-B").map(String::as_str), Some("file"));
    }

    #[test]
    fn json_file_and_blank_env() {
        let f = config_file(".json", r#"{"server":"https://json.example/base","whatsapp_number":"+9"}"#);
        let env = env_of(&[(ENV_SERVER, "   ")]);
        let cli = CliOverrides {
            config_path: Some(f.path().to_str().unwrap().into()),
            ..Default::default()
        };
        let s = Settings::resolve_with(cli, env).unwrap();
        assert_eq!(s.server.base().as_str(), "https://json.example/base/");
        assert_eq!(s.whatsapp_number.as_deref(), Some("+9"));
    }

    #[test]
    fn unknown_config_keys_rejected() {
        let f = config_file(".json", r#"{"target":"x"}"#);
        let err = load_file(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("JSON"));
    }

    #[test]
    fn bad_server_is_reported() {
        let cli = CliOverrides {
            server: Some("ftp://nope".into()),
            ..Default::default()
        };
        let err = Settings::resolve_with(cli, env_of(&[])).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported scheme"));
    }

    #[test]
    fn header_kv_parsing() {
        assert_eq!(
            parse_header_kv(" X-Token = abc ").unwrap(),
            ("X-Token".to_string(), "abc".to_string())
        );
        assert!(parse_header_kv("novalue").is_err());
        assert!(parse_header_kv("=v").is_err());
    }

    #[test]
    fn executor_carries_identity() {
        let cli = CliOverrides {
            whatsapp_number: Some(" +15550001 ".into()),
            ..Default::default()
        };
        let s = Settings::resolve_with(cli, env_of(&[])).unwrap();
        assert_eq!(s.executor().unwrap().identity(), Some("+15550001"));
    }
}
