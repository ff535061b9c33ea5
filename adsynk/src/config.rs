use serde::{Deserialize, Serialize};
use std::{env, fs, net::SocketAddr, str::FromStr};

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub http: Http,
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub registry: Registry,
    #[serde(default)]
    pub inserter: Inserter,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Http {
    #[serde(default = "default_http_listen")]
    pub listen: SocketAddr,
    #[serde(default)]
    pub cors: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Auth {
    #[serde(default)]
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default = "default_registry_url")]
    pub url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub timeout: RequestTimeout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inserter {
    #[serde(default = "default_inserter_url")]
    pub url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub timeout: RequestTimeout,
}

// milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestTimeout(pub u64);

impl Default for RequestTimeout {
    fn default() -> Self {
        RequestTimeout(10_000)
    }
}

impl Default for Http {
    fn default() -> Self {
        Self {
            listen: default_http_listen(),
            cors: Default::default(),
        }
    }
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            token: None,
            timeout: Default::default(),
        }
    }
}

impl Default for Inserter {
    fn default() -> Self {
        Self {
            url: default_inserter_url(),
            token: None,
            channel: None,
            timeout: Default::default(),
        }
    }
}

fn default_http_listen() -> SocketAddr {
    SocketAddr::from_str(&format!(
        "0.0.0.0:{}",
        env::var("PORT").unwrap_or(String::from("8899"))
    ))
    .expect("invalid listen address")
}

fn default_log_level() -> String {
    env::var("LOG_LEVEL").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug".to_string()
        } else {
            "info".to_string()
        }
    })
}

fn default_registry_url() -> String {
    String::from("http://localhost:9000")
}

fn default_inserter_url() -> String {
    String::from("http://localhost:9100")
}

impl Config {
    pub fn parse(path: Option<String>) -> Self {
        let result = fs::read_to_string(path.unwrap_or(String::from("adsynk.toml")))
            .or(fs::read_to_string("/etc/adsynk/adsynk.toml"))
            .unwrap_or("".to_string());
        let cfg: Self = toml::from_str(result.as_str()).expect("config parse error");
        match cfg.validate() {
            Ok(_) => cfg,
            Err(err) => panic!("config validate [{}]", err),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("registry", &self.registry.url),
            ("inserter", &self.inserter.url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!("{} url must be http(s): [{}]", name, url));
            }
            if url.ends_with('/') {
                return Err(anyhow::anyhow!(
                    "{} url must not end with '/': [{}]",
                    name,
                    url
                ));
            }
        }
        Ok(())
    }
}
