use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub realtime: RealtimeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub pin: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            pin: "4242".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WhatsAppConfig {
    pub phone: String,
    /// Empty key disables the channel.
    pub api_key: String,
    #[serde(default = "default_whatsapp_base_url")]
    pub base_url: String,
}

fn default_whatsapp_base_url() -> String {
    "https://api.callmebot.com/whatsapp.php".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MailConfig {
    pub api_url: String,
    /// Empty key disables the channel.
    pub api_key: String,
    pub from_address: String,
    pub to_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub uploads_dir: String,
    pub orders_log: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: "uploads".to_string(),
            orders_log: "logs/orders.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    pub channel_capacity: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Missing file is fine: run entirely from env vars and defaults.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str)
                    .map_err(|e| format!("Failed to parse config file: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8001u16),
                    },
                    database: DatabaseConfig {
                        url: get_env("DATABASE_URL")
                            .unwrap_or_else(|| "sqlite://meathub.db?mode=rwc".to_string()),
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    admin: AdminConfig {
                        pin: get_env("ADMIN_PIN").unwrap_or_else(|| "4242".to_string()),
                    },
                    whatsapp: WhatsAppConfig {
                        phone: get_env("WHATSAPP_PHONE").unwrap_or_default(),
                        api_key: get_env("WHATSAPP_API_KEY").unwrap_or_default(),
                        base_url: get_env("WHATSAPP_BASE_URL")
                            .unwrap_or_else(default_whatsapp_base_url),
                    },
                    mail: MailConfig {
                        api_url: get_env("MAIL_API_URL").unwrap_or_default(),
                        api_key: get_env("MAIL_API_KEY").unwrap_or_default(),
                        from_address: get_env("MAIL_FROM_ADDRESS").unwrap_or_default(),
                        to_address: get_env("MAIL_TO_ADDRESS").unwrap_or_default(),
                    },
                    storage: StorageConfig {
                        uploads_dir: get_env("UPLOADS_DIR").unwrap_or_else(|| "uploads".to_string()),
                        orders_log: get_env("ORDERS_LOG")
                            .unwrap_or_else(|| "logs/orders.txt".to_string()),
                    },
                    realtime: RealtimeConfig {
                        channel_capacity: get_env_parse("REALTIME_CHANNEL_CAPACITY", 256usize),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Env vars override the file when both are present.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("ADMIN_PIN") {
            config.admin.pin = v;
        }
        if let Ok(v) = env::var("WHATSAPP_PHONE") {
            config.whatsapp.phone = v;
        }
        if let Ok(v) = env::var("WHATSAPP_API_KEY") {
            config.whatsapp.api_key = v;
        }
        if let Ok(v) = env::var("WHATSAPP_BASE_URL") {
            config.whatsapp.base_url = v;
        }
        if let Ok(v) = env::var("MAIL_API_URL") {
            config.mail.api_url = v;
        }
        if let Ok(v) = env::var("MAIL_API_KEY") {
            config.mail.api_key = v;
        }
        if let Ok(v) = env::var("MAIL_FROM_ADDRESS") {
            config.mail.from_address = v;
        }
        if let Ok(v) = env::var("MAIL_TO_ADDRESS") {
            config.mail.to_address = v;
        }
        if let Ok(v) = env::var("UPLOADS_DIR") {
            config.storage.uploads_dir = v;
        }
        if let Ok(v) = env::var("ORDERS_LOG") {
            config.storage.orders_log = v;
        }
        if let Ok(v) = env::var("REALTIME_CHANNEL_CAPACITY")
            && let Ok(n) = v.parse()
        {
            config.realtime.channel_capacity = n;
        }

        Ok(config)
    }
}
