use serde::Deserialize;

/// Settings of the catalog server, read from `config/*.yaml` and `APP_*`
/// environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the remote catalog store, e.g. `https://store.example/`.
    pub api_base_url: String,
    /// Image hosting upload endpoint.
    pub image_upload_url: String,
    pub image_api_key: String,
    /// Phone number receiving order messages.
    pub order_phone: String,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Cookie signing secret, at least 32 bytes.
    pub secret: String,
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

impl ServerConfig {
    pub fn bind_address(&self) -> (String, u16) {
        (self.address.clone(), self.port)
    }

    /// Glob Tera loads templates from.
    pub fn templates_glob(&self) -> String {
        format!("{}/**/*", self.templates_dir.trim_end_matches('/'))
    }
}
