//! Widget configuration supplied by the host page.
//!
//! The host may embed a JSON document in
//! `<script id="bv-chat-config" type="application/json">`. Every field is
//! optional; absent fields take the defaults below.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "/api/chat/";
pub const DEFAULT_PRODUCT_PATH: &str = "/producto/{id}/";
pub const DEFAULT_AUTO_OPEN_DELAY_MS: u32 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 20_000;
pub const DEFAULT_THOUSANDS_SEPARATOR: char = '.';

/// Element id of the optional inline JSON config.
pub const CONFIG_ELEMENT_ID: &str = "bv-chat-config";

/// Placeholder substituted with the product id in `product_path`.
pub const PRODUCT_ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Chat endpoint receiving `POST { message }`.
    pub endpoint: String,
    /// Product detail path template; must contain `{id}`.
    pub product_path: String,
    /// Delay before the panel opens by itself.
    pub auto_open_delay_ms: u32,
    /// Upper bound on a single chat call.
    pub request_timeout_ms: u32,
    pub thousands_separator: char,
    pub copy: WidgetCopy,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            product_path: DEFAULT_PRODUCT_PATH.to_owned(),
            auto_open_delay_ms: DEFAULT_AUTO_OPEN_DELAY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            thousands_separator: DEFAULT_THOUSANDS_SEPARATOR,
            copy: WidgetCopy::default(),
        }
    }
}

/// Fixed display strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetCopy {
    pub greeting: String,
    pub thinking: String,
    pub transport_error: String,
    pub connection_error: String,
    pub done: String,
    pub no_matches: String,
    pub input_placeholder: String,
    pub send_label: String,
    pub toggle_label: String,
}

impl Default for WidgetCopy {
    fn default() -> Self {
        Self {
            greeting: "¡Bienvenido! Estoy aquí para ayudarte a encontrar la pieza de cerámica perfecta. \
                       Cuéntame qué buscas (ej: “matera amarilla para regalo”)."
                .to_owned(),
            thinking: "Estoy pensando…".to_owned(),
            transport_error: "Ocurrió un error. ¿Intentamos otra vez?".to_owned(),
            connection_error: "No pude conectarme ahora. Intenta de nuevo.".to_owned(),
            done: "Listo.".to_owned(),
            no_matches: "No encontré coincidencias exactas. ¿Quieres probar otro color o tipo?".to_owned(),
            input_placeholder: "Escribe tu mensaje…".to_owned(),
            send_label: "Enviar".to_owned(),
            toggle_label: "Asistente".to_owned(),
        }
    }
}

impl WidgetConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a field fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde defaults cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "endpoint", reason: "must not be empty".into() });
        }
        if !self.product_path.contains(PRODUCT_ID_PLACEHOLDER) {
            return Err(ConfigError::Invalid {
                field: "product_path",
                reason: format!("must contain {PRODUCT_ID_PLACEHOLDER}"),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid { field: "request_timeout_ms", reason: "must be positive".into() });
        }
        if self.thousands_separator.is_ascii_digit() {
            return Err(ConfigError::Invalid { field: "thousands_separator", reason: "must not be a digit".into() });
        }
        Ok(())
    }

    /// Load the config from the host page, falling back to defaults.
    pub fn load() -> Self {
        let Some(raw) = read_inline_config() else {
            return Self::default();
        };
        Self::from_json_or_default(&raw)
    }

    /// Parse `raw`, logging and falling back to defaults when it is invalid.
    pub fn from_json_or_default(raw: &str) -> Self {
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("bv-chat: {e}; using default config");
                Self::default()
            }
        }
    }
}

fn read_inline_config() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let doc = web_sys::window()?.document()?;
        let el = doc.get_element_by_id(CONFIG_ELEMENT_ID)?;
        el.text_content().filter(|text| !text.trim().is_empty())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}
