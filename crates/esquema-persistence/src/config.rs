//! Carga de configuración de conexión desde variables de entorno.
//!
//! Convención: `DATABASE_URL` (o `DB_CONNECTION_STRING`) se usa tal cual si
//! existe; si no, la cadena se arma con `DB_HOST`, `DB_PORT`, `DB_NAME`,
//! `DB_USER`, `DB_PASSWORD` y `DB_SSLMODE`. En ambos casos, si la cadena no
//! fija `sslmode`, se agrega el de `DB_SSLMODE` (por defecto `require`).

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use thiserror::Error;
use url::Url;

use esquema_core::model::is_valid_identifier;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() { Lazy::force(&DOTENV_LOADED); }

const SSL_MODES: &[&str] = &["disable", "allow", "prefer", "require", "verify-ca", "verify-full"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("valor inválido para {key}: '{value}' ({reason})")]
    Invalid { key: String, value: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, value: &str, reason: &str) -> Self {
        Self::Invalid { key: key.into(), value: value.into(), reason: reason.into() }
    }
}

/// Destino de la conexión.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// URI `postgres://` provista por el entorno.
    Uri(Url),
    /// Cadena libpq `clave=valor` provista por el entorno.
    Conninfo(String),
    Params {
        host: String,
        port: u16,
        dbname: String,
        user: String,
        password: Option<String>,
        sslmode: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub target: ConnectionTarget,
    pub connect_timeout_secs: u32,
    /// Schema destino; distinto de `public` implica `CREATE SCHEMA IF NOT EXISTS` + `search_path`.
    pub schema: String,
    pub application_name: String,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero leyendo de una función arbitraria (pruebas).
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let sslmode = non_empty("DB_SSLMODE").unwrap_or_else(|| "require".into());
        if !SSL_MODES.contains(&sslmode.as_str()) {
            return Err(ConfigError::invalid("DB_SSLMODE", &sslmode, "modo sslmode de libpq desconocido"));
        }

        let provided = non_empty("DATABASE_URL").map(|v| ("DATABASE_URL", v))
                                                .or_else(|| non_empty("DB_CONNECTION_STRING").map(|v| ("DB_CONNECTION_STRING", v)));
        let target = match provided {
            Some((key, raw)) if is_uri(&raw) => {
                let mut url = Url::parse(&raw).map_err(|e| ConfigError::invalid(key, "****", &format!("URI inválida: {e}")))?;
                if !url.query_pairs().any(|(k, _)| k == "sslmode") {
                    url.query_pairs_mut().append_pair("sslmode", &sslmode);
                }
                ConnectionTarget::Uri(url)
            }
            Some((_, raw)) => {
                if conninfo_pairs(&raw).iter().any(|(k, _)| k == "sslmode") {
                    ConnectionTarget::Conninfo(raw)
                } else {
                    ConnectionTarget::Conninfo(format!("{} sslmode={sslmode}", raw.trim_end()))
                }
            }
            None => {
                let port_raw = non_empty("DB_PORT").unwrap_or_else(|| "5432".into());
                let port = port_raw.parse::<u16>()
                                   .map_err(|_| ConfigError::invalid("DB_PORT", &port_raw, "se espera un puerto 1-65535"))?;
                ConnectionTarget::Params { host: non_empty("DB_HOST").unwrap_or_else(|| "localhost".into()),
                                           port,
                                           dbname: non_empty("DB_NAME").unwrap_or_else(|| "postgres".into()),
                                           user: non_empty("DB_USER").unwrap_or_else(|| "postgres".into()),
                                           password: get("DB_PASSWORD"),
                                           sslmode }
            }
        };

        let timeout_raw = non_empty("DB_CONNECT_TIMEOUT").unwrap_or_else(|| "30".into());
        let connect_timeout_secs = timeout_raw.parse::<u32>()
                                              .map_err(|_| ConfigError::invalid("DB_CONNECT_TIMEOUT", &timeout_raw, "se esperan segundos"))?;

        let cfg = Self { target,
                         connect_timeout_secs,
                         schema: "public".into(),
                         application_name: "esquema-bootstrap".into() };
        let cfg = match non_empty("DB_SCHEMA") {
            Some(schema) => cfg.with_schema(&schema)?,
            None => cfg,
        };
        match non_empty("DB_APPLICATION_NAME") {
            Some(name) => cfg.with_application_name(&name),
            None => Ok(cfg),
        }
    }

    pub fn with_schema(mut self, schema: &str) -> Result<Self, ConfigError> {
        if !is_valid_identifier(schema) {
            return Err(ConfigError::invalid("DB_SCHEMA", schema, "se espera [a-z_][a-z0-9_]*"));
        }
        self.schema = schema.to_string();
        Ok(self)
    }

    pub fn with_application_name(mut self, name: &str) -> Result<Self, ConfigError> {
        let ok = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !ok {
            return Err(ConfigError::invalid("DB_APPLICATION_NAME", name, "solo alfanuméricos, '-' y '_'"));
        }
        self.application_name = name.to_string();
        Ok(self)
    }

    pub fn uses_default_schema(&self) -> bool { self.schema == "public" }

    /// Cadena para libpq (`PgConnection::establish`).
    pub fn connection_string(&self) -> String { self.render(false) }

    /// Igual que `connection_string` pero con la contraseña oculta, apta para logs.
    pub fn safe_connection_string(&self) -> String { self.render(true) }

    fn render(&self, redact: bool) -> String {
        match &self.target {
            ConnectionTarget::Uri(url) => {
                let mut url = url.clone();
                if redact {
                    redact_uri(&mut url);
                }
                url.query_pairs_mut()
                   .append_pair("connect_timeout", &self.connect_timeout_secs.to_string())
                   .append_pair("application_name", &self.application_name);
                url.to_string()
            }
            ConnectionTarget::Conninfo(conninfo) => {
                let base = if redact { redact_conninfo(conninfo) } else { conninfo.clone() };
                format!("{base} connect_timeout={} application_name={}",
                        self.connect_timeout_secs, self.application_name)
            }
            ConnectionTarget::Params { host, port, dbname, user, password, sslmode } => {
                let mut parts = vec![format!("host={}", conninfo_value(host)),
                                     format!("port={port}"),
                                     format!("dbname={}", conninfo_value(dbname)),
                                     format!("user={}", conninfo_value(user))];
                if let Some(pw) = password {
                    let shown = if redact { "****".to_string() } else { conninfo_value(pw) };
                    parts.push(format!("password={shown}"));
                }
                parts.push(format!("sslmode={sslmode}"));
                parts.push(format!("connect_timeout={}", self.connect_timeout_secs));
                parts.push(format!("application_name={}", self.application_name));
                parts.join(" ")
            }
        }
    }
}

fn is_uri(s: &str) -> bool { s.starts_with("postgres://") || s.starts_with("postgresql://") }

/// Valor de conninfo `clave=valor`: se cita si hace falta, escapando `\` y `'`.
fn conninfo_value(v: &str) -> String {
    let plain = !v.is_empty() && !v.chars().any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if plain {
        v.to_string()
    } else {
        format!("'{}'", v.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

/// Oculta la contraseña de una URI, tanto en `user:pass@` como en `?password=`.
fn redact_uri(url: &mut Url) {
    if url.password().is_some() {
        // sólo falla en URIs sin host, que libpq tampoco acepta
        let _ = url.set_password(Some("****"));
    }
    if url.query_pairs().any(|(k, _)| k == "password") {
        let pairs: Vec<(String, String)> = url.query_pairs()
                                              .map(|(k, v)| {
                                                  let v = if k == "password" { "****".to_string() } else { v.into_owned() };
                                                  (k.into_owned(), v)
                                              })
                                              .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

/// Reescribe una cadena `clave=valor` con el valor de `password` oculto.
fn redact_conninfo(conninfo: &str) -> String {
    conninfo_pairs(conninfo).into_iter()
                            .map(|(k, v)| if k == "password" { "password=****".to_string() } else { format!("{k}={v}") })
                            .collect::<Vec<_>>()
                            .join(" ")
}

/// Separa una cadena libpq en pares `(clave, valor tal como está escrito)`.
/// Respeta valores entre comillas simples y escapes con `\`.
fn conninfo_pairs(conninfo: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut chars = conninfo.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }
        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| *c != '=' && !c.is_whitespace()) {
            key.push(c);
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        chars.next_if_eq(&'=');
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut value = String::new();
        if let Some(quote) = chars.next_if_eq(&'\'') {
            value.push(quote);
            while let Some(c) = chars.next() {
                value.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        value.push(escaped);
                    }
                } else if c == '\'' {
                    break;
                }
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                value.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        value.push(escaped);
                    }
                }
            }
        }
        pairs.push((key, value));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn params_default_to_tls_required() {
        let cfg = DbConfig::from_lookup(lookup(&[("DB_HOST", "db.example"), ("DB_PASSWORD", "s3cr3t")])).unwrap();
        assert_eq!(cfg.connection_string(),
                   "host=db.example port=5432 dbname=postgres user=postgres password=s3cr3t sslmode=require connect_timeout=30 application_name=esquema-bootstrap");
        assert!(!cfg.safe_connection_string().contains("s3cr3t"));
        assert!(cfg.uses_default_schema());
    }

    #[test]
    fn url_takes_precedence_and_is_redacted() {
        let cfg = DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://app:pw@h:5432/db?sslmode=require"),
                                                 ("DB_HOST", "ignored")])).unwrap();
        assert_eq!(cfg.connection_string(),
                   "postgres://app:pw@h:5432/db?sslmode=require&connect_timeout=30&application_name=esquema-bootstrap");
        assert_eq!(cfg.safe_connection_string(),
                   "postgres://app:****@h:5432/db?sslmode=require&connect_timeout=30&application_name=esquema-bootstrap");
    }

    #[test]
    fn url_without_sslmode_requires_tls() {
        let cfg = DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://app:pw@h:5432/db")])).unwrap();
        assert_eq!(cfg.connection_string(),
                   "postgres://app:pw@h:5432/db?sslmode=require&connect_timeout=30&application_name=esquema-bootstrap");

        let cfg = DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgresql://h/db"), ("DB_SSLMODE", "verify-full")])).unwrap();
        assert!(cfg.connection_string().contains("sslmode=verify-full"));
    }

    #[test]
    fn explicit_url_sslmode_is_kept() {
        let cfg = DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://h/db?sslmode=disable")])).unwrap();
        let s = cfg.connection_string();
        assert!(s.contains("sslmode=disable"));
        assert!(!s.contains("sslmode=require"));
    }

    #[test]
    fn url_query_password_is_redacted() {
        let cfg = DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://app@h/db?password=s3cr3t")])).unwrap();
        let safe = cfg.safe_connection_string();
        assert!(!safe.contains("s3cr3t"), "{safe}");
        assert!(cfg.connection_string().contains("password=s3cr3t"));
    }

    #[test]
    fn connection_string_alias() {
        let cfg = DbConfig::from_lookup(lookup(&[("DB_CONNECTION_STRING", "host=h password=x")])).unwrap();
        assert_eq!(cfg.target, ConnectionTarget::Conninfo("host=h password=x sslmode=require".into()));
        assert_eq!(cfg.safe_connection_string(),
                   "host=h password=**** sslmode=require connect_timeout=30 application_name=esquema-bootstrap");
    }

    #[test]
    fn conninfo_with_sslmode_is_kept() {
        let cfg = DbConfig::from_lookup(lookup(&[("DB_CONNECTION_STRING", "host=h sslmode = verify-ca")])).unwrap();
        assert_eq!(cfg.target, ConnectionTarget::Conninfo("host=h sslmode = verify-ca".into()));
    }

    #[test]
    fn quoted_conninfo_password_is_fully_redacted() {
        let cfg = DbConfig::from_lookup(lookup(&[("DB_CONNECTION_STRING", r"host=h password='top secret\'s' user=app")])).unwrap();
        let safe = cfg.safe_connection_string();
        assert_eq!(safe,
                   "host=h password=**** user=app sslmode=require connect_timeout=30 application_name=esquema-bootstrap");
        assert!(!safe.contains("secret"));
    }

    #[test]
    fn quotes_conninfo_values() {
        let cfg = DbConfig::from_lookup(lookup(&[("DB_PASSWORD", "it's a pw")])).unwrap();
        assert!(cfg.connection_string().contains(r"password='it\'s a pw'"));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(DbConfig::from_lookup(lookup(&[("DB_PORT", "99999")])), Err(ConfigError::Invalid { .. })));
        assert!(matches!(DbConfig::from_lookup(lookup(&[("DB_SSLMODE", "maybe")])), Err(ConfigError::Invalid { .. })));
        assert!(matches!(DbConfig::from_lookup(lookup(&[("DB_SCHEMA", "Mi Schema")])), Err(ConfigError::Invalid { .. })));
        assert!(matches!(DbConfig::from_lookup(lookup(&[("DB_APPLICATION_NAME", "a b")])), Err(ConfigError::Invalid { .. })));
        assert!(matches!(DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://[::1")])),
                         Err(ConfigError::Invalid { ref key, .. }) if key == "DATABASE_URL"));
    }

    #[test]
    fn custom_schema() {
        let cfg = DbConfig::from_lookup(lookup(&[("DB_SCHEMA", "plataforma")])).unwrap();
        assert_eq!(cfg.schema, "plataforma");
        assert!(!cfg.uses_default_schema());
    }
}
