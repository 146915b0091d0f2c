use std::fs;
use std::path::Path;

use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::billing::Invoicing;
use crate::error::InvoiceError;
use crate::fakturoid::Credentials;
use crate::subject::Subjects;

/// Settings read once at startup, every section is required.
///
/// ```text
/// ((fakturoid (slug . "acme") (email . "me@example.com") (api-key . "..."))
///  (subjects (fcs . 123) (be . 456))
///  (invoicing (include-vat . #t)))
/// ```
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub fakturoid: Credentials,
    pub subjects: Subjects,
    pub invoicing: Invoicing,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, InvoiceError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            InvoiceError::Configuration {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        Self::parse(path, &raw)
    }

    pub fn parse(path: &Path, raw: &str) -> Result<Self, InvoiceError> {
        let invalid = |reason: String| InvoiceError::Configuration {
            path: path.to_path_buf(),
            reason,
        };
        let config: Self =
            serde_lexpr::from_str(raw).map_err(|e| invalid(e.to_string()))?;

        if config.fakturoid.slug.trim().is_empty() {
            return Err(invalid("fakturoid slug is empty".to_string()));
        }
        if config.fakturoid.email.trim().is_empty() {
            return Err(invalid("fakturoid email is empty".to_string()));
        }
        if config.fakturoid.api_key.expose_secret().trim().is_empty() {
            return Err(invalid("fakturoid api-key is empty".to_string()));
        }
        Ok(config)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use const_format::formatcp;

    use crate::fakturoid::DEFAULT_BASE_URL;

    const FAKTUROID_RAW: &str = "(fakturoid (slug . \"acme\") \
         (email . \"me@example.com\") \
         (api-key . \"s3cret\"))";

    const SUBJECTS_RAW: &str = "(subjects (fcs . 11) (be . 22))";

    pub const CONFIG_STR: &str = formatcp!(
        "({}\n {}\n (invoicing (include-vat . #t)))",
        FAKTUROID_RAW,
        SUBJECTS_RAW
    );

    fn parse(raw: &str) -> Result<Config, InvoiceError> {
        Config::parse(Path::new("config.lexpr"), raw)
    }

    #[test]
    fn parse_full() {
        let config = parse(CONFIG_STR).unwrap();
        assert_eq!(config.fakturoid.slug, "acme");
        assert_eq!(config.fakturoid.email, "me@example.com");
        assert_eq!(config.fakturoid.api_key.expose_secret(), "s3cret");
        assert_eq!(config.fakturoid.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.subjects, Subjects { fcs: 11, be: 22 });
        assert!(config.invoicing.include_vat);
    }

    #[test]
    fn base_url_override() {
        let raw = formatcp!(
            "((fakturoid (slug . \"acme\") (email . \"me@example.com\") \
               (api-key . \"s3cret\") (base-url . \"http://localhost:8080\"))\n \
              {}\n (invoicing (include-vat . #f)))",
            SUBJECTS_RAW
        );
        let config = parse(raw).unwrap();
        assert_eq!(config.fakturoid.base_url, "http://localhost:8080");
        assert!(!config.invoicing.include_vat);
    }

    #[test]
    fn missing_subject() {
        let raw = formatcp!(
            "({}\n (subjects (fcs . 11))\n (invoicing (include-vat . #t)))",
            FAKTUROID_RAW
        );
        assert!(matches!(
            parse(raw),
            Err(InvoiceError::Configuration { .. })
        ));
    }

    #[test]
    fn missing_section() {
        let raw = formatcp!("({}\n {})", FAKTUROID_RAW, SUBJECTS_RAW);
        assert!(matches!(
            parse(raw),
            Err(InvoiceError::Configuration { .. })
        ));
    }

    #[test]
    fn empty_slug() {
        let raw = formatcp!(
            "((fakturoid (slug . \"\") (email . \"me@example.com\") \
               (api-key . \"s3cret\"))\n {}\n (invoicing (include-vat . #t)))",
            SUBJECTS_RAW
        );
        let err = parse(raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error in config.lexpr: fakturoid slug is empty"
        );
    }

    #[test]
    fn empty_api_key() {
        let raw = formatcp!(
            "((fakturoid (slug . \"acme\") (email . \"me@example.com\") \
               (api-key . \"  \"))\n {}\n (invoicing (include-vat . #t)))",
            SUBJECTS_RAW
        );
        let err = parse(raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error in config.lexpr: fakturoid api-key is empty"
        );
    }

    #[test]
    fn missing_file() {
        let err = Config::load(Path::new("does/not/exist.lexpr")).unwrap_err();
        assert!(matches!(err, InvoiceError::Configuration { .. }));
    }
}
