//! INI file configuration adapter.

use crate::domain::error::GemError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GemError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| GemError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, GemError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| GemError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const GEM_INI: &str = r#"
[data]
path = /var/lib/gem/monthly

[instruments]
domestic_equity = SPY
international_equity = ACWX
defensive = BND

[momentum]
horizons = 3m:3, 6m:6, 12m:12
precision = 6

[backtest]
start_date = 2015-01-01
periods_per_year = 12.0
skip_failed_steps = yes
"#;

    #[test]
    fn from_string_reads_every_section() {
        let adapter = FileConfigAdapter::from_string(GEM_INI).unwrap();
        assert_eq!(
            adapter.get_string("data", "path"),
            Some("/var/lib/gem/monthly".to_string())
        );
        assert_eq!(
            adapter.get_string("instruments", "international_equity"),
            Some("ACWX".to_string())
        );
        assert_eq!(
            adapter.get_string("momentum", "horizons"),
            Some("3m:3, 6m:6, 12m:12".to_string())
        );
        assert_eq!(
            adapter.get_string("backtest", "skip_failed_steps"),
            Some("yes".to_string())
        );
    }

    #[test]
    fn get_string_missing_or_blank_is_none() {
        let adapter = FileConfigAdapter::from_string("[decision]\ndate =\n").unwrap();
        assert_eq!(adapter.get_string("decision", "date"), None);
        assert_eq!(adapter.get_string("decision", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_string_trims_values() {
        let adapter =
            FileConfigAdapter::from_string("[backtest]\nperiods_per_year =   52  \n").unwrap();
        assert_eq!(
            adapter.get_string("backtest", "periods_per_year"),
            Some("52".to_string())
        );
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config(GEM_INI);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("instruments", "defensive"),
            Some("BND".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/gem.ini");
        match result {
            Err(GemError::ConfigParse { file, .. }) => assert!(file.contains("gem.ini")),
            _ => panic!("expected ConfigParse error"),
        }
    }
}
