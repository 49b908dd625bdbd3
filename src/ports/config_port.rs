//! Configuration access port.

/// Section/key lookups. Absent or blank values are `None`; typed parsing
/// happens in `domain::config_validation`.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
