use serde::{Deserialize, Serialize};

/// School-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolConfig {
    /// School name.
    pub name: String,
    /// Current term label.
    pub term: String,
    /// Address that receives notifications.
    pub email: String,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            name: "EduPulse International".to_string(),
            term: "Spring 2024".to_string(),
            email: "admin@edupulse.edu".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchoolConfig::default();
        assert_eq!(config.name, "EduPulse International");
        assert_eq!(config.term, "Spring 2024");
        assert_eq!(config.email, "admin@edupulse.edu");
    }
}
