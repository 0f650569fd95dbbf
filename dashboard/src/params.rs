//! FILENAME: dashboard/src/params.rs
//! PURPOSE: The six named filter parameters a dashboard request carries.
//! CONTEXT: Values arrive as plain strings (query-string style). Absent,
//! empty and wildcard values all mean "do not filter"; that decision lives
//! in `filters`, not here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub org: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
    pub month: Option<String>,
    pub humanitarian: Option<String>,
    pub strict: Option<String>,
}

impl FilterParams {
    /// Builds parameters from key/value pairs. The first occurrence of a key
    /// wins; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = FilterParams::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "org" => &mut params.org,
                "sector" => &mut params.sector,
                "country" => &mut params.country,
                "month" => &mut params.month,
                "humanitarian" => &mut params.humanitarian,
                "strict" => &mut params.strict,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            "org" => &self.org,
            "sector" => &self.sector,
            "country" => &self.country,
            "month" => &self.month,
            "humanitarian" => &self.humanitarian,
            "strict" => &self.strict,
            _ => return None,
        };
        value.as_deref()
    }
}
