use crate::{Error, ErrorLevel, Result, debug};
use serde_json::{Value, json};
use std::{collections::HashMap, path::Path};

/// Level and option of one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig {
    pub level: ErrorLevel,
    /// Rule-specific option, `Value::Null` when none was given.
    pub option: Value,
}

impl RuleConfig {
    pub fn new(level: ErrorLevel) -> Self {
        Self {
            level,
            option: Value::Null,
        }
    }

    pub fn with_option(level: ErrorLevel, option: Value) -> Self {
        Self { level, option }
    }

    /// Parse `level`, `[level, option]` or `{ "level": ..., "option": ... }`.
    fn from_raw(raw: &Value) -> Result<Self> {
        match raw {
            Value::Array(parts) => {
                let level = parts
                    .first()
                    .ok_or_else(|| Error::Config("empty rule setting".into()))?;
                Ok(Self::with_option(
                    ErrorLevel::from_value(level)?,
                    parts.get(1).cloned().unwrap_or(Value::Null),
                ))
            }
            Value::Object(map) => {
                let level = map
                    .get("level")
                    .ok_or_else(|| Error::Config("rule setting without a level".into()))?;
                Ok(Self::with_option(
                    ErrorLevel::from_value(level)?,
                    map.get("option").cloned().unwrap_or(Value::Null),
                ))
            }
            level => Ok(Self::new(ErrorLevel::from_value(level)?)),
        }
    }
}

/// Rule name to rule setting. Names no rule answers to are kept but inert.
#[derive(Debug, Clone, PartialEq)]
pub struct LintConfig {
    pub rules: HashMap<String, RuleConfig>,
}

impl Default for LintConfig {
    /// Every rule at `error`, keywords upper case.
    fn default() -> Self {
        Self::from_raw(&default_raw_config()).unwrap_or_else(|_| Self::empty())
    }
}

/// The raw form of the default configuration.
pub fn default_raw_config() -> Value {
    json!({
        "rules": {
            "align-column-to-the-first": "error",
            "column-new-line": "error",
            "linebreak-after-clause-keyword": "error",
            "reserved-word-case": { "level": "error", "option": "upper" },
            "space-surrounding-operators": "error",
            "where-clause-new-line": "error",
            "align-where-clause-to-the-first": "error"
        }
    })
}

impl LintConfig {
    /// No rule enabled.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Parse `{ "rules": { name: setting, ... } }`.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        let rules = raw
            .get("rules")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::Config("expected an object with a `rules` map".into()))?;
        let rules = rules
            .iter()
            .map(|(name, setting)| Ok((name.clone(), RuleConfig::from_raw(setting)?)))
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { rules })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_raw(&serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading lint configuration from {}", path.display());
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn rule(&self, name: &str) -> Option<&RuleConfig> {
        self.rules.get(name)
    }

    /// Add or replace one rule setting.
    pub fn with_rule(mut self, name: impl Into<String>, rule: RuleConfig) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }
}
