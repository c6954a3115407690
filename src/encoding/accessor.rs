use serde_json::Value;

use crate::core::Datum;

use super::ChannelDef;

/// Pulls the raw channel value out of a data row.
#[derive(Debug, Clone, PartialEq)]
pub enum Accessor {
    /// Dotted field path, e.g. `"stats.mean"` → `["stats", "mean"]`.
    Field(Vec<String>),
    Constant(Value),
}

impl Accessor {
    #[must_use]
    pub fn from_channel_def(definition: &ChannelDef) -> Self {
        match definition {
            ChannelDef::Constant(def) => Self::Constant(def.value.clone()),
            ChannelDef::Field(_) | ChannelDef::Band(_) => {
                let field = definition
                    .field_def()
                    .map(|def| def.field.as_str())
                    .unwrap_or_default();
                Self::Field(field.split('.').map(str::to_owned).collect())
            }
        }
    }

    /// Missing fields yield `Value::Null`; this never fails.
    #[must_use]
    pub fn get(&self, datum: &Datum) -> Value {
        match self {
            Self::Constant(value) => value.clone(),
            Self::Field(path) => {
                let Some((head, tail)) = path.split_first() else {
                    return Value::Null;
                };
                // An exact key containing dots wins over nested lookup.
                if !tail.is_empty() {
                    let joined = path.join(".");
                    if let Some(value) = datum.get(&joined) {
                        return value.clone();
                    }
                }
                let mut current = match datum.get(head) {
                    Some(value) => value,
                    None => return Value::Null,
                };
                for key in tail {
                    current = match current {
                        Value::Object(map) => match map.get(key) {
                            Some(value) => value,
                            None => return Value::Null,
                        },
                        Value::Array(items) => {
                            match key.parse::<usize>().ok().and_then(|i| items.get(i)) {
                                Some(value) => value,
                                None => return Value::Null,
                            }
                        }
                        _ => return Value::Null,
                    };
                }
                current.clone()
            }
        }
    }
}
