//! Inherited logger context.

use std::sync::Arc;

use serde::ser::SerializeMap;

use crate::fields::{Fields, DANGLING_ARG, INVALID_KEY_TYPE};

/// Context key holding the group label.
pub const GROUP_KEY: &str = "group";

/// Context key holding fields added by `with`.
pub const ADDITIONAL_INFO_KEY: &str = "additionalInfo";

#[derive(Debug, Default)]
struct Inner {
    group: Option<String>,
    additional: Option<Fields>,
}

/// Fields a logger carries into every record it emits.
///
/// Shared between clones; deriving copies the entries into a new allocation
/// so holders of the parent never observe the child's additions.
#[derive(Debug, Clone, Default)]
pub struct Context {
    inner: Arc<Inner>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self) -> Option<&str> {
        self.inner.group.as_deref()
    }

    /// Fields under `additionalInfo`, in the order they were added.
    pub fn additional_info(&self) -> Option<&Fields> {
        self.inner.additional.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.group.is_none() && self.inner.additional.is_none()
    }

    /// Child context with `group` set to `name`, replacing any outer label.
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            inner: Arc::new(Inner {
                group: Some(name.to_string()),
                additional: self.inner.additional.clone(),
            }),
        }
    }

    /// Child context with `extra` merged into `additionalInfo`.
    ///
    /// Keys already present take the new value in place. Sentinel entries
    /// always append, so no malformed input recorded earlier is lost.
    pub fn with_additional(&self, extra: &Fields) -> Self {
        let mut additional = self.inner.additional.clone().unwrap_or_default();
        for (k, v) in extra.iter() {
            if k == INVALID_KEY_TYPE || k == DANGLING_ARG {
                additional.push(k, v.clone());
            } else {
                additional.set(k, v.clone());
            }
        }
        Self {
            inner: Arc::new(Inner {
                group: self.inner.group.clone(),
                additional: Some(additional),
            }),
        }
    }

    /// Write the context entries into an open serde map.
    pub(crate) fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        if let Some(group) = &self.inner.group {
            map.serialize_entry(GROUP_KEY, group)?;
        }
        if let Some(additional) = &self.inner.additional {
            map.serialize_entry(ADDITIONAL_INFO_KEY, additional)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::normalize;
    use serde_json::{json, Value};

    fn entries(fields: &Fields) -> Vec<(String, Value)> {
        fields.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_group_overwrites() {
        let root = Context::new();
        let outer = root.with_group("api");
        let inner = outer.with_group("db");

        assert!(root.is_empty());
        assert_eq!(outer.group(), Some("api"));
        assert_eq!(inner.group(), Some("db"));
        assert!(inner.additional_info().is_none());
    }

    #[test]
    fn test_additional_info_merges() {
        let first = Context::new().with_additional(&normalize(&crate::args![
            "request_id", "r1", "user", "alice"
        ]));
        let second = first.with_additional(&normalize(&crate::args!["user", "bob", "attempt", 2]));

        assert_eq!(
            entries(first.additional_info().unwrap()),
            vec![
                ("request_id".to_string(), json!("r1")),
                ("user".to_string(), json!("alice")),
            ]
        );
        assert_eq!(
            entries(second.additional_info().unwrap()),
            vec![
                ("request_id".to_string(), json!("r1")),
                ("user".to_string(), json!("bob")),
                ("attempt".to_string(), json!(2)),
            ]
        );
    }

    #[test]
    fn test_additional_info_keeps_every_sentinel() {
        let ctx = Context::new().with_additional(&normalize(&crate::args![1, 2, 3]));
        let ctx = ctx.with_additional(&normalize(&crate::args![4, "tail"]));

        assert_eq!(
            entries(ctx.additional_info().unwrap()),
            vec![
                (INVALID_KEY_TYPE.to_string(), json!(1)),
                (INVALID_KEY_TYPE.to_string(), json!(2)),
                (DANGLING_ARG.to_string(), json!(3)),
                (INVALID_KEY_TYPE.to_string(), json!(4)),
                (DANGLING_ARG.to_string(), json!("tail")),
            ]
        );
    }

    #[test]
    fn test_group_and_additional_survive_each_other() {
        let ctx = Context::new()
            .with_additional(&normalize(&crate::args!["k", "v"]))
            .with_group("api");
        assert_eq!(ctx.group(), Some("api"));
        assert_eq!(ctx.additional_info().unwrap().get("k"), Some(&json!("v")));
    }

    #[test]
    fn test_empty_additional_info_is_an_empty_object() {
        let ctx = Context::new().with_additional(&Fields::new());
        assert!(ctx.additional_info().unwrap().is_empty());
        assert_eq!(serde_json::to_string(ctx.additional_info().unwrap()).unwrap(), "{}");
    }
}
