//! Shape checks for nested property blocks.
//!
//! Wrappers accept nested blocks such as subnet delegations as free-form
//! values, and forgetting the `properties` wrapper is a common mistake that
//! the deployment engine only reports at apply time. Each shape has a
//! predicate and an assert form that fails with a fixed remediation message.

use serde_json::Value;

use crate::core::SynthError;

const DELEGATION_SHAPE: &str = "subnet delegation";
const DELEGATION_FIX: &str = "a delegation needs a 'name' and a 'properties' object with a 'serviceName', \
     e.g. {\"name\": \"web\", \"properties\": {\"serviceName\": \"Microsoft.Web/serverFarms\"}}";

const SECURITY_RULE_SHAPE: &str = "security rule";
const SECURITY_RULE_FIX: &str = "a security rule needs a 'name' and a 'properties' object with \
     'priority', 'direction', 'access' and 'protocol'";

const SECURITY_RULE_FIELDS: &[&str] = &["priority", "direction", "access", "protocol"];

/// Whether `value` is a well-formed subnet delegation.
#[must_use]
pub fn is_subnet_delegation(value: &Value) -> bool {
    has_name(value)
        && value
            .get("properties")
            .and_then(|props| props.get("serviceName"))
            .and_then(Value::as_str)
            .is_some_and(|service| !service.is_empty())
}

/// Fail unless `value` is a well-formed subnet delegation.
pub fn assert_subnet_delegation(value: &Value) -> Result<(), SynthError> {
    if is_subnet_delegation(value) {
        Ok(())
    } else {
        Err(invalid(DELEGATION_SHAPE, DELEGATION_FIX))
    }
}

/// Whether `value` is a well-formed inline security rule.
#[must_use]
pub fn is_security_rule(value: &Value) -> bool {
    has_name(value)
        && value
            .get("properties")
            .and_then(Value::as_object)
            .is_some_and(|props| SECURITY_RULE_FIELDS.iter().all(|field| props.contains_key(*field)))
}

/// Fail unless `value` is a well-formed inline security rule.
pub fn assert_security_rule(value: &Value) -> Result<(), SynthError> {
    if is_security_rule(value) {
        Ok(())
    } else {
        Err(invalid(SECURITY_RULE_SHAPE, SECURITY_RULE_FIX))
    }
}

fn has_name(value: &Value) -> bool {
    value.get("name").and_then(Value::as_str).is_some_and(|name| !name.is_empty())
}

fn invalid(shape: &str, reason: &str) -> SynthError {
    SynthError::InvalidShape {
        shape: shape.to_string(),
        reason: reason.to_string(),
    }
}
