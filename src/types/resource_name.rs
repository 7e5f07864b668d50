// ABOUTME: Validated ARM path segments: subscription, resource group, service, app, deployment.
// ABOUTME: Each kind carries its own naming rule so segments cannot be swapped or malformed.

use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceNameError {
    #[error("{kind} name cannot be empty")]
    Empty { kind: &'static str },

    #[error("{kind} name exceeds maximum length of {max} characters")]
    TooLong { kind: &'static str, max: usize },

    #[error("{kind} name cannot start with a hyphen")]
    StartsWithHyphen { kind: &'static str },

    #[error("{kind} name cannot end with '{ch}'")]
    BadEnding { kind: &'static str, ch: char },

    #[error("invalid character in {kind} name: '{ch}'")]
    InvalidChar { kind: &'static str, ch: char },
}

/// Naming rule for one kind of ARM path segment.
///
/// The defaults describe Spring Cloud services, apps and deployments: ASCII
/// alphanumerics and inner hyphens, at most 63 characters.
pub trait NameKind {
    const KIND: &'static str;
    const MAX_LEN: usize = 63;

    fn allowed(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '-'
    }

    fn check_edges(value: &str) -> Result<(), ResourceNameError> {
        if value.starts_with('-') {
            return Err(ResourceNameError::StartsWithHyphen { kind: Self::KIND });
        }
        if value.ends_with('-') {
            return Err(ResourceNameError::BadEnding {
                kind: Self::KIND,
                ch: '-',
            });
        }
        Ok(())
    }
}

pub enum SubscriptionKind {}
pub enum ResourceGroupKind {}
pub enum ServiceKind {}
pub enum AppKind {}
pub enum DeploymentKind {}

/// Subscriptions are GUIDs, so the default alphabet applies with more room.
impl NameKind for SubscriptionKind {
    const KIND: &'static str = "subscription";
    const MAX_LEN: usize = 64;
}

/// Resource groups allow letters, digits, `-`, `_`, `.`, `(` and `)` but may not end
/// with a period.
impl NameKind for ResourceGroupKind {
    const KIND: &'static str = "resource group";
    const MAX_LEN: usize = 90;

    fn allowed(ch: char) -> bool {
        ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.' | '(' | ')')
    }

    fn check_edges(value: &str) -> Result<(), ResourceNameError> {
        if value.ends_with('.') {
            return Err(ResourceNameError::BadEnding {
                kind: Self::KIND,
                ch: '.',
            });
        }
        Ok(())
    }
}

impl NameKind for ServiceKind {
    const KIND: &'static str = "service";
}

impl NameKind for AppKind {
    const KIND: &'static str = "app";
}

impl NameKind for DeploymentKind {
    const KIND: &'static str = "deployment";
}

/// A resource name that is safe to embed in a management API path.
pub struct ResourceName<K> {
    value: String,
    _kind: PhantomData<K>,
}

impl<K: NameKind> ResourceName<K> {
    pub fn new(value: &str) -> Result<Self, ResourceNameError> {
        let kind = K::KIND;

        if value.is_empty() {
            return Err(ResourceNameError::Empty { kind });
        }

        if value.chars().count() > K::MAX_LEN {
            return Err(ResourceNameError::TooLong {
                kind,
                max: K::MAX_LEN,
            });
        }

        if let Some(ch) = value.chars().find(|c| !K::allowed(*c)) {
            return Err(ResourceNameError::InvalidChar { kind, ch });
        }

        K::check_edges(value)?;

        Ok(Self::unchecked(value.to_string()))
    }
}

impl<K> ResourceName<K> {
    /// Wrap a name reported by the management service itself.
    pub(crate) fn unchecked(value: String) -> Self {
        Self {
            value,
            _kind: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<K> fmt::Debug for ResourceName<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceName").field(&self.value).finish()
    }
}

impl<K> Clone for ResourceName<K> {
    fn clone(&self) -> Self {
        Self::unchecked(self.value.clone())
    }
}

impl<K> PartialEq for ResourceName<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K> Eq for ResourceName<K> {}

impl<K> PartialEq<str> for ResourceName<K> {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl<K> fmt::Display for ResourceName<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

pub type SubscriptionId = ResourceName<SubscriptionKind>;
pub type ResourceGroupName = ResourceName<ResourceGroupKind>;
pub type ServiceName = ResourceName<ServiceKind>;
pub type AppName = ResourceName<AppKind>;
pub type DeploymentName = ResourceName<DeploymentKind>;
