//! Host resource lookup for effects, transitions and animations.
//!
//! Callers name a resource either by its display name or by the host's
//! numeric resource id. Names resolve through built-in tables merged with
//! [`CatalogOverrides`] from configuration.

use draftkit_core::{CatalogOverrides, Micros};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Fallback effect, used for unknown effect names.
pub const DEFAULT_EFFECT: (&str, &str) = ("小花花", "7012933493663470088");
/// Fallback transition resource.
pub const DEFAULT_TRANSITION: (&str, &str) = ("闪黑", "6724239388189921806");

/// A resource named by display name or numeric resource id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    Name(String),
    ResourceId(u64),
}

impl From<&str> for ResourceRef {
    fn from(name: &str) -> Self {
        ResourceRef::Name(name.to_string())
    }
}

impl From<String> for ResourceRef {
    fn from(name: String) -> Self {
        ResourceRef::Name(name)
    }
}

impl From<u64> for ResourceRef {
    fn from(id: u64) -> Self {
        ResourceRef::ResourceId(id)
    }
}

/// Which slot of a segment an animation occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationType {
    /// Plays from the segment start.
    In,
    /// Ends at the segment end.
    Out,
    /// Caller-positioned.
    Group,
}

impl AnimationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationType::In => "in",
            AnimationType::Out => "out",
            AnimationType::Group => "group",
        }
    }
}

impl fmt::Display for AnimationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectData {
    pub resource_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionData {
    pub resource_id: String,
    pub name: String,
    pub duration: Micros,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationData {
    pub resource_id: String,
    pub name: String,
    pub animation_type: AnimationType,
    pub start: Micros,
    pub duration: Micros,
}

/// Name → resource-id tables.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    effects: BTreeMap<String, String>,
    transitions: BTreeMap<String, String>,
    animations_in: BTreeMap<String, String>,
    animations_out: BTreeMap<String, String>,
    animations_group: BTreeMap<String, String>,
}

impl ResourceCatalog {
    /// Built-in tables only.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        catalog
            .effects
            .insert(DEFAULT_EFFECT.0.to_string(), DEFAULT_EFFECT.1.to_string());
        catalog
            .transitions
            .insert(DEFAULT_TRANSITION.0.to_string(), DEFAULT_TRANSITION.1.to_string());
        catalog
    }

    /// Built-in tables with `overrides` merged on top.
    pub fn with_overrides(overrides: &CatalogOverrides) -> Self {
        let mut catalog = Self::builtin();
        let merge = |table: &mut BTreeMap<String, String>, extra: &BTreeMap<String, String>| {
            table.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        };
        merge(&mut catalog.effects, &overrides.effects);
        merge(&mut catalog.transitions, &overrides.transitions);
        merge(&mut catalog.animations_in, &overrides.animations_in);
        merge(&mut catalog.animations_out, &overrides.animations_out);
        merge(&mut catalog.animations_group, &overrides.animations_group);
        catalog
    }

    /// Resolve an effect.
    ///
    /// An unknown name falls back to the default effect, id and name both.
    pub fn effect(&self, resource: &ResourceRef) -> EffectData {
        match resource {
            ResourceRef::Name(name) => match self.effects.get(name) {
                Some(id) => EffectData {
                    resource_id: id.clone(),
                    name: name.clone(),
                },
                None => {
                    debug!(name = %name, "Unknown effect, using default");
                    EffectData {
                        resource_id: DEFAULT_EFFECT.1.to_string(),
                        name: DEFAULT_EFFECT.0.to_string(),
                    }
                }
            },
            ResourceRef::ResourceId(id) => EffectData {
                resource_id: id.to_string(),
                name: id.to_string(),
            },
        }
    }

    /// Resolve a transition.
    ///
    /// An unknown name keeps the caller's name with the default resource id.
    pub fn transition(&self, resource: &ResourceRef, duration: Micros) -> TransitionData {
        let (resource_id, name) = match resource {
            ResourceRef::Name(name) => (
                self.transitions
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_TRANSITION.1.to_string()),
                name.clone(),
            ),
            ResourceRef::ResourceId(id) => (id.to_string(), id.to_string()),
        };
        TransitionData {
            resource_id,
            name,
            duration,
        }
    }

    /// Resolve an animation of the given slot.
    ///
    /// An unknown name resolves to an empty resource id.
    pub fn animation(
        &self,
        resource: &ResourceRef,
        animation_type: AnimationType,
        start: Micros,
        duration: Micros,
    ) -> AnimationData {
        let (resource_id, name) = match resource {
            ResourceRef::Name(name) => {
                let table = match animation_type {
                    AnimationType::In => &self.animations_in,
                    AnimationType::Out => &self.animations_out,
                    AnimationType::Group => &self.animations_group,
                };
                (table.get(name).cloned().unwrap_or_default(), name.clone())
            }
            ResourceRef::ResourceId(id) => (id.to_string(), id.to_string()),
        };
        AnimationData {
            resource_id,
            name,
            animation_type,
            start,
            duration,
        }
    }
}
