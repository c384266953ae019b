//! Gadget values and stub converters for exercising conversion managers.
//!
//! [`Gadget`] is a small polymorphic base with two concrete members, [`Alpha`]
//! and [`Beta`], plus an [`Orphan`] that no converter handles. [`Scripted`]
//! is an initial converter whose predicates are fixed up front and which
//! counts how often it converts.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use trove::{
    AdditiveSerializer, AsAny, ConditionalConverter, ConfigNode, ConversionContext,
    ConversionManager, ConversionManagerBuilder, Deserializer, KeyedConverter, Subtype,
    TroveResult, additive, deserializer, node,
};

/// Base trait of the gadget family.
pub trait Gadget: AsAny + fmt::Debug {
    /// Short description used in assertions.
    fn describe(&self) -> String;
}

/// Gadget carrying a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alpha {
    /// Serialized as the `label` field.
    pub label: String,
}

impl Alpha {
    /// An alpha gadget labelled `label`.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Gadget for Alpha {
    fn describe(&self) -> String {
        format!("alpha:{}", self.label)
    }
}

impl Subtype<dyn Gadget> for Alpha {
    fn upcast(self) -> Box<dyn Gadget> {
        Box::new(self)
    }
}

/// Gadget carrying a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Beta {
    /// Serialized as the `weight` field.
    pub weight: i64,
}

impl Gadget for Beta {
    fn describe(&self) -> String {
        format!("beta:{}", self.weight)
    }
}

impl Subtype<dyn Gadget> for Beta {
    fn upcast(self) -> Box<dyn Gadget> {
        Box::new(self)
    }
}

/// Gadget no converter is registered for.
#[derive(Clone, Copy, Debug)]
pub struct Orphan;

impl Gadget for Orphan {
    fn describe(&self) -> String {
        "orphan".to_owned()
    }
}

/// Keyed converter for [`Alpha`] under `key`.
#[must_use]
pub fn alpha(key: &str) -> KeyedConverter<Alpha> {
    KeyedConverter::join(
        key,
        additive(|gadget: &Alpha, result: &mut ConfigNode, _: &ConversionContext| {
            node::set(node::child_mut(result, "label"), gadget.label.as_str());
            Ok(())
        }),
        deserializer(|input: &ConfigNode, _: &ConversionContext| {
            Ok(Alpha::new(node::require_str(input, "label")?))
        }),
    )
}

/// Keyed converter for [`Beta`] under `key`.
#[must_use]
pub fn beta(key: &str) -> KeyedConverter<Beta> {
    KeyedConverter::join(
        key,
        additive(|gadget: &Beta, result: &mut ConfigNode, _: &ConversionContext| {
            node::set(node::child_mut(result, "weight"), gadget.weight);
            Ok(())
        }),
        deserializer(|input: &ConfigNode, _: &ConversionContext| {
            Ok(Beta {
                weight: node::optional_i64(input, "weight", 0)?,
            })
        }),
    )
}

/// A builder for the gadget family with [`alpha`] and [`beta`] registered
/// under `"alpha"` and `"beta"`, discriminated at `kind`.
#[must_use]
pub fn gadgets() -> ConversionManagerBuilder<dyn Gadget> {
    ConversionManager::<dyn Gadget>::builder()
        .key_location("kind")
        .add_converter(alpha("alpha"))
        .add_converter(beta("beta"))
}

/// Initial converter with fixed predicates.
///
/// Serializes every gadget as the string `"scripted"` and deserializes every
/// node as an [`Alpha`] labelled `"scripted"`.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    serializes: bool,
    deserializes: bool,
    conversions: Arc<AtomicUsize>,
}

impl Scripted {
    /// A converter answering `serializes` and `deserializes` to its two
    /// predicates.
    #[must_use]
    pub fn new(serializes: bool, deserializes: bool) -> Self {
        Self {
            serializes,
            deserializes,
            conversions: Arc::default(),
        }
    }

    /// Shared counter of conversions performed by this converter and its
    /// clones.
    #[must_use]
    pub fn conversions(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.conversions)
    }
}

impl AdditiveSerializer<Box<dyn Gadget>> for Scripted {
    fn serialize_onto(
        &self,
        _input: &Box<dyn Gadget>,
        result: &mut ConfigNode,
        _context: &ConversionContext,
    ) -> TroveResult<()> {
        self.conversions.fetch_add(1, Ordering::SeqCst);
        node::set(result, "scripted");
        Ok(())
    }
}

impl Deserializer<Box<dyn Gadget>> for Scripted {
    fn deserialize(
        &self,
        _node: &ConfigNode,
        _context: &ConversionContext,
    ) -> TroveResult<Box<dyn Gadget>> {
        self.conversions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(Alpha::new("scripted")))
    }
}

impl ConditionalConverter<Box<dyn Gadget>> for Scripted {
    fn can_serialize(&self, _input: &Box<dyn Gadget>, _context: &ConversionContext) -> bool {
        self.serializes
    }

    fn can_deserialize(&self, _node: &ConfigNode, _context: &ConversionContext) -> bool {
        self.deserializes
    }
}
