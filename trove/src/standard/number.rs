//! Number providers.

use std::{fmt, sync::Arc};

use rand::{Rng, distributions::Standard};

use super::{NUMBER_KEY_LOCATION, read, read_optional, repetitions, write};
use crate::{
    AsAny, ConditionalConverter, ConfigNode, ConversionContext, ConversionManager, Converter,
    GenerationContext, KeyedConverter, Subtype, TroveError, TroveResult, additive, conditional,
    deserializer, join, node, serializer,
};

/// A number drawn at generation time.
///
/// Providers answer in two views. The integer view of a fractional provider
/// is not necessarily the truncation of its float view, because each call may
/// draw again.
pub trait LootNumber: AsAny + fmt::Debug {
    /// Integer view.
    fn long(&self, context: &GenerationContext) -> i64;

    /// Floating-point view.
    fn double(&self, context: &GenerationContext) -> f64;
}

impl<N: LootNumber> Subtype<dyn LootNumber> for N {
    fn upcast(self) -> Box<dyn LootNumber> {
        Box::new(self)
    }
}

/// A fixed value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant {
    /// The value in both views; the integer view rounds it.
    pub value: f64,
}

impl Constant {
    /// Discriminator of serialized constants.
    pub const KEY: &'static str = "minecraft:constant";

    /// A constant holding `value`.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self { value }
    }
}

impl LootNumber for Constant {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float to int casts saturate at the i64 bounds"
    )]
    fn long(&self, _context: &GenerationContext) -> i64 {
        self.value.round() as i64
    }

    fn double(&self, _context: &GenerationContext) -> f64 {
        self.value
    }
}

/// A value drawn uniformly between two nested numbers.
#[derive(Debug)]
pub struct Uniform {
    /// Lower bound, inclusive.
    pub min: Box<dyn LootNumber>,
    /// Upper bound; inclusive in the integer view and exclusive in the float
    /// view.
    pub max: Box<dyn LootNumber>,
}

impl Uniform {
    /// Discriminator of serialized uniform numbers.
    pub const KEY: &'static str = "minecraft:uniform";
}

impl LootNumber for Uniform {
    fn long(&self, context: &GenerationContext) -> i64 {
        let low = self.min.long(context);
        let high = self.max.long(context);
        if low >= high {
            return low;
        }
        context.random().gen_range(low..=high)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the span must be finite before sampling between the bounds"
    )]
    fn double(&self, context: &GenerationContext) -> f64 {
        let low = self.min.double(context);
        let high = self.max.double(context);
        if low < high && (high - low).is_finite() {
            context.random().gen_range(low..high)
        } else {
            low
        }
    }
}

/// The number of successes among `n` trials that each succeed with
/// probability `p`.
#[derive(Debug)]
pub struct Binomial {
    /// Number of trials.
    pub n: Box<dyn LootNumber>,
    /// Chance of each trial succeeding.
    pub p: Box<dyn LootNumber>,
}

impl Binomial {
    /// Discriminator of serialized binomial numbers.
    pub const KEY: &'static str = "minecraft:binomial";
}

impl LootNumber for Binomial {
    fn long(&self, context: &GenerationContext) -> i64 {
        let trials = repetitions(self.n.long(context), "binomial trials");
        let chance = self.p.double(context);
        let mut random = context.random();
        let mut successes = 0;
        for _ in 0..trials {
            let roll: f64 = random.sample(Standard);
            if roll < chance {
                successes += 1;
            }
        }
        successes
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "success counts stay far below 2^52"
    )]
    fn double(&self, context: &GenerationContext) -> f64 {
        self.long(context) as f64
    }
}

/// An inclusive range with optional bounds drawn at generation time.
#[derive(Debug, Default)]
pub struct NumberRange {
    /// Lower bound, if any.
    pub min: Option<Box<dyn LootNumber>>,
    /// Upper bound, if any.
    pub max: Option<Box<dyn LootNumber>>,
}

impl NumberRange {
    /// A range holding exactly `value`.
    #[must_use]
    pub fn exactly(value: f64) -> Self {
        Self {
            min: Some(Box::new(Constant::new(value))),
            max: Some(Box::new(Constant::new(value))),
        }
    }

    /// Raise `value` to the minimum, then lower it to the maximum. The
    /// maximum wins when the bounds cross.
    #[must_use]
    pub fn limit(&self, value: i64, context: &GenerationContext) -> i64 {
        let raised = self
            .min
            .as_ref()
            .map_or(value, |min| value.max(min.long(context)));
        self.max
            .as_ref()
            .map_or(raised, |max| raised.min(max.long(context)))
    }
}

/// Converter for [`NumberRange`]s.
///
/// Reads maps with optional `min` and `max` numbers, and bare scalars as a
/// range holding only that value. Absent bounds are not written.
#[must_use]
pub fn ranges() -> impl Converter<NumberRange> {
    join(additive(write_range), deserializer(read_range))
}

fn write_range(
    range: &NumberRange,
    result: &mut ConfigNode,
    context: &ConversionContext,
) -> TroveResult<()> {
    if let Some(min) = &range.min {
        write(min, result, "min", context)?;
    }
    if let Some(max) = &range.max {
        write(max, result, "max", context)?;
    }
    Ok(())
}

fn read_range(node: &ConfigNode, context: &ConversionContext) -> TroveResult<NumberRange> {
    if let Some(value) = node.as_f64() {
        return Ok(NumberRange::exactly(value));
    }
    if !node.is_object() {
        return Err(TroveError::deserialization(
            "range",
            "expected a number or a map",
        ));
    }
    Ok(NumberRange {
        min: read_optional(node, "min", context)?,
        max: read_optional(node, "max", context)?,
    })
}

/// Manager for `dyn LootNumber`, discriminated at [`NUMBER_KEY_LOCATION`].
///
/// Bare numeric scalars read as [`Constant`]s and constants are written back
/// as bare scalars.
///
/// # Errors
///
/// Fails only if the registrations conflict.
pub fn numbers() -> TroveResult<ConversionManager<dyn LootNumber>> {
    ConversionManager::<dyn LootNumber>::builder()
        .key_location(NUMBER_KEY_LOCATION)
        .add_initial_converter(bare_constants())
        .add_converter(KeyedConverter::<Constant>::join(
            Constant::KEY,
            additive(write_constant),
            deserializer(read_constant),
        ))
        .add_converter(KeyedConverter::<Uniform>::join(
            Uniform::KEY,
            additive(write_uniform),
            deserializer(read_uniform),
        ))
        .add_converter(KeyedConverter::<Binomial>::join(
            Binomial::KEY,
            additive(write_binomial),
            deserializer(read_binomial),
        ))
        .build()
}

fn bare_constants() -> impl ConditionalConverter<Box<dyn LootNumber>> {
    conditional::<Box<dyn LootNumber>, _, _, _>(
        join(serializer(write_bare), deserializer(read_bare)),
        |number: &Box<dyn LootNumber>, _: &ConversionContext| {
            AsAny::as_any(&**number).is::<Constant>()
        },
        |node: &ConfigNode, _: &ConversionContext| node.is_number(),
    )
}

#[expect(
    clippy::borrowed_box,
    reason = "serializers of boxed values receive the box itself"
)]
fn write_bare(
    number: &Box<dyn LootNumber>,
    _context: &ConversionContext,
) -> TroveResult<ConfigNode> {
    let value: &dyn LootNumber = &**number;
    AsAny::as_any(value)
        .downcast_ref::<Constant>()
        .map(|constant| ConfigNode::from(constant.value))
        .ok_or_else(|| {
            Arc::new(TroveError::UnknownType {
                type_name: AsAny::type_tag(value).name(),
                base: std::any::type_name::<dyn LootNumber>(),
            })
        })
}

fn read_bare(node: &ConfigNode, _context: &ConversionContext) -> TroveResult<Box<dyn LootNumber>> {
    node.as_f64()
        .map(|value| -> Box<dyn LootNumber> { Box::new(Constant::new(value)) })
        .ok_or_else(|| TroveError::deserialization("value", "expected a number"))
}

fn write_constant(
    constant: &Constant,
    result: &mut ConfigNode,
    _context: &ConversionContext,
) -> TroveResult<()> {
    node::set(node::child_mut(result, "value"), constant.value);
    Ok(())
}

fn read_constant(node: &ConfigNode, _context: &ConversionContext) -> TroveResult<Constant> {
    Ok(Constant::new(node::require_f64(node, "value")?))
}

fn write_uniform(
    uniform: &Uniform,
    result: &mut ConfigNode,
    context: &ConversionContext,
) -> TroveResult<()> {
    write(&uniform.min, result, "min", context)?;
    write(&uniform.max, result, "max", context)
}

fn read_uniform(node: &ConfigNode, context: &ConversionContext) -> TroveResult<Uniform> {
    Ok(Uniform {
        min: read(node, "min", context)?,
        max: read(node, "max", context)?,
    })
}

fn write_binomial(
    binomial: &Binomial,
    result: &mut ConfigNode,
    context: &ConversionContext,
) -> TroveResult<()> {
    write(&binomial.n, result, "n", context)?;
    write(&binomial.p, result, "p", context)
}

fn read_binomial(node: &ConfigNode, context: &ConversionContext) -> TroveResult<Binomial> {
    Ok(Binomial {
        n: read(node, "n", context)?,
        p: read(node, "p", context)?,
    })
}
