//! Serde Helpers

use serde::{Deserialize, Deserializer};

/// Decode an explicit `null` as the type's default value.
///
/// Store rows carry `null` for every optional column, which `#[serde(default)]`
/// alone does not cover.
///
/// # Errors
///
/// Returns the deserializer's error when the value is neither `null` nor a `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Amounts written as JSON integers when they are whole, floats otherwise.
///
/// Integer store columns reject `1200.0`, so whole amounts must not carry a
/// fractional part on the wire.
pub mod amount {
    use rust_decimal::{Decimal, prelude::ToPrimitive};
    use serde::{Deserializer, Serializer, ser::Error};

    /// Serialize an amount.
    ///
    /// # Errors
    ///
    /// Returns an error when the amount has no `f64` representation.
    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let normalized = amount.normalize();

        if normalized.scale() == 0
            && let Some(whole) = normalized.to_i64()
        {
            return serializer.serialize_i64(whole);
        }

        let float = normalized
            .to_f64()
            .ok_or_else(|| S::Error::custom("amount out of range"))?;

        serializer.serialize_f64(float)
    }

    /// Deserialize an amount from a number or numeric string.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is not numeric.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer)
    }
}

/// Optional amounts, see [`amount`].
pub mod amount_option {
    use rust_decimal::Decimal;
    use serde::{Deserializer, Serializer};

    /// Serialize an optional amount, `None` as `null`.
    ///
    /// # Errors
    ///
    /// Returns an error when the amount has no `f64` representation.
    #[expect(clippy::ref_option, reason = "serde `with` passes fields by reference")]
    pub fn serialize<S: Serializer>(
        amount: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match amount {
            Some(amount) => super::amount::serialize(amount, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional amount, `null` as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is neither `null` nor numeric.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        rust_decimal::serde::float_option::deserialize(deserializer)
    }
}
