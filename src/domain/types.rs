//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw strings so that
//! identifiers, names and URLs are checked when they are built locally.
//! Values decoded from the remote catalog go through `serde(transparent)` and
//! are taken as the store sends them.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

macro_rules! string_newtype_common {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

/// Identifiers are opaque strings assigned by the remote store.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, rejecting blank values.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }
        }

        string_newtype_common!($name);
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }
        }

        string_newtype_common!($name);
    };
}

macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }
        }

        string_newtype_common!($name);
    };
}

id_newtype!(
    CategoryId,
    "Identifier of a category assigned by the remote store.",
    "category id"
);
id_newtype!(
    ProductId,
    "Identifier of a product assigned by the remote store.",
    "product id"
);

non_empty_string_newtype!(
    CategoryName,
    "Category name enforcing non-empty values.",
    "category name"
);
non_empty_string_newtype!(
    ProductName,
    "Product name enforcing non-empty values.",
    "product name"
);

url_string_newtype!(ImageUrl, "Publicly addressable image URL.", "image url");

/// Price exactly as entered or as returned by the store.
///
/// The store sends prices either as JSON numbers or strings; both are kept as
/// text and only interpreted when a number is needed.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PriceText(String);

impl PriceText {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer value using `parseInt` rules: leading whitespace is skipped,
    /// an optional sign and the leading decimal digits are read, anything
    /// after them is ignored. `None` stands for "not a number".
    pub fn as_integer(&self) -> Option<i64> {
        let rest = self.0.trim_start();
        let (negative, rest) = split_sign(rest);
        let digits = leading_digits(rest);
        if digits.is_empty() {
            return None;
        }
        let value = digits.parse::<i64>().ok()?;
        Some(if negative { -value } else { value })
    }

    /// Floating point value using `parseFloat` rules on the longest numeric
    /// prefix. `None` stands for "not a number".
    pub fn as_number(&self) -> Option<f64> {
        let text = self.0.trim_start();
        let (_, unsigned) = split_sign(text);
        let sign_len = text.len() - unsigned.len();

        let int_part = leading_digits(unsigned);
        let mut end = int_part.len();
        let mut frac_len = 0;
        if unsigned[end..].starts_with('.') {
            frac_len = leading_digits(&unsigned[end + 1..]).len();
            if !int_part.is_empty() || frac_len > 0 {
                end += 1 + frac_len;
            }
        }
        if int_part.is_empty() && frac_len == 0 {
            return None;
        }

        let exponent = &unsigned[end..];
        if exponent.starts_with(['e', 'E']) {
            let (_, exp_digits) = split_sign(&exponent[1..]);
            let digits = leading_digits(exp_digits).len();
            if digits > 0 {
                end += exponent.len() - exp_digits.len() + digits;
            }
        }

        text[..sign_len + end].parse::<f64>().ok()
    }
}

fn split_sign(value: &str) -> (bool, &str) {
    if let Some(rest) = value.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = value.strip_prefix('+') {
        (false, rest)
    } else {
        (false, value)
    }
}

fn leading_digits(value: &str) -> &str {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    &value[..end]
}

impl Display for PriceText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PriceText {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PriceText {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for PriceText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PriceVisitor;

        impl Visitor<'_> for PriceVisitor {
            type Value = PriceText;

            fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
                f.write_str("a price as a number or a string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(PriceText::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(PriceText(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(PriceText(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(PriceText(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(PriceText(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(PriceText::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(PriceText::default())
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}
