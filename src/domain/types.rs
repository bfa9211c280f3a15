//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, check-digit validated tax ids) so that once a
//! value reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Tax id did not have the expected length or check digits.
    #[error("invalid tax id")]
    InvalidTaxId,
    /// Postal code was not made of eight digits.
    #[error("invalid postal code")]
    InvalidPostalCode,
    /// Unknown client kind code or name.
    #[error("invalid client kind: {0}")]
    InvalidClientKind(String),
    /// Unknown service order status.
    #[error("invalid service order status: {0}")]
    InvalidServiceOrderStatus(String),
    /// Monetary amount below zero.
    #[error("amount cannot be negative")]
    NegativeAmount,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Keeps only ASCII digits, dropping punctuation such as `.`, `-` and `/`.
fn only_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a customer.");
id_newtype!(AddressId, "Unique identifier for a client address.");
id_newtype!(CityId, "Unique identifier for a city.");
id_newtype!(StateId, "Unique identifier for a federative state.");
id_newtype!(ServiceOrderId, "Unique identifier for a service order.");

/// Lower-cased and validated client email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClientEmail(String);

impl ClientEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ClientEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ClientEmail {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ClientEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientEmail> for String {
    fn from(value: ClientEmail) -> Self {
        value.0
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
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
    };
}

non_empty_string_newtype!(ClientName, "Customer name wrapper enforcing non-empty values.");

non_empty_string_newtype!(
    PhoneNumber,
    "Contact phone wrapper enforcing trimmed, non-empty values."
);

non_empty_string_newtype!(Street, "Street name of an address.");

non_empty_string_newtype!(
    StreetNumber,
    "House or building number; free text since values like `s/n` are common."
);

non_empty_string_newtype!(District, "Neighbourhood (bairro) of an address.");

non_empty_string_newtype!(
    ServiceDescription,
    "Description of the work requested in a service order."
);

/// Brazilian postal code (CEP) stored as eight digits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Strips punctuation and requires exactly eight digits.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let digits = only_digits(&value.into());
        if digits.len() != 8 {
            return Err(TypeConstraintError::InvalidPostalCode);
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PostalCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Legal category of a client.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClientKind {
    /// Natural person, identified by a CPF.
    Individual,
    /// Company, identified by a CNPJ.
    Organization,
}

impl ClientKind {
    /// Numeric code used by the legacy API (`1` individual, `2` organization).
    pub const fn code(self) -> i32 {
        match self {
            ClientKind::Individual => 1,
            ClientKind::Organization => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ClientKind::Individual => "individual",
            ClientKind::Organization => "organization",
        }
    }

    /// Number of digits of the tax id carried by this kind of client.
    const fn tax_id_len(self) -> usize {
        match self {
            ClientKind::Individual => 11,
            ClientKind::Organization => 14,
        }
    }
}

impl Display for ClientKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClientKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "individual" | "pessoa_fisica" | "pessoafisica" => Ok(ClientKind::Individual),
            "2" | "organization" | "pessoa_juridica" | "pessoajuridica" => {
                Ok(ClientKind::Organization)
            }
            other => Err(TypeConstraintError::InvalidClientKind(other.to_string())),
        }
    }
}

impl TryFrom<i32> for ClientKind {
    type Error = TypeConstraintError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ClientKind::Individual),
            2 => Ok(ClientKind::Organization),
            other => Err(TypeConstraintError::InvalidClientKind(other.to_string())),
        }
    }
}

/// Computes a mod-11 check digit over `digits` with the given weights.
fn mod11_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

fn valid_cpf(digits: &[u32]) -> bool {
    const FIRST: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
    const SECOND: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

    mod11_check_digit(&digits[..9], &FIRST) == digits[9]
        && mod11_check_digit(&digits[..10], &SECOND) == digits[10]
}

fn valid_cnpj(digits: &[u32]) -> bool {
    const FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    mod11_check_digit(&digits[..12], &FIRST) == digits[12]
        && mod11_check_digit(&digits[..13], &SECOND) == digits[13]
}

/// Tax identifier: an 11-digit CPF or a 14-digit CNPJ, stored without
/// punctuation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaxId(String);

impl TaxId {
    /// Strips punctuation and validates length and check digits.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = only_digits(&value.into());
        let digits: Vec<u32> = normalized.chars().filter_map(|c| c.to_digit(10)).collect();

        if digits.windows(2).all(|pair| pair[0] == pair[1]) {
            return Err(TypeConstraintError::InvalidTaxId);
        }

        let valid = match digits.len() {
            11 => valid_cpf(&digits),
            14 => valid_cnpj(&digits),
            _ => false,
        };

        if valid {
            Ok(Self(normalized))
        } else {
            Err(TypeConstraintError::InvalidTaxId)
        }
    }

    /// Validates the tax id and checks it matches the document type of `kind`.
    pub fn for_kind<S: Into<String>>(value: S, kind: ClientKind) -> Result<Self, TypeConstraintError> {
        let tax_id = Self::new(value)?;
        if tax_id.0.len() == kind.tax_id_len() {
            Ok(tax_id)
        } else {
            Err(TypeConstraintError::InvalidTaxId)
        }
    }

    /// Returns `true` for an 11-digit CPF.
    pub fn is_cpf(&self) -> bool {
        self.0.len() == 11
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for TaxId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TaxId {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for TaxId {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaxId> for String {
    fn from(value: TaxId) -> Self {
        value.0
    }
}

/// Non-negative price expressed in cents.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriceCents(i64);

impl PriceCents {
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value < 0 {
            Err(TypeConstraintError::NegativeAmount)
        } else {
            Ok(Self(value))
        }
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}
