//! Entity label normalization
//!
//! Detectors speak different label dialects (`"email"`, `"EMAIL"`,
//! `"credit_card"`). [`normalize_label`] folds them onto one uppercase
//! vocabulary. Labels outside the known table pass through uppercased, so a
//! novel detector label survives instead of collapsing into `MASKED`.

use serde::{Deserialize, Serialize};

/// Known entity labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    /// Telephone numbers
    Phone,
    /// Email addresses
    Email,
    /// Person names (single or full)
    Name,
    /// Street addresses
    Address,
    /// Payment card numbers
    CreditCard,
    /// Social Security Numbers
    Ssn,
    /// Postal codes
    Zipcode,
    /// Calendar dates
    Date,
    /// IPv4 addresses
    Ipv4,
    /// IPv6 addresses
    Ipv6,
    /// Web URLs
    Url,
    /// Catch-all for masked content of no specific type
    Masked,
}

impl EntityLabel {
    /// Every known label, in table order
    pub const ALL: [EntityLabel; 12] = [
        Self::Phone,
        Self::Email,
        Self::Name,
        Self::Address,
        Self::CreditCard,
        Self::Ssn,
        Self::Zipcode,
        Self::Date,
        Self::Ipv4,
        Self::Ipv6,
        Self::Url,
        Self::Masked,
    ];

    /// Canonical uppercase form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "PHONE",
            Self::Email => "EMAIL",
            Self::Name => "NAME",
            Self::Address => "ADDRESS",
            Self::CreditCard => "CREDIT_CARD",
            Self::Ssn => "SSN",
            Self::Zipcode => "ZIPCODE",
            Self::Date => "DATE",
            Self::Ipv4 => "IPV4",
            Self::Ipv6 => "IPV6",
            Self::Url => "URL",
            Self::Masked => "MASKED",
        }
    }

    /// Look up a detector label, ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "name" => Some(Self::Name),
            "address" => Some(Self::Address),
            "credit_card" => Some(Self::CreditCard),
            "ssn" => Some(Self::Ssn),
            "zipcode" => Some(Self::Zipcode),
            "date" => Some(Self::Date),
            "ipv4" => Some(Self::Ipv4),
            "ipv6" => Some(Self::Ipv6),
            "url" => Some(Self::Url),
            "masked" => Some(Self::Masked),
            _ => None,
        }
    }
}

/// Map any detector label onto the canonical vocabulary
///
/// Total and pure: unknown labels are returned uppercased verbatim.
///
/// ```
/// use sniffnmask::sanitization::normalizer::normalize_label;
///
/// assert_eq!(normalize_label("credit_card"), "CREDIT_CARD");
/// assert_eq!(normalize_label("Passport"), "PASSPORT");
/// ```
pub fn normalize_label(label: &str) -> String {
    match EntityLabel::from_label(label) {
        Some(known) => known.as_str().to_string(),
        None => label.to_uppercase(),
    }
}
