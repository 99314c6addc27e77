//! The customer onboarding record.
//!
//! JSON names follow the onboarding API. Every sensitive field is a string
//! and carries its kind explicitly, so masking never depends on field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Aggregate, DateOfBirth, DocumentNumber, Email, PhoneNumber};

#[derive(Clone, Default, PartialEq, Serialize, Deserialize, Aggregate)]
#[serde(default)]
pub struct Customer {
    pub id: String,
    pub verified: bool,
    pub verified_id: String,
    pub partner_id: String,
    pub platform: String,
    pub consent: bool,
    pub full_name: String,
    #[pii(Email)]
    pub email: String,
    #[pii(PhoneNumber)]
    pub phone: String,
    #[pii(DateOfBirth)]
    pub dob: String,
    pub marital_status: String,
    pub address: CustomerAddress,
    pub passport: Passport,
    pub pan: Pan,
    pub documents: Vec<Docs>,
    pub consents: Vec<ConsentDetail>,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Aggregate)]
#[serde(default)]
pub struct Address {
    #[pii]
    pub street: String,
    #[pii]
    pub street_line_2: String,
    #[pii]
    pub city: String,
    #[pii]
    pub state: String,
    #[pii]
    pub zip: String,
    #[pii]
    pub country: String,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Aggregate)]
#[serde(default)]
pub struct CustomerAddress {
    pub current_address: Address,
    pub permanent_address: Address,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Aggregate)]
#[serde(default)]
pub struct Passport {
    #[pii(DocumentNumber)]
    pub passport_number: String,
    pub passport_name: String,
    pub passport_issue_date: String,
    pub passport_expiry_date: String,
    #[pii(DateOfBirth)]
    pub passport_dob: String,
    #[pii]
    pub passport_address_line_1: String,
    #[pii]
    pub passport_address_line_2: String,
    pub passport_postal_code: String,
    pub passport_city: String,
    pub passport_state: String,
    pub passport_country: String,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Aggregate)]
#[serde(default)]
pub struct Pan {
    #[pii(DocumentNumber)]
    pub pan_number: String,
    #[pii(DateOfBirth)]
    pub pan_dob: String,
}

/// A supporting identity document.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Aggregate)]
#[serde(default)]
pub struct Docs {
    pub doc_type: String,
    #[pii(DocumentNumber)]
    pub doc_number: String,
    pub expiration_date: String,
    #[serde(rename = "issued_count")]
    pub issued_country: String,
    pub image_url: String,
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize, Aggregate)]
#[serde(default)]
pub struct ConsentDetail {
    pub application_name: String,
    pub consent_given: bool,
    pub consent_date: DateTime<Utc>,
}
