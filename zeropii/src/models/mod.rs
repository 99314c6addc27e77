//! Onboarding data models.

mod customer;

pub use customer::{Address, ConsentDetail, Customer, CustomerAddress, Docs, Pan, Passport};
