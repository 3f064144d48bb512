//! Built-in Demo Suite
//!
//! Five ways to copy a flat contact record, registered as competing
//! variants: two JSON paths through serde_json, a TOML round-trip, a native
//! clone, and an explicit per-field copy. Each invocation builds a fresh
//! record, performs the copy, and returns the copied value so the harness
//! can observe it.

use paceoff_core::Harness;
use serde::{Deserialize, Serialize};

/// Flat contact record used as the copy fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    id: u64,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    street: String,
    city: String,
    region: String,
    postal_code: String,
    country: String,
    company: String,
    department: String,
    title: String,
    notes: String,
}

/// Build the fixture record. Fresh per invocation, so allocation of the
/// source object is part of every variant's cost equally.
pub fn fixture() -> Contact {
    Contact {
        id: 42,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+44 20 7946 0958".to_string(),
        street: "12 St James's Square".to_string(),
        city: "London".to_string(),
        region: "Greater London".to_string(),
        postal_code: "SW1Y 4LB".to_string(),
        country: "United Kingdom".to_string(),
        company: "Analytical Engines Ltd".to_string(),
        department: "Research".to_string(),
        title: "Principal Engineer".to_string(),
        notes: "Prefers punched cards over JSON".to_string(),
    }
}

/// Explicit per-field copy, the hand-written-mapper strategy.
fn copy_fields(src: &Contact) -> Contact {
    Contact {
        id: src.id,
        first_name: src.first_name.clone(),
        last_name: src.last_name.clone(),
        email: src.email.clone(),
        phone: src.phone.clone(),
        street: src.street.clone(),
        city: src.city.clone(),
        region: src.region.clone(),
        postal_code: src.postal_code.clone(),
        country: src.country.clone(),
        company: src.company.clone(),
        department: src.department.clone(),
        title: src.title.clone(),
        notes: src.notes.clone(),
    }
}

/// Register the demo variants on a fresh harness.
pub fn build_suite() -> anyhow::Result<Harness> {
    let mut harness = Harness::new();

    harness.register("serde-json-string", || {
        let contact = fixture();
        let s = serde_json::to_string(&contact).expect("serialize contact");
        let copied: Contact = serde_json::from_str(&s).expect("deserialize contact");
        copied
    })?;

    harness.register("serde-json-value", || {
        let contact = fixture();
        let value = serde_json::to_value(&contact).expect("serialize contact");
        let copied: Contact = serde_json::from_value(value).expect("deserialize contact");
        copied
    })?;

    harness.register("toml-string", || {
        let contact = fixture();
        let s = toml::to_string(&contact).expect("serialize contact");
        let copied: Contact = toml::from_str(&s).expect("deserialize contact");
        copied
    })?;

    harness.register("clone", || {
        let contact = fixture();
        contact.clone()
    })?;

    harness.register("field-copy", || {
        let contact = fixture();
        copy_fields(&contact)
    })?;

    Ok(harness)
}
