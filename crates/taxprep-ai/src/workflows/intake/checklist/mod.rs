mod templates;

pub use templates::DocumentTemplate;

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use super::domain::{
    Client, DocumentChecklist, DocumentItem, SituationFlag,
};
use self::templates::{
    deduction_document_keys, income_document_keys, situation_document_keys, template,
    BASE_DOCUMENT_KEYS,
};

static DOCUMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_item_id() -> String {
    let id = DOCUMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("doc-{id:06}")
}

/// The deduplicated template keys a client's attributes call for.
pub fn document_keys_for(client: &Client) -> BTreeSet<&'static str> {
    let mut keys: BTreeSet<&'static str> = BASE_DOCUMENT_KEYS.into_iter().collect();

    for income in &client.income_types {
        keys.extend(income_document_keys(*income));
    }

    for deduction in &client.deductions {
        keys.extend(deduction_document_keys(*deduction));
    }

    for flag in [
        SituationFlag::Crypto,
        SituationFlag::ForeignAccounts,
        SituationFlag::RentalProperty,
        SituationFlag::BusinessIncome,
    ] {
        if client.situation(flag) {
            keys.extend(situation_document_keys(flag));
        }
    }

    keys
}

/// Materialize the checklist for a client: fresh item ids, collected flags
/// back-filled from the client's collected-document keys, required items
/// first, then ascending category name.
pub fn generate(client: &Client, generated_at: DateTime<Utc>) -> DocumentChecklist {
    let mut items: Vec<DocumentItem> = document_keys_for(client)
        .into_iter()
        .filter_map(template)
        .map(|template| DocumentItem {
            id: next_item_id(),
            key: template.key.to_string(),
            name: template.name.to_string(),
            description: template.description.to_string(),
            category: template.category,
            required: template.required,
            collected: client.documents_collected.contains(template.key),
            source_hint: template.source_hint.map(str::to_string),
        })
        .collect();

    // Stable sort over key-ordered input keeps regeneration deterministic.
    items.sort_by(|a, b| {
        b.required
            .cmp(&a.required)
            .then_with(|| a.category.label().cmp(b.category.label()))
    });

    DocumentChecklist {
        client_id: client.id.clone(),
        items,
        generated_at,
        updated_at: generated_at,
    }
}

/// Item ids of required documents the client has not yet handed over.
pub fn pending_required_ids(checklist: &DocumentChecklist) -> Vec<String> {
    checklist
        .items
        .iter()
        .filter(|item| item.required && !item.collected)
        .map(|item| item.id.clone())
        .collect()
}
