#![allow(dead_code)]

use keyed_store::{Identifiable, KeyedStore, Repository};
use serde::{Deserialize, Serialize};

/// Minimal entity used across the store tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Identifiable)]
pub struct Named {
    pub id: u64,
    pub name: String,
}

pub fn named(id: u64, name: &str) -> Named {
    Named {
        id,
        name: name.to_string(),
    }
}

/// Entity whose identifier is not called `id`.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable)]
pub struct Ticket {
    #[identifiable(id)]
    pub number: u32,
    pub title: String,
}

pub fn ids<T: Identifiable>(store: &KeyedStore<T>) -> Vec<u64> {
    store.get_all().iter().map(Identifiable::id).collect()
}
