use crate::attio::CrmClient;
use crate::notes::NoteRow;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Resolved company names, iterable in the order the ids were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyNames {
    order: Vec<String>,
    names: HashMap<String, String>
}

impl CompanyNames {
    pub fn get(&self, record_id: &str) -> Option<&str> {
        self.names.get(record_id).map(String::as_str)
    }

    pub fn contains(&self, record_id: &str) -> bool {
        self.names.contains_key(record_id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .filter_map(|id| self.names.get(id).map(|name| (id.as_str(), name.as_str())))
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|(_, name)| name).collect()
    }

    fn insert(&mut self, record_id: &str, name: String) {
        self.order.push(record_id.to_string());
        self.names.insert(record_id.to_string(), name);
    }
}

/// Looks up company display names for notes attached to companies.
///
/// Lookups are memoised for the lifetime of the resolver, which is meant to
/// be one page render. Failed lookups are remembered too, so an id is never
/// requested twice.
pub struct CompanyResolver<'a> {
    client: &'a dyn CrmClient,
    attempted: HashMap<String, Option<String>>,
    lookups: usize
}

impl<'a> CompanyResolver<'a> {
    pub fn new(client: &'a dyn CrmClient) -> Self {
        Self {
            client,
            attempted: HashMap::new(),
            lookups: 0
        }
    }

    /// Number of lookup requests issued so far.
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    pub async fn lookup(&mut self, record_id: &str) -> Option<String> {
        if let Some(cached) = self.attempted.get(record_id) {
            return cached.clone();
        }

        self.lookups += 1;
        let name = match self.client.get_company_name(record_id).await {
            Ok(Some(name)) => Some(name),
            Ok(None) => {
                debug!(record_id, "Company record has no name");
                None
            }
            Err(e) => {
                warn!(record_id, error = %e, "Company lookup failed");
                None
            }
        };

        self.attempted.insert(record_id.to_string(), name.clone());
        name
    }

    pub async fn resolve(&mut self, rows: &[NoteRow]) -> CompanyNames {
        let mut resolved = CompanyNames::default();

        for record_id in rows.iter().filter_map(NoteRow::company_id) {
            if resolved.contains(record_id) {
                continue;
            }
            if let Some(name) = self.lookup(record_id).await {
                resolved.insert(record_id, name);
            }
        }

        debug!(
            resolved = resolved.len(),
            lookups = self.lookups,
            "Resolved company names"
        );
        resolved
    }
}
