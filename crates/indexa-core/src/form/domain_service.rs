// Domain service create/edit form.

use indexa_api::types::{CreateDomainService, DomainService, UpdateDomainService};

use super::FormErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainServiceForm {
    pub name: String,
    pub domains: Vec<String>,
    pub base_url: String,
    pub indexes_path_prefix: String,
    pub excluded_entities: Vec<String>,
    pub enabled: bool,
}

impl Default for DomainServiceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            domains: Vec::new(),
            base_url: String::new(),
            indexes_path_prefix: String::new(),
            excluded_entities: Vec::new(),
            enabled: true,
        }
    }
}

impl From<&DomainService> for DomainServiceForm {
    fn from(service: &DomainService) -> Self {
        Self {
            name: service.name.clone().unwrap_or_default(),
            domains: service.domains.clone().unwrap_or_default(),
            base_url: service.base_url.clone().unwrap_or_default(),
            indexes_path_prefix: service.indexes_path_prefix.clone().unwrap_or_default(),
            excluded_entities: service.excluded_entities.clone().unwrap_or_default(),
            enabled: service.enabled.unwrap_or(false),
        }
    }
}

impl DomainServiceForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.name.is_empty() {
            errors.push("name", "Name is required");
        }
        if self.domains.is_empty() {
            errors.push("domains", "At least one domain is required");
        }
        if self.base_url.is_empty() {
            errors.push("base_url", "Base URL is required");
        }
        if self.indexes_path_prefix.is_empty() {
            errors.push("indexes_path_prefix", "Indexes path prefix is required");
        }
        errors.into_result()
    }

    pub fn into_create(self) -> Result<CreateDomainService, FormErrors> {
        self.validate()?;
        Ok(CreateDomainService {
            name: self.name,
            domains: self.domains,
            base_url: self.base_url,
            indexes_path_prefix: self.indexes_path_prefix,
            excluded_entities: self.excluded_entities,
            enabled: self.enabled,
        })
    }

    /// Edits send every field, not just the changed ones.
    pub fn into_update(self) -> Result<UpdateDomainService, FormErrors> {
        let data = self.into_create()?;
        Ok(UpdateDomainService {
            name: Some(data.name),
            domains: Some(data.domains),
            base_url: Some(data.base_url),
            indexes_path_prefix: Some(data.indexes_path_prefix),
            excluded_entities: Some(data.excluded_entities),
            enabled: Some(data.enabled),
        })
    }
}
