use std::collections::HashMap;

use crate::{
    error::{NavError, NavResult},
    models::Endpoint,
};

pub const COMPANY_PLACEHOLDER: &str = "{company}";

/// Company name to codeunit URL. Explicit entries win over the template.
#[derive(Debug, Clone, Default)]
pub struct CompanyRegistry {
    companies: HashMap<String, String>,
    url_template: Option<String>,
}

impl CompanyRegistry {
    pub fn new(companies: HashMap<String, String>, url_template: Option<String>) -> Self {
        let url_template = url_template.filter(|template| template.contains(COMPANY_PLACEHOLDER));
        CompanyRegistry { companies, url_template }
    }

    pub fn resolve(&self, company_name: &str) -> NavResult<Endpoint> {
        if company_name.is_empty() {
            return Err(NavError::UnknownCompany(company_name.to_string()));
        }
        if let Some(url) = self.companies.get(company_name) {
            return Ok(Endpoint {
                company: company_name.to_string(),
                url: url.clone(),
            });
        }
        match &self.url_template {
            Some(template) => Ok(Endpoint {
                company: company_name.to_string(),
                url: template.replace(COMPANY_PLACEHOLDER, &urlencoding::encode(company_name)),
            }),
            None => Err(NavError::UnknownCompany(company_name.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty() && self.url_template.is_none()
    }
}
