use std::{collections::HashMap, sync::Arc};

use crate::{
    nav::{CompanyRegistry, CredentialSettings, INavService, NavBinding, NavService, SoapCallHandleFactory},
    pdf::{IPdfService, PdfPollSettings, PdfPoller},
};

pub struct NavSettings {
    pub companies: HashMap<String, String>,
    pub url_template: Option<String>,
    pub codeunit: String,
    pub greeting_company: String,
    pub binding: NavBinding,
    pub credentials: CredentialSettings,
    pub pdf: PdfPollSettings,
}

pub struct NavBaseServiceCollection {
    pub nav_service: Arc<dyn INavService>,
    pub pdf_service: Arc<dyn IPdfService>,
}

impl NavBaseServiceCollection {
    pub fn build(settings: &NavSettings) -> Result<Arc<Self>, &'static str> {
        let registry = CompanyRegistry::new(settings.companies.clone(), settings.url_template.clone());
        if registry.is_empty() {
            return Err("no companies configured, set NAV_COMPANIES or NAV_URL_TEMPLATE");
        }
        let handle_factory = SoapCallHandleFactory {
            codeunit: settings.codeunit.clone(),
            binding: settings.binding.clone(),
            credentials: settings.credentials.build(),
        };
        Ok(Arc::new(NavBaseServiceCollection {
            nav_service: Arc::new(NavService {
                registry: Arc::new(registry),
                handle_factory: Arc::new(handle_factory),
                greeting_company: settings.greeting_company.clone(),
            }),
            pdf_service: Arc::new(PdfPoller { settings: settings.pdf.clone() }),
        }))
    }
}

/// Parses `NAV_COMPANIES`, a JSON object of company name to codeunit URL.
pub fn parse_companies(raw: &str) -> Result<HashMap<String, String>, &'static str> {
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }
    serde_json::from_str(raw).map_err(|_| "NAV_COMPANIES must be a JSON object of company name to URL")
}
