use std::sync::Arc;

use common::{
    nav::INavService,
    pdf::IPdfService,
    util::state::{NavBaseServiceCollection, NavSettings},
};

pub type Services = Arc<ServiceCollection>;

pub struct ServiceCollection {
    pub nav_service: Arc<dyn INavService>,
    pub pdf_service: Arc<dyn IPdfService>,
}

impl ServiceCollection {
    pub fn build(settings: &NavSettings) -> Result<Arc<Self>, &'static str> {
        let base = NavBaseServiceCollection::build(settings)?;
        Ok(Arc::new(ServiceCollection {
            nav_service: base.nav_service.clone(),
            pdf_service: base.pdf_service.clone(),
        }))
    }
}
