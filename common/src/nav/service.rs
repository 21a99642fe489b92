use std::sync::Arc;

use tracing::info;

use crate::{
    error::{NavError, NavResult},
    models::NavCall,
};

use super::{CallHandleGuard, CompanyRegistry, ICallHandleFactory};

#[async_trait::async_trait]
pub trait INavService: Send + Sync {
    async fn hello_world(&self, input_text: &str) -> NavResult<String>;
    async fn start_job(&self, job_id: &str, company_name: &str, input_json: &str) -> NavResult<String>;
    async fn check_job(&self, job_id: &str, company_name: &str) -> NavResult<String>;
}

pub struct NavService {
    pub registry: Arc<CompanyRegistry>,
    pub handle_factory: Arc<dyn ICallHandleFactory>,
    pub greeting_company: String,
}

impl NavService {
    /// Resolve, create a fresh handle, invoke once and always release the handle.
    /// If this future is dropped mid-call the guard aborts the handle.
    async fn call(&self, company_name: &str, call: NavCall) -> NavResult<String> {
        let endpoint = self.registry.resolve(company_name)?;
        let mut handle = CallHandleGuard::new(self.handle_factory.create(&endpoint)?);
        let result = handle.invoke(&call).await;
        handle.release().await;
        result
    }
}

fn require_job_id(job_id: &str) -> NavResult<()> {
    if job_id.trim().is_empty() {
        return Err(NavError::InvalidInput("JobId is required".to_string()));
    }
    Ok(())
}

#[async_trait::async_trait]
impl INavService for NavService {
    #[tracing::instrument(skip(self))]
    async fn hello_world(&self, input_text: &str) -> NavResult<String> {
        self.call(&self.greeting_company, NavCall::hello_world(input_text)).await.map_err(|err| match err {
            NavError::UnknownCompany(company) => NavError::Configuration(format!("Greeting company '{}' has no NAV endpoint", company)),
            err => err,
        })
    }

    #[tracing::instrument(skip(self, input_json))]
    async fn start_job(&self, job_id: &str, company_name: &str, input_json: &str) -> NavResult<String> {
        require_job_id(job_id)?;
        self.call(company_name, NavCall::start_job(job_id, input_json)).await
    }

    #[tracing::instrument(skip(self))]
    async fn check_job(&self, job_id: &str, company_name: &str) -> NavResult<String> {
        require_job_id(job_id)?;
        let result = self.call(company_name, NavCall::check_job(job_id)).await?;
        info!("NAV CheckJob response: {}", &result);
        Ok(result)
    }
}
