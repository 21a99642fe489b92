use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootDto<'a> {
    pub version: &'a str,
    pub name: &'a str,
    #[serde(rename = "_links")]
    pub _links: RootLinks<'a>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootLinks<'a> {
    pub hello_world: &'a str,
    pub start_job: &'a str,
    pub check_job: &'a str,
    pub job_pdf: &'a str,
}
