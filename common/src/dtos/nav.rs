use serde::{Deserialize, Serialize};

use crate::{models::PdfArtifact, util::serialize::base64};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HelloWorldRequestDto {
    pub input_text: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StartJobRequestDto {
    pub job_id: String,
    pub company_name: String,
    pub input_json: String,
}

/// Body of `checkjob` and `job/pdf`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobRequestDto {
    pub job_id: String,
    pub company_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultDto {
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PdfDto {
    pub job_id: String,
    pub company_name: String,
    pub file_name: String,
    #[serde(with = "base64")]
    pub base64: Vec<u8>,
}

impl From<PdfArtifact> for PdfDto {
    fn from(artifact: PdfArtifact) -> Self {
        PdfDto {
            job_id: artifact.job_id,
            company_name: artifact.company_name,
            file_name: artifact.file_name,
            base64: artifact.content,
        }
    }
}
