#[derive(Debug, Clone)]
pub struct PdfArtifact {
    pub job_id: String,
    pub company_name: String,
    pub file_name: String,
    pub content: Vec<u8>,
}
