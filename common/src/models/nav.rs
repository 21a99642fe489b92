use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOperation {
    HelloWorld,
    StartJob,
    CheckJob,
}

impl NavOperation {
    pub fn name(&self) -> &'static str {
        match self {
            NavOperation::HelloWorld => "HelloWorld",
            NavOperation::StartJob => "StartJob",
            NavOperation::CheckJob => "CheckJob",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HelloWorld" => Some(NavOperation::HelloWorld),
            "StartJob" => Some(NavOperation::StartJob),
            "CheckJob" => Some(NavOperation::CheckJob),
            _ => None,
        }
    }
}

impl fmt::Display for NavOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One codeunit operation with its parameters in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavCall {
    pub operation: NavOperation,
    pub parameters: Vec<(&'static str, String)>,
}

impl NavCall {
    pub fn hello_world(input_text: &str) -> Self {
        NavCall {
            operation: NavOperation::HelloWorld,
            parameters: vec![("inputText", input_text.to_string())],
        }
    }

    pub fn start_job(job_id: &str, input_json: &str) -> Self {
        NavCall {
            operation: NavOperation::StartJob,
            parameters: vec![("jobId", job_id.to_string()), ("inputJson", input_json.to_string())],
        }
    }

    pub fn check_job(job_id: &str) -> Self {
        NavCall {
            operation: NavOperation::CheckJob,
            parameters: vec![("jobId", job_id.to_string())],
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
    }
}

/// Remote endpoint a call handle is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub company: String,
    pub url: String,
}
