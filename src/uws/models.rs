//! UWS job, job list and result models

use crate::datetime::UtcTimestamp;
use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::Result;
use crate::model::{XmlElement, XmlModel};
use crate::namespaces::{Namespace, XmlName, UWS, XLINK};
use crate::xlink::XlinkType;
use indexmap::IndexMap;
use serde::Serialize;

use super::parameters::{JobParameters, ParameterMap};
use super::types::{ErrorType, ExecutionPhase, UwsVersion};
use super::NSMAP;

/// A short summary of an error
///
/// A fuller representation may be retrieved from `/{jobs}/{job-id}/error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorSummary {
    /// A short description of the error
    pub message: String,
    /// Characterization of the type of the error
    pub error_type: ErrorType,
    /// If true, a more detailed error is available
    pub has_detail: bool,
}

impl ErrorSummary {
    /// Create an error summary
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type,
            has_detail: false,
        }
    }

    /// Set the detail flag
    pub fn with_detail(mut self, has_detail: bool) -> Self {
        self.has_detail = has_detail;
        self
    }
}

impl XmlElement for ErrorSummary {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            message: node.child_value(UWS.name("message"))?.unwrap_or_default(),
            error_type: node.attr_value("type".into())?.unwrap_or_default(),
            has_detail: node.attr_value("hasDetail".into())?.unwrap_or(false),
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_value_attr("type".into(), &self.error_type);
        element.set_value_attr("hasDetail".into(), &self.has_detail);
        element.push_value(UWS.name("message"), &self.message);
    }
}

impl XmlModel for ErrorSummary {
    const TAG: XmlName = UWS.name("errorSummary");
    const NSMAP: &'static [Namespace] = NSMAP;
}

const RESULT_ATTRS: &[&str] = &["id", "size", "mime-type"];

/// A reference to a job result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultReference {
    /// The identifier of the result
    pub id: String,
    /// The xlink type of the reference
    pub xlink_type: Option<XlinkType>,
    /// The link to the result
    pub href: Option<String>,
    /// The size of the result in bytes
    pub size: Option<u64>,
    /// The MIME type of the result
    pub mime_type: Option<String>,
    /// Any other unqualified attributes
    pub extra_attributes: IndexMap<String, String>,
}

impl ResultReference {
    /// A simple link to a result
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            xlink_type: Some(XlinkType::Simple),
            ..Self::default()
        }
    }

    /// Set the link target
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Set the MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Set the size in bytes
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

impl XmlElement for ResultReference {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            id: node.required_attr("id".into())?,
            xlink_type: node.attr_value(XLINK.name("type"))?,
            href: node.attr_value(XLINK.name("href"))?,
            size: node.attr_value("size".into())?,
            mime_type: node.attr_value("mime-type".into())?,
            extra_attributes: node.extra_attrs(RESULT_ATTRS).into_iter().collect(),
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_attr("id".into(), self.id.as_str());
        element.set_opt_attr(XLINK.name("type"), self.xlink_type.as_ref());
        element.set_opt_attr(XLINK.name("href"), self.href.as_ref());
        element.set_opt_attr("size".into(), self.size.as_ref());
        element.set_opt_attr("mime-type".into(), self.mime_type.as_ref());
        for (name, value) in &self.extra_attributes {
            element.set_raw_attr(None, name.clone(), value.clone());
        }
    }
}

impl XmlModel for ResultReference {
    const TAG: XmlName = UWS.name("result");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// The results of a job, returned at `/{jobs}/{job-id}/results`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Results {
    /// References to the results
    pub results: Vec<ResultReference>,
}

impl Results {
    /// Wrap a list of result references
    pub fn new(results: Vec<ResultReference>) -> Self {
        Self { results }
    }
}

impl XmlElement for Results {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            results: node.child_models(UWS.name("result"))?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.push_models(UWS.name("result"), &self.results, options);
    }
}

impl XmlModel for Results {
    const TAG: XmlName = UWS.name("results");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A short description of a job, as listed at `/{jobs}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortJobDescription {
    /// The identifier for the job
    pub job_id: String,
    /// The execution phase
    pub phase: ExecutionPhase,
    /// A client supplied identifier
    pub run_id: Option<String>,
    /// The owner (creator) of the job; written as nil when absent
    pub owner_id: Option<String>,
    /// The instant at which the job was created
    pub creation_time: Option<UtcTimestamp>,
    /// The xlink type of the reference
    pub xlink_type: Option<XlinkType>,
    /// The link to the job
    pub href: Option<String>,
}

impl ShortJobDescription {
    /// Describe a job by id and phase
    pub fn new(job_id: impl Into<String>, phase: ExecutionPhase) -> Self {
        Self {
            job_id: job_id.into(),
            phase,
            run_id: None,
            owner_id: None,
            creation_time: None,
            xlink_type: Some(XlinkType::Simple),
            href: None,
        }
    }
}

impl XmlElement for ShortJobDescription {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            job_id: node.required_attr("id".into())?,
            phase: node.required_child_value(UWS.name("phase"))?,
            run_id: node.child_value(UWS.name("runId"))?,
            owner_id: node.nillable_child_value(UWS.name("ownerId"))?,
            creation_time: node.child_value(UWS.name("creationTime"))?,
            xlink_type: node.attr_value(XLINK.name("type"))?,
            href: node.attr_value(XLINK.name("href"))?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_attr("id".into(), self.job_id.as_str());
        element.set_opt_attr(XLINK.name("type"), self.xlink_type.as_ref());
        element.set_opt_attr(XLINK.name("href"), self.href.as_ref());
        element.push_value(UWS.name("phase"), &self.phase);
        element.push_opt_value(UWS.name("runId"), self.run_id.as_ref());
        element.push_nillable(UWS.name("ownerId"), self.owner_id.as_ref());
        element.push_opt_value(UWS.name("creationTime"), self.creation_time.as_ref());
    }
}

impl XmlModel for ShortJobDescription {
    const TAG: XmlName = UWS.name("jobref");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// The list of job references returned at `/{jobs}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Jobs {
    /// Job references
    pub jobref: Vec<ShortJobDescription>,
    /// UWS version the server complies with
    pub version: Option<UwsVersion>,
}

impl Default for Jobs {
    fn default() -> Self {
        Self {
            jobref: Vec::new(),
            version: Some(UwsVersion::V1_1),
        }
    }
}

impl Jobs {
    /// A 1.1 job list
    pub fn new(jobref: Vec<ShortJobDescription>) -> Self {
        Self {
            jobref,
            ..Self::default()
        }
    }
}

impl XmlElement for Jobs {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            jobref: node.child_models(UWS.name("jobref"))?,
            version: node.attr_value("version".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_opt_attr("version".into(), self.version.as_ref());
        element.push_models(UWS.name("jobref"), &self.jobref, options);
    }
}

impl XmlModel for Jobs {
    const TAG: XmlName = UWS.name("jobs");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// The complete representation of the state of a job
///
/// Generic over the parameter set; the default keeps every parameter in
/// an id-keyed [`ParameterMap`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSummary<P = ParameterMap> {
    /// The identifier for the job
    pub job_id: String,
    /// A client supplied identifier
    pub run_id: Option<String>,
    /// The owner of the job; written as nil when absent
    pub owner_id: Option<String>,
    /// The execution phase
    pub phase: ExecutionPhase,
    /// When the job is likely to complete; written as nil when absent
    pub quote: Option<UtcTimestamp>,
    /// The instant at which the job was created
    pub creation_time: Option<UtcTimestamp>,
    /// The instant at which the job started; written as nil when absent
    pub start_time: Option<UtcTimestamp>,
    /// The instant at which the job finished; written as nil when absent
    pub end_time: Option<UtcTimestamp>,
    /// Allowed run time in seconds, 0 meaning unlimited
    pub execution_duration: Option<i64>,
    /// When the job and its results will be destroyed; written as nil when absent
    pub destruction: Option<UtcTimestamp>,
    /// The parameters to the job
    pub parameters: Option<P>,
    /// The results of the job
    pub results: Option<Results>,
    /// A short summary of an error
    pub error_summary: Option<ErrorSummary>,
    /// Arbitrary information added by the implementation
    pub job_info: Vec<String>,
    /// UWS version the server complies with
    pub version: Option<UwsVersion>,
}

/// The representation returned for a single job resource
pub type Job<P = ParameterMap> = JobSummary<P>;

impl<P> JobSummary<P> {
    /// A job in the given phase with default values everywhere else
    pub fn new(job_id: impl Into<String>, phase: ExecutionPhase) -> Self {
        Self {
            job_id: job_id.into(),
            run_id: None,
            owner_id: None,
            phase,
            quote: None,
            creation_time: None,
            start_time: None,
            end_time: None,
            execution_duration: Some(0),
            destruction: None,
            parameters: None,
            results: Some(Results::default()),
            error_summary: None,
            job_info: Vec::new(),
            version: Some(UwsVersion::V1_1),
        }
    }

    /// Set the parameters
    pub fn with_parameters(mut self, parameters: P) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// The short form used in job lists
    pub fn to_short_description(&self) -> ShortJobDescription {
        ShortJobDescription {
            run_id: self.run_id.clone(),
            owner_id: self.owner_id.clone(),
            creation_time: self.creation_time,
            ..ShortJobDescription::new(self.job_id.clone(), self.phase)
        }
    }
}

impl<P: JobParameters> XmlElement for JobSummary<P> {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        let parameters = node
            .child(UWS.name("parameters"))
            .map(P::read_parameters)
            .transpose()?;

        Ok(Self {
            job_id: node.required_child_value(UWS.name("jobId"))?,
            run_id: node.child_value(UWS.name("runId"))?,
            owner_id: node.nillable_child_value(UWS.name("ownerId"))?,
            phase: node.required_child_value(UWS.name("phase"))?,
            quote: node.nillable_child_value(UWS.name("quote"))?,
            creation_time: node.child_value(UWS.name("creationTime"))?,
            start_time: node.nillable_child_value(UWS.name("startTime"))?,
            end_time: node.nillable_child_value(UWS.name("endTime"))?,
            execution_duration: node.child_value(UWS.name("executionDuration"))?,
            destruction: node.nillable_child_value(UWS.name("destruction"))?,
            parameters,
            results: node.child_model(UWS.name("results"))?,
            error_summary: node.child_model(UWS.name("errorSummary"))?,
            job_info: node.child_values(UWS.name("jobInfo"))?,
            version: node.attr_value("version".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_opt_attr("version".into(), self.version.as_ref());
        element.push_value(UWS.name("jobId"), &self.job_id);
        element.push_opt_value(UWS.name("runId"), self.run_id.as_ref());
        element.push_nillable(UWS.name("ownerId"), self.owner_id.as_ref());
        element.push_value(UWS.name("phase"), &self.phase);
        element.push_nillable(UWS.name("quote"), self.quote.as_ref());
        element.push_opt_value(UWS.name("creationTime"), self.creation_time.as_ref());
        element.push_nillable(UWS.name("startTime"), self.start_time.as_ref());
        element.push_nillable(UWS.name("endTime"), self.end_time.as_ref());
        element.push_opt_value(UWS.name("executionDuration"), self.execution_duration.as_ref());
        element.push_nillable(UWS.name("destruction"), self.destruction.as_ref());
        if let Some(parameters) = &self.parameters {
            parameters.write_parameters(element.push(UWS.name("parameters")), options);
        }
        element.push_opt_model(UWS.name("results"), self.results.as_ref(), options);
        element.push_opt_model(UWS.name("errorSummary"), self.error_summary.as_ref(), options);
        element.push_values(UWS.name("jobInfo"), &self.job_info);
    }
}

impl<P: JobParameters> XmlModel for JobSummary<P> {
    const TAG: XmlName = UWS.name("job");
    const NSMAP: &'static [Namespace] = NSMAP;
}
