//! UWS simple types

use crate::model::xml_enum;

xml_enum! {
    /// Characterization of a job error
    pub enum ErrorType {
        /// The error is transient and the job may be rerun
        Transient => "transient",
        /// The error is fatal and the job may not be rerun
        Fatal => "fatal",
    }
}

impl Default for ErrorType {
    fn default() -> Self {
        ErrorType::Transient
    }
}

xml_enum! {
    /// Version of the UWS standard a server complies with
    pub enum UwsVersion {
        /// UWS 1.1
        V1_1 => "1.1",
        /// UWS 1.0
        V1_0 => "1.0",
    }
}

impl Default for UwsVersion {
    fn default() -> Self {
        UwsVersion::V1_1
    }
}

xml_enum! {
    /// Phases of job execution
    pub enum ExecutionPhase {
        /// The job is being set up; no request to run has occurred
        Pending => "PENDING",
        /// Accepted for execution but waiting in a queue
        Queued => "QUEUED",
        /// Running
        Executing => "EXECUTING",
        /// Completed successfully
        Completed => "COMPLETED",
        /// Some form of error has occurred
        Error => "ERROR",
        /// The job is in an unknown state
        Unknown => "UNKNOWN",
        /// Held pending execution; will not run automatically
        Held => "HELD",
        /// Suspended by the system during execution
        Suspended => "SUSPENDED",
        /// Aborted by the user or by the server
        Aborted => "ABORTED",
        /// Archived at destruction time; metadata is kept
        Archived => "ARCHIVED",
    }
}

impl ExecutionPhase {
    /// Phases after which the job will not change on its own
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionPhase::Completed
                | ExecutionPhase::Error
                | ExecutionPhase::Aborted
                | ExecutionPhase::Archived
        )
    }
}
