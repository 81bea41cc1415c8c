use std::sync::Arc;
use tracing::{error, info, warn};

use super::client::{ApiError, RiskApi};
use super::domain::{RiskId, RiskRecord, RiskSubmission, SubmissionError};
use super::surface::{Navigator, Notice, UserInteraction, View, DELETE_CONFIRMATION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The prompt was declined; no request was sent.
    Cancelled,
    Deleted { navigated_to_list: bool },
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Invalid(#[from] SubmissionError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// User-facing actions on individual records.
pub struct RecordOperations<A: ?Sized> {
    api: Arc<A>,
}

impl<A: RiskApi + ?Sized> RecordOperations<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Confirms, deletes, then leaves the detail view or refreshes the current one.
    pub async fn delete_record<H>(&self, host: &mut H, id: RiskId) -> DeleteOutcome
    where
        H: UserInteraction + Navigator + ?Sized,
    {
        if !host.confirm(DELETE_CONFIRMATION) {
            info!(%id, "risk deletion cancelled");
            return DeleteOutcome::Cancelled;
        }

        if let Err(err) = self.api.delete_risk(id).await {
            error!(%id, error = %err, "error deleting risk");
            host.notify(Notice::DeleteFailed);
            return DeleteOutcome::Failed;
        }

        info!(%id, "risk deleted");
        host.notify(Notice::DeleteSucceeded);

        let on_deleted_detail = host.current_view() == View::Detail(id);
        if on_deleted_detail {
            host.navigate(View::List);
        } else {
            host.reload();
        }

        DeleteOutcome::Deleted {
            navigated_to_list: on_deleted_detail,
        }
    }

    pub fn view_record<N>(&self, navigator: &mut N, id: RiskId)
    where
        N: Navigator + ?Sized,
    {
        navigator.navigate(View::Detail(id));
    }

    /// Editing by id is not available yet; sends the user to the create flow instead.
    pub fn edit_record<H>(&self, host: &mut H, id: RiskId)
    where
        H: UserInteraction + Navigator + ?Sized,
    {
        info!(%id, "edit requested, redirecting to create flow");
        host.notify(Notice::EditUnavailable);
        host.navigate(View::Create);
    }

    pub async fn create_record<H>(
        &self,
        host: &mut H,
        submission: &RiskSubmission,
    ) -> Result<RiskRecord, CreateError>
    where
        H: UserInteraction + Navigator + ?Sized,
    {
        if let Err(err) = submission.validate() {
            host.notify(Notice::CreateFailed(err.to_string()));
            return Err(err.into());
        }

        let record = match self.api.create_risk(submission).await {
            Ok(record) => record,
            Err(err) => {
                error!(error = %err, "error creating risk");
                host.notify(Notice::CreateFailed(err.to_string()));
                return Err(err.into());
            }
        };

        let expected = submission.classification().level;
        if record.level() != expected {
            warn!(
                id = %record.id,
                reported = %record.level(),
                %expected,
                "register assigned a level that disagrees with the classifier"
            );
        }

        info!(id = %record.id, level = %record.level(), "risk created");
        host.notify(Notice::Created(record.id));
        host.navigate(View::Detail(record.id));
        Ok(record)
    }
}
