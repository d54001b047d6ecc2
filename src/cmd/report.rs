use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::report::{ReportOutcome, run_report};

pub async fn run(ctx: &AppContext) -> AppResult<ReportOutcome> {
    run_report(ctx).await
}
