//! Daily statistics command.

use sleep_common::SleepError;
use sleep_core::replies::PRIVATE_STATISTICS_REPLY;

use crate::framework::{Command, CommandFuture, Context, Error};

/// Name of the statistics command.
pub const STATISTICS_COMMAND: &str = "早晚安统计";

/// `早晚安统计`: shows today's check-in statistics for the current group.
pub fn statistics() -> Command {
    Command {
        name: STATISTICS_COMMAND,
        description: "查看早晚安统计信息",
        action: run,
    }
}

fn run(ctx: Context<'_>) -> CommandFuture<'_> {
    Box::pin(report(ctx))
}

async fn report(ctx: Context<'_>) -> Result<Option<String>, Error> {
    let session = ctx.session.ok_or(SleepError::MissingSession)?;

    let Some((_, group_id)) = session.group_sender() else {
        return Ok(Some(PRIVATE_STATISTICS_REPLY.to_string()));
    };

    let config = ctx.config();
    let report = ctx.data.service.statistics(&config, group_id, ctx.now).await?;
    Ok(Some(report.to_string()))
}
