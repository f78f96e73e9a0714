//! Morning check-in command.

use sleep_common::CheckinKind;

use crate::framework::{Command, CommandFuture, Context};

/// `morning`: records that the sender woke up.
pub fn morning() -> Command {
    Command {
        name: CheckinKind::Morning.command_name(),
        description: "早安消息打卡",
        action: run,
    }
}

fn run(ctx: Context<'_>) -> CommandFuture<'_> {
    Box::pin(crate::greeting::respond(ctx, CheckinKind::Morning))
}
