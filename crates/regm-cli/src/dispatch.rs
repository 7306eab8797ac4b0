use color_eyre::{eyre::eyre, Result};
use regm_core::{
    AddRequest, CommandContext, CommandGroup, CommandInfo, DeleteRequest, ExecutionOutcome,
    ProbeReporter, ProbeRequest, UseRequest,
};

use crate::cli::CommandGroupCli;

pub fn dispatch_command(
    ctx: &CommandContext,
    group: &CommandGroupCli,
    reporter: &dyn ProbeReporter,
) -> Result<(CommandInfo, ExecutionOutcome)> {
    match group {
        CommandGroupCli::Ls => {
            let info = CommandInfo::new(CommandGroup::List, "ls");
            core_call(info, || regm_core::list_registries(ctx))
        }
        CommandGroupCli::Current => {
            let info = CommandInfo::new(CommandGroup::Current, "current");
            core_call(info, || regm_core::show_current(ctx))
        }
        CommandGroupCli::Use(args) => {
            let info = CommandInfo::new(CommandGroup::Use, "use");
            let request = UseRequest {
                args: args.args.clone(),
            };
            core_call(info, || regm_core::use_registry(ctx, &request))
        }
        CommandGroupCli::Add(args) => {
            let info = CommandInfo::new(CommandGroup::Add, "add");
            let request = AddRequest {
                args: args.args.clone(),
            };
            core_call(info, || regm_core::add_registry(ctx, &request))
        }
        CommandGroupCli::Del(args) => {
            let info = CommandInfo::new(CommandGroup::Del, "del");
            let request = DeleteRequest {
                args: args.args.clone(),
            };
            core_call(info, || regm_core::delete_registry(ctx, &request))
        }
        CommandGroupCli::Test(args) => {
            let info = CommandInfo::new(CommandGroup::Test, "test");
            let request = ProbeRequest {
                args: args.args.clone(),
            };
            core_call(info, || regm_core::probe_registries(ctx, &request, reporter))
        }
    }
}

fn core_call<F>(info: CommandInfo, action: F) -> Result<(CommandInfo, ExecutionOutcome)>
where
    F: FnOnce() -> anyhow::Result<ExecutionOutcome>,
{
    match action() {
        Ok(outcome) => Ok((info, outcome)),
        Err(err) => Err(eyre!("regm {} failed: {err:?}", info.name)),
    }
}
