use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::storage::KeyValueStore;
use crate::store::RosterStore;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch<S: KeyValueStore>(
    command: Commands,
    json: bool,
    store: &mut RosterStore<S>,
) -> CmdResult {
    match command {
        // Read commands
        Commands::Stats => cmd_stats(store, json),

        // Write commands
        Commands::Commit(args) => cmd_commit(store, args, json),
        Commands::Uncommit(args) => {
            require_group(store, &args.pos)?;
            store.remove_last_commit(&args.pos);
            finish_group_edit(store, &args.pos, json)
        }
        Commands::Srtr(args) => {
            require_group(store, &args.id)?;
            store.update_sr_tr(&args.id, args.value);
            finish_group_edit(store, &args.id, json)
        }
        Commands::Target(args) => {
            require_group(store, &args.id)?;
            store.update_target(&args.id, args.value);
            finish_group_edit(store, &args.id, json)
        }
        Commands::SgTarget(args) => cmd_sg_target(store, args, json),
        Commands::Reset(args) => cmd_reset(store, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The store treats unknown ids as no-ops; scripts get a hard error instead
fn require_group<S: KeyValueStore>(store: &RosterStore<S>, pos_id: &str) -> CmdResult {
    if store.state().position(pos_id).is_none() {
        return Err(format!("no such group: {}", pos_id).into());
    }
    Ok(())
}

fn require_super_group<S: KeyValueStore>(store: &RosterStore<S>, sg_id: &str) -> CmdResult {
    if store.state().super_group(sg_id).is_none() {
        return Err(format!("no such super-group: {}", sg_id).into());
    }
    Ok(())
}

fn check_saved<S: KeyValueStore>(store: &mut RosterStore<S>) -> CmdResult {
    match store.take_persist_error() {
        Some(e) => Err(format!("not saved: {}", e).into()),
        None => Ok(()),
    }
}

/// Save check, then echo the group's new numbers
fn finish_group_edit<S: KeyValueStore>(
    store: &mut RosterStore<S>,
    pos_id: &str,
    json: bool,
) -> CmdResult {
    check_saved(store)?;
    let (Some(group), Some(stats)) = (store.state().position(pos_id), store.group_stats(pos_id))
    else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&group_to_json(group, stats))?);
    } else {
        println!("{}", format_stats_line(&group.id, &stats, i64::from(group.sr_tr), group.target));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_stats<S: KeyValueStore>(store: &RosterStore<S>, json: bool) -> CmdResult {
    let state = store.state();

    if json {
        let output = StatsJson {
            positions: state
                .positions
                .iter()
                .filter_map(|g| store.group_stats(&g.id).map(|s| group_to_json(g, s)))
                .collect(),
            super_groups: state
                .super_groups
                .iter()
                .filter_map(|sg| {
                    store
                        .super_group_stats(&sg.id)
                        .map(|s| super_group_to_json(sg, s))
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", stats_header("GROUP"));
    for group in &state.positions {
        if let Some(stats) = store.group_stats(&group.id) {
            let departing = i64::from(group.sr_tr);
            println!("{}", format_stats_line(&group.id, &stats, departing, group.target));
        }
    }
    if !state.super_groups.is_empty() {
        println!();
        println!("{}", stats_header("ROLLUP"));
        for sg in &state.super_groups {
            if let Some(rollup) = store.super_group_stats(&sg.id) {
                let line = format_stats_line(&sg.id, &rollup.stats, rollup.sr_tr_sum, sg.target);
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn cmd_commit<S: KeyValueStore>(
    store: &mut RosterStore<S>,
    args: CommitArgs,
    json: bool,
) -> CmdResult {
    require_group(store, &args.pos)?;
    store.add_commit(&args.pos, args.stars, args.ath);
    finish_group_edit(store, &args.pos, json)
}

fn cmd_sg_target<S: KeyValueStore>(
    store: &mut RosterStore<S>,
    args: CountArgs,
    json: bool,
) -> CmdResult {
    require_super_group(store, &args.id)?;
    store.update_super_group_target(&args.id, args.value);
    check_saved(store)?;
    let sg = store.state().super_group(&args.id);
    let (Some(sg), Some(rollup)) = (sg, store.super_group_stats(&args.id)) else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&super_group_to_json(sg, rollup))?);
    } else {
        println!("{}", format_stats_line(&sg.id, &rollup.stats, rollup.sr_tr_sum, sg.target));
    }
    Ok(())
}

fn cmd_reset<S: KeyValueStore>(store: &mut RosterStore<S>, args: ResetArgs) -> CmdResult {
    if args.srtr_only {
        store.reset_sr_tr();
        check_saved(store)?;
        println!("cleared departures in {} groups", store.state().positions.len());
    } else {
        store.reset_to_defaults();
        check_saved(store)?;
        println!("roster reset to defaults");
    }
    Ok(())
}
